//! CLI interface for gbm-forecast
//!
//! Provides subcommands for:
//! - `simulate`: Fetch history, calibrate, and simulate price paths
//! - `config`: Show the effective configuration

mod simulate;

pub use simulate::SimulateArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "gbm-forecast")]
#[command(about = "Monte Carlo stock price forecaster using Geometric Brownian Motion")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a Monte Carlo forecast for a ticker
    Simulate(SimulateArgs),
    /// Show the effective configuration
    Config,
}
