//! gbm-forecast: Monte Carlo stock price forecasts
//!
//! This library provides the core components for:
//! - Daily price history from Yahoo Finance or local JSON files
//! - Drift and volatility calibration from log-returns
//! - Geometric Brownian Motion path simulation
//! - Summary statistics of the simulated terminal prices
//! - Terminal, JSON, and SVG chart presentation
//! - Structured logging and run metrics

pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod telemetry;

pub use error::ForecastError;
pub use pipeline::{normalize_ticker, RunSettings, SimulationResult, SimulationRunner};
