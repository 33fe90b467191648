use clap::Parser;
use gbm_forecast::cli::{Cli, Commands};
use gbm_forecast::config::Config;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        toml::from_str::<Config>(include_str!("../config.toml.example"))
            .map_err(|e| anyhow::anyhow!("Invalid default config: {}", e))
    })?;

    // Initialize telemetry
    let _telemetry = gbm_forecast::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Simulate(args) => {
            tracing::info!("Starting forecast");
            if !args.execute(&config).await? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  Provider: {:?} ({})",
                config.provider.kind, config.provider.base_url
            );
            println!(
                "  History: {} to {}",
                config.provider.start_date, config.provider.end_date
            );
            println!(
                "  Adjusted closes: {}",
                config.provider.use_adjusted_close
            );
            println!(
                "  Simulation: {} steps x {} trials",
                config.simulation.time_steps, config.simulation.trials
            );
            println!("  Output: {:?}", config.output.format);
            if let Some(ref chart) = config.output.chart_path {
                println!("  Chart: {}", chart.display());
            }
            println!("  Log level: {}", config.telemetry.log_level);
        }
    }

    Ok(ExitCode::SUCCESS)
}
