//! Simulate command implementation

use crate::config::{Config, EndDate, OutputFormat, ProviderKind};
use crate::history::{JsonFileProvider, PriceHistoryProvider, YahooChartClient, YahooConfig};
use crate::model::PathSimulator;
use crate::pipeline::{RunSettings, SimulationRunner};
use crate::report::{ChartPresenter, JsonPresenter, Presenter, SvgChart, TerminalPresenter};
use chrono::NaiveDate;
use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Ticker symbol (case-insensitive)
    #[arg(default_value = "AAPL")]
    pub ticker: String,

    /// Time steps per path, including the starting price
    #[arg(long)]
    pub steps: Option<usize>,

    /// Number of simulated paths
    #[arg(long)]
    pub trials: Option<usize>,

    /// Seed the random source for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// First day of history (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last day of history (YYYY-MM-DD or "today")
    #[arg(long)]
    pub end: Option<EndDate>,

    /// Read history from a JSON file instead of the network
    #[arg(long)]
    pub prices_file: Option<PathBuf>,

    /// Write an SVG chart of the simulated paths
    #[arg(long)]
    pub chart: Option<PathBuf>,

    /// Output format: table or json
    #[arg(long)]
    pub format: Option<OutputFormat>,
}

impl SimulateArgs {
    /// Run settings from config, overridden by flags
    pub fn settings(&self, config: &Config) -> RunSettings {
        RunSettings {
            start: self.start.unwrap_or(config.provider.start_date),
            end: self.end.unwrap_or(config.provider.end_date).resolve(),
            time_steps: self.steps.unwrap_or(config.simulation.time_steps),
            trials: self.trials.unwrap_or(config.simulation.trials),
        }
    }

    fn provider(&self, config: &Config) -> anyhow::Result<Box<dyn PriceHistoryProvider>> {
        let file = self
            .prices_file
            .clone()
            .or_else(|| match config.provider.kind {
                ProviderKind::File => config.provider.file_path.clone(),
                ProviderKind::Yahoo => None,
            });

        match (config.provider.kind, file) {
            (_, Some(path)) => {
                tracing::info!(path = %path.display(), "Using price file");
                Ok(Box::new(JsonFileProvider::new(path)))
            }
            (ProviderKind::File, None) => {
                anyhow::bail!("provider.kind = \"file\" requires provider.file_path or --prices-file")
            }
            (ProviderKind::Yahoo, None) => {
                let client = YahooChartClient::with_config(YahooConfig {
                    base_url: config.provider.base_url.clone(),
                    timeout: Duration::from_secs(config.provider.timeout_secs),
                    user_agent: config.provider.user_agent.clone(),
                    use_adjusted_close: config.provider.use_adjusted_close,
                })?;
                Ok(Box::new(client))
            }
        }
    }

    fn presenter(&self, config: &Config) -> Box<dyn Presenter> {
        let base: Box<dyn Presenter> = match self.format.unwrap_or(config.output.format) {
            OutputFormat::Table => Box::new(TerminalPresenter::stdio()),
            OutputFormat::Json => Box::new(JsonPresenter::stdout()),
        };

        match self.chart.clone().or_else(|| config.output.chart_path.clone()) {
            Some(path) => Box::new(ChartPresenter::new(base, SvgChart::new(path))),
            None => base,
        }
    }

    /// Run the forecast; returns whether it succeeded
    pub async fn execute(&self, config: &Config) -> anyhow::Result<bool> {
        let settings = self.settings(config);
        let runner = SimulationRunner::new(self.provider(config)?, settings)
            .with_simulator(PathSimulator::with_max_cells(config.simulation.max_cells));
        let mut presenter = self.presenter(config);

        tracing::info!(
            ticker = %self.ticker,
            start = %settings.start,
            end = %settings.end,
            steps = settings.time_steps,
            trials = settings.trials,
            seeded = self.seed.is_some(),
            "Running simulation"
        );

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let outcome = runner
            .run_and_present(&self.ticker, &mut rng, presenter.as_mut())
            .await;

        Ok(outcome.is_ok())
    }
}
