//! Forecast pipeline
//!
//! fetch history -> calibrate -> simulate -> summarize. Every failure
//! short-circuits before the next stage, so an empty or too-short history
//! never allocates a price matrix.

use crate::error::ForecastError;
use crate::history::{PriceHistoryProvider, PriceSeries};
use crate::model::{
    CalibrationParams, PathSimulator, PriceMatrix, ReturnEstimator, SimulationParams,
    SimulationSummary, SummaryExtractor, DEFAULT_TIME_STEPS, DEFAULT_TRIALS,
};
use crate::report::Presenter;
use crate::telemetry::{self, GaugeMetric, LatencyMetric};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// Per-run settings
#[derive(Debug, Clone, Copy)]
pub struct RunSettings {
    /// First day of history
    pub start: NaiveDate,
    /// Last day of history
    pub end: NaiveDate,
    /// Rows in the simulated matrix
    pub time_steps: usize,
    /// Simulated paths
    pub trials: usize,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap_or_default(),
            time_steps: DEFAULT_TIME_STEPS,
            trials: DEFAULT_TRIALS,
        }
    }
}

/// Everything one successful run produces
#[derive(Debug, Clone)]
pub struct SimulationResult {
    /// Identifier attached to the run's log span
    pub run_id: Uuid,
    /// Normalized ticker
    pub ticker: String,
    /// Number of bars returned by the provider
    pub history_len: usize,
    pub calibration: CalibrationParams,
    pub matrix: PriceMatrix,
    pub summary: SimulationSummary,
}

/// Runs forecasts against a price history provider
pub struct SimulationRunner<P> {
    provider: P,
    settings: RunSettings,
    estimator: ReturnEstimator,
    simulator: PathSimulator,
    extractor: SummaryExtractor,
}

impl<P: PriceHistoryProvider> SimulationRunner<P> {
    pub fn new(provider: P, settings: RunSettings) -> Self {
        Self {
            provider,
            settings,
            estimator: ReturnEstimator::new(),
            simulator: PathSimulator::new(),
            extractor: SummaryExtractor::new(),
        }
    }

    /// Replace the path simulator (e.g. to change its size limit)
    pub fn with_simulator(mut self, simulator: PathSimulator) -> Self {
        self.simulator = simulator;
        self
    }

    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    /// Run a forecast with an unseeded random source
    pub async fn run_simulation(&self, ticker: &str) -> Result<SimulationResult, ForecastError> {
        self.run_simulation_with_rng(ticker, &mut StdRng::from_entropy())
            .await
    }

    /// Run a forecast drawing shocks from `rng`
    pub async fn run_simulation_with_rng<R: Rng + ?Sized>(
        &self,
        ticker: &str,
        rng: &mut R,
    ) -> Result<SimulationResult, ForecastError> {
        let run_id = Uuid::new_v4();
        let ticker = normalize_ticker(ticker)?;
        let span = tracing::info_span!("forecast", run_id = %run_id, ticker = %ticker);

        let series = self.fetch_history(&ticker).instrument(span.clone()).await?;
        let _enter = span.enter();
        self.forecast(run_id, &ticker, &series, rng)
    }

    /// Run a forecast and hand the outcome to `presenter`
    ///
    /// Every failure, including a failure to present the result, is reported
    /// through exactly one `Presenter::show_error` call.
    pub async fn run_and_present<R: Rng + ?Sized>(
        &self,
        ticker: &str,
        rng: &mut R,
        presenter: &mut dyn Presenter,
    ) -> Result<SimulationResult, ForecastError> {
        let outcome = match self.run_simulation_with_rng(ticker, rng).await {
            Ok(result) => match presenter.show_result(&result) {
                Ok(()) => Ok(result),
                Err(e) => Err(ForecastError::Output(format!("{:#}", e))),
            },
            Err(err) => Err(err),
        };

        match &outcome {
            Ok(_) => telemetry::record_run("ok"),
            Err(err) => {
                telemetry::record_run(err.kind());
                tracing::warn!(error = %err, kind = err.kind(), "Forecast failed");
                if let Err(e) = presenter.show_error(err) {
                    tracing::error!(error = %e, "Failed to present error");
                }
            }
        }

        outcome
    }

    /// Fetch history, treating an empty series as an unknown symbol
    async fn fetch_history(&self, ticker: &str) -> Result<PriceSeries, ForecastError> {
        let started = Instant::now();
        let series = self
            .provider
            .fetch_closes(ticker, self.settings.start, self.settings.end)
            .await?;
        telemetry::record_latency(LatencyMetric::HistoryFetch, started.elapsed());

        if series.is_empty() {
            return Err(ForecastError::DataNotFound {
                ticker: ticker.to_string(),
            });
        }

        tracing::debug!(bars = series.len(), "History loaded");
        Ok(series)
    }

    fn forecast<R: Rng + ?Sized>(
        &self,
        run_id: Uuid,
        ticker: &str,
        series: &PriceSeries,
        rng: &mut R,
    ) -> Result<SimulationResult, ForecastError> {
        let calibration = self.estimator.estimate(series)?;
        tracing::info!(
            drift = calibration.drift,
            volatility = calibration.volatility,
            observations = calibration.observations,
            "Calibrated"
        );
        telemetry::set_gauge(GaugeMetric::CalibratedDrift, calibration.drift);
        telemetry::set_gauge(GaugeMetric::CalibratedVolatility, calibration.volatility);

        // A successful calibration implies at least three valid closes
        let initial_price = series
            .last_close()
            .ok_or_else(|| ForecastError::InvalidParameter("no valid last close".to_string()))?;

        let params = SimulationParams::from_calibration(
            &calibration,
            initial_price,
            self.settings.time_steps,
            self.settings.trials,
        );

        let started = Instant::now();
        let matrix = self.simulator.simulate(&params, rng)?;
        telemetry::record_latency(LatencyMetric::Simulation, started.elapsed());

        let summary = self.extractor.summarize(&matrix);
        telemetry::set_gauge(GaugeMetric::ExpectedPrice, summary.expected_price);
        tracing::info!(
            current_price = summary.current_price,
            expected_price = summary.expected_price,
            steps = matrix.steps(),
            trials = matrix.trials(),
            "Simulation complete"
        );

        Ok(SimulationResult {
            run_id,
            ticker: ticker.to_string(),
            history_len: series.len(),
            calibration,
            matrix,
            summary,
        })
    }
}

/// Trim and upper-case a user supplied ticker
///
/// Accepts letters, digits and the `.^=-` punctuation used by exchange
/// suffixes, indices and currency pairs (`BRK-B`, `^GSPC`, `EURUSD=X`).
pub fn normalize_ticker(ticker: &str) -> Result<String, ForecastError> {
    let ticker = ticker.trim().to_uppercase();
    if ticker.is_empty() {
        return Err(ForecastError::InvalidParameter(
            "ticker symbol must not be empty".to_string(),
        ));
    }
    if let Some(c) = ticker
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '^' | '=' | '-')))
    {
        return Err(ForecastError::InvalidParameter(format!(
            "ticker symbol {:?} contains unsupported character {:?}",
            ticker, c
        )));
    }
    Ok(ticker)
}
