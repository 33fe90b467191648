//! Forecast model module
//!
//! Calibrates GBM drift and volatility from historical closes, evolves
//! Monte Carlo price paths, and reduces them to display statistics.

mod gbm;
mod matrix;
mod returns;
mod summary;

pub use gbm::{
    PathSimulator, SimulationParams, DEFAULT_MAX_CELLS, DEFAULT_TIME_STEPS, DEFAULT_TRIALS,
};
pub use matrix::PriceMatrix;
pub use returns::ReturnEstimator;
pub use summary::{SimulationSummary, SummaryExtractor};

use serde::{Deserialize, Serialize};

/// Trading days per year, used to annualize per-step statistics
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Per-step drift and volatility estimated from log-returns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationParams {
    /// Mean log-return per step (mu)
    pub drift: f64,
    /// Sample standard deviation of log-returns per step (sigma), never negative
    pub volatility: f64,
    /// Number of log-returns the estimate was computed from
    pub observations: usize,
}

impl CalibrationParams {
    /// Per-step variance
    pub fn variance(&self) -> f64 {
        self.volatility * self.volatility
    }

    /// Volatility scaled by the square root of `periods_per_year`
    pub fn annualized_volatility(&self, periods_per_year: f64) -> f64 {
        self.volatility * periods_per_year.sqrt()
    }

    /// Drift scaled by `periods_per_year`
    pub fn annualized_drift(&self, periods_per_year: f64) -> f64 {
        self.drift * periods_per_year
    }
}
