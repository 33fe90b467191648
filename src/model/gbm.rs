//! Geometric Brownian Motion path simulator
//!
//! Each step multiplies the previous price by `exp(mu + sigma * z)` with
//! `z ~ N(0, 1)` drawn independently per trial and step:
//! S[t] = S[t-1] * exp(mu + sigma * z[t])

use super::{CalibrationParams, PriceMatrix};
use crate::error::ForecastError;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Default number of time steps (one trading year)
pub const DEFAULT_TIME_STEPS: usize = 252;

/// Default number of simulated paths
pub const DEFAULT_TRIALS: usize = 1000;

/// Default cap on `steps * trials`
pub const DEFAULT_MAX_CELLS: usize = 50_000_000;

/// Inputs to one simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParams {
    /// Per-step drift (mu)
    pub drift: f64,
    /// Per-step volatility (sigma)
    pub volatility: f64,
    /// Price at step 0 (S0)
    pub initial_price: f64,
    /// Number of rows, including the initial row
    pub steps: usize,
    /// Number of independent paths
    pub trials: usize,
}

impl SimulationParams {
    pub fn from_calibration(
        calibration: &CalibrationParams,
        initial_price: f64,
        steps: usize,
        trials: usize,
    ) -> Self {
        Self {
            drift: calibration.drift,
            volatility: calibration.volatility,
            initial_price,
            steps,
            trials,
        }
    }
}

/// Monte Carlo GBM path simulator
#[derive(Debug, Clone, Copy)]
pub struct PathSimulator {
    max_cells: usize,
}

impl Default for PathSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl PathSimulator {
    pub fn new() -> Self {
        Self {
            max_cells: DEFAULT_MAX_CELLS,
        }
    }

    /// Limit the matrix size to `max_cells` entries
    pub fn with_max_cells(max_cells: usize) -> Self {
        Self { max_cells }
    }

    /// Check preconditions without simulating
    pub fn validate(&self, params: &SimulationParams) -> Result<(), ForecastError> {
        if params.steps < 1 {
            return Err(invalid(format!("time steps must be >= 1, got {}", params.steps)));
        }
        if params.trials < 1 {
            return Err(invalid(format!("trials must be >= 1, got {}", params.trials)));
        }
        if !params.initial_price.is_finite() || params.initial_price <= 0.0 {
            return Err(invalid(format!(
                "initial price must be positive, got {}",
                params.initial_price
            )));
        }
        if !params.volatility.is_finite() || params.volatility < 0.0 {
            return Err(invalid(format!(
                "volatility must be non-negative, got {}",
                params.volatility
            )));
        }
        if !params.drift.is_finite() {
            return Err(invalid(format!("drift must be finite, got {}", params.drift)));
        }
        match params.steps.checked_mul(params.trials) {
            Some(cells) if cells <= self.max_cells => Ok(()),
            _ => Err(invalid(format!(
                "{} steps x {} trials exceeds the limit of {} cells",
                params.steps, params.trials, self.max_cells
            ))),
        }
    }

    /// Simulate `params.trials` paths of `params.steps` prices each
    ///
    /// Row 0 is exactly the initial price. Only `(steps - 1) * trials`
    /// normal variates are drawn from `rng`.
    pub fn simulate<R: Rng + ?Sized>(
        &self,
        params: &SimulationParams,
        rng: &mut R,
    ) -> Result<PriceMatrix, ForecastError> {
        self.validate(params)?;

        let mut matrix = PriceMatrix::filled(params.steps, params.trials, params.initial_price);

        for step in 1..params.steps {
            let (previous, current) = matrix.split_at_row(step);
            for (price, prev) in current.iter_mut().zip(previous) {
                let z: f64 = StandardNormal.sample(rng);
                *price = prev * (params.drift + params.volatility * z).exp();
            }
        }

        Ok(matrix)
    }
}

fn invalid(message: String) -> ForecastError {
    ForecastError::InvalidParameter(message)
}
