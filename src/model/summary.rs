//! Summary statistics of a simulated price matrix

use super::PriceMatrix;
use serde::{Deserialize, Serialize};

/// Point estimates extracted from a simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    /// Price at step 0 (S0)
    pub current_price: f64,
    /// Mean of the terminal prices across all trials
    pub expected_price: f64,
    /// Smallest terminal price
    pub terminal_min: f64,
    /// Largest terminal price
    pub terminal_max: f64,
    /// Mean price at every step
    pub mean_path: Vec<f64>,
}

/// Reduces a price matrix to its summary statistics
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryExtractor;

impl SummaryExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Mean of the final row
    pub fn expected_price(&self, matrix: &PriceMatrix) -> f64 {
        mean(matrix.terminal_row())
    }

    /// Initial price, identical in every column of row 0
    pub fn current_price(&self, matrix: &PriceMatrix) -> f64 {
        matrix.row(0)[0]
    }

    /// Mean across trials at each step
    pub fn mean_path(&self, matrix: &PriceMatrix) -> Vec<f64> {
        matrix.rows().map(mean).collect()
    }

    pub fn summarize(&self, matrix: &PriceMatrix) -> SimulationSummary {
        let terminal = matrix.terminal_row();
        let (terminal_min, terminal_max) = terminal
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| {
                (lo.min(p), hi.max(p))
            });

        // A mean of equal values can drift by an ulp; pin it to the range
        let expected_price = self.expected_price(matrix).clamp(terminal_min, terminal_max);

        SimulationSummary {
            current_price: self.current_price(matrix),
            expected_price,
            terminal_min,
            terminal_max,
            mean_path: self.mean_path(matrix),
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
