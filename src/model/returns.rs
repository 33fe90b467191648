//! Return estimation module
//!
//! Drift and volatility of daily log-returns

use super::CalibrationParams;
use crate::error::ForecastError;
use crate::history::PriceSeries;

/// Minimum number of log-returns for a sample standard deviation
const MIN_OBSERVATIONS: usize = 2;

/// Estimates GBM calibration parameters from a closing-price series
///
/// Missing and non-positive closes are removed before differencing. The
/// drift is the arithmetic mean of the log-returns and the volatility is
/// their sample standard deviation (denominator `n - 1`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ReturnEstimator;

impl ReturnEstimator {
    pub fn new() -> Self {
        Self
    }

    /// Log-returns `ln(1 + r)` where `r` is the simple return between consecutive closes
    pub fn log_returns(closes: &[f64]) -> Vec<f64> {
        closes
            .windows(2)
            .map(|w| {
                let simple = w[1] / w[0] - 1.0;
                simple.ln_1p()
            })
            .collect()
    }

    /// Calibrate from a price series
    pub fn estimate(&self, series: &PriceSeries) -> Result<CalibrationParams, ForecastError> {
        self.estimate_from_closes(&series.valid_closes())
    }

    /// Calibrate from closes that are already cleaned
    pub fn estimate_from_closes(&self, closes: &[f64]) -> Result<CalibrationParams, ForecastError> {
        let returns: Vec<f64> = Self::log_returns(closes)
            .into_iter()
            .filter(|r| r.is_finite())
            .collect();

        if returns.len() < MIN_OBSERVATIONS {
            return Err(ForecastError::Calibration {
                observations: returns.len(),
            });
        }

        let n = returns.len() as f64;
        let mean = returns.iter().sum::<f64>() / n;
        let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);

        Ok(CalibrationParams {
            drift: mean,
            volatility: variance.max(0.0).sqrt(),
            observations: returns.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(closes: &[f64]) -> PriceSeries {
        PriceSeries::from_closes("TEST", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), closes)
    }

    #[test]
    fn test_log_returns() {
        let returns = ReturnEstimator::log_returns(&[100.0, 110.0, 99.0]);
        assert_eq!(returns.len(), 2);
        assert!((returns[0] - (1.1f64).ln()).abs() < 1e-12);
        assert!((returns[1] - (0.9f64).ln()).abs() < 1e-12);
    }

    #[test]
    fn test_estimate_known_values() {
        let params = ReturnEstimator::new()
            .estimate(&series(&[100.0, 102.0, 101.0, 105.0, 104.0]))
            .unwrap();

        let r = [
            (102.0f64 / 100.0).ln(),
            (101.0f64 / 102.0).ln(),
            (105.0f64 / 101.0).ln(),
            (104.0f64 / 105.0).ln(),
        ];
        let mean = r.iter().sum::<f64>() / 4.0;
        let var = r.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / 3.0;

        assert_eq!(params.observations, 4);
        assert!((params.drift - mean).abs() < 1e-12);
        assert!((params.volatility - var.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_estimate_constant_price() {
        let params = ReturnEstimator::new()
            .estimate(&series(&[50.0; 10]))
            .unwrap();
        assert_eq!(params.drift, 0.0);
        assert_eq!(params.volatility, 0.0);
    }

    #[test]
    fn test_estimate_empty_series() {
        let result = ReturnEstimator::new().estimate(&series(&[]));
        assert!(matches!(
            result,
            Err(ForecastError::Calibration { observations: 0 })
        ));
    }

    #[test]
    fn test_estimate_single_price() {
        let result = ReturnEstimator::new().estimate(&series(&[104.0]));
        assert!(matches!(
            result,
            Err(ForecastError::Calibration { observations: 0 })
        ));
    }

    #[test]
    fn test_estimate_two_prices_insufficient() {
        // One log-return has no sample standard deviation
        let result = ReturnEstimator::new().estimate(&series(&[100.0, 101.0]));
        assert!(matches!(
            result,
            Err(ForecastError::Calibration { observations: 1 })
        ));
    }

    #[test]
    fn test_estimate_drops_missing_prices() {
        let series = PriceSeries::new(
            "TEST",
            vec![
                crate::history::PriceBar::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), Some(100.0)),
                crate::history::PriceBar::new(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), None),
                crate::history::PriceBar::new(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(), Some(110.0)),
                crate::history::PriceBar::new(NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(), Some(121.0)),
            ],
        );
        let params = ReturnEstimator::new().estimate(&series).unwrap();
        assert_eq!(params.observations, 2);
        assert!((params.drift - (1.1f64).ln()).abs() < 1e-12);
        assert!(params.volatility < 1e-12);
    }

    #[test]
    fn test_estimate_finite_for_volatile_series() {
        let closes: Vec<f64> = (0..200)
            .map(|i| 100.0 * (1.0 + 0.3 * ((i as f64) * 0.7).sin()))
            .collect();
        let params = ReturnEstimator::new().estimate_from_closes(&closes).unwrap();
        assert!(params.drift.is_finite());
        assert!(params.volatility.is_finite());
        assert!(params.volatility >= 0.0);
    }
}
