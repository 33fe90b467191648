//! Presentation module
//!
//! Terminal table, JSON, and SVG chart renderings of a forecast

mod chart;
mod json;
mod table;

pub use chart::{ChartPresenter, SvgChart};
pub use json::{ForecastReport, JsonPresenter};
pub use table::TerminalPresenter;

use crate::error::ForecastError;
use crate::model::PriceMatrix;
use crate::pipeline::SimulationResult;
use rust_decimal::Decimal;

/// Label of the initial price metric
pub const CURRENT_PRICE_LABEL: &str = "Current Price";

/// Label of the terminal mean metric
pub const EXPECTED_PRICE_LABEL: &str = "Expected Price in 1 Year";

/// Trait for presentation implementations
pub trait Presenter {
    /// Display a labelled scalar
    fn show_metric(&mut self, label: &str, value: f64) -> anyhow::Result<()>;

    /// Display simulated paths together with their mean path
    fn show_paths(&mut self, _ticker: &str, _matrix: &PriceMatrix, _mean_path: &[f64]) -> anyhow::Result<()> {
        Ok(())
    }

    /// Display a failed run
    fn show_error(&mut self, error: &ForecastError) -> anyhow::Result<()>;

    /// Display a complete result: paths first, then the two headline metrics
    fn show_result(&mut self, result: &SimulationResult) -> anyhow::Result<()> {
        self.show_paths(&result.ticker, &result.matrix, &result.summary.mean_path)?;
        self.show_metric(CURRENT_PRICE_LABEL, result.summary.current_price)?;
        self.show_metric(EXPECTED_PRICE_LABEL, result.summary.expected_price)?;
        Ok(())
    }
}

impl<P: Presenter + ?Sized> Presenter for Box<P> {
    fn show_metric(&mut self, label: &str, value: f64) -> anyhow::Result<()> {
        (**self).show_metric(label, value)
    }

    fn show_paths(&mut self, ticker: &str, matrix: &PriceMatrix, mean_path: &[f64]) -> anyhow::Result<()> {
        (**self).show_paths(ticker, matrix, mean_path)
    }

    fn show_error(&mut self, error: &ForecastError) -> anyhow::Result<()> {
        (**self).show_error(error)
    }

    fn show_result(&mut self, result: &SimulationResult) -> anyhow::Result<()> {
        (**self).show_result(result)
    }
}

/// Round a price to cents for display
///
/// Returns `None` for values a `Decimal` cannot hold (NaN, infinities,
/// magnitudes beyond ~7.9e28).
pub fn display_price(value: f64) -> Option<Decimal> {
    match Decimal::try_from(value) {
        Ok(d) => {
            let mut price = d.round_dp(2);
            price.rescale(2);
            Some(price)
        }
        Err(e) => {
            tracing::warn!(value, error = %e, "Price cannot be displayed as a decimal");
            None
        }
    }
}

/// `display_price` as text, `n/a` when unrepresentable
pub(crate) fn price_text(value: f64) -> String {
    display_price(value)
        .map(|p| p.to_string())
        .unwrap_or_else(|| "n/a".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_display_price_rounds() {
        assert_eq!(display_price(104.0), Some(dec!(104.00)));
        assert_eq!(display_price(123.456), Some(dec!(123.46)));
        assert_eq!(display_price(0.004), Some(dec!(0.00)));
        assert_eq!(price_text(104.0), "104.00");
    }

    #[test]
    fn test_display_price_unrepresentable() {
        assert_eq!(display_price(f64::NAN), None);
        assert_eq!(display_price(f64::INFINITY), None);
        assert_eq!(display_price(1e30), None);
        assert_eq!(price_text(f64::NAN), "n/a");
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Presenter for Recorder {
        fn show_metric(&mut self, label: &str, value: f64) -> anyhow::Result<()> {
            self.calls.push(format!("{}={}", label, price_text(value)));
            Ok(())
        }

        fn show_paths(&mut self, ticker: &str, matrix: &PriceMatrix, _mean_path: &[f64]) -> anyhow::Result<()> {
            self.calls.push(format!("paths:{}:{}", ticker, matrix.trials()));
            Ok(())
        }

        fn show_error(&mut self, error: &ForecastError) -> anyhow::Result<()> {
            self.calls.push(format!("error:{}", error));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_show_result_order() {
        use crate::history::{PriceSeries, StaticProvider};
        use crate::pipeline::{RunSettings, SimulationRunner};
        use chrono::NaiveDate;
        use rand::SeedableRng;

        let provider = StaticProvider::new().with_series(PriceSeries::from_closes(
            "AAPL",
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            &[100.0, 102.0, 101.0, 105.0, 104.0],
        ));
        let runner = SimulationRunner::new(provider, RunSettings::default());
        let mut recorder = Recorder::default();
        runner
            .run_and_present("aapl", &mut rand::rngs::StdRng::seed_from_u64(3), &mut recorder)
            .await
            .unwrap();

        assert_eq!(recorder.calls.len(), 3);
        assert_eq!(recorder.calls[0], "paths:AAPL:1000");
        assert_eq!(recorder.calls[1], "Current Price=104.00");
        assert!(recorder.calls[2].starts_with("Expected Price in 1 Year="));
    }

    #[tokio::test]
    async fn test_failure_shows_only_error() {
        use crate::history::StaticProvider;
        use crate::pipeline::{RunSettings, SimulationRunner};

        let runner = SimulationRunner::new(StaticProvider::new(), RunSettings::default());
        let mut recorder = Recorder::default();
        let result = runner
            .run_and_present("msft", &mut rand::thread_rng(), &mut recorder)
            .await;

        assert!(result.is_err());
        assert_eq!(recorder.calls.len(), 1);
        assert!(recorder.calls[0].starts_with("error:No data found for ticker: MSFT"));
    }
}
