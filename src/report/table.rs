//! Terminal table output

use super::{price_text, Presenter, CURRENT_PRICE_LABEL, EXPECTED_PRICE_LABEL};
use crate::error::ForecastError;
use crate::model::TRADING_DAYS_PER_YEAR;
use crate::pipeline::SimulationResult;
use std::io::{self, Stderr, Stdout, Write};

/// Writes results as a boxed table and errors as a single line
pub struct TerminalPresenter<W: Write, E: Write> {
    out: W,
    err: E,
}

impl TerminalPresenter<Stdout, Stderr> {
    /// Results to stdout, errors to stderr
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<W: Write, E: Write> TerminalPresenter<W, E> {
    pub fn new(out: W, err: E) -> Self {
        Self { out, err }
    }

    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }
}

impl<W: Write, E: Write> Presenter for TerminalPresenter<W, E> {
    fn show_metric(&mut self, label: &str, value: f64) -> anyhow::Result<()> {
        writeln!(self.out, "{:<26}{}", format!("{}:", label), price_text(value))?;
        Ok(())
    }

    fn show_error(&mut self, error: &ForecastError) -> anyhow::Result<()> {
        writeln!(self.err, "{}", error)?;
        Ok(())
    }

    fn show_result(&mut self, result: &SimulationResult) -> anyhow::Result<()> {
        write!(self.out, "{}", format_table(result))?;
        self.out.flush()?;
        Ok(())
    }
}

/// Format a result as a table for CLI output
pub fn format_table(result: &SimulationResult) -> String {
    let c = &result.calibration;
    let s = &result.summary;
    format!(
        r#"
══════════════════════════════════════════════════════
          MONTE CARLO FORECAST: {}
══════════════════════════════════════════════════════

CALIBRATION
───────────────────────────────────────────────────────
History:          {} bars, {} log-returns
Daily Drift:      {:.6}
Daily Volatility: {:.6}
Annual Volatility: {:.2}%

SIMULATION
───────────────────────────────────────────────────────
Paths:            {}
Days:             {}
Terminal Range:   {} - {}

RESULTS
───────────────────────────────────────────────────────
{:<26}{}
{:<26}{}
══════════════════════════════════════════════════════
"#,
        result.ticker,
        result.history_len,
        c.observations,
        c.drift,
        c.volatility,
        c.annualized_volatility(TRADING_DAYS_PER_YEAR) * 100.0,
        result.matrix.trials(),
        result.matrix.steps(),
        price_text(s.terminal_min),
        price_text(s.terminal_max),
        format!("{}:", CURRENT_PRICE_LABEL),
        price_text(s.current_price),
        format!("{}:", EXPECTED_PRICE_LABEL),
        price_text(s.expected_price),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{PriceSeries, StaticProvider};
    use crate::pipeline::{RunSettings, SimulationRunner};
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    async fn result() -> SimulationResult {
        let provider = StaticProvider::new().with_series(PriceSeries::from_closes(
            "AAPL",
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            &[100.0, 102.0, 101.0, 105.0, 104.0],
        ));
        let settings = RunSettings {
            time_steps: 10,
            trials: 25,
            ..RunSettings::default()
        };
        SimulationRunner::new(provider, settings)
            .run_simulation_with_rng("AAPL", &mut StdRng::seed_from_u64(8))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_format_table_contents() {
        let table = format_table(&result().await);
        assert!(table.contains("MONTE CARLO FORECAST: AAPL"));
        assert!(table.contains("History:          5 bars, 4 log-returns"));
        assert!(table.contains("Paths:            25"));
        assert!(table.contains("Current Price:            104.00"));
        assert!(table.contains("Expected Price in 1 Year: "));
    }

    #[tokio::test]
    async fn test_presenter_writes_table_to_out() {
        let mut presenter = TerminalPresenter::new(Vec::new(), Vec::new());
        presenter.show_result(&result().await).unwrap();
        let (out, err) = presenter.into_inner();
        assert!(String::from_utf8(out).unwrap().contains("RESULTS"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_presenter_writes_error_to_err() {
        let mut presenter = TerminalPresenter::new(Vec::new(), Vec::new());
        presenter
            .show_error(&ForecastError::Transport("connection refused".to_string()))
            .unwrap();
        let (out, err) = presenter.into_inner();
        assert!(out.is_empty());
        assert_eq!(String::from_utf8(err).unwrap(), "Error: connection refused\n");
    }

    #[test]
    fn test_show_metric_format() {
        let mut presenter = TerminalPresenter::new(Vec::new(), Vec::new());
        presenter.show_metric(CURRENT_PRICE_LABEL, 104.0).unwrap();
        let (out, _) = presenter.into_inner();
        assert_eq!(String::from_utf8(out).unwrap(), "Current Price:            104.00\n");
    }
}
