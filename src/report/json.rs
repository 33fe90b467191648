//! JSON output

use super::{display_price, Presenter};
use crate::error::ForecastError;
use crate::model::CalibrationParams;
use crate::pipeline::SimulationResult;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::{self, Stdout, Write};
use uuid::Uuid;

/// Serialized form of a successful forecast
#[derive(Debug, Clone, Serialize)]
pub struct ForecastReport {
    pub run_id: Uuid,
    pub ticker: String,
    pub history_len: usize,
    pub calibration: CalibrationParams,
    pub steps: usize,
    pub trials: usize,
    pub current_price: Option<Decimal>,
    pub expected_price: Option<Decimal>,
    pub terminal_min: Option<Decimal>,
    pub terminal_max: Option<Decimal>,
    pub mean_path: Vec<f64>,
}

impl From<&SimulationResult> for ForecastReport {
    fn from(result: &SimulationResult) -> Self {
        let s = &result.summary;
        Self {
            run_id: result.run_id,
            ticker: result.ticker.clone(),
            history_len: result.history_len,
            calibration: result.calibration,
            steps: result.matrix.steps(),
            trials: result.matrix.trials(),
            current_price: display_price(s.current_price),
            expected_price: display_price(s.expected_price),
            terminal_min: display_price(s.terminal_min),
            terminal_max: display_price(s.terminal_max),
            mean_path: s.mean_path.clone(),
        }
    }
}

#[derive(Serialize)]
struct MetricLine<'a> {
    metric: &'a str,
    value: Option<Decimal>,
}

#[derive(Serialize)]
struct ErrorReport<'a> {
    error: &'a str,
    message: String,
}

/// Writes one JSON document per run; individually shown metrics are
/// written as one compact JSON object per line
pub struct JsonPresenter<W: Write> {
    out: W,
}

impl JsonPresenter<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> JsonPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for JsonPresenter<W> {
    fn show_metric(&mut self, label: &str, value: f64) -> anyhow::Result<()> {
        let line = MetricLine {
            metric: label,
            value: display_price(value),
        };
        serde_json::to_writer(&mut self.out, &line)?;
        writeln!(self.out)?;
        Ok(())
    }

    fn show_error(&mut self, error: &ForecastError) -> anyhow::Result<()> {
        let report = ErrorReport {
            error: error.kind(),
            message: error.to_string(),
        };
        serde_json::to_writer(&mut self.out, &report)?;
        writeln!(self.out)?;
        Ok(())
    }

    fn show_result(&mut self, result: &SimulationResult) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, &ForecastReport::from(result))?;
        writeln!(self.out)?;
        Ok(())
    }
}
