//! SVG path-overlay chart
//!
//! Every simulated path is drawn faintly, with the mean path on top.

use super::Presenter;
use crate::error::ForecastError;
use crate::model::PriceMatrix;
use crate::pipeline::SimulationResult;
use anyhow::Context;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

const CORNFLOWER_BLUE: RGBColor = RGBColor(100, 149, 237);
const PATH_ALPHA: f64 = 0.02;

/// Renders simulated paths to an SVG file
#[derive(Debug, Clone)]
pub struct SvgChart {
    path: PathBuf,
    size: (u32, u32),
}

impl SvgChart {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            size: (1000, 600),
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Draw all paths of `matrix` plus `mean_path` and write the SVG file
    pub fn render(&self, ticker: &str, matrix: &PriceMatrix, mean_path: &[f64]) -> anyhow::Result<()> {
        let svg = self.render_to_string(ticker, matrix, mean_path)?;
        std::fs::write(&self.path, svg)
            .with_context(|| format!("failed to write chart {}", self.path.display()))?;
        tracing::info!(path = %self.path.display(), "Wrote path chart");
        Ok(())
    }

    /// Draw the chart into an in-memory SVG document
    pub fn render_to_string(&self, ticker: &str, matrix: &PriceMatrix, mean_path: &[f64]) -> anyhow::Result<String> {
        let (y_min, y_max) = price_bounds(matrix);
        let x_max = matrix.steps().saturating_sub(1).max(1);

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, self.size).into_drawing_area();
            root.fill(&WHITE)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(
                    format!(
                        "Monte Carlo Simulation: {} Possible Futures for {}",
                        matrix.trials(),
                        ticker
                    ),
                    ("sans-serif", 22),
                )
                .margin(10)
                .x_label_area_size(40)
                .y_label_area_size(60)
                .build_cartesian_2d(0..x_max, y_min..y_max)?;

            chart
                .configure_mesh()
                .x_desc("Days into Future")
                .y_desc("Price")
                .draw()?;

            let path_style = CORNFLOWER_BLUE.mix(PATH_ALPHA);
            for trial in 0..matrix.trials() {
                chart.draw_series(LineSeries::new(matrix.column(trial).enumerate(), path_style))?;
            }

            chart
                .draw_series(LineSeries::new(
                    mean_path.iter().copied().enumerate(),
                    RED.stroke_width(2),
                ))?
                .label("Mean Prediction")
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()?;

            root.present()?;
        }
        Ok(svg)
    }
}

/// Y-axis range covering every simulated price with a small margin
fn price_bounds(matrix: &PriceMatrix) -> (f64, f64) {
    let (lo, hi) = matrix
        .as_slice()
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| {
            (lo.min(p), hi.max(p))
        });
    let pad = if hi > lo { (hi - lo) * 0.05 } else { lo.abs().max(1.0) * 0.05 };
    ((lo - pad).max(0.0), hi + pad)
}

/// Adds an SVG chart to another presenter's output
pub struct ChartPresenter<P: Presenter> {
    inner: P,
    chart: SvgChart,
}

impl<P: Presenter> ChartPresenter<P> {
    pub fn new(inner: P, chart: SvgChart) -> Self {
        Self { inner, chart }
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: Presenter> Presenter for ChartPresenter<P> {
    fn show_metric(&mut self, label: &str, value: f64) -> anyhow::Result<()> {
        self.inner.show_metric(label, value)
    }

    fn show_paths(&mut self, ticker: &str, matrix: &PriceMatrix, mean_path: &[f64]) -> anyhow::Result<()> {
        self.chart.render(ticker, matrix, mean_path)?;
        self.inner.show_paths(ticker, matrix, mean_path)
    }

    fn show_error(&mut self, error: &ForecastError) -> anyhow::Result<()> {
        self.inner.show_error(error)
    }

    /// The chart is written before the inner presenter runs and removed
    /// again if the inner presenter fails
    fn show_result(&mut self, result: &SimulationResult) -> anyhow::Result<()> {
        self.chart
            .render(&result.ticker, &result.matrix, &result.summary.mean_path)?;

        if let Err(e) = self.inner.show_result(result) {
            if let Err(remove) = std::fs::remove_file(self.chart.path()) {
                tracing::warn!(path = %self.chart.path().display(), error = %remove, "Failed to remove chart");
            }
            return Err(e);
        }
        Ok(())
    }
}
