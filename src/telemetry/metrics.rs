//! Run metrics
//!
//! Recorded through the `metrics` facade. Nothing is exported unless the
//! embedding application installs a recorder.

use std::time::Duration;

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// Price history download
    HistoryFetch,
    /// Path simulation
    Simulation,
}

/// Gauge metric types
#[derive(Debug, Clone, Copy)]
pub enum GaugeMetric {
    /// Calibrated per-step volatility
    CalibratedVolatility,
    /// Calibrated per-step drift
    CalibratedDrift,
    /// Expected terminal price of the last run
    ExpectedPrice,
}

/// Record a latency measurement
pub fn record_latency(metric: LatencyMetric, duration: Duration) {
    let metric_name = match metric {
        LatencyMetric::HistoryFetch => "forecast_fetch_duration_ms",
        LatencyMetric::Simulation => "forecast_simulation_duration_ms",
    };

    let value_ms = duration.as_secs_f64() * 1000.0;
    ::metrics::histogram!(metric_name).record(value_ms);
    tracing::debug!(metric = metric_name, value_ms, "Recording latency");
}

/// Set a gauge value
pub fn set_gauge(metric: GaugeMetric, value: f64) {
    let metric_name = match metric {
        GaugeMetric::CalibratedVolatility => "forecast_calibrated_volatility",
        GaugeMetric::CalibratedDrift => "forecast_calibrated_drift",
        GaugeMetric::ExpectedPrice => "forecast_expected_price",
    };

    ::metrics::gauge!(metric_name).set(value);
    tracing::debug!(metric = metric_name, value, "Setting gauge");
}

/// Count a finished run by outcome ("ok" or an error kind)
pub fn record_run(outcome: &'static str) {
    ::metrics::counter!("forecast_runs_total", "outcome" => outcome).increment(1);
}
