//! End-to-end forecast tests

use chrono::NaiveDate;
use gbm_forecast::history::{JsonFileProvider, PriceBar, PriceSeries, StaticProvider};
use gbm_forecast::model::{
    PathSimulator, ReturnEstimator, SimulationParams, SummaryExtractor,
};
use gbm_forecast::report::{JsonPresenter, Presenter};
use gbm_forecast::{ForecastError, RunSettings, SimulationRunner};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
}

fn runner(symbol: &str, closes: &[f64]) -> SimulationRunner<StaticProvider> {
    let provider =
        StaticProvider::new().with_series(PriceSeries::from_closes(symbol, start(), closes));
    SimulationRunner::new(provider, RunSettings::default())
}

#[test]
fn test_five_point_series_components() {
    let series = PriceSeries::from_closes("AAPL", start(), &[100.0, 102.0, 101.0, 105.0, 104.0]);

    let calibration = ReturnEstimator::new().estimate(&series).unwrap();
    assert!(calibration.drift.is_finite());
    assert!(calibration.volatility >= 0.0);

    let params = SimulationParams::from_calibration(&calibration, 104.0, 252, 1000);
    let matrix = PathSimulator::new()
        .simulate(&params, &mut StdRng::seed_from_u64(2024))
        .unwrap();
    assert_eq!(matrix.steps(), 252);
    assert_eq!(matrix.trials(), 1000);
    assert!(matrix.row(0).iter().all(|&p| p == 104.0));
    assert!(matrix.as_slice().iter().all(|&p| p > 0.0 && p.is_finite()));

    let summary = SummaryExtractor::new().summarize(&matrix);
    assert!(summary.expected_price > 0.0);
    assert!(summary.expected_price > summary.terminal_min);
    assert!(summary.expected_price < summary.terminal_max);
}

#[tokio::test]
async fn test_five_point_series_end_to_end() {
    let result = runner("AAPL", &[100.0, 102.0, 101.0, 105.0, 104.0])
        .run_simulation("aapl")
        .await
        .unwrap();
    assert_eq!(result.summary.current_price, 104.0);
    assert!(result.matrix.row(0).iter().all(|&p| p == 104.0));
    assert!(result.summary.expected_price > 0.0);
}

#[tokio::test]
async fn test_empty_series_halts_with_data_not_found() {
    let mut presenter = JsonPresenter::new(Vec::new());
    let result = runner("AAPL", &[100.0, 101.0, 102.0])
        .run_and_present("zzzz", &mut rand::thread_rng(), &mut presenter)
        .await;

    match result {
        Err(ForecastError::DataNotFound { ticker }) => assert_eq!(ticker, "ZZZZ"),
        other => panic!("expected DataNotFound, got {:?}", other.map(|r| r.ticker)),
    }

    let out = String::from_utf8(presenter.into_inner()).unwrap();
    assert_eq!(out.lines().count(), 1);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["error"], "data_not_found");
    assert!(value["message"].as_str().unwrap().contains("ZZZZ"));
}

#[tokio::test]
async fn test_single_point_halts_with_calibration_error() {
    let err = runner("ONE", &[104.0]).run_simulation("ONE").await.unwrap_err();
    assert!(matches!(err, ForecastError::Calibration { observations: 0 }));
}

#[tokio::test]
async fn test_all_missing_closes_is_calibration_error() {
    let bars = (0..5)
        .map(|i| PriceBar::new(start() + chrono::Duration::days(i), None))
        .collect();
    let provider = StaticProvider::new().with_series(PriceSeries::new("NULL", bars));
    let err = SimulationRunner::new(provider, RunSettings::default())
        .run_simulation("NULL")
        .await
        .unwrap_err();
    assert!(matches!(err, ForecastError::Calibration { .. }));
}

#[test]
fn test_blocking_entry_point() {
    let result = tokio_test::block_on(
        runner("SPY", &[470.0, 472.5, 468.1, 471.9])
            .run_simulation_with_rng("spy", &mut StdRng::seed_from_u64(9)),
    )
    .unwrap();
    assert_eq!(result.ticker, "SPY");
    assert_eq!(result.summary.mean_path.len(), 252);
}

#[tokio::test]
async fn test_presented_metrics() {
    let mut presenter = JsonPresenter::new(Vec::new());
    let result = runner("AAPL", &[100.0, 102.0, 101.0, 105.0, 104.0])
        .run_simulation_with_rng("AAPL", &mut StdRng::seed_from_u64(5))
        .await
        .unwrap();

    presenter.show_metric("Current Price", result.summary.current_price).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&presenter.into_inner()).unwrap();
    assert_eq!(value["metric"], "Current Price");
    assert_eq!(value["value"], "104.00");
}

#[tokio::test]
async fn test_missing_price_file_shows_one_transport_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let runner = SimulationRunner::new(JsonFileProvider::new(&path), RunSettings::default());
    let mut presenter = JsonPresenter::new(Vec::new());

    let err = runner
        .run_and_present("SPY", &mut StdRng::seed_from_u64(1), &mut presenter)
        .await
        .unwrap_err();
    assert!(matches!(err, ForecastError::Transport(ref msg) if msg.contains("absent.json")));

    let out = String::from_utf8(presenter.into_inner()).unwrap();
    assert_eq!(out.lines().count(), 1);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["error"], "transport");
    assert_eq!(value["message"], err.to_string());
}
