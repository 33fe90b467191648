//! Integration tests for price history providers

use chrono::NaiveDate;
use gbm_forecast::history::{JsonFileProvider, PriceHistoryProvider, PriceSeries, StaticProvider};
use std::io::Write;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_boxed_provider_dispatch() {
    let provider: Box<dyn PriceHistoryProvider> = Box::new(StaticProvider::new().with_series(
        PriceSeries::from_closes("IBM", date(2024, 1, 2), &[160.0, 161.0, 159.5]),
    ));
    let series = provider
        .fetch_closes("IBM", date(2020, 1, 1), date(2026, 3, 31))
        .await
        .unwrap();
    assert_eq!(series.valid_closes(), vec![160.0, 161.0, 159.5]);
}

#[tokio::test]
async fn test_json_file_round_trip_through_series() {
    let series = PriceSeries::from_closes("NVDA", date(2024, 3, 1), &[822.79, 852.37, 860.01]);
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string(&series).unwrap().as_bytes())
        .unwrap();

    let loaded = JsonFileProvider::new(file.path())
        .fetch_closes("nvda", date(2024, 1, 1), date(2024, 12, 31))
        .await
        .unwrap();
    assert_eq!(loaded.valid_closes(), series.valid_closes());
    assert_eq!(loaded.symbol, "nvda");
}
