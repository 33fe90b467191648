//! Historical price module
//!
//! Daily closing prices from Yahoo Finance, local JSON files, or memory

mod file;
mod memory;
mod types;
mod yahoo;

pub use file::JsonFileProvider;
pub use memory::StaticProvider;
pub use types::{PriceBar, PriceSeries};
pub use yahoo::{YahooChartClient, YahooConfig, YAHOO_CHART_URL};

use crate::error::ForecastError;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Trait for historical price providers
///
/// An unknown symbol yields an empty series rather than an error; callers
/// decide how to report it.
#[async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    /// Fetch daily closes for `symbol` between `start` and `end` inclusive
    async fn fetch_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, ForecastError>;
}

#[async_trait]
impl<P: PriceHistoryProvider + ?Sized> PriceHistoryProvider for Box<P> {
    async fn fetch_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, ForecastError> {
        (**self).fetch_closes(symbol, start, end).await
    }
}
