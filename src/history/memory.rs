//! In-memory price provider

use super::{PriceHistoryProvider, PriceSeries};
use crate::error::ForecastError;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Serves fixed series keyed by symbol; unknown symbols return an empty series
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    series: HashMap<String, PriceSeries>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a series under its own symbol
    pub fn with_series(mut self, series: PriceSeries) -> Self {
        self.series.insert(series.symbol.to_uppercase(), series);
        self
    }
}

#[async_trait]
impl PriceHistoryProvider for StaticProvider {
    async fn fetch_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, ForecastError> {
        Ok(self
            .series
            .get(&symbol.to_uppercase())
            .cloned()
            .map(|s| s.within(start, end))
            .unwrap_or_else(|| PriceSeries::empty(symbol)))
    }
}
