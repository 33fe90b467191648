//! JSON file price provider for offline runs

use super::{PriceBar, PriceHistoryProvider, PriceSeries};
use crate::error::ForecastError;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::PathBuf;

/// On-disk document layout
#[derive(Debug, Deserialize)]
struct PriceFile {
    /// Symbol the file was captured for
    symbol: String,
    bars: Vec<PriceBar>,
}

/// Reads a single-symbol price history from a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    path: PathBuf,
}

impl JsonFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl PriceHistoryProvider for JsonFileProvider {
    async fn fetch_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, ForecastError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ForecastError::Transport(format!("failed to read {}: {}", self.path.display(), e))
        })?;
        let file: PriceFile = serde_json::from_str(&content)?;

        if !file.symbol.eq_ignore_ascii_case(symbol) {
            tracing::warn!(
                requested = symbol,
                found = %file.symbol,
                path = %self.path.display(),
                "Price file holds a different symbol"
            );
            return Ok(PriceSeries::empty(symbol));
        }

        tracing::debug!(bars = file.bars.len(), path = %self.path.display(), "Loaded price file");
        Ok(PriceSeries::new(symbol, file.bars).within(start, end))
    }
}
