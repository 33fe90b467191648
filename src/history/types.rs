//! Price history types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single daily close
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Trading date
    pub date: NaiveDate,
    /// Closing price, `None` when the provider reported a null
    pub close: Option<f64>,
}

impl PriceBar {
    pub fn new(date: NaiveDate, close: Option<f64>) -> Self {
        Self { date, close }
    }

    /// Close if present, finite and strictly positive
    pub fn valid_close(&self) -> Option<f64> {
        self.close.filter(|c| c.is_finite() && *c > 0.0)
    }
}

/// Daily closing prices for one symbol, ascending by date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    /// Ticker symbol (e.g., "AAPL")
    pub symbol: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Build a series, sorting by date and keeping the first bar of any duplicated date
    pub fn new(symbol: impl Into<String>, mut bars: Vec<PriceBar>) -> Self {
        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    /// Series with no observations
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self::new(symbol, Vec::new())
    }

    /// Convenience constructor for consecutive daily closes starting at `start`
    pub fn from_closes(symbol: impl Into<String>, start: NaiveDate, closes: &[f64]) -> Self {
        let bars = closes
            .iter()
            .zip(start.iter_days())
            .map(|(close, date)| PriceBar::new(date, Some(*close)))
            .collect();
        Self::new(symbol, bars)
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Closes with missing and non-positive values removed
    pub fn valid_closes(&self) -> Vec<f64> {
        self.bars.iter().filter_map(PriceBar::valid_close).collect()
    }

    /// Most recent valid close
    pub fn last_close(&self) -> Option<f64> {
        self.bars.iter().rev().find_map(PriceBar::valid_close)
    }

    /// Keep only bars within `[start, end]`
    pub fn within(self, start: NaiveDate, end: NaiveDate) -> Self {
        let bars = self
            .bars
            .into_iter()
            .filter(|b| b.date >= start && b.date <= end)
            .collect();
        Self {
            symbol: self.symbol,
            bars,
        }
    }
}
