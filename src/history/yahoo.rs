//! Yahoo Finance chart API client
//!
//! Fetches daily closes from the public v8 chart endpoint. The endpoint
//! answers unknown symbols with HTTP 404 and a `"Not Found"` error body,
//! which this client maps to an empty series.

use super::{PriceBar, PriceHistoryProvider, PriceSeries};
use crate::error::ForecastError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use std::time::{Duration, Instant};

/// Yahoo chart API base URL
pub const YAHOO_CHART_URL: &str = "https://query1.finance.yahoo.com";

/// Configuration for the Yahoo client
#[derive(Debug, Clone)]
pub struct YahooConfig {
    /// Base URL for the chart API
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User-Agent header; the API rejects requests without one
    pub user_agent: String,
    /// Prefer split/dividend adjusted closes when the response has them
    pub use_adjusted_close: bool,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: YAHOO_CHART_URL.to_string(),
            timeout: Duration::from_secs(10),
            user_agent: concat!("gbm-forecast/", env!("CARGO_PKG_VERSION")).to_string(),
            use_adjusted_close: true,
        }
    }
}

/// Client for the Yahoo Finance chart API
pub struct YahooChartClient {
    config: YahooConfig,
    client: Client,
}

impl YahooChartClient {
    /// Create a client with default configuration
    pub fn new() -> Result<Self, ForecastError> {
        Self::with_config(YahooConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: YahooConfig) -> Result<Self, ForecastError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ForecastError::Transport(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &YahooConfig {
        &self.config
    }

    /// Chart endpoint for `symbol`, with the symbol escaped as one path segment
    fn chart_url(&self, symbol: &str) -> Result<Url, ForecastError> {
        let mut url = Url::parse(&self.config.base_url).map_err(|e| {
            ForecastError::Transport(format!("invalid base URL {}: {}", self.config.base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                ForecastError::Transport(format!("invalid base URL {}", self.config.base_url))
            })?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", symbol]);
        Ok(url)
    }
}

#[async_trait]
impl PriceHistoryProvider for YahooChartClient {
    async fn fetch_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, ForecastError> {
        let url = self.chart_url(symbol)?;
        let (period1, period2) = period_bounds(start, end);

        tracing::debug!(url = %url, period1, period2, "Fetching daily closes from Yahoo");
        let started = Instant::now();

        let response = self
            .client
            .get(url.clone())
            .query(&[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
                ("events", "history".to_string()),
                ("includeAdjustedClose", "true".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::info!(symbol, "Yahoo reports unknown symbol");
            return Ok(PriceSeries::empty(symbol));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ForecastError::Transport(format!(
                "Yahoo chart API error: {} - {}",
                status, body
            )));
        }

        let body = response.text().await?;
        let series = parse_chart(symbol, &body, self.config.use_adjusted_close)?;

        tracing::info!(
            symbol,
            bars = series.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Fetched price history"
        );

        Ok(series.within(start, end))
    }
}

/// Unix-second bounds covering `start` through the whole of `end`
fn period_bounds(start: NaiveDate, end: NaiveDate) -> (i64, i64) {
    let period1 = start.and_time(chrono::NaiveTime::MIN).and_utc().timestamp();
    let period2 = end
        .succ_opt()
        .unwrap_or(end)
        .and_time(chrono::NaiveTime::MIN)
        .and_utc()
        .timestamp();
    (period1, period2)
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: Option<ChartMeta>,
    /// Bar open times in unix seconds
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    /// Exchange offset from UTC in seconds
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
    #[serde(default)]
    adjclose: Vec<AdjClose>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjClose {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

/// Parse a chart API response body into a price series
fn parse_chart(symbol: &str, body: &str, use_adjusted: bool) -> Result<PriceSeries, ForecastError> {
    let envelope: ChartEnvelope = serde_json::from_str(body)?;

    if let Some(error) = envelope.chart.error {
        if error.code == "Not Found" {
            return Ok(PriceSeries::empty(symbol));
        }
        return Err(ForecastError::Transport(format!(
            "Yahoo chart API error: {} - {}",
            error.code,
            error.description.unwrap_or_default()
        )));
    }

    let Some(result) = envelope.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(PriceSeries::empty(symbol));
    };

    let offset = result.meta.as_ref().map(|m| m.gmtoffset).unwrap_or(0);

    let adjusted = result
        .indicators
        .adjclose
        .into_iter()
        .next()
        .map(|a| a.adjclose)
        .filter(|a| use_adjusted && !a.is_empty());
    let closes = match adjusted {
        Some(closes) => closes,
        None => result
            .indicators
            .quote
            .into_iter()
            .next()
            .map(|q| q.close)
            .unwrap_or_default(),
    };

    if closes.len() != result.timestamp.len() {
        return Err(ForecastError::Transport(format!(
            "malformed response: {} timestamps but {} closes",
            result.timestamp.len(),
            closes.len()
        )));
    }

    let bars = result
        .timestamp
        .iter()
        .zip(closes)
        .map(|(ts, close)| {
            ts.checked_add(offset)
                .and_then(|local| DateTime::from_timestamp(local, 0))
                .map(|dt| PriceBar::new(dt.date_naive(), close))
                .ok_or_else(|| {
                    ForecastError::Transport(format!("malformed response: bad timestamp {}", ts))
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PriceSeries::new(symbol, bars))
}
