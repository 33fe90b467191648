//! Forecast error taxonomy

use thiserror::Error;

/// Errors surfaced by a forecast run
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The provider returned no prices for the symbol
    #[error("No data found for ticker: {ticker}. Please check the ticker symbol and try again.")]
    DataNotFound { ticker: String },
    /// Too few log-returns to estimate drift and volatility
    #[error("Insufficient data for calibration: {observations} log-return(s), need at least 2")]
    Calibration { observations: usize },
    /// Simulation or request parameters violate their preconditions
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// Any failure inside the market-data provider
    #[error("Error: {0}")]
    Transport(String),
    /// Rendering or writing the forecast output failed
    #[error("Failed to present forecast: {0}")]
    Output(String),
}

impl ForecastError {
    /// Short machine-readable kind, used as a metrics label
    pub fn kind(&self) -> &'static str {
        match self {
            ForecastError::DataNotFound { .. } => "data_not_found",
            ForecastError::Calibration { .. } => "calibration",
            ForecastError::InvalidParameter(_) => "invalid_parameter",
            ForecastError::Transport(_) => "transport",
            ForecastError::Output(_) => "output",
        }
    }
}

impl From<reqwest::Error> for ForecastError {
    fn from(err: reqwest::Error) -> Self {
        ForecastError::Transport(err.to_string())
    }
}

impl From<std::io::Error> for ForecastError {
    fn from(err: std::io::Error) -> Self {
        ForecastError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::Transport(format!("malformed response: {}", err))
    }
}
