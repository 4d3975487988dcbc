use serde::{Deserialize, Serialize};
use thiserror::Error;

/// GET /api/roi-trends/{opportunity_id}
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoiTrendsResponse {
    #[serde(default)]
    pub opportunity_name: Option<String>,
    #[serde(default)]
    pub farm_name: Option<String>,
    #[serde(default)]
    pub target_roi: Option<f64>,
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default)]
    pub roi_values: Vec<Option<f64>>,
    #[serde(default)]
    pub cumulative_roi: Option<f64>,
}

/// GET /api/weather-yield/{farm_id}
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherYieldResponse {
    #[serde(default)]
    pub farm_name: Option<String>,
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default)]
    pub yields_actual: Vec<Option<f64>>,
    #[serde(default)]
    pub yields_predicted: Vec<Option<f64>>,
    #[serde(default)]
    pub weather_conditions: Vec<Option<String>>,
    #[serde(default)]
    pub future_dates: Vec<String>,
    #[serde(default)]
    pub future_predictions: Vec<Option<f64>>,
}

/// GET /api/market-price-prediction/{farm_id}
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketPriceResponse {
    #[serde(default)]
    pub farm_name: Option<String>,
    #[serde(default)]
    pub farm_type: Option<String>,
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default)]
    pub historical_prices: Vec<Option<f64>>,
    #[serde(default)]
    pub future_dates: Vec<String>,
    #[serde(default)]
    pub predicted_prices: Vec<Option<f64>>,
}

/// GET /api/risk-levels/{opportunity_id}
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskLevelsResponse {
    #[serde(default)]
    pub opportunity_name: Option<String>,
    #[serde(default)]
    pub farm_name: Option<String>,
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default)]
    pub overall_risks: Vec<Option<f64>>,
    #[serde(default)]
    pub volatility_risks: Vec<Option<f64>>,
    #[serde(default)]
    pub weather_risks: Vec<Option<f64>>,
    #[serde(default)]
    pub financial_risks: Vec<Option<f64>>,
    #[serde(default)]
    pub base_risk_level: Option<String>,
    #[serde(default)]
    pub risk_categories: Vec<String>,
}

/// GET /api/investment-summary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvestmentSummaryResponse {
    #[serde(default)]
    pub farm_types: Vec<String>,
    #[serde(default)]
    pub investment_amounts: Vec<f64>,
    #[serde(default)]
    pub total_invested: f64,
    #[serde(default)]
    pub total_roi: f64,
}

/// GET /api/farm-performance/{farm_id}
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FarmPerformanceResponse {
    #[serde(default)]
    pub farm_name: Option<String>,
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default)]
    pub profits: Vec<Option<f64>>,
    #[serde(default)]
    pub revenues: Vec<Option<f64>>,
    #[serde(default)]
    pub expenses: Vec<Option<f64>>,
    #[serde(default)]
    pub yields: Vec<Option<f64>>,
}

/// Error type for dashboard API operations.
///
/// Transport failures, non-success statuses and malformed bodies are all
/// handled the same way by callers: log and fall back to the empty state.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// 401 Unauthorized, usually a missing or expired session
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// 404 Not Found
    #[error("Not Found: {0}")]
    NotFound(String),
    /// 5xx Server Error
    #[error("Server Error ({0}): {1}")]
    ServerError(u16, String),
    /// Other non-success statuses
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),
    /// Network/request error
    #[error("Request Error: {0}")]
    RequestError(String),
    /// Body did not have the expected shape
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
}

impl ApiError {
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::RequestError(_))
    }
}
