use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, COOKIE};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::html::parse_opportunities;
use super::models::{
    ApiError, FarmPerformanceResponse, InvestmentSummaryResponse, MarketPriceResponse,
    RiskLevelsResponse, RoiTrendsResponse, WeatherYieldResponse,
};
use crate::config::AppConfig;
use crate::models::Opportunity;

/// Read-only data source behind the analytics dashboard
#[async_trait]
pub trait AnalyticsSource: Send + Sync {
    async fn farm_opportunities(&self, farm_id: u64) -> Result<Vec<Opportunity>, ApiError>;
    async fn roi_trends(&self, opportunity_id: u64) -> Result<RoiTrendsResponse, ApiError>;
    async fn weather_yield(&self, farm_id: u64) -> Result<WeatherYieldResponse, ApiError>;
    async fn market_price(&self, farm_id: u64) -> Result<MarketPriceResponse, ApiError>;
    async fn risk_levels(&self, opportunity_id: u64) -> Result<RiskLevelsResponse, ApiError>;
    async fn investment_summary(&self) -> Result<InvestmentSummaryResponse, ApiError>;
}

/// HTTP client for the analytics backend
pub struct AnalyticsClient {
    http_client: HttpClient,
    session_cookie: Option<String>,
    base_url: String,
}

impl AnalyticsClient {
    /// Create a client with a session cookie and request timeout
    pub fn with_options(base_url: String, session_cookie: Option<String>, timeout: Duration) -> Self {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with timeout, using defaults: {}", e);
                HttpClient::new()
            });

        Self {
            http_client,
            session_cookie,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::with_options(
            config.base_url.clone(),
            config.session_cookie.clone(),
            config.timeout,
        )
    }

    /// Default headers, with the session cookie when one is configured
    fn create_headers(&self) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/html"));

        if let Some(session) = &self.session_cookie {
            let cookie = HeaderValue::from_str(&format!("session={}", session))
                .map_err(|e| ApiError::RequestError(format!("Failed to create cookie header: {}", e)))?;
            headers.insert(COOKIE, cookie);
        }

        Ok(headers)
    }

    /// Map a non-success response to an error
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();

        match status_code {
            401 => ApiError::Unauthorized(body_text),
            404 => ApiError::NotFound(body_text),
            500..=599 => {
                warn!("Server error {}: {}", status_code, body_text);
                ApiError::ServerError(status_code, body_text)
            }
            _ => ApiError::HttpError(status_code, body_text),
        }
    }

    async fn get(&self, path: &str) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let headers = self.create_headers()?;

        debug!("GET {}", url);
        let response = self
            .http_client
            .get(&url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.get(path)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }

    /// GET /api/farm-performance/{farm_id}
    pub async fn farm_performance(&self, farm_id: u64) -> Result<FarmPerformanceResponse, ApiError> {
        self.get_json(&format!("/api/farm-performance/{}", farm_id)).await
    }
}

#[async_trait]
impl AnalyticsSource for AnalyticsClient {
    /// GET /farm/{farm_id}
    ///
    /// Returns an HTML page; opportunities are scraped from its cards.
    async fn farm_opportunities(&self, farm_id: u64) -> Result<Vec<Opportunity>, ApiError> {
        let html = self
            .get(&format!("/farm/{}", farm_id))
            .await?
            .text()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to read farm page: {}", e)))?;

        let opportunities = parse_opportunities(&html);
        debug!("Farm {} lists {} opportunity(ies)", farm_id, opportunities.len());
        Ok(opportunities)
    }

    /// GET /api/roi-trends/{opportunity_id}
    async fn roi_trends(&self, opportunity_id: u64) -> Result<RoiTrendsResponse, ApiError> {
        self.get_json(&format!("/api/roi-trends/{}", opportunity_id)).await
    }

    /// GET /api/weather-yield/{farm_id}
    async fn weather_yield(&self, farm_id: u64) -> Result<WeatherYieldResponse, ApiError> {
        self.get_json(&format!("/api/weather-yield/{}", farm_id)).await
    }

    /// GET /api/market-price-prediction/{farm_id}
    async fn market_price(&self, farm_id: u64) -> Result<MarketPriceResponse, ApiError> {
        self.get_json(&format!("/api/market-price-prediction/{}", farm_id)).await
    }

    /// GET /api/risk-levels/{opportunity_id}
    async fn risk_levels(&self, opportunity_id: u64) -> Result<RiskLevelsResponse, ApiError> {
        self.get_json(&format!("/api/risk-levels/{}", opportunity_id)).await
    }

    /// GET /api/investment-summary
    async fn investment_summary(&self) -> Result<InvestmentSummaryResponse, ApiError> {
        self.get_json("/api/investment-summary").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn local_client(base_url: String) -> AnalyticsClient {
        AnalyticsClient::with_options(base_url, None, Duration::from_secs(5))
    }

    /// Serve exactly one canned HTTP response and return the base URL
    async fn serve_once(status_line: &'static str, content_type: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                content_type,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });

        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_roi_trends_parses_body() {
        let base = serve_once(
            "200 OK",
            "application/json",
            r#"{"dates":["2024-01-01","2024-02-01"],"roi_values":[4.5,null],"target_roi":12.0}"#,
        )
        .await;

        let client = local_client(base);
        let data = client.roi_trends(1).await.unwrap();
        assert_eq!(data.dates.len(), 2);
        assert_eq!(data.roi_values, vec![Some(4.5), None]);
        assert_eq!(data.target_roi, Some(12.0));
    }

    #[tokio::test]
    async fn test_missing_forecast_arrays_default_to_empty() {
        let base = serve_once(
            "200 OK",
            "application/json",
            r#"{"dates":["2024-01-01"],"historical_prices":[10.0],"farm_type":"Crop"}"#,
        )
        .await;

        let client = local_client(base);
        let data = client.market_price(2).await.unwrap();
        assert!(data.future_dates.is_empty());
        assert!(data.predicted_prices.is_empty());
    }

    #[tokio::test]
    async fn test_not_found_maps_to_error() {
        let base = serve_once("404 Not Found", "text/html", "missing").await;

        let client = local_client(base);
        let err = client.weather_yield(99).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_malformed_body_maps_to_deserialization_error() {
        let base = serve_once("200 OK", "application/json", "{not json").await;

        let client = local_client(base);
        let err = client.risk_levels(1).await.unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[tokio::test]
    async fn test_farm_page_yields_opportunities() {
        let base = serve_once(
            "200 OK",
            "text/html",
            r#"<div class="opportunity-card" data-opportunity-id="5"><h5 class="opportunity-title">Greenhouse</h5></div>"#,
        )
        .await;

        let client = local_client(base);
        let ops = client.farm_opportunities(1).await.unwrap();
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].title, "Greenhouse");
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = local_client(format!("http://{}", addr));
        let err = client.investment_summary().await.unwrap_err();
        assert!(err.is_network());
    }
}
