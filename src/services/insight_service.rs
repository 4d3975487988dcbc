use crate::api::analytics::models::{
    MarketPriceResponse, RiskLevelsResponse, RoiTrendsResponse, WeatherYieldResponse,
};
use crate::models::Insight;

fn fmt_opt(value: Option<f64>) -> String {
    value
        .map(|v| format!("{}", v))
        .unwrap_or_else(|| "--".to_string())
}

pub fn roi_insight(data: &RoiTrendsResponse) -> Insight {
    Insight {
        title: "ROI Performance".to_string(),
        content: format!(
            "The investment is currently generating a {}% ROI, compared to the target of {}%.",
            fmt_opt(data.roi_values.last().copied().flatten()),
            fmt_opt(data.target_roi)
        ),
    }
}

pub fn weather_insight(_data: &WeatherYieldResponse) -> Insight {
    Insight {
        title: "Weather Impact".to_string(),
        content: "Weather conditions have a significant impact on crop yields, with ideal conditions increasing yield by up to 20%.".to_string(),
    }
}

/// Compares the last predicted price with the last historical price
pub fn market_price_insight(data: &MarketPriceResponse) -> Insight {
    let last_historical = data.historical_prices.last().copied().flatten();
    let last_predicted = data.predicted_prices.last().copied().flatten();

    let direction = match (last_historical, last_predicted) {
        (Some(h), Some(p)) if p > h => "upward",
        (Some(h), Some(p)) if p < h => "downward",
        (Some(_), Some(_)) => "stable",
        _ => "unknown",
    };

    Insight {
        title: "Market Price Trend".to_string(),
        content: format!(
            "The market price for {} crops shows a {} trend over the next 6 months.",
            data.farm_type.as_deref().unwrap_or("these"),
            direction
        ),
    }
}

pub fn risk_insight(data: &RiskLevelsResponse) -> Insight {
    Insight {
        title: "Risk Assessment".to_string(),
        content: format!(
            "The overall investment risk is classified as {}.",
            data.risk_categories.last().map(String::as_str).unwrap_or("Unknown")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_price_direction() {
        let mut data = MarketPriceResponse {
            farm_type: Some("Crop".into()),
            historical_prices: vec![Some(10.0)],
            predicted_prices: vec![Some(12.0)],
            ..Default::default()
        };
        assert!(market_price_insight(&data).content.contains("upward"));

        data.predicted_prices = vec![Some(8.0)];
        assert!(market_price_insight(&data).content.contains("downward"));

        data.predicted_prices = vec![Some(10.0)];
        assert!(market_price_insight(&data).content.contains("stable"));
    }

    #[test]
    fn test_roi_insight_mentions_values() {
        let data = RoiTrendsResponse {
            target_roi: Some(15.0),
            roi_values: vec![Some(9.5)],
            ..Default::default()
        };
        let insight = roi_insight(&data);
        assert!(insight.content.contains("9.5%"));
        assert!(insight.content.contains("15%"));
    }
}
