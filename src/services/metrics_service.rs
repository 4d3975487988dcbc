//! Summary metrics derived from fetched series

use tracing::debug;

use crate::api::analytics::models::{
    InvestmentSummaryResponse, MarketPriceResponse, RiskLevelsResponse, RoiTrendsResponse,
    WeatherYieldResponse,
};
use crate::models::{
    DistributionRow, PortfolioMetrics, Position, PriceForecastSummary, PriceSummary,
    RiskAssessment, RiskSummary, RiskTier, RiskTrend, RoiSummary, TrendDelta, TrendDirection,
    WeatherLegendItem,
};

/// Risk-trend band: changes within ±5 points count as stable
const RISK_TREND_BAND: f64 = 5.0;

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn direction_of(difference: f64) -> TrendDirection {
    if difference > 0.0 {
        TrendDirection::Increase
    } else if difference < 0.0 {
        TrendDirection::Decrease
    } else {
        TrendDirection::Flat
    }
}

/// Compare the last two values of a series.
/// Fewer than two points, or a gap in either of them, reports no trend.
pub fn trend_delta(values: &[Option<f64>]) -> TrendDelta {
    if values.len() < 2 {
        return TrendDelta::NoData;
    }

    match (values[values.len() - 2], values[values.len() - 1]) {
        (Some(previous), Some(last)) => TrendDelta::Change {
            direction: direction_of(last - previous),
            magnitude: round_to((last - previous).abs(), 2),
        },
        _ => TrendDelta::NoData,
    }
}

/// Tier for a 0-100 risk score
pub fn risk_tier(score: f64) -> RiskTier {
    if score > 60.0 {
        RiskTier::High
    } else if score > 30.0 {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}

/// Risk score from the unweighted population variance of position ROIs,
/// scaled by 100 and capped at 100. `None` for an empty portfolio.
pub fn portfolio_risk(positions: &[Position]) -> Option<RiskAssessment> {
    if positions.is_empty() {
        return None;
    }

    let n = positions.len() as f64;
    let mean = positions.iter().map(|p| p.roi).sum::<f64>() / n;
    let variance = positions.iter().map(|p| (p.roi - mean).powi(2)).sum::<f64>() / n;
    let score = (variance * 100.0).min(100.0);
    let tier = risk_tier(score);

    Some(RiskAssessment {
        score,
        tier,
        indicator_width: tier.indicator_width(),
    })
}

/// Totals, amount-weighted ROI, projected returns and risk for a set of positions
pub fn portfolio_metrics(positions: &[Position]) -> Option<PortfolioMetrics> {
    let risk = portfolio_risk(positions)?;

    let total_invested: f64 = positions.iter().map(|p| p.amount).sum();
    let weighted_roi = if total_invested != 0.0 {
        positions.iter().map(|p| p.roi * p.amount).sum::<f64>() / total_invested
    } else {
        0.0
    };

    debug!(
        "Portfolio of {} position(s): invested {:.2}, weighted ROI {:.4}, risk {:.2}",
        positions.len(),
        total_invested,
        weighted_roi,
        risk.score
    );

    Some(PortfolioMetrics {
        total_invested,
        weighted_roi,
        projected_returns: total_invested * weighted_roi,
        risk,
    })
}

/// Rows of the portfolio distribution widget, one per farm type
pub fn portfolio_distribution(summary: &InvestmentSummaryResponse) -> Vec<DistributionRow> {
    summary
        .farm_types
        .iter()
        .zip(summary.investment_amounts.iter())
        .map(|(farm_type, &amount)| {
            let percentage = if summary.total_invested != 0.0 {
                (amount / summary.total_invested * 100.0).round() as i64
            } else {
                0
            };
            DistributionRow {
                farm_type: farm_type.clone(),
                amount,
                percentage,
            }
        })
        .collect()
}

pub fn roi_summary(data: &RoiTrendsResponse) -> RoiSummary {
    RoiSummary {
        target_roi: data.target_roi,
        current_roi: data.roi_values.last().copied().flatten(),
        trend: trend_delta(&data.roi_values),
    }
}

/// Icon shown next to a weather condition
pub fn weather_icon(condition: &str) -> &'static str {
    match condition {
        "Sunny" => "sun",
        "Cloudy" => "cloud",
        "Rainy" => "cloud-rain",
        "Storm" => "bolt",
        "Drought" => "hot",
        "Ideal" => "check-circle",
        "Cold" => "snowflake",
        "Hot" => "temperature-high",
        _ => "cloud",
    }
}

/// Unique weather conditions in first-seen order
pub fn weather_legend(data: &WeatherYieldResponse) -> Vec<WeatherLegendItem> {
    let mut legend: Vec<WeatherLegendItem> = Vec::new();
    for condition in data.weather_conditions.iter().flatten() {
        if legend.iter().any(|item| &item.condition == condition) {
            continue;
        }
        legend.push(WeatherLegendItem {
            condition: condition.clone(),
            icon: weather_icon(condition),
        });
    }
    legend
}

pub fn price_summary(data: &MarketPriceResponse) -> PriceSummary {
    let current_price = data.historical_prices.last().copied().flatten();

    let forecast = data
        .predicted_prices
        .last()
        .copied()
        .flatten()
        .map(|forecast_price| {
            let difference = current_price.map(|c| forecast_price - c).unwrap_or(0.0);
            let percent_change = match current_price {
                Some(current) if current != 0.0 => round_to(difference / current * 100.0, 1),
                _ => 0.0,
            };
            PriceForecastSummary {
                forecast_price,
                percent_change,
                direction: direction_of(difference),
            }
        });

    PriceSummary {
        current_price,
        forecast,
    }
}

/// Risk trend over the whole window: last minus first overall risk
pub fn risk_trend(overall_risks: &[Option<f64>]) -> RiskTrend {
    if overall_risks.len() < 2 {
        return RiskTrend::NoData;
    }

    match (overall_risks.first().copied().flatten(), overall_risks.last().copied().flatten()) {
        (Some(first), Some(last)) => {
            let difference = last - first;
            if difference < -RISK_TREND_BAND {
                RiskTrend::Decreasing
            } else if difference > RISK_TREND_BAND {
                RiskTrend::Increasing
            } else {
                RiskTrend::Stable
            }
        }
        _ => RiskTrend::NoData,
    }
}

pub fn risk_summary(data: &RiskLevelsResponse) -> RiskSummary {
    RiskSummary {
        base_risk_level: data
            .base_risk_level
            .clone()
            .unwrap_or_else(|| "Unknown".to_string()),
        current_category: data.risk_categories.last().cloned(),
        trend: risk_trend(&data.overall_risks),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_delta_flat() {
        assert_eq!(
            trend_delta(&[Some(5.0), Some(5.0)]),
            TrendDelta::Change { direction: TrendDirection::Flat, magnitude: 0.0 }
        );
    }

    #[test]
    fn test_trend_delta_no_data() {
        assert_eq!(trend_delta(&[]), TrendDelta::NoData);
        assert_eq!(trend_delta(&[Some(3.0)]), TrendDelta::NoData);
        assert_eq!(trend_delta(&[Some(3.0), None]), TrendDelta::NoData);
    }

    #[test]
    fn test_trend_delta_rounds_magnitude() {
        assert_eq!(
            trend_delta(&[Some(1.0), Some(10.456), Some(8.123)]),
            TrendDelta::Change { direction: TrendDirection::Decrease, magnitude: 2.33 }
        );
        assert_eq!(
            trend_delta(&[Some(1.0), Some(1.5)]),
            TrendDelta::Change { direction: TrendDirection::Increase, magnitude: 0.5 }
        );
    }

    #[test]
    fn test_zero_variance_is_low_risk() {
        let positions = [
            Position { amount: 100.0, roi: 0.10 },
            Position { amount: 100.0, roi: 0.10 },
        ];
        let risk = portfolio_risk(&positions).unwrap();
        assert_eq!(risk.score, 0.0);
        assert_eq!(risk.tier, RiskTier::Low);
        assert_eq!(risk.indicator_width, 33);
    }

    #[test]
    fn test_risk_score_uses_unweighted_population_variance() {
        // rois 0 and 1.2: mean 0.6, variance 0.36, score 36
        let positions = [
            Position { amount: 1.0, roi: 0.0 },
            Position { amount: 1000.0, roi: 1.2 },
        ];
        let risk = portfolio_risk(&positions).unwrap();
        assert!((risk.score - 36.0).abs() < 1e-9);
        assert_eq!(risk.tier, RiskTier::Medium);
        assert_eq!(risk.indicator_width, 66);
    }

    #[test]
    fn test_risk_score_is_capped() {
        let positions = [
            Position { amount: 1.0, roi: -5.0 },
            Position { amount: 1.0, roi: 5.0 },
        ];
        let risk = portfolio_risk(&positions).unwrap();
        assert_eq!(risk.score, 100.0);
        assert_eq!(risk.tier, RiskTier::High);
        assert_eq!(risk.indicator_width, 100);
    }

    #[test]
    fn test_risk_tier_thresholds_are_exclusive() {
        assert_eq!(risk_tier(30.0), RiskTier::Low);
        assert_eq!(risk_tier(30.01), RiskTier::Medium);
        assert_eq!(risk_tier(60.0), RiskTier::Medium);
        assert_eq!(risk_tier(60.01), RiskTier::High);
    }

    #[test]
    fn test_portfolio_metrics_weighted_roi() {
        let positions = [
            Position { amount: 300.0, roi: 0.10 },
            Position { amount: 100.0, roi: 0.20 },
        ];
        let metrics = portfolio_metrics(&positions).unwrap();
        assert_eq!(metrics.total_invested, 400.0);
        assert!((metrics.weighted_roi - 0.125).abs() < 1e-12);
        assert!((metrics.projected_returns - 50.0).abs() < 1e-9);
        assert!(portfolio_metrics(&[]).is_none());
    }

    #[test]
    fn test_portfolio_distribution_percentages() {
        let summary = InvestmentSummaryResponse {
            farm_types: vec!["Crop".into(), "Livestock".into(), "Mixed".into()],
            investment_amounts: vec![5000.0, 3000.0, 2000.0],
            total_invested: 10000.0,
            total_roi: 1500.0,
        };
        let rows = portfolio_distribution(&summary);
        let pct: Vec<i64> = rows.iter().map(|r| r.percentage).collect();
        assert_eq!(pct, vec![50, 30, 20]);
    }

    #[test]
    fn test_weather_legend_unique_in_order() {
        let data = WeatherYieldResponse {
            weather_conditions: vec![
                Some("Rainy".into()),
                Some("Sunny".into()),
                None,
                Some("Rainy".into()),
                Some("Fog".into()),
            ],
            ..Default::default()
        };
        let legend = weather_legend(&data);
        let names: Vec<(&str, &str)> = legend.iter().map(|l| (l.condition.as_str(), l.icon)).collect();
        assert_eq!(names, vec![("Rainy", "cloud-rain"), ("Sunny", "sun"), ("Fog", "cloud")]);
    }

    #[test]
    fn test_price_summary_percent_change() {
        let data = MarketPriceResponse {
            historical_prices: vec![Some(90.0), Some(100.0)],
            predicted_prices: vec![Some(105.0), Some(112.34)],
            ..Default::default()
        };
        let summary = price_summary(&data);
        assert_eq!(summary.current_price, Some(100.0));
        let forecast = summary.forecast.unwrap();
        assert_eq!(forecast.percent_change, 12.3);
        assert_eq!(forecast.direction, TrendDirection::Increase);
    }

    #[test]
    fn test_price_summary_without_forecast() {
        let data = MarketPriceResponse {
            historical_prices: vec![Some(10.0)],
            ..Default::default()
        };
        assert!(price_summary(&data).forecast.is_none());
    }

    #[test]
    fn test_risk_trend_band() {
        assert_eq!(risk_trend(&[Some(50.0)]), RiskTrend::NoData);
        assert_eq!(risk_trend(&[Some(50.0), Some(90.0), Some(44.0)]), RiskTrend::Decreasing);
        assert_eq!(risk_trend(&[Some(50.0), Some(56.0)]), RiskTrend::Increasing);
        assert_eq!(risk_trend(&[Some(50.0), Some(55.0)]), RiskTrend::Stable);
    }

    #[test]
    fn test_roi_summary() {
        let data = RoiTrendsResponse {
            target_roi: Some(15.0),
            dates: vec!["2024-01-01".into(), "2024-02-01".into()],
            roi_values: vec![Some(10.0), Some(12.5)],
            ..Default::default()
        };
        let summary = roi_summary(&data);
        assert_eq!(summary.current_roi, Some(12.5));
        assert_eq!(summary.target_roi, Some(15.0));
        assert_eq!(
            summary.trend,
            TrendDelta::Change { direction: TrendDirection::Increase, magnitude: 2.5 }
        );
    }
}
