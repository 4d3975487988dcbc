//! Typed dashboard state populated straight from fetch responses

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Local};

use super::chart::ChartKind;
use super::series::Period;
use super::summary::{Insight, PriceSummary, RiskSummary, RoiSummary, WeatherLegendItem};

/// The four analytics charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChartId {
    Roi,
    WeatherYield,
    MarketPrice,
    RiskLevels,
}

impl ChartId {
    pub const ALL: [ChartId; 4] = [
        ChartId::Roi,
        ChartId::WeatherYield,
        ChartId::MarketPrice,
        ChartId::RiskLevels,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ChartId::Roi => "ROI Trends",
            ChartId::WeatherYield => "Weather vs. Yield",
            ChartId::MarketPrice => "Market Price Prediction",
            ChartId::RiskLevels => "Risk Level Analysis",
        }
    }

    pub fn y_axis_label(&self) -> &'static str {
        match self {
            ChartId::Roi => "ROI (%)",
            ChartId::WeatherYield => "Yield (tons)",
            ChartId::MarketPrice => "Price per Unit ($)",
            ChartId::RiskLevels => "Risk Level (%)",
        }
    }

    pub fn file_stem(&self) -> &'static str {
        match self {
            ChartId::Roi => "roi_trends",
            ChartId::WeatherYield => "weather_yield",
            ChartId::MarketPrice => "market_price",
            ChartId::RiskLevels => "risk_levels",
        }
    }
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Selectable investment opportunity of a farm
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opportunity {
    pub id: String,
    pub title: String,
}

/// View settings applied to every chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewSettings {
    pub period: Period,
    pub include_forecast: bool,
    pub chart_kind: ChartKind,
}

#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub farm_id: Option<u64>,
    pub opportunity_id: Option<u64>,
    pub opportunities: Vec<Opportunity>,
    pub view: ViewSettings,
    pub last_updated: Option<DateTime<Local>>,
    pub roi_summary: Option<RoiSummary>,
    pub weather_legend: Vec<WeatherLegendItem>,
    pub price_summary: Option<PriceSummary>,
    pub risk_summary: Option<RiskSummary>,
    pub insights: BTreeMap<ChartId, Insight>,
}

impl DashboardState {
    pub fn new(view: ViewSettings) -> Self {
        Self {
            view,
            ..Default::default()
        }
    }

    /// Drop everything derived from one chart's last response
    pub fn clear_chart(&mut self, chart: ChartId) {
        match chart {
            ChartId::Roi => self.roi_summary = None,
            ChartId::WeatherYield => self.weather_legend.clear(),
            ChartId::MarketPrice => self.price_summary = None,
            ChartId::RiskLevels => self.risk_summary = None,
        }
        self.insights.remove(&chart);
    }

    /// Formatted like "Oct 16, 2026, 10:45 AM"
    pub fn last_updated_label(&self) -> String {
        self.last_updated
            .map(|t| t.format("%b %-d, %Y, %I:%M %p").to_string())
            .unwrap_or_else(|| "never".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RiskTrend, TrendDelta};
    use chrono::TimeZone;

    #[test]
    fn test_clear_chart_only_touches_that_chart() {
        let mut state = DashboardState::new(ViewSettings::default());
        state.roi_summary = Some(RoiSummary {
            target_roi: Some(12.0),
            current_roi: Some(10.0),
            trend: TrendDelta::NoData,
        });
        state.risk_summary = Some(RiskSummary {
            base_risk_level: "Low".to_string(),
            current_category: None,
            trend: RiskTrend::Stable,
        });
        for id in [ChartId::Roi, ChartId::RiskLevels] {
            state.insights.insert(
                id,
                Insight {
                    title: id.title().to_string(),
                    content: String::new(),
                },
            );
        }

        state.clear_chart(ChartId::Roi);

        assert!(state.roi_summary.is_none());
        assert!(state.risk_summary.is_some());
        assert!(!state.insights.contains_key(&ChartId::Roi));
        assert!(state.insights.contains_key(&ChartId::RiskLevels));
    }

    #[test]
    fn test_last_updated_label() {
        let mut state = DashboardState::default();
        assert_eq!(state.last_updated_label(), "never");

        state.last_updated = Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 0).single();
        assert_eq!(state.last_updated_label(), "Mar 5, 2024, 02:07 PM");
    }
}
