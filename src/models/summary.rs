//! Summary widgets shown next to each chart

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Increase,
    Decrease,
    Flat,
}

impl TrendDirection {
    pub fn arrow(&self) -> &'static str {
        match self {
            TrendDirection::Increase => "▲",
            TrendDirection::Decrease => "▼",
            TrendDirection::Flat => "↔",
        }
    }
}

/// Change between the last two values of a series
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrendDelta {
    NoData,
    Change {
        direction: TrendDirection,
        /// Absolute difference, rounded to 2 decimals
        magnitude: f64,
    },
}

impl fmt::Display for TrendDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendDelta::NoData => f.write_str("No trend data"),
            TrendDelta::Change { direction, magnitude } => {
                write!(f, "{} {:.2}%", direction.arrow(), magnitude)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Width of the risk indicator bar, in percent
    pub fn indicator_width(&self) -> u8 {
        match self {
            RiskTier::Low => 33,
            RiskTier::Medium => 66,
            RiskTier::High => 100,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Medium => "Medium",
            RiskTier::High => "High",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Portfolio risk score in `[0, 100]` and its tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskAssessment {
    pub score: f64,
    pub tier: RiskTier,
    pub indicator_width: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoiSummary {
    pub target_roi: Option<f64>,
    pub current_roi: Option<f64>,
    pub trend: TrendDelta,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherLegendItem {
    pub condition: String,
    pub icon: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceForecastSummary {
    pub forecast_price: f64,
    /// Percent change from the current price, rounded to one decimal
    pub percent_change: f64,
    pub direction: TrendDirection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceSummary {
    pub current_price: Option<f64>,
    pub forecast: Option<PriceForecastSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskTrend {
    NoData,
    Decreasing,
    Increasing,
    Stable,
}

impl fmt::Display for RiskTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskTrend::NoData => f.write_str("No trend data"),
            RiskTrend::Decreasing => f.write_str("Decreasing"),
            RiskTrend::Increasing => f.write_str("Increasing"),
            RiskTrend::Stable => f.write_str("Stable"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RiskSummary {
    pub base_risk_level: String,
    pub current_category: Option<String>,
    pub trend: RiskTrend,
}

/// One insight card
#[derive(Debug, Clone, PartialEq)]
pub struct Insight {
    pub title: String,
    pub content: String,
}
