//! Portfolio summary models

use serde::Deserialize;

use super::summary::RiskAssessment;

/// One investment position: amount and ROI as a fraction (0.10 = 10%)
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Position {
    pub amount: f64,
    pub roi: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioMetrics {
    pub total_invested: f64,
    /// Amount-weighted ROI fraction
    pub weighted_roi: f64,
    pub projected_returns: f64,
    pub risk: RiskAssessment,
}

/// A row of the portfolio distribution widget
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionRow {
    pub farm_type: String,
    pub amount: f64,
    /// Share of the total, rounded to a whole percent
    pub percentage: i64,
}
