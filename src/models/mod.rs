//! Data models for the analytics client
//!
//! Chart-ready series, summary widgets and the typed dashboard state.
//! Wire formats live in `api::analytics::models`.

pub mod chart;
pub mod portfolio;
pub mod series;
pub mod state;
pub mod summary;

// Re-export commonly used types for convenience
pub use chart::{ChartData, ChartKind, Dataset, LineStyle, SeriesColor};
pub use portfolio::{DistributionRow, PortfolioMetrics, Position};
pub use series::{MergedSeries, Period, SampledSeries};
pub use state::{ChartId, DashboardState, Opportunity, ViewSettings};
pub use summary::{
    Insight, PriceForecastSummary, PriceSummary, RiskAssessment, RiskSummary, RiskTier, RiskTrend,
    RoiSummary, TrendDelta, TrendDirection, WeatherLegendItem,
};
