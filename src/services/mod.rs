pub mod analytics_service;
pub mod chart_service;
pub mod dashboard_service;
pub mod forecast_service;
pub mod insight_service;
pub mod metrics_service;
pub mod panel_service;
pub mod resample_service;
