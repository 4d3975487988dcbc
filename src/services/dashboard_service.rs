//! Dashboard controller: owns the chart panels and the typed state, issues
//! fetches for the current selection and discards stale responses.

use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, error, info, warn};

use crate::api::analytics::models::{
    MarketPriceResponse, RiskLevelsResponse, RoiTrendsResponse, WeatherYieldResponse,
};
use crate::api::analytics::{AnalyticsSource, ApiError};
use crate::models::{ChartId, DashboardState, Opportunity, ViewSettings};
use crate::services::panel_service::ChartPanel;
use crate::services::{analytics_service, insight_service, metrics_service};
use crate::utils::{RequestSequencer, RequestTicket};

/// Responses for everything keyed on the selected farm
#[derive(Debug)]
pub struct FarmLoad {
    ticket: RequestTicket,
    pub farm_id: u64,
    pub opportunities: Result<Vec<Opportunity>, ApiError>,
    pub weather: Result<WeatherYieldResponse, ApiError>,
    pub price: Result<MarketPriceResponse, ApiError>,
}

/// Responses for everything keyed on the selected opportunity
#[derive(Debug)]
pub struct OpportunityLoad {
    ticket: RequestTicket,
    pub opportunity_id: u64,
    pub roi: Result<RoiTrendsResponse, ApiError>,
    pub risk: Result<RiskLevelsResponse, ApiError>,
}

pub struct DashboardController<S: AnalyticsSource> {
    source: S,
    state: DashboardState,
    roi_panel: ChartPanel,
    weather_panel: ChartPanel,
    price_panel: ChartPanel,
    risk_panel: ChartPanel,
    farm_requests: RequestSequencer,
    opportunity_requests: RequestSequencer,
}

impl<S: AnalyticsSource> DashboardController<S> {
    /// Controller with default view settings; apply others with [`Self::set_view`]
    pub fn new(source: S) -> Self {
        let view = ViewSettings::default();
        let mut controller = Self {
            source,
            state: DashboardState::new(view),
            roi_panel: ChartPanel::new(ChartId::Roi),
            weather_panel: ChartPanel::new(ChartId::WeatherYield),
            price_panel: ChartPanel::new(ChartId::MarketPrice),
            risk_panel: ChartPanel::new(ChartId::RiskLevels),
            farm_requests: RequestSequencer::new(),
            opportunity_requests: RequestSequencer::new(),
        };
        for id in ChartId::ALL {
            controller.panel_mut(id).init(view.chart_kind);
        }
        controller
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn panel(&self, id: ChartId) -> &ChartPanel {
        match id {
            ChartId::Roi => &self.roi_panel,
            ChartId::WeatherYield => &self.weather_panel,
            ChartId::MarketPrice => &self.price_panel,
            ChartId::RiskLevels => &self.risk_panel,
        }
    }

    fn panel_mut(&mut self, id: ChartId) -> &mut ChartPanel {
        match id {
            ChartId::Roi => &mut self.roi_panel,
            ChartId::WeatherYield => &mut self.weather_panel,
            ChartId::MarketPrice => &mut self.price_panel,
            ChartId::RiskLevels => &mut self.risk_panel,
        }
    }

    /// Reset one chart to its "no data" state
    fn reset_chart(&mut self, id: ChartId) {
        self.panel_mut(id).reset();
        self.state.clear_chart(id);
    }

    /// Fetch opportunities, weather-yield and market-price data for a farm.
    /// The three requests run concurrently and may finish in any order.
    pub async fn load_farm(&self, farm_id: u64) -> FarmLoad {
        let ticket = self.farm_requests.issue();
        debug!("Loading farm {} ({:?})", farm_id, ticket);

        let (opportunities, weather, price) = tokio::join!(
            self.source.farm_opportunities(farm_id),
            self.source.weather_yield(farm_id),
            self.source.market_price(farm_id),
        );

        FarmLoad {
            ticket,
            farm_id,
            opportunities,
            weather,
            price,
        }
    }

    /// Fetch ROI trends and risk levels for an opportunity
    pub async fn load_opportunity(&self, opportunity_id: u64) -> OpportunityLoad {
        let ticket = self.opportunity_requests.issue();
        debug!("Loading opportunity {} ({:?})", opportunity_id, ticket);

        let (roi, risk) = tokio::join!(
            self.source.roi_trends(opportunity_id),
            self.source.risk_levels(opportunity_id),
        );

        OpportunityLoad {
            ticket,
            opportunity_id,
            roi,
            risk,
        }
    }

    /// Apply a farm load. Returns `false` and changes nothing when a newer
    /// farm request has been issued since.
    pub fn apply_farm_load(&mut self, load: FarmLoad) -> bool {
        if !self.farm_requests.is_current(load.ticket) {
            warn!("Discarding stale response for farm {}", load.farm_id);
            return false;
        }

        self.state.farm_id = Some(load.farm_id);
        self.state.last_updated = Some(Local::now());

        match load.opportunities {
            Ok(opportunities) => self.state.opportunities = opportunities,
            Err(e) => {
                error!("Error fetching farm opportunities: {}", e);
                self.state.opportunities.clear();
                self.state.opportunity_id = None;
            }
        }

        match load.weather {
            Ok(data) => self.show_weather(&data),
            Err(e) => {
                error!("Error loading weather vs. yield data: {}", e);
                self.reset_chart(ChartId::WeatherYield);
            }
        }

        match load.price {
            Ok(data) => self.show_market_price(&data),
            Err(e) => {
                error!("Error loading market price prediction data: {}", e);
                self.reset_chart(ChartId::MarketPrice);
            }
        }

        true
    }

    /// Apply an opportunity load unless it is stale
    pub fn apply_opportunity_load(&mut self, load: OpportunityLoad) -> bool {
        if !self.opportunity_requests.is_current(load.ticket) {
            warn!("Discarding stale response for opportunity {}", load.opportunity_id);
            return false;
        }

        self.state.opportunity_id = Some(load.opportunity_id);
        self.state.last_updated = Some(Local::now());

        match load.roi {
            Ok(data) => self.show_roi(&data),
            Err(e) => {
                error!("Error loading ROI trends data: {}", e);
                self.reset_chart(ChartId::Roi);
            }
        }

        match load.risk {
            Ok(data) => self.show_risk(&data),
            Err(e) => {
                error!("Error loading risk levels data: {}", e);
                self.reset_chart(ChartId::RiskLevels);
            }
        }

        true
    }

    fn show_roi(&mut self, data: &RoiTrendsResponse) {
        let view = self.state.view;
        self.roi_panel
            .update(analytics_service::roi_trends_chart(data, &view), view.chart_kind);
        self.state.roi_summary = Some(metrics_service::roi_summary(data));
        self.state.insights.insert(ChartId::Roi, insight_service::roi_insight(data));
    }

    fn show_weather(&mut self, data: &WeatherYieldResponse) {
        let view = self.state.view;
        self.weather_panel
            .update(analytics_service::weather_yield_chart(data, &view), view.chart_kind);
        self.state.weather_legend = metrics_service::weather_legend(data);
        self.state
            .insights
            .insert(ChartId::WeatherYield, insight_service::weather_insight(data));
    }

    fn show_market_price(&mut self, data: &MarketPriceResponse) {
        let view = self.state.view;
        self.price_panel
            .update(analytics_service::market_price_chart(data, &view), view.chart_kind);
        self.state.price_summary = Some(metrics_service::price_summary(data));
        self.state
            .insights
            .insert(ChartId::MarketPrice, insight_service::market_price_insight(data));
    }

    fn show_risk(&mut self, data: &RiskLevelsResponse) {
        let view = self.state.view;
        self.risk_panel
            .update(analytics_service::risk_levels_chart(data, &view), view.chart_kind);
        self.state.risk_summary = Some(metrics_service::risk_summary(data));
        self.state
            .insights
            .insert(ChartId::RiskLevels, insight_service::risk_insight(data));
    }

    /// Select a farm, or clear the selection with `None`.
    ///
    /// A new farm invalidates the opportunity selection, so ROI and risk charts
    /// are reset and any in-flight opportunity request becomes stale.
    pub async fn select_farm(&mut self, farm_id: Option<u64>) {
        self.opportunity_requests.cancel();
        self.state.opportunity_id = None;
        self.state.opportunities.clear();
        self.reset_chart(ChartId::Roi);
        self.reset_chart(ChartId::RiskLevels);

        match farm_id {
            Some(id) => {
                info!("Selected farm {}", id);
                let load = self.load_farm(id).await;
                self.apply_farm_load(load);
            }
            None => {
                self.farm_requests.cancel();
                self.state.farm_id = None;
                self.reset_all();
            }
        }
    }

    /// Select an opportunity, or clear it with `None`
    pub async fn select_opportunity(&mut self, opportunity_id: Option<u64>) {
        match opportunity_id {
            Some(id) => {
                info!("Selected opportunity {}", id);
                let load = self.load_opportunity(id).await;
                self.apply_opportunity_load(load);
            }
            None => {
                self.opportunity_requests.cancel();
                self.state.opportunity_id = None;
                self.reset_chart(ChartId::Roi);
                self.reset_chart(ChartId::RiskLevels);
            }
        }
    }

    /// Change period, forecast or chart kind, then reload the current selection
    pub async fn set_view(&mut self, view: ViewSettings) {
        self.state.view = view;
        self.refresh().await;
    }

    /// Re-issue every load for the current selection
    pub async fn refresh(&mut self) {
        let farm_id = self.state.farm_id;
        let opportunity_id = self.state.opportunity_id;

        if farm_id.is_some() {
            let this = &*self;
            let (farm_load, opportunity_load) = tokio::join!(
                async {
                    match farm_id {
                        Some(id) => Some(this.load_farm(id).await),
                        None => None,
                    }
                },
                async {
                    match opportunity_id {
                        Some(id) => Some(this.load_opportunity(id).await),
                        None => None,
                    }
                },
            );

            if let Some(load) = farm_load {
                self.apply_farm_load(load);
            }
            if let Some(load) = opportunity_load {
                self.apply_opportunity_load(load);
            }
        }

        self.state.last_updated = Some(Local::now());
    }

    /// Reset every chart and clear insights
    pub fn reset_all(&mut self) {
        for id in ChartId::ALL {
            self.reset_chart(id);
        }
        self.state.insights.clear();
    }

    /// Render every non-empty panel into `dir`
    pub fn render_all(
        &self,
        dir: &Path,
        width: u32,
        height: u32,
    ) -> Vec<(ChartId, Result<Option<PathBuf>, String>)> {
        ChartId::ALL
            .iter()
            .map(|&id| (id, self.panel(id).render(dir, width, height)))
            .collect()
    }

    /// Tear down every panel and invalidate outstanding requests
    pub fn destroy(&mut self) {
        self.farm_requests.cancel();
        self.opportunity_requests.cancel();
        for id in ChartId::ALL {
            self.panel_mut(id).destroy();
        }
    }
}
