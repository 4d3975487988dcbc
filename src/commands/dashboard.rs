use tracing::{info, warn};

use crate::api::analytics::{AnalyticsClient, AnalyticsSource};
use crate::commands::{parse_id, CommandContext};
use crate::models::{ChartId, DashboardState};
use crate::services::dashboard_service::DashboardController;
use crate::services::panel_service::PanelState;
use crate::utils::{format_money, format_optional, Table};

pub async fn execute(ctx: &CommandContext, args: &[&str]) -> Result<(), String> {
    tracing::info!("🧭 Dashboard command called with args: {:?}", args);

    let farm_id = parse_id(args.first(), "farm")?;
    let opportunity_id = match args.get(1) {
        Some(_) => Some(parse_id(args.get(1), "opportunity")?),
        None => None,
    };

    let mut controller = DashboardController::new(AnalyticsClient::from_config(&ctx.config));
    controller.set_view(ctx.config.view).await;

    controller.select_farm(Some(farm_id)).await;
    if opportunity_id.is_some() {
        controller.select_opportunity(opportunity_id).await;
    }
    show(ctx, &controller);

    if let Some(interval) = ctx.config.watch {
        info!("Refreshing every {}s, press Ctrl-C to stop", interval.as_secs());
        loop {
            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("Stopping dashboard");
                    break;
                }
            }
            controller.refresh().await;
            show(ctx, &controller);
        }
    }

    controller.destroy();
    Ok(())
}

/// Print the state tables, then render every panel
fn show<S: AnalyticsSource>(ctx: &CommandContext, controller: &DashboardController<S>) {
    print_state(controller.state());

    let mut charts = Table::new(vec!["Chart", "Type", "Points", "File"]).with_title("📈 Charts");
    let rendered = controller.render_all(
        &ctx.config.output_dir,
        ctx.config.chart_width,
        ctx.config.chart_height,
    );
    for (id, result) in rendered {
        let panel = controller.panel(id);
        let points = match panel.state() {
            PanelState::Ready => panel.data().labels.len().to_string(),
            PanelState::Empty | PanelState::Detached => "--".to_string(),
        };
        let file = match result {
            Ok(Some(path)) => path.display().to_string(),
            Ok(None) => "No data to display".to_string(),
            Err(e) => {
                warn!("Failed to render {} chart: {}", id, e);
                "Render failed".to_string()
            }
        };
        charts.add_row(&[id.title().to_string(), panel.kind().to_string(), points, file]);
    }
    println!("{}", charts.render());
}

fn print_state(state: &DashboardState) {
    let mut header = Table::new(vec!["Farm", "Opportunity", "Period", "Forecast", "Updated"])
        .with_title("🧭 Analytics Dashboard");
    header.add_row(&[
        state.farm_id.map(|id| id.to_string()).unwrap_or_else(|| "--".to_string()),
        state.opportunity_id.map(|id| id.to_string()).unwrap_or_else(|| "--".to_string()),
        state.view.period.to_string(),
        (if state.view.include_forecast { "on" } else { "off" }).to_string(),
        state.last_updated_label(),
    ]);
    println!("{}", header.render());

    if !state.opportunities.is_empty() {
        let mut table = Table::new(vec!["ID", "Opportunity"]).with_title("🌾 Opportunities");
        for opportunity in &state.opportunities {
            table.add_row(&[opportunity.id.as_str(), opportunity.title.as_str()]);
        }
        println!("{}", table.render());
    }

    let mut summary = Table::new(vec!["Widget", "Value"]).with_title("📋 Summary");
    if let Some(roi) = &state.roi_summary {
        summary.add_row(&["Target ROI".to_string(), format!("{}%", format_optional(roi.target_roi, 2))]);
        summary.add_row(&["Current ROI".to_string(), format!("{}%", format_optional(roi.current_roi, 2))]);
        summary.add_row(&["ROI Trend".to_string(), roi.trend.to_string()]);
    }
    if !state.weather_legend.is_empty() {
        let conditions: Vec<&str> = state.weather_legend.iter().map(|w| w.condition.as_str()).collect();
        summary.add_row(&["Weather".to_string(), conditions.join(", ")]);
    }
    if let Some(price) = &state.price_summary {
        summary.add_row(&[
            "Current Price".to_string(),
            price.current_price.map(format_money).unwrap_or_else(|| "--".to_string()),
        ]);
        if let Some(forecast) = &price.forecast {
            summary.add_row(&[
                "Forecast Price".to_string(),
                format!(
                    "{} ({} {:.1}%)",
                    format_money(forecast.forecast_price),
                    forecast.direction.arrow(),
                    forecast.percent_change.abs()
                ),
            ]);
        }
    }
    if let Some(risk) = &state.risk_summary {
        summary.add_row(&["Base Risk".to_string(), risk.base_risk_level.clone()]);
        summary.add_row(&[
            "Risk Category".to_string(),
            risk.current_category.clone().unwrap_or_else(|| "--".to_string()),
        ]);
        summary.add_row(&["Risk Trend".to_string(), risk.trend.to_string()]);
    }
    if !summary.is_empty() {
        println!("{}", summary.render());
    }

    for id in ChartId::ALL {
        if let Some(insight) = state.insights.get(&id) {
            println!("💡 {}: {}", insight.title, insight.content);
        }
    }
}
