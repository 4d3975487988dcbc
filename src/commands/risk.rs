use crate::api::analytics::AnalyticsSource;
use crate::commands::{log_fetch_failure, parse_id, print_insight, render_panel, CommandContext};
use crate::models::{ChartData, ChartId};
use crate::services::{analytics_service, insight_service, metrics_service};
use crate::utils::Table;

pub async fn execute(ctx: &CommandContext, args: &[&str]) -> Result<(), String> {
    tracing::info!("⚠️ Risk command called with args: {:?}", args);

    if args.first() == Some(&"help") {
        println!("⚠️ Risk Levels\n\nUsage: risk <opportunity id> [--period monthly|quarterly|yearly] [--type line|bar]");
        return Ok(());
    }

    let opportunity_id = parse_id(args.first(), "opportunity")?;
    let data = match ctx.client.risk_levels(opportunity_id).await {
        Ok(data) => data,
        Err(e) => {
            log_fetch_failure("risk levels", &e);
            return render_panel(ctx, ChartId::RiskLevels, ChartData::default());
        }
    };

    let summary = metrics_service::risk_summary(&data);
    let mut table = Table::new(vec!["Base Risk", "Current Category", "Trend"]).with_title(&format!(
        "⚠️ Risk Levels: {}",
        data.opportunity_name.as_deref().unwrap_or("Opportunity")
    ));
    table.add_row(&[
        summary.base_risk_level.clone(),
        summary.current_category.clone().unwrap_or_else(|| "--".to_string()),
        summary.trend.to_string(),
    ]);
    println!("{}", table.render());

    render_panel(
        ctx,
        ChartId::RiskLevels,
        analytics_service::risk_levels_chart(&data, &ctx.config.view),
    )?;
    print_insight(&insight_service::risk_insight(&data));

    Ok(())
}
