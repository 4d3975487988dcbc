use crate::api::analytics::AnalyticsSource;
use crate::commands::{log_fetch_failure, parse_id, print_insight, render_panel, CommandContext};
use crate::models::{ChartData, ChartId};
use crate::services::{analytics_service, insight_service, metrics_service};
use crate::utils::{format_optional, Table};

pub async fn execute(ctx: &CommandContext, args: &[&str]) -> Result<(), String> {
    tracing::info!("📈 ROI command called with args: {:?}", args);

    if args.first() == Some(&"help") {
        println!("📈 ROI Trends\n\nUsage: roi <opportunity id> [--period monthly|quarterly|yearly] [--type line|bar]");
        return Ok(());
    }

    let opportunity_id = parse_id(args.first(), "opportunity")?;
    let data = match ctx.client.roi_trends(opportunity_id).await {
        Ok(data) => data,
        Err(e) => {
            log_fetch_failure("ROI trends", &e);
            return render_panel(ctx, ChartId::Roi, ChartData::default());
        }
    };

    let summary = metrics_service::roi_summary(&data);
    let mut table = Table::new(vec!["Target ROI", "Current ROI", "Cumulative ROI", "Trend"]).with_title(&format!(
        "📈 ROI Trends: {}",
        data.opportunity_name.as_deref().unwrap_or("Opportunity")
    ));
    table.add_row(&[
        format!("{}%", format_optional(summary.target_roi, 2)),
        format!("{}%", format_optional(summary.current_roi, 2)),
        format!("{}%", format_optional(data.cumulative_roi, 2)),
        summary.trend.to_string(),
    ]);
    println!("{}", table.render());

    render_panel(ctx, ChartId::Roi, analytics_service::roi_trends_chart(&data, &ctx.config.view))?;
    print_insight(&insight_service::roi_insight(&data));

    Ok(())
}
