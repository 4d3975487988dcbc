use crate::api::analytics::AnalyticsSource;
use crate::commands::{log_fetch_failure, CommandContext};
use crate::models::ChartKind;
use crate::services::chart_service::{self, RenderOptions};
use crate::services::{analytics_service, metrics_service};
use crate::utils::{format_money, format_percentage, Table};

pub async fn execute(ctx: &CommandContext) -> Result<(), String> {
    tracing::info!("💼 Summary command called");

    let summary = match ctx.client.investment_summary().await {
        Ok(summary) => summary,
        Err(e) => {
            log_fetch_failure("investment summary", &e);
            println!("💼 Investment Distribution: No data to display");
            return Ok(());
        }
    };

    let rows = metrics_service::portfolio_distribution(&summary);
    if rows.is_empty() {
        println!("💼 You have no investments yet");
        return Ok(());
    }

    let mut table = Table::new(vec!["Farm Type", "Invested", "Share"]).with_title("💼 Investment Distribution");
    for row in &rows {
        table.add_row(&[
            row.farm_type.clone(),
            format_money(row.amount),
            format!("{}%", row.percentage),
        ]);
    }
    table.add_row(&[
        "Total".to_string(),
        format_money(summary.total_invested),
        format!("ROI {}", format_percentage(summary.total_roi)),
    ]);
    println!("{}", table.render());

    std::fs::create_dir_all(&ctx.config.output_dir)
        .map_err(|e| format!("Failed to create output directory: {}", e))?;
    let path = ctx.config.output_dir.join("portfolio_distribution.png");
    let options = RenderOptions {
        title: "Investment Distribution".to_string(),
        y_desc: "Invested ($)".to_string(),
        kind: ChartKind::Bar,
        width: ctx.config.chart_width,
        height: ctx.config.chart_height,
    };
    chart_service::render_chart(&analytics_service::portfolio_distribution_chart(&summary), &options, &path)?;
    println!("📈 Investment Distribution chart: {}", path.display());

    Ok(())
}
