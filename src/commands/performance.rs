use crate::commands::{log_fetch_failure, parse_id, CommandContext};
use crate::services::analytics_service;
use crate::services::chart_service::{self, RenderOptions};
use crate::services::resample_service::resample_values;
use crate::utils::{format_optional, Table};

pub async fn execute(ctx: &CommandContext, args: &[&str]) -> Result<(), String> {
    tracing::info!("🚜 Performance command called with args: {:?}", args);

    let farm_id = parse_id(args.first(), "farm")?;
    let data = match ctx.client.farm_performance(farm_id).await {
        Ok(data) => data,
        Err(e) => {
            log_fetch_failure("farm performance", &e);
            println!("🚜 Farm {}: No data to display", farm_id);
            return Ok(());
        }
    };

    let chart = analytics_service::farm_performance_chart(&data, &ctx.config.view);
    if chart.is_empty() {
        println!("🚜 Farm {}: No data to display", farm_id);
        return Ok(());
    }

    let yields = resample_values(&data.dates, &data.yields, ctx.config.view.period);
    let mut table = Table::new(vec!["Date", "Revenue", "Profit", "Expenses", "Yield"]).with_title(&format!(
        "🚜 Farm Performance: {} ({})",
        data.farm_name.as_deref().unwrap_or("Farm"),
        ctx.config.view.period
    ));
    for (i, date) in chart.labels.iter().enumerate() {
        let cell = |label: &str| {
            chart
                .dataset(label)
                .and_then(|d| d.values.get(i).copied().flatten())
        };
        table.add_row(&[
            date.clone(),
            format_optional(cell("Revenue"), 2),
            format_optional(cell("Profit"), 2),
            format_optional(cell("Expenses"), 2),
            format_optional(yields.get(i).copied().flatten(), 2),
        ]);
    }
    println!("{}", table.render());

    std::fs::create_dir_all(&ctx.config.output_dir)
        .map_err(|e| format!("Failed to create output directory: {}", e))?;
    let path = ctx.config.output_dir.join(format!("farm_{}_performance.png", farm_id));
    let options = RenderOptions {
        title: "Farm Performance".to_string(),
        y_desc: "Amount ($)".to_string(),
        kind: ctx.config.view.chart_kind,
        width: ctx.config.chart_width,
        height: ctx.config.chart_height,
    };
    chart_service::render_chart(&chart, &options, &path)?;
    println!("📈 Farm Performance chart: {}", path.display());

    Ok(())
}
