use crate::api::analytics::AnalyticsSource;
use crate::commands::{log_fetch_failure, parse_id, print_insight, render_panel, CommandContext};
use crate::models::{ChartData, ChartId};
use crate::services::{analytics_service, insight_service, metrics_service};
use crate::utils::Table;

pub async fn execute(ctx: &CommandContext, args: &[&str]) -> Result<(), String> {
    tracing::info!("🌦️ Weather command called with args: {:?}", args);

    if args.first() == Some(&"help") {
        println!("🌦️ Weather vs. Yield\n\nUsage: weather <farm id> [--forecast] [--period monthly|quarterly|yearly] [--type line|bar]");
        return Ok(());
    }

    let farm_id = parse_id(args.first(), "farm")?;
    let data = match ctx.client.weather_yield(farm_id).await {
        Ok(data) => data,
        Err(e) => {
            log_fetch_failure("weather vs. yield", &e);
            return render_panel(ctx, ChartId::WeatherYield, ChartData::default());
        }
    };

    let legend = metrics_service::weather_legend(&data);
    let mut table = Table::new(vec!["Condition", "Icon"]).with_title(&format!(
        "🌦️ Weather vs. Yield: {}",
        data.farm_name.as_deref().unwrap_or("Farm")
    ));
    for item in &legend {
        table.add_row(&[item.condition.as_str(), item.icon]);
    }
    if table.is_empty() {
        println!("🌦️ No weather conditions recorded");
    } else {
        println!("{}", table.render());
    }

    render_panel(
        ctx,
        ChartId::WeatherYield,
        analytics_service::weather_yield_chart(&data, &ctx.config.view),
    )?;
    print_insight(&insight_service::weather_insight(&data));

    Ok(())
}
