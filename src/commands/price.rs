use crate::api::analytics::AnalyticsSource;
use crate::commands::{log_fetch_failure, parse_id, print_insight, render_panel, CommandContext};
use crate::models::{ChartData, ChartId};
use crate::services::{analytics_service, insight_service, metrics_service};
use crate::utils::{format_money, Table};

pub async fn execute(ctx: &CommandContext, args: &[&str]) -> Result<(), String> {
    tracing::info!("💹 Price command called with args: {:?}", args);

    if args.first() == Some(&"help") {
        println!("💹 Market Price\n\nUsage: price <farm id> [--forecast] [--period monthly|quarterly|yearly] [--type line|bar]");
        return Ok(());
    }

    let farm_id = parse_id(args.first(), "farm")?;
    let data = match ctx.client.market_price(farm_id).await {
        Ok(data) => data,
        Err(e) => {
            log_fetch_failure("market price prediction", &e);
            return render_panel(ctx, ChartId::MarketPrice, ChartData::default());
        }
    };

    let summary = metrics_service::price_summary(&data);
    let mut table = Table::new(vec!["Current Price", "Forecast Price", "Change"]).with_title(&format!(
        "💹 Market Price: {} ({})",
        data.farm_name.as_deref().unwrap_or("Farm"),
        data.farm_type.as_deref().unwrap_or("unknown type")
    ));

    let current = summary
        .current_price
        .map(format_money)
        .unwrap_or_else(|| "--".to_string());
    match &summary.forecast {
        Some(forecast) => table.add_row(&[
            current,
            format_money(forecast.forecast_price),
            format!("{} {:.1}%", forecast.direction.arrow(), forecast.percent_change.abs()),
        ]),
        None => table.add_row(&[current, "--".to_string(), "No forecast".to_string()]),
    }
    println!("{}", table.render());

    render_panel(
        ctx,
        ChartId::MarketPrice,
        analytics_service::market_price_chart(&data, &ctx.config.view),
    )?;
    print_insight(&insight_service::market_price_insight(&data));

    Ok(())
}
