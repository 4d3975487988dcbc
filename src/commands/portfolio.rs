use std::path::Path;

use crate::commands::CommandContext;
use crate::models::Position;
use crate::services::metrics_service;
use crate::utils::{format_money, format_percentage, Table};

/// Positions as a JSON array of `{"amount": .., "roi": ..}` objects
pub fn parse_positions(raw: &str) -> Result<Vec<Position>, String> {
    serde_json::from_str(raw).map_err(|e| format!("❌ Invalid positions file: {}", e))
}

fn load_positions(path: &Path) -> Result<Vec<Position>, String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("❌ Could not read {}: {}", path.display(), e))?;
    parse_positions(&raw)
}

pub async fn execute(_ctx: &CommandContext, args: &[&str]) -> Result<(), String> {
    tracing::info!("📊 Portfolio command called with args: {:?}", args);

    let Some(file) = args.first() else {
        return Err("❌ Usage: portfolio <positions.json>".to_string());
    };

    let positions = load_positions(Path::new(file))?;
    let Some(metrics) = metrics_service::portfolio_metrics(&positions) else {
        println!("📊 No positions to analyse");
        return Ok(());
    };

    let mut table = Table::new(vec!["Metric", "Value"]).with_title("📊 Portfolio Metrics");
    table.add_row(&["Total Invested".to_string(), format_money(metrics.total_invested)]);
    table.add_row(&["Weighted ROI".to_string(), format_percentage(metrics.weighted_roi * 100.0)]);
    table.add_row(&["Projected Returns".to_string(), format_money(metrics.projected_returns)]);
    table.add_row(&["Risk Score".to_string(), format!("{:.2}", metrics.risk.score)]);
    table.add_row(&[
        "Risk Level".to_string(),
        format!("{} ({}%)", metrics.risk.tier, metrics.risk.indicator_width),
    ]);
    println!("{}", table.render());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positions() {
        let positions = parse_positions(r#"[{"amount": 1000, "roi": 0.1}, {"amount": 500.5, "roi": -0.02}]"#).unwrap();
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[1].amount, 500.5);
        assert_eq!(positions[1].roi, -0.02);
    }

    #[test]
    fn test_parse_positions_rejects_missing_fields() {
        let err = parse_positions(r#"[{"amount": 1000}]"#).unwrap_err();
        assert!(err.contains("Invalid positions file"));
    }
}
