use crate::utils::Table;

pub fn execute() -> Result<(), String> {
    let mut commands = Table::new(vec!["Command", "Description"])
        .with_title("📖 Agri Analytics Commands");
    commands.add_row(&["roi <opportunity>", "ROI trends against the target ROI"]);
    commands.add_row(&["weather <farm>", "Actual vs. predicted yield with weather conditions"]);
    commands.add_row(&["price <farm>", "Historical market price and its forecast"]);
    commands.add_row(&["risk <opportunity>", "Overall, volatility, weather and financial risk"]);
    commands.add_row(&["opportunities <farm>", "Investment opportunities listed for a farm"]);
    commands.add_row(&["performance <farm>", "Revenue, profit and expenses of a farm"]);
    commands.add_row(&["summary", "Your investment distribution by farm type"]);
    commands.add_row(&["portfolio <positions.json>", "Weighted ROI, projected returns and risk"]);
    commands.add_row(&["dashboard <farm> [opportunity]", "All four charts with summaries and insights"]);
    commands.add_row(&["help", "Show this help message"]);

    let mut options = Table::new(vec!["Option", "Description"]).with_title("⚙️ Options");
    options.add_row(&["-p, --period <monthly|quarterly|yearly>", "Resample the time axis (default monthly)"]);
    options.add_row(&["-f, --forecast", "Append forecast values after the historical data"]);
    options.add_row(&["-t, --type <line|bar>", "Chart type (default line)"]);
    options.add_row(&["-o, --out <dir>", "Where PNG charts are written"]);
    options.add_row(&["-w, --watch <secs>", "Keep the dashboard open, refreshing on this interval"]);

    let mut environment = Table::new(vec!["Variable", "Description"]).with_title("🌱 Environment");
    environment.add_row(&["ANALYTICS_BASE_URL", "Backend URL (default http://127.0.0.1:5000)"]);
    environment.add_row(&["ANALYTICS_SESSION", "Session cookie for authenticated endpoints"]);
    environment.add_row(&["ANALYTICS_OUTPUT_DIR", "Default chart directory (default charts)"]);
    environment.add_row(&["ANALYTICS_CHART_WIDTH / _HEIGHT", "Chart size in pixels (default 1024x768)"]);
    environment.add_row(&["ANALYTICS_TIMEOUT_SECS", "Request timeout (default 10)"]);
    environment.add_row(&["RUST_LOG", "Log filter, e.g. agri_analytics=info"]);

    println!("{}\n{}\n{}", commands.render(), options.render(), environment.render());
    Ok(())
}
