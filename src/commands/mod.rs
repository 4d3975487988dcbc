pub mod dashboard;
pub mod help;
pub mod opportunities;
pub mod performance;
pub mod portfolio;
pub mod price;
pub mod risk;
pub mod roi;
pub mod summary;
pub mod weather;

use tracing::{error, info, warn};

use crate::api::analytics::{AnalyticsClient, ApiError};
use crate::config::AppConfig;
use crate::models::{ChartData, ChartId, Insight};
use crate::services::panel_service::ChartPanel;

/// Everything a command needs: configuration and a backend client
pub struct CommandContext {
    pub config: AppConfig,
    pub client: AnalyticsClient,
}

impl CommandContext {
    pub fn new(config: AppConfig) -> Self {
        let client = AnalyticsClient::from_config(&config);
        Self { config, client }
    }
}

/// Parse an id argument, naming what was expected on failure
pub fn parse_id(arg: Option<&&str>, what: &str) -> Result<u64, String> {
    let raw = arg.ok_or_else(|| format!("❌ Missing {} id", what))?;
    raw.parse::<u64>()
        .map_err(|_| format!("❌ Invalid {} id: '{}'", what, raw))
}

/// User-facing message for a backend failure
pub fn describe_api_error(e: &ApiError) -> String {
    match e {
        e if e.is_network() => {
            "⚠️ Network Error: could not reach the analytics server. Please try again.".to_string()
        }
        ApiError::NotFound(_) => "❌ Not found: no data for that id.".to_string(),
        ApiError::Unauthorized(_) => {
            "❌ Unauthorized: set ANALYTICS_SESSION to a valid session cookie.".to_string()
        }
        other => format!("❌ {}", other),
    }
}

/// Log a failed fetch. The caller falls back to its "no data" state.
pub fn log_fetch_failure(what: &str, e: &ApiError) {
    error!("Error loading {} data: {}", what, e);
    warn!("{}", describe_api_error(e));
}

/// Push one chart through a panel and write it to the output directory
pub fn render_panel(ctx: &CommandContext, id: ChartId, data: ChartData) -> Result<(), String> {
    let kind = ctx.config.view.chart_kind;
    let mut panel = ChartPanel::new(id);
    panel.init(kind);
    panel.update(data, kind);

    match panel.render(&ctx.config.output_dir, ctx.config.chart_width, ctx.config.chart_height)? {
        Some(path) => println!("📈 {} chart: {}", id.title(), path.display()),
        None => println!("📈 {}: No data to display", id.title()),
    }
    Ok(())
}

pub fn print_insight(insight: &Insight) {
    println!("\n💡 {}\n   {}", insight.title, insight.content);
}

/// Dispatch a command line (without the program name)
pub async fn handle_command(args: &[&str], mut config: AppConfig) -> Result<(), String> {
    let parts = config.apply_flags(args)?;

    let Some((&command, rest)) = parts.split_first() else {
        return help::execute();
    };

    info!("Running command '{}' with args {:?} ({:?})", command, rest, config.view);
    let ctx = CommandContext::new(config);

    let result = match command {
        "roi" => roi::execute(&ctx, rest).await,
        "weather" | "yield" => weather::execute(&ctx, rest).await,
        "price" | "market" => price::execute(&ctx, rest).await,
        "risk" => risk::execute(&ctx, rest).await,
        "opportunities" | "opps" => opportunities::execute(&ctx, rest).await,
        "performance" | "perf" => performance::execute(&ctx, rest).await,
        "summary" => summary::execute(&ctx).await,
        "portfolio" => portfolio::execute(&ctx, rest).await,
        "dashboard" | "dash" => dashboard::execute(&ctx, rest).await,
        "help" | "-h" | "--help" => help::execute(),
        other => Err(format!("❌ Unknown command '{}'. Run `help` for usage.", other)),
    };

    if let Err(e) = &result {
        error!("❌ Error executing command {}: {}", command, e);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id(Some(&"42"), "farm"), Ok(42));
        assert!(parse_id(None, "farm").unwrap_err().contains("Missing farm"));
        assert!(parse_id(Some(&"abc"), "opportunity").unwrap_err().contains("'abc'"));
    }

    #[test]
    fn test_describe_api_error_categories() {
        assert!(describe_api_error(&ApiError::RequestError("refused".into())).contains("Network Error"));
        assert!(describe_api_error(&ApiError::NotFound("x".into())).contains("Not found"));
        assert!(describe_api_error(&ApiError::Unauthorized("x".into())).contains("ANALYTICS_SESSION"));
        assert!(describe_api_error(&ApiError::ServerError(500, "boom".into())).contains("500"));
    }

    #[tokio::test]
    async fn test_unknown_command_and_flag() {
        let err = handle_command(&["frobnicate"], AppConfig::default()).await.unwrap_err();
        assert!(err.contains("Unknown command"));

        let err = handle_command(&["roi", "--nope"], AppConfig::default()).await.unwrap_err();
        assert!(err.contains("Unknown option"));
    }

    /// Config pointing at a port nothing listens on
    async fn unreachable_config(out: &str) -> AppConfig {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        AppConfig {
            base_url: format!("http://{}", addr),
            output_dir: std::env::temp_dir().join(out),
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_failure_falls_back_to_no_data() {
        let config = unreachable_config("agri_analytics_unreachable_roi").await;
        let chart_path = config.output_dir.join(format!("{}.png", ChartId::Roi.file_stem()));
        let _ = std::fs::remove_file(&chart_path);

        for command in [["roi", "1"], ["weather", "1"], ["price", "1"], ["risk", "1"], ["opportunities", "1"]] {
            let result = handle_command(&command, config.clone()).await;
            assert!(result.is_ok(), "{} failed: {:?}", command[0], result);
        }
        assert!(handle_command(&["summary"], config.clone()).await.is_ok());
        assert!(!chart_path.exists());
    }

    #[tokio::test]
    async fn test_bad_id_is_rejected_before_any_request() {
        let err = handle_command(&["roi", "seven"], AppConfig::default()).await.unwrap_err();
        assert!(err.contains("Invalid opportunity id"));
    }
}
