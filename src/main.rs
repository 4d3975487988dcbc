use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod models;
mod services;
mod utils;

use config::AppConfig;

fn init_tracing() {
    let mut filter = EnvFilter::from_default_env();
    for directive in ["agri_analytics=info", "reqwest=warn", "hyper=warn"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env();
    info!("🌱 Agri Analytics v{}", env!("CARGO_PKG_VERSION"));
    debug!(
        "Using backend {} (session cookie {}), charts in {}",
        config.base_url,
        if config.session_cookie.is_some() { "set" } else { "not set" },
        config.output_dir.display()
    );

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    if let Err(e) = commands::handle_command(&args, config).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
