//! Waypoint service library

pub mod refresher;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use waypoint_api::AppState;
use waypoint_core::AppConfig;

/// Environment variable naming the JSON config file
pub const CONFIG_ENV: &str = "WAYPOINT_CONFIG";

/// Filter directives added on top of `RUST_LOG`
const LOG_DIRECTIVES: &[&str] = &["waypoint=debug", "routing=debug", "info"];

fn log_filter() -> anyhow::Result<EnvFilter> {
    let mut filter = EnvFilter::from_default_env();
    for directive in LOG_DIRECTIVES {
        filter = filter.add_directive(directive.parse()?);
    }
    Ok(filter)
}

/// Load config from `WAYPOINT_CONFIG`, or defaults when it is unset
pub fn load_config() -> anyhow::Result<AppConfig> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            let config = AppConfig::load_from_path(&path)
                .with_context(|| format!("loading config from {}", path.to_string_lossy()))?;
            tracing::info!("Loaded config from {}", path.to_string_lossy());
            Ok(config)
        }
        None => {
            tracing::info!("{} not set, using default config", CONFIG_ENV);
            Ok(AppConfig::default())
        }
    }
}

/// Run the service until the server stops
pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(log_filter()?).init();

    tracing::info!("Starting Waypoint");

    let config = load_config()?;
    let addr = config.api_addr();
    let refresh_interval = config.refresh_interval_secs;

    let state = AppState::with_config(config).context("building seed graph")?;
    refresher::spawn(state.clone(), refresh_interval);

    waypoint_api::start_server(state, addr)
        .await
        .with_context(|| format!("API server on {}", addr))
}
