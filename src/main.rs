mod actions;
mod api;
mod app;
mod config;
mod debounce;
mod dispatch;
mod editor;
mod export;
mod pages;
mod state;
mod table;
mod theme;
mod types;
mod ui;
mod utils;

use app::App;
use color_eyre::Result;
use config::Config;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "GATEWAY_CONSOLE_LOG";

/// The terminal belongs to the UI, so logs go to a file under the data dir
fn init_logging(config: &Config) -> Option<WorkerGuard> {
    let dir = dirs::data_dir()?.join("gateway-console");
    std::fs::create_dir_all(&dir).ok()?;

    let appender = tracing_appender::rolling::never(&dir, "gateway-console.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(config.log.level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Some(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config_path = Config::config_path()?;
    let config = Config::load_from(&config_path)?;
    let _log_guard = init_logging(&config);

    let terminal = ratatui::init();
    let app_result = App::new(config, config_path).run(terminal).await;
    ratatui::restore();
    app_result
}
