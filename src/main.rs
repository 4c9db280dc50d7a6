use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use tokoterm::domain::ApiPort;
use tokoterm::infrastructure::{AppConfig, CliArgs, ConfigFile, RestClient};
use tokoterm::presentation::App;
use tokoterm::presentation::theme::Theme;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config(args: CliArgs) -> Result<AppConfig> {
    let mut config = ConfigFile::locate(args.config.as_deref())?.load()?;
    config.merge_with_args(args);
    Ok(config)
}

fn create_app() -> Result<App> {
    let config = load_config(CliArgs::parse())?;

    init_logging(&config)?;

    info!(
        version = tokoterm::VERSION,
        base_url = %config.api.base_url,
        "Starting tokoterm"
    );

    let client = RestClient::with_timeout(&config.api.base_url, config.request_timeout())?;
    let backend = client.base_url().to_string();
    let api: Arc<dyn ApiPort> = Arc::new(client);
    let theme = Theme::new(&config.theme.accent_color);

    Ok(App::new(api, theme, backend))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let app = create_app()?;

    let mut terminal = ratatui::init();

    let result = app.run(&mut terminal).await;

    ratatui::restore();

    result
}
