use anyhow::{Error, Result};
use storefront_notifier::{api::run_api_server, config::Config, telemetry::init_tracing};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::load()?;

    init_tracing("info");
    log_startup_banner(&config);

    run_api_server(config).await
}

fn log_startup_banner(config: &Config) {
    if config.telegram_bot_token.is_none() {
        warn!("TELEGRAM_BOT_TOKEN is not set; notifications will fail");
    }

    if config.telegram_chat_id.is_none() {
        warn!("TELEGRAM_CHAT_ID is not set; notifications will fail");
    }

    if let (Some(_), Some(chat_id)) = (&config.telegram_bot_token, &config.telegram_chat_id) {
        info!(chat_id = %chat_id, "Telegram notifier configured");
    }

    info!(
        address = %config.bind_address(),
        site_dir = %config.site_dir.display(),
        "Starting storefront notifier"
    );
}
