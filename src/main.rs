use std::sync::Arc;

use anyhow::{Context, Result};
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use vision_bot::bot::{self, Command, PhotoPipeline};
use vision_bot::config::BotConfig;
use vision_bot::dialogue::ConversationState;
use vision_bot::gemini::GeminiClient;
use vision_bot::image_store::ImageStore;
use vision_bot::vision::VisionService;

/// HTTP client chatter stays at warn unless RUST_LOG says otherwise
const DEFAULT_LOG_FILTER: &str = "info,reqwest=warn,hyper=warn,hyper_util=warn";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    init_tracing();

    info!("Starting Vision Telegram Bot");

    let config = BotConfig::from_env().context("Failed to load configuration")?;

    let model = GeminiClient::from_config(&config).context("Failed to build Gemini client")?;
    info!(
        model = model.model_name(),
        image_dir = %config.image_dir.display(),
        "Vision model configured"
    );

    let pipeline = Arc::new(PhotoPipeline::new(
        ImageStore::new(config.image_dir.clone()),
        VisionService::new(model),
    ));

    let http =
        bot::download_client(bot::DOWNLOAD_TIMEOUT).context("Failed to build download client")?;

    // Initialize the bot
    let bot = Bot::new(config.telegram_bot_token.clone());

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    info!("Bot initialized, starting dispatcher");

    Dispatcher::builder(bot, bot::schema())
        .dependencies(dptree::deps![InMemStorage::<ConversationState>::new(), pipeline, http])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
