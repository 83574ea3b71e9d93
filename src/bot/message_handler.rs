//! Message Handler module for processing incoming Telegram messages

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::{ChatAction, FileId, Me, PhotoSize};
use teloxide::utils::command::BotCommands;
use tracing::{debug, error, info, warn};

// Import localization
use crate::localization::t;

// Import dialogue types
use crate::dialogue::{
    transition, ConversationAction, ConversationInput, ConversationState, VisionDialogue,
};

use crate::gemini::GeminiClient;
use crate::vision_errors::VisionError;

use super::photo_pipeline::PhotoPipeline;
use super::ui_builder::{remove_keyboard, split_message, TELEGRAM_MESSAGE_LIMIT};

/// Pipeline shared by every handler invocation
pub type SharedPipeline = Arc<PhotoPipeline<GeminiClient>>;

/// Upper bound for fetching one photo from the Telegram file API
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Quyidagi buyruqlar mavjud:")]
pub enum Command {
    #[command(description = "suhbatni boshlash")]
    Start,
    #[command(description = "fotosuratga javob sifatida yuborib, uni tasvirlash")]
    Photo,
    #[command(description = "suhbatni tugatish")]
    Cancel,
}

/// Dispatcher tree: every message goes through the photo dialogue
pub fn schema() -> UpdateHandler<anyhow::Error> {
    Update::filter_message()
        .enter_dialogue::<Message, InMemStorage<ConversationState>, ConversationState>()
        .endpoint(message_handler)
}

/// Reduce a message to a state machine input
///
/// Photos win over text; command captions on photos are not parsed.
pub fn classify_input(text: Option<&str>, has_photo: bool, bot_username: &str) -> ConversationInput {
    if has_photo {
        return ConversationInput::Photo;
    }

    match text.map(|text| Command::parse(text, bot_username)) {
        Some(Ok(Command::Start)) => ConversationInput::Start,
        Some(Ok(Command::Photo)) => ConversationInput::PhotoCommand,
        Some(Ok(Command::Cancel)) => ConversationInput::Cancel,
        Some(Err(_)) | None => ConversationInput::Other,
    }
}

fn user_name(msg: &Message) -> &str {
    msg.from
        .as_ref()
        .map(|user| user.first_name.as_str())
        .unwrap_or("unknown")
}

/// Largest photo size on the message, or on the message it replies to
fn find_photo(msg: &Message) -> Option<&PhotoSize> {
    msg.photo()
        .and_then(|photos| photos.last())
        .or_else(|| {
            msg.reply_to_message()
                .and_then(|reply| reply.photo())
                .and_then(|photos| photos.last())
        })
}

/// HTTP client used for photo downloads
pub fn download_client(timeout: Duration) -> Result<reqwest::Client, VisionError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| VisionError::Download(e.to_string()))
}

/// Fetch a whole response body
///
/// Errors are reported without the URL, which may embed the bot token.
pub async fn fetch_bytes(http: &reqwest::Client, url: &str) -> Result<Vec<u8>, VisionError> {
    let response = http
        .get(url)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|e| VisionError::Download(e.without_url().to_string()))?;
    let bytes = response
        .bytes()
        .await
        .map_err(|e| VisionError::Download(e.without_url().to_string()))?;

    Ok(bytes.to_vec())
}

pub async fn download_file(
    bot: &Bot,
    http: &reqwest::Client,
    file_id: FileId,
) -> Result<Vec<u8>, VisionError> {
    let file = bot
        .get_file(file_id)
        .await
        .map_err(|e| VisionError::Download(e.to_string()))?;
    let url = format!(
        "https://api.telegram.org/file/bot{}/{}",
        bot.token(),
        file.path
    );

    fetch_bytes(http, &url).await
}

/// Messages to send for a reply; never empty
pub fn reply_messages(reply: &str) -> Vec<String> {
    let chunks: Vec<String> = split_message(reply, TELEGRAM_MESSAGE_LIMIT)
        .into_iter()
        .filter(|chunk| !chunk.trim().is_empty())
        .collect();

    if chunks.is_empty() {
        vec![t("error-empty-response")]
    } else {
        chunks
    }
}

async fn describe_photo(
    bot: &Bot,
    http: &reqwest::Client,
    file_id: FileId,
    pipeline: &SharedPipeline,
) -> Result<String, VisionError> {
    let bytes = download_file(bot, http, file_id).await?;
    debug!(bytes = bytes.len(), "Photo downloaded");
    pipeline.run(&bytes).await
}

async fn handle_photo(
    bot: &Bot,
    msg: &Message,
    http: &reqwest::Client,
    pipeline: &SharedPipeline,
) -> Result<()> {
    let Some(photo) = find_photo(msg) else {
        debug!(user_id = %msg.chat.id, "Photo requested without a photo");
        bot.send_message(msg.chat.id, t("photo-missing")).await?;
        return Ok(());
    };

    info!(
        user = user_name(msg),
        user_id = %msg.chat.id,
        file_unique_id = ?photo.file.unique_id,
        "Photo received"
    );

    if let Err(e) = bot.send_chat_action(msg.chat.id, ChatAction::Typing).await {
        warn!(user_id = %msg.chat.id, error = %e, "Failed to send typing action");
    }

    let reply = match describe_photo(bot, http, photo.file.id.clone(), pipeline).await {
        Ok(answer) => answer,
        Err(e) => {
            error!(user_id = %msg.chat.id, error = %e, "Photo processing failed for user");
            t(e.user_message_key())
        }
    };

    for chunk in reply_messages(&reply) {
        bot.send_message(msg.chat.id, chunk).await?;
    }

    Ok(())
}

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    me: Me,
    dialogue: VisionDialogue,
    state: ConversationState,
    pipeline: SharedPipeline,
    http: reqwest::Client,
) -> Result<()> {
    let input = classify_input(msg.text(), msg.photo().is_some(), me.username());
    let step = transition(&state, input);
    debug!(
        user_id = %msg.chat.id,
        ?state,
        ?input,
        action = ?step.action,
        "Conversation step"
    );

    match step.action {
        ConversationAction::Greet => {
            bot.send_message(msg.chat.id, t("greeting")).await?;
        }
        ConversationAction::DescribePhoto => {
            handle_photo(&bot, &msg, &http, &pipeline).await?;
        }
        ConversationAction::Farewell => {
            info!(user = user_name(&msg), "User canceled the conversation");
            bot.send_message(msg.chat.id, t("farewell"))
                .reply_markup(remove_keyboard())
                .await?;
        }
        ConversationAction::Ignore => {
            debug!(user_id = %msg.chat.id, "Message ignored in current state");
        }
    }

    step.next.apply(&dialogue).await?;
    Ok(())
}
