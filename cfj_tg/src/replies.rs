use std::time::Duration;

use teloxide::ApiError;
use teloxide::RequestError;
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::ChatId;
use teloxide::types::ParseMode;
use teloxide::types::ReplyMarkup;

use crate::flow::Outgoing;
use crate::menus;

/// Send one reply with a single retry on rate limiting and transient network
/// errors. Blocked and deactivated chats are absorbed with a warning.
pub async fn send_with_retry(bot: &Bot, chat_id: ChatId, outgoing: Outgoing) -> Result<(), RequestError> {
    match send_once(bot, chat_id, &outgoing).await {
        Ok(()) => Ok(()),
        Err(RequestError::RetryAfter(seconds)) => {
            tracing::warn!("Rate limited, waiting {seconds:?}");
            tokio::time::sleep(Duration::from_secs(5)).await;
            send_once(bot, chat_id, &outgoing).await
        }
        Err(RequestError::Network(err)) => {
            tracing::error!("Network error: {err}");
            tokio::time::sleep(Duration::from_secs(1)).await;
            send_once(bot, chat_id, &outgoing).await
        }
        Err(RequestError::Api(ApiError::BotBlocked)) => {
            tracing::warn!("Bot was blocked by chat {chat_id}");
            Ok(())
        }
        Err(RequestError::Api(ApiError::UserDeactivated)) => {
            tracing::warn!("Chat {chat_id} is deactivated");
            Ok(())
        }
        Err(err) => {
            tracing::error!("Unexpected error sending message: {err}");
            Err(err)
        }
    }
}

async fn send_once(bot: &Bot, chat_id: ChatId, outgoing: &Outgoing) -> Result<(), RequestError> {
    let request = bot.send_message(chat_id, outgoing.text.clone()).parse_mode(ParseMode::Markdown);

    match menus::markup_for(outgoing.keyboard) {
        Some(markup) => {
            request.reply_markup(ReplyMarkup::Keyboard(markup)).await?;
        }
        None => {
            request.await?;
        }
    }

    Ok(())
}
