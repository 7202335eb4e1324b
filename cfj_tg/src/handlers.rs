use std::sync::Arc;

use teloxide::prelude::*;

use crate::flow::Journal;
use crate::replies;

/// Handle one incoming Telegram message
pub async fn handle_message(bot: Bot, msg: Message, journal: Arc<Journal>) -> ResponseResult<()> {
    // Stickers, photos and the like carry no routable text.
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let reply = journal.dispatch(msg.chat.id.0, text).await;
    for outgoing in reply.messages {
        replies::send_with_retry(&bot, msg.chat.id, outgoing).await?;
    }

    Ok(())
}
