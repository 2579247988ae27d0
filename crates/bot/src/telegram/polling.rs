use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{error, info, warn};

use super::{commands, BotClient, TelegramError};
use crate::store::FilterStore;

const POLL_TIMEOUT_SECS: u64 = 30;
const RETRY_DELAY: Duration = Duration::from_secs(5);

/// getUpdates long-poll loop. Runs until the shutdown channel flips;
/// per-request failures are logged and retried on the next iteration.
pub async fn run(
    bot: BotClient,
    store: Arc<FilterStore>,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), TelegramError> {
    // drop anything queued while the bot was down, and any stale webhook
    bot.delete_webhook(true).await?;
    info!("transport: long polling");

    let mut offset = 0i64;
    loop {
        let updates = tokio::select! {
            res = bot.get_updates(offset, POLL_TIMEOUT_SECS) => res,
            _ = shutdown.changed() => break,
        };

        let updates = match updates {
            Ok(updates) => updates,
            Err(e) => {
                warn!("getUpdates failed: {}", e);
                tokio::time::sleep(RETRY_DELAY).await;
                continue;
            }
        };

        for update in updates {
            offset = offset.max(update.update_id + 1);

            let Some(message) = update.message else {
                continue;
            };
            let Some(text) = message.text.as_deref() else {
                continue;
            };

            let chat_id = message.chat.id;
            if let Some(reply) = commands::handle(&store, chat_id, text).await {
                if let Err(e) = bot.send_message(chat_id, &reply, None).await {
                    error!("failed to reply to {}: {}", chat_id, e);
                }
            }
        }
    }

    info!("polling stopped");
    Ok(())
}
