use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*, types::ChatId};
use tracing::info;

use trs_core::{history::SentHistory, ports::PostSource};

use crate::handlers;
use crate::stickers::StickerIndex;

/// Chat that receives handler failure diagnostics.
pub const OPERATOR_CHAT_ID: ChatId = ChatId(232424901);

/// Everything the handlers need, shared through dptree dependencies.
pub struct AppState {
    pub source: Arc<dyn PostSource>,
    pub history: Arc<SentHistory>,
    pub stickers: StickerIndex,
}

/// Start long polling and block until the process is terminated by signal.
pub async fn run_polling(token: String, state: Arc<AppState>) -> anyhow::Result<()> {
    let bot = Bot::new(token);

    if let Ok(me) = bot.get_me().await {
        info!(username = me.username(), "bot started");
    }

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(handlers::handle_message))
        .branch(Update::filter_inline_query().endpoint(handlers::handle_inline_query));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}
