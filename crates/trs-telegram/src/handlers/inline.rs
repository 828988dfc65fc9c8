use teloxide::{
    prelude::*,
    types::{InlineQuery, InlineQueryResult, InlineQueryResultCachedSticker},
};
use uuid::Uuid;

use trs_core::Result;

use super::tg_err;
use crate::router::AppState;
use crate::stickers;

/// Bot API cap on inline results per answer.
pub const MAX_RESULTS: usize = 50;

/// Empty query: random stickers from the pool. Non-empty query: tag search.
pub async fn handle_inline(bot: &Bot, query: &InlineQuery, state: &AppState) -> Result<()> {
    let text = query.query.trim();

    let file_ids = if text.is_empty() {
        state.stickers.random(MAX_RESULTS)
    } else {
        state.stickers.search(text)
    };

    let results: Vec<InlineQueryResult> = stickers::dedupe_preserving_order(file_ids)
        .into_iter()
        .take(MAX_RESULTS)
        .map(|file_id| {
            InlineQueryResultCachedSticker::new(Uuid::new_v4().to_string(), file_id).into()
        })
        .collect();

    if results.is_empty() {
        return Ok(());
    }

    bot.answer_inline_query(query.id.clone(), results)
        .await
        .map_err(tg_err)?;

    Ok(())
}
