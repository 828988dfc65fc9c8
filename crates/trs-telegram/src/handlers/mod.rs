//! Telegram update handlers.
//!
//! Handlers do their work in `trs_core::Result` and never bubble errors
//! into the dispatcher: a failure is logged and forwarded to the operator
//! chat, and the inbound request ends there.

use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{InlineQuery, ParseMode},
    utils::html,
};
use tracing::error;

use crate::router::{AppState, OPERATOR_CHAT_ID};

mod commands;
mod inline;

pub(crate) fn tg_err(e: teloxide::RequestError) -> trs_core::Error {
    trs_core::Error::External(format!("telegram error: {e}"))
}

pub async fn handle_message(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    // Plain text is ignored; this bot only speaks commands.
    if !text.starts_with('/') {
        return Ok(());
    }

    if let Err(err) = commands::handle_command(&bot, &msg, &state).await {
        report_to_operator(&bot, &err, &format!("{msg:#?}")).await;
    }
    Ok(())
}

pub async fn handle_inline_query(
    bot: Bot,
    query: InlineQuery,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    if let Err(err) = inline::handle_inline(&bot, &query, &state).await {
        report_to_operator(&bot, &err, &format!("{query:#?}")).await;
    }
    Ok(())
}

/// Log a handler failure and send a diagnostic to the operator chat.
/// Best-effort delivery; the end user gets nothing beyond whatever the
/// handler already sent.
async fn report_to_operator(bot: &Bot, err: &trs_core::Error, update_debug: &str) {
    error!(error = %err, "handler failed");

    // Stay well under the 4096-char message limit even after escaping.
    let text = format!(
        "An exception was raised while handling an update\n<pre>{}</pre>\n\n<pre>update = {}</pre>",
        escape_clamped(&err.to_string(), 500),
        escape_clamped(update_debug, 3000),
    );

    let _ = bot
        .send_message(OPERATOR_CHAT_ID, text)
        .parse_mode(ParseMode::Html)
        .await;
}

/// HTML-escape and cap the length. The cap applies to the escaped text, so
/// inputs dense in `<`/`>`/`&` cannot expand past it, and a trailing
/// half-written entity is trimmed rather than sent.
fn escape_clamped(s: &str, max_chars: usize) -> String {
    let escaped = html::escape(s);
    if escaped.chars().count() <= max_chars {
        return escaped;
    }

    let mut out: String = escaped.chars().take(max_chars).collect();
    if let Some(pos) = out.rfind('&') {
        if !out[pos..].contains(';') {
            out.truncate(pos);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_clamped_caps_after_expansion() {
        let dense = "<>&".repeat(2000);
        let out = escape_clamped(&dense, 3000);
        assert!(out.chars().count() <= 3000);
        // No dangling entity at the cut point.
        if let Some(pos) = out.rfind('&') {
            assert!(out[pos..].contains(';'), "cut mid-entity: ...{}", &out[pos..]);
        }
    }

    #[test]
    fn escape_clamped_leaves_short_input_alone() {
        assert_eq!(escape_clamped("a < b & c", 100), "a &lt; b &amp; c");
    }
}
