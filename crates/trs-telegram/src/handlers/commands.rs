use teloxide::{prelude::*, types::InputFile};
use url::Url;

use trs_core::{domain::Post, fetch::fetch_unseen, history::SentRecord, Result};

use super::tg_err;
use crate::router::AppState;

/// Subreddit used when `/get` is issued without an argument.
pub const DEFAULT_SUBREDDIT: &str = "AskRedditespanol";

/// Selftexts at or above this many characters are left out of the reply.
const MAX_SELFTEXT_CHARS: usize = 1000;

/// Posts hosted here are sent as photos with the text as caption.
const IMAGE_HOST: &str = "i.redd.it";

pub async fn handle_command(bot: &Bot, msg: &Message, state: &AppState) -> Result<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let (cmd, args) = parse_command(text);

    match cmd.as_str() {
        "start" => {
            bot.send_message(msg.chat.id, "Hi!").await.map_err(tg_err)?;
        }
        "get" => handle_get(bot, msg, state, &args).await?,
        // Unknown commands are ignored.
        _ => {}
    }
    Ok(())
}

async fn handle_get(bot: &Bot, msg: &Message, state: &AppState, args: &str) -> Result<()> {
    let subreddit = args.split_whitespace().next().unwrap_or(DEFAULT_SUBREDDIT);

    let post = fetch_unseen(state.source.as_ref(), &state.history, subreddit).await?;

    // Mark as sent before replying, duplicate or not: one unconditional
    // append per terminal fetch is the ledger's contract.
    state.history.append(&SentRecord {
        id: post.id.clone(),
        title: post.title.clone(),
        subreddit: post.subreddit.clone(),
    })?;

    let text = reply_text(&post);
    match image_url(&post.url) {
        Some(url) => {
            bot.send_photo(msg.chat.id, InputFile::url(url))
                .caption(text)
                .await
                .map_err(tg_err)?;
        }
        None => {
            bot.send_message(msg.chat.id, text).await.map_err(tg_err)?;
        }
    }
    Ok(())
}

/// Telegram may send `/cmd@botname arg1 ...`.
fn parse_command(text: &str) -> (String, String) {
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim().to_string();

    let cmd = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    (cmd, rest)
}

/// Title, plus the selftext on the next line when it is short enough.
fn reply_text(post: &Post) -> String {
    let mut text = post.title.clone();
    if !post.selftext.is_empty() && post.selftext.chars().count() < MAX_SELFTEXT_CHARS {
        text.push('\n');
        text.push_str(&post.selftext);
    }
    text
}

fn image_url(raw: &str) -> Option<Url> {
    let url = Url::parse(raw).ok()?;
    (url.host_str() == Some(IMAGE_HOST)).then_some(url)
}
