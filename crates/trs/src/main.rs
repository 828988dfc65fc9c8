use std::sync::Arc;

use trs_core::{
    config::{ConfigStore, Credentials},
    history::SentHistory,
    workdir::WorkDir,
    Error,
};
use trs_reddit::RedditClient;
use trs_telegram::{
    router::{run_polling, AppState},
    stickers::StickerIndex,
};

#[tokio::main]
async fn main() -> Result<(), trs_core::Error> {
    trs_core::logging::init("trs")?;

    let workdir = WorkDir::resolve()?;
    let credentials = ConfigStore::new(workdir.config_file()).load()?;
    if !credentials.is_configured() {
        // load() just wrote the template if the file was missing.
        return Err(Error::Config(format!(
            "fill in {} before starting the bot",
            workdir.config_file().display()
        )));
    }

    let Credentials {
        token_bot,
        reddit_id,
        reddit_secret,
        reddit_agent,
    } = credentials;

    let reddit = RedditClient::new(reddit_id, reddit_secret, reddit_agent)?;
    let history = Arc::new(SentHistory::new(workdir.history_file()));

    let state = Arc::new(AppState {
        source: Arc::new(reddit),
        history,
        stickers: StickerIndex::builtin(),
    });

    run_polling(token_bot, state)
        .await
        .map_err(|e| Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
