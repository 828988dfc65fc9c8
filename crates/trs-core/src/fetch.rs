use tracing::debug;

use crate::{domain::Post, history::SentHistory, ports::PostSource, Result};

/// How many extra draws a single fetch may spend on dodging duplicates.
/// At most `MAX_DUPLICATE_RETRIES + 1` upstream calls per invocation.
pub const MAX_DUPLICATE_RETRIES: usize = 3;

/// Draw a random post from `subreddit`, redrawing a bounded number of times
/// while the draw is already present in the sent history.
///
/// Once the budget is spent the last candidate is returned even if it is
/// still a duplicate: bounded-retry-then-give-up, not bounded-retry-then-fail.
/// Upstream errors are not retried here; they propagate to the caller.
pub async fn fetch_unseen(
    source: &dyn PostSource,
    history: &SentHistory,
    subreddit: &str,
) -> Result<Post> {
    let mut candidate = source.random_post(subreddit).await?;

    for attempt in 0..MAX_DUPLICATE_RETRIES {
        if !history.contains(&candidate.id)? {
            return Ok(candidate);
        }
        debug!(id = %candidate.id, attempt, "already sent, drawing again");
        candidate = source.random_post(subreddit).await?;
    }

    Ok(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::{
        path::PathBuf,
        sync::atomic::{AtomicUsize, Ordering},
    };

    /// Returns the scripted posts in order, repeating the last one forever,
    /// and counts how many draws were made.
    struct ScriptedSource {
        posts: Vec<Post>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(posts: Vec<Post>) -> Self {
            Self {
                posts,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PostSource for ScriptedSource {
        async fn random_post(&self, _subreddit: &str) -> Result<Post> {
            let i = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.posts[i.min(self.posts.len() - 1)].clone())
        }
    }

    fn post(id: &str) -> Post {
        Post {
            id: id.to_string(),
            title: format!("title of {id}"),
            selftext: String::new(),
            url: format!("https://www.reddit.com/comments/{id}"),
            subreddit: "AskRedditespanol".to_string(),
        }
    }

    fn temp_history(tag: &str) -> SentHistory {
        let root = PathBuf::from(format!("/tmp/trs-fetch-{}-{tag}", std::process::id()));
        let _ = std::fs::remove_dir_all(&root);
        std::fs::create_dir_all(&root).unwrap();
        SentHistory::new(root.join("already_sended_submissions.csv"))
    }

    #[tokio::test]
    async fn fresh_first_draw_returns_after_one_call() {
        let history = temp_history("fresh");
        let source = ScriptedSource::new(vec![post("p1")]);

        let got = fetch_unseen(&source, &history, "AskRedditespanol")
            .await
            .unwrap();

        assert_eq!(got.id, "p1");
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn redraws_until_an_unseen_post_appears() {
        let history = temp_history("redraw");
        for id in ["dup1", "dup2"] {
            history
                .append(&crate::history::SentRecord {
                    id: id.to_string(),
                    title: String::new(),
                    subreddit: String::new(),
                })
                .unwrap();
        }
        let source = ScriptedSource::new(vec![post("dup1"), post("dup2"), post("fresh")]);

        let got = fetch_unseen(&source, &history, "AskRedditespanol")
            .await
            .unwrap();

        assert_eq!(got.id, "fresh");
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test]
    async fn gives_up_after_budget_and_returns_last_duplicate() {
        let history = temp_history("give-up");
        history
            .append(&crate::history::SentRecord {
                id: "dup".to_string(),
                title: String::new(),
                subreddit: String::new(),
            })
            .unwrap();
        let source = ScriptedSource::new(vec![post("dup")]);

        let got = fetch_unseen(&source, &history, "AskRedditespanol")
            .await
            .unwrap();

        // Still the duplicate, and no more than 1 + MAX_DUPLICATE_RETRIES draws.
        assert_eq!(got.id, "dup");
        assert_eq!(source.calls(), 1 + MAX_DUPLICATE_RETRIES);
    }
}
