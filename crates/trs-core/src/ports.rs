use async_trait::async_trait;

use crate::{domain::Post, Result};

/// Hexagonal port for the upstream post source.
///
/// The only operation the bot consumes: one random submission from a named
/// subreddit. Each call is an independent random draw; the implementation
/// gets no exclusion set, so repeats across calls are possible.
#[async_trait]
pub trait PostSource: Send + Sync {
    async fn random_post(&self, subreddit: &str) -> Result<Post>;
}
