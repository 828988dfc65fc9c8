//! Reddit adapter (application-only OAuth).
//!
//! Implements the `trs-core` PostSource port over the public Reddit API.
//! The bot consumes exactly one operation: fetch a random submission from a
//! named subreddit. Read-only; no retry/backoff, failures propagate.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;

use trs_core::{domain::Post, ports::PostSource, Error, Result};

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const API_BASE: &str = "https://oauth.reddit.com";

/// Refresh the cached token this long before Reddit says it expires.
const TOKEN_EXPIRY_SLACK: Duration = Duration::from_secs(60);

pub struct RedditClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    token: Mutex<Option<CachedToken>>,
}

#[derive(Debug)]
struct CachedToken {
    bearer: String,
    expires_at: Instant,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

// Reddit wraps everything in listing envelopes. `/r/{sub}/random` answers
// with a `[submission listing, comments listing]` pair, or a plain listing
// for subreddits that have random disabled.
#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<ListingChild>,
}

#[derive(Debug, Deserialize)]
struct ListingChild {
    data: SubmissionData,
}

#[derive(Debug, Deserialize)]
struct SubmissionData {
    id: String,
    title: String,
    #[serde(default)]
    selftext: String,
    #[serde(default)]
    url: String,
    subreddit: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RandomResponse {
    Pair(Vec<Listing>),
    Single(Listing),
}

impl RedditClient {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent.into())
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::External(format!("reddit http client: {e}")))?;

        Ok(Self {
            http,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token: Mutex::new(None),
        })
    }

    /// Application-only OAuth (`client_credentials` grant). The bearer token
    /// is cached in-process and refreshed lazily shortly before expiry.
    async fn bearer_token(&self) -> Result<String> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.expires_at {
                return Ok(token.bearer.clone());
            }
        }

        debug!("requesting reddit application-only token");
        let resp = self
            .http
            .post(TOKEN_URL)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| Error::External(format!("reddit token request: {e}")))?;

        if !resp.status().is_success() {
            return Err(Error::External(format!(
                "reddit token request failed: {}",
                resp.status()
            )));
        }

        let token: TokenResponse = resp
            .json()
            .await
            .map_err(|e| Error::External(format!("reddit token response: {e}")))?;

        let expires_at = Instant::now()
            + Duration::from_secs(token.expires_in).saturating_sub(TOKEN_EXPIRY_SLACK);
        let bearer = token.access_token;
        *cached = Some(CachedToken {
            bearer: bearer.clone(),
            expires_at,
        });

        Ok(bearer)
    }
}

#[async_trait]
impl PostSource for RedditClient {
    async fn random_post(&self, subreddit: &str) -> Result<Post> {
        let bearer = self.bearer_token().await?;

        let url = format!("{API_BASE}/r/{subreddit}/random");
        let resp = self
            .http
            .get(&url)
            .bearer_auth(&bearer)
            .query(&[("raw_json", "1")])
            .send()
            .await
            .map_err(|e| Error::External(format!("reddit request: {e}")))?;

        if !resp.status().is_success() {
            return Err(Error::External(format!(
                "r/{subreddit} random fetch failed: {}",
                resp.status()
            )));
        }

        let body: RandomResponse = resp
            .json()
            .await
            .map_err(|e| Error::External(format!("reddit response: {e}")))?;

        let submission = first_submission(body)
            .ok_or_else(|| Error::External(format!("r/{subreddit} returned no submissions")))?;

        Ok(Post {
            id: submission.id,
            title: submission.title,
            selftext: submission.selftext,
            url: submission.url,
            subreddit: submission.subreddit,
        })
    }
}

fn first_submission(resp: RandomResponse) -> Option<SubmissionData> {
    let listing = match resp {
        RandomResponse::Pair(listings) => listings.into_iter().next()?,
        RandomResponse::Single(listing) => listing,
    };
    listing
        .data
        .children
        .into_iter()
        .next()
        .map(|child| child.data)
}
