/// One submission fetched from Reddit.
///
/// `subreddit` carries the display name of the subreddit the submission was
/// drawn from, which is what ends up in the sent-history ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub selftext: String,
    pub url: String,
    pub subreddit: String,
}
