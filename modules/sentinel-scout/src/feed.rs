// News-search feed client.
//
// HeadlineFeed is the seam between the fetcher and the network so the fetch
// cycle can be driven by MockFeed in tests.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use sentinel_common::Node;

/// Topical filter appended to every node query.
const TOPIC_FILTER: &str = "(Military OR Conflict OR Strike)";

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Feed transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Feed returned HTTP {0}")]
    Status(u16),

    #[error("Failed to parse feed: {0}")]
    Parse(#[from] feed_rs::parser::ParseFeedError),

    #[error("Feed unavailable: {0}")]
    Unavailable(String),
}

/// Source of candidate headlines for a node, in feed order.
#[async_trait]
pub trait HeadlineFeed: Send + Sync {
    async fn headlines(&self, node: &Node) -> Result<Vec<String>, FeedError>;
}

/// Search query for a node: the quoted name plus the topical filter.
pub fn search_query(node_name: &str) -> String {
    format!("\"{node_name}\" {TOPIC_FILTER}")
}

/// Parse an RSS/Atom body into entry titles, preserving order. Entries
/// without a title are skipped.
pub fn parse_headlines(body: &[u8]) -> Result<Vec<String>, FeedError> {
    let feed = feed_rs::parser::parse(body)?;
    Ok(feed
        .entries
        .into_iter()
        .filter_map(|entry| entry.title.map(|t| t.content))
        .filter(|title| !title.trim().is_empty())
        .collect())
}

/// Google News RSS search over reqwest + feed-rs.
pub struct GoogleNewsFeed {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleNewsFeed {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0")
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }
}

#[async_trait]
impl HeadlineFeed for GoogleNewsFeed {
    async fn headlines(&self, node: &Node) -> Result<Vec<String>, FeedError> {
        let query = search_query(&node.name);
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", query.as_str()),
                ("hl", "en-US"),
                ("gl", "US"),
                ("ceid", "US:en"),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        let bytes = resp.bytes().await?;
        let titles = parse_headlines(&bytes[..])?;
        debug!(node = %node.name, entries = titles.len(), "Parsed news feed");
        Ok(titles)
    }
}
