use std::sync::Arc;

use async_trait::async_trait;

use super::channel::build_channel;
use super::entry::build_entries;
use super::error::FeedError;
use super::model::{FeedUrls, ParsedPage};
use super::xml::serialize_feed;
use crate::infrastructure::reddit::RedditClient;

pub struct FeedService {
    reddit: Arc<RedditClient>,
    urls: FeedUrls,
}

impl FeedService {
    pub fn new(reddit: Arc<RedditClient>, urls: FeedUrls) -> Self {
        Self { reddit, urls }
    }
}

#[async_trait]
pub trait FeedServiceApi: Send + Sync {
    /// Fetch the community's listing page and render it as an RSS document.
    async fn get_feed(&self, subreddit: &str) -> Result<String, FeedError>;
}

#[async_trait]
impl FeedServiceApi for FeedService {
    async fn get_feed(&self, subreddit: &str) -> Result<String, FeedError> {
        let listing = self.reddit.fetch_listing(subreddit).await?;
        tracing::debug!(
            subreddit,
            url = %listing.url,
            bytes = listing.body.len(),
            "fetched listing page"
        );

        // Everything past the fetch is synchronous: the parsed tree is built,
        // drained and dropped without crossing an await point. Each call gets
        // its own channel and document; nothing is carried between requests.
        let page = ParsedPage::parse(&listing.body, self.reddit.base_url().clone());

        let mut channel = build_channel(&page, &self.urls)?;
        channel.entries = build_entries(&page, &self.urls)?;
        tracing::debug!(subreddit, entries = channel.entries.len(), "extracted feed data");

        serialize_feed(&channel)
    }
}
