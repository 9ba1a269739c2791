use std::sync::Arc;
use std::time::Duration;

use reqwest::{cookie::Jar, redirect, Client};
use url::Url;

use crate::domain::feed::FeedError;
use crate::infrastructure::config::Config;

/// Browser User-Agent sent upstream; the front-end throttles obvious bots.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/106.0.0.0 Safari/537.36";

const MAX_REDIRECTS: usize = 10;

/// Raw bytes of one listing page plus the final URL after redirects.
#[derive(Debug)]
pub struct FetchedListing {
    pub body: Vec<u8>,
    pub url: Url,
}

/// HTTP client for the upstream front-end.
///
/// Carries the fixed cookie pair (comment sort, NSFW visibility) scoped to
/// the upstream origin, a browser User-Agent, a total request timeout and a
/// bounded redirect policy. HTTP/2 is negotiated via ALPN when the upstream
/// offers it.
pub struct RedditClient {
    http: Client,
    base_url: Url,
}

impl RedditClient {
    pub fn new(config: &Config) -> Result<Self, Box<dyn std::error::Error>> {
        let base_url = Url::parse(&config.reddit_url)?;

        let jar = Jar::default();
        jar.add_cookie_str(&format!("comment_short={}", config.comment_short), &base_url);
        jar.add_cookie_str(&format!("show_nsfw={}", config.show_nsfw), &base_url);

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .cookie_provider(Arc::new(jar))
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Issue the single GET for a community's listing page.
    ///
    /// Network, timeout and redirect-limit failures surface as
    /// [`FeedError::Fetch`]; the response status is not interpreted here -
    /// the front-end serves error pages that fail schema extraction instead.
    pub async fn fetch_listing(&self, subreddit: &str) -> Result<FetchedListing, FeedError> {
        let mut url = self.base_url.clone();
        url.set_path(&format!("r/{subreddit}"));

        let response = self.http.get(url).send().await?;
        let url = response.url().clone();
        let body = response.bytes().await?.to_vec();

        Ok(FetchedListing { body, url })
    }
}
