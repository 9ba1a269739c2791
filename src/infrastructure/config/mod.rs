use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Upstream libreddit-style front-end to scrape.
    pub reddit_url: String,
    /// Image cache the feed routes all media through.
    pub image_cache_url: String,
    /// Value of the upstream `comment_short` cookie.
    pub comment_short: String,
    /// Value of the upstream `show_nsfw` cookie.
    pub show_nsfw: String,
    /// This deployment's own public base URL, used for the feed self link.
    pub public_url: String,
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    pub environment: Environment,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            reddit_url: env::var("REDDIT_URL")
                .unwrap_or_else(|_| "https://libreddit.spike.codes".to_string()),
            image_cache_url: env::var("IMAGE_CACHE_URL")
                .unwrap_or_else(|_| "https://images.weserv.nl".to_string()),
            comment_short: env::var("COMMENT_SHORT").unwrap_or_else(|_| "top".to_string()),
            show_nsfw: env::var("SHOW_NSFW").unwrap_or_else(|_| "on".to_string()),
            public_url: env::var("PUBLIC_URL")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
            environment: match env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .as_str()
            {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        Ok(config)
    }
}
