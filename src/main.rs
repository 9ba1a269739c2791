use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use redfeed_backend::controllers::subreddit::SubredditController;
use redfeed_backend::domain::feed::{FeedService, FeedUrls};
use redfeed_backend::infrastructure::config::{Config, LogFormat};
use redfeed_backend::infrastructure::http::start_http_server;
use redfeed_backend::infrastructure::reddit::RedditClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        environment = ?config.environment,
        upstream = %config.reddit_url,
        "Starting RedFeed Backend on {}:{}",
        config.host,
        config.port
    );

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Upstream client (fixed cookies, User-Agent, timeout, redirect cap)
    let reddit_client = Arc::new(RedditClient::new(&config)?);

    // 2. Feed service (owns the resolved URL set for this deployment)
    let feed_urls = FeedUrls::new(
        &config.reddit_url,
        &config.image_cache_url,
        &config.public_url,
    )?;
    let feed_service = Arc::new(FeedService::new(reddit_client, feed_urls));

    // 3. Controller
    let subreddit_controller = Arc::new(SubredditController::new(feed_service));

    // Start HTTP server with all routes
    let config = Arc::new(config);
    start_http_server(config, subreddit_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "redfeed_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "redfeed_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
