pub mod request_id;

pub use request_id::{request_id_middleware, RequestId};

use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::controllers::{health, subreddit::SubredditController};
use crate::infrastructure::config::Config;

/// Assemble the application router.
///
/// Split out of [`start_http_server`] so tests can drive the full stack
/// without binding a socket.
pub fn build_router(subreddit_controller: Arc<SubredditController>) -> Router {
    Router::new()
        .route("/", get(health::health))
        .route("/health", get(health::health))
        .route("/r/:subreddit", get(SubredditController::get_feed))
        .with_state(subreddit_controller)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    subreddit_controller: Arc<SubredditController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(subreddit_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
