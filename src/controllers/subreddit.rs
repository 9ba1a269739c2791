use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::{
    domain::feed::{FeedService, FeedServiceApi},
    error::{AppError, AppResult},
};

pub struct SubredditController {
    feed_service: Arc<FeedService>,
}

impl SubredditController {
    pub fn new(feed_service: Arc<FeedService>) -> Self {
        Self { feed_service }
    }

    /// GET /r/{subreddit} - Render the community's listing page as RSS
    pub async fn get_feed(
        State(controller): State<Arc<SubredditController>>,
        Path(subreddit): Path<String>,
    ) -> AppResult<Response> {
        if subreddit.trim().is_empty() {
            return Err(AppError::BadRequest(
                "subreddit name must not be empty".to_string(),
            ));
        }

        let feed = controller
            .feed_service
            .get_feed(&subreddit)
            .await
            .map_err(|e| {
                tracing::error!(subreddit = %subreddit, error = %e, "Feed generation failed");
                AppError::from(e)
            })?;

        Ok((
            [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
            feed,
        )
            .into_response())
    }
}
