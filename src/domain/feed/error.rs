use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("upstream request failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("upstream markup changed: {0}")]
    SchemaMismatch(String),
    #[error("feed serialization failed: {0}")]
    Serialization(#[from] anyhow::Error),
}

impl FeedError {
    /// A required node or attribute was not where the selector table says it
    /// should be. Either the community does not exist (the front-end served
    /// an error page) or the upstream layout drifted.
    pub(crate) fn missing(what: &str) -> Self {
        FeedError::SchemaMismatch(format!("expected {what} in listing page"))
    }
}

impl From<FeedError> for AppError {
    fn from(err: FeedError) -> Self {
        match err {
            FeedError::Fetch(e) => AppError::UpstreamUnavailable(e.to_string()),
            FeedError::SchemaMismatch(msg) => AppError::NotFound(msg),
            FeedError::Serialization(e) => AppError::Internal(e.to_string()),
        }
    }
}
