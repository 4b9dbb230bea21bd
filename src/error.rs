#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Listings API returned {0}")]
    UpstreamStatus(u16),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Transport-level failures end a fetch early instead of failing it.
    pub fn is_transport(&self) -> bool {
        matches!(self, AppError::Http(_) | AppError::UpstreamStatus(_))
    }
}
