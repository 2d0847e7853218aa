use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Could not serialize job: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Brick(#[from] nucorrect::Error),
}
