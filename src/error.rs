use thiserror::Error;

// Basic error handling with thiserror
#[derive(Error, Debug)]
pub enum EmbedError {
    #[error("Youtube ID not found from: {0}")]
    InvalidVideoId(String),

    #[error("No container set to embed the player into")]
    NoContainer,

    #[error("Embed request rejected: {0}")]
    EmbedRejected(String),

    #[error("URL encoding failed: {0}")]
    UrlEncodingFailed(#[from] serde_urlencoded::ser::Error),

    #[error("Invalid playback options: {0}")]
    InvalidOptions(#[from] serde_json::Error),

    #[error("Readiness signal dropped before the player was ready")]
    ReadinessDropped,

    #[error("No video is loading")]
    NothingLoading,
}
