use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response}
};

/// Why a download request ended in the failed state.
///
/// The `Display` text is the message shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("Please enter a video URL")]
    MissingUrl,

    #[error("Unable to retrieve video information")]
    MetadataUnavailable,

    #[error("Video is unavailable or has been removed")]
    VideoUnavailable,

    #[error("Unable to parse video information, please check the link")]
    ExtractionFailed,

    #[error("Download error: {0}")]
    Download(String),

    #[error("Download error: {0}")]
    Io(#[from] std::io::Error)
}

impl DownloadError {
    /// Maps an engine error message onto the categories users see.
    pub fn classify(message: &str) -> Self {
        if message.contains("Video unavailable") {
            DownloadError::VideoUnavailable
        } else if message.contains("Unable to extract") {
            DownloadError::ExtractionFailed
        } else {
            DownloadError::Download(message.to_string())
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            DownloadError::Download(_) | DownloadError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST
        }
    }
}

impl From<yt_dlp::Error> for DownloadError {
    fn from(err: yt_dlp::Error) -> Self {
        DownloadError::classify(&err.to_string())
    }
}

#[derive(Debug)]
pub struct AppError {
    pub message: String,
    pub status: StatusCode
}

impl AppError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("handler error: {}", self.message);
        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}

/// Keeps axum's status for a body that is not the expected JSON, but answers
/// with the same `{ "error": ... }` payload as every other failure.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            message: format!("Invalid request: {}", rejection.body_text())
        }
    }
}

impl From<DownloadError> for AppError {
    fn from(err: DownloadError) -> Self {
        Self {
            status: err.status(),
            message: err.to_string()
        }
    }
}
