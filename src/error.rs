use axum::{extract::multipart::MultipartError, http::StatusCode};
use thiserror::Error;

/// Ways a single image analysis can fail. The first failure aborts the run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no image file provided")]
    MissingInput,

    #[error("failed to read image upload: {0}")]
    UnreadableUpload(#[source] MultipartError),

    #[error("no valid response from {model} model")]
    UpstreamEmptyResponse { model: String },

    #[error("inference request to {model} model failed: {source}")]
    UpstreamTransportFailure {
        model: String,
        #[source]
        source: anyhow::Error,
    },
}

impl AnalysisError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AnalysisError::MissingInput => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to callers; upstream failures are deliberately not told apart.
    pub fn public_message(&self) -> &'static str {
        match self {
            AnalysisError::MissingInput => "No image file provided",
            _ => "Error analyzing image",
        }
    }
}
