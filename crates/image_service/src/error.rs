//! Error types for image generation

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

pub const PROMPT_REQUIRED: &str = "Prompt required";
pub const GENERATION_FAILED: &str = "Generation failed";

/// Anything that can go wrong between accepting a prompt and having the
/// image on disk.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("provider error: {0}")]
    Provider(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

impl IntoResponse for GenerationError {
    fn into_response(self) -> Response {
        // Details stay in the log, callers only learn that it failed
        tracing::error!("Image generation failed: {self}");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: GENERATION_FAILED,
            }),
        )
            .into_response()
    }
}
