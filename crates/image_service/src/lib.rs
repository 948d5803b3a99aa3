//! HTTP service that turns a text prompt into an image file.
//!
//! `POST /generate` hands the prompt to an [`ImageProvider`], stores the
//! result in the [`ImageStore`] and answers with the public path of the file.

use std::path::Path;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::services::ServeDir;

pub mod config;
pub mod error;
pub mod provider;
pub mod store;

pub use config::Config;
pub use error::GenerationError;
pub use provider::{GenerationRequest, ImageProvider, ReplicateProvider};
pub use store::ImageStore;

use error::{ErrorBody, PROMPT_REQUIRED};

/// URL prefix the output directory is served under
pub const GENERATED_PREFIX: &str = "/generated";

pub struct AppState<P> {
    provider: P,
    store: ImageStore,
}

impl<P: ImageProvider> AppState<P> {
    pub fn new(provider: P, store: ImageStore) -> Self {
        Self { provider, store }
    }

    /// Generates and stores one image, returning its public path.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let bytes = self.provider.generate(request).await?;
        let name = self.store.save(&bytes).await?;

        tracing::info!(
            prompt = %request.prompt,
            width = request.width,
            height = request.height,
            "Generated {name}"
        );

        Ok(format!("{GENERATED_PREFIX}/{name}"))
    }
}

#[derive(Debug, Serialize)]
struct ImageBody {
    image: String,
}

pub fn router<P: ImageProvider>(state: Arc<AppState<P>>, static_dir: Option<&Path>) -> Router {
    let mut router = Router::new()
        .route("/generate", post(generate::<P>))
        .nest_service(GENERATED_PREFIX, ServeDir::new(state.store.dir()));

    if let Some(static_dir) = static_dir {
        router = router.fallback_service(ServeDir::new(static_dir));
    }

    router.with_state(state)
}

async fn generate<P: ImageProvider>(State(state): State<Arc<AppState<P>>>, body: Bytes) -> Response {
    let Some(request) = GenerationRequest::from_body(&body) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: PROMPT_REQUIRED,
            }),
        )
            .into_response();
    };

    match state.generate(&request).await {
        Ok(image) => Json(ImageBody { image }).into_response(),
        Err(err) => err.into_response(),
    }
}
