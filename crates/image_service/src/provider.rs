//! Image generation backends

use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::Config;
use crate::error::GenerationError;

pub const DEFAULT_WIDTH: u32 = 512;
pub const DEFAULT_HEIGHT: u32 = 512;
pub const DEFAULT_STEPS: u32 = 50;
pub const DEFAULT_GUIDANCE_SCALE: f64 = 7.5;

/// A validated generation request with defaults filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub width: u32,
    pub height: u32,
    pub steps: u32,
    pub guidance_scale: f64,
}

impl GenerationRequest {
    /// Reads a request body, `None` when there is no usable prompt.
    ///
    /// Options that are missing, zero or not numbers fall back to defaults.
    pub fn from_body(body: &[u8]) -> Option<Self> {
        let value: Value = serde_json::from_slice(body).ok()?;

        let prompt = value
            .get("prompt")
            .and_then(Value::as_str)
            .filter(|prompt| !prompt.trim().is_empty())?
            .to_string();

        let dimension = |key: &str, default: u32| {
            value
                .get(key)
                .and_then(Value::as_u64)
                .filter(|v| *v > 0)
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(default)
        };

        let guidance_scale = value
            .get("guidance_scale")
            .and_then(Value::as_f64)
            .filter(|v| *v > 0.0 && v.is_finite())
            .unwrap_or(DEFAULT_GUIDANCE_SCALE);

        Some(Self {
            prompt,
            width: dimension("width", DEFAULT_WIDTH),
            height: dimension("height", DEFAULT_HEIGHT),
            steps: dimension("steps", DEFAULT_STEPS),
            guidance_scale,
        })
    }
}

/// Something that turns a prompt into encoded image bytes.
pub trait ImageProvider: Send + Sync + 'static {
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = Result<Vec<u8>, GenerationError>> + Send;
}

/// Stable diffusion hosted on Replicate.
pub struct ReplicateProvider {
    client: reqwest::Client,
    api_base: String,
    token: String,
    model_version: String,
    poll_interval: Duration,
    max_polls: u32,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    status: String,
    #[serde(default)]
    output: Value,
    #[serde(default)]
    error: Value,
    urls: PredictionUrls,
}

#[derive(Debug, Deserialize)]
struct PredictionUrls {
    get: String,
}

impl ReplicateProvider {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            token: config.replicate_token.clone(),
            model_version: config.model_version.clone(),
            poll_interval: config.poll_interval(),
            max_polls: config.max_polls,
        }
    }

    async fn create_prediction(&self, request: &GenerationRequest) -> Result<Prediction, GenerationError> {
        let body = json!({
            "version": self.model_version,
            "input": {
                "prompt": request.prompt,
                "width": request.width,
                "height": request.height,
                "num_inference_steps": request.steps,
                "guidance_scale": request.guidance_scale,
            }
        });

        let prediction = self
            .client
            .post(format!("{}/predictions", self.api_base))
            .bearer_auth(&self.token)
            .header("Prefer", "wait")
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(prediction)
    }

    async fn wait_for(&self, mut prediction: Prediction) -> Result<Prediction, GenerationError> {
        let mut polls = 0;

        loop {
            match prediction.status.as_str() {
                "succeeded" => return Ok(prediction),
                "failed" | "canceled" => {
                    return Err(GenerationError::Provider(format!(
                        "prediction {}: {}",
                        prediction.status, prediction.error
                    )))
                }
                _ if polls >= self.max_polls => {
                    return Err(GenerationError::Provider(format!(
                        "prediction still {} after {polls} polls",
                        prediction.status
                    )))
                }
                _ => {}
            }

            tokio::time::sleep(self.poll_interval).await;
            polls += 1;

            prediction = self
                .client
                .get(&prediction.urls.get)
                .bearer_auth(&self.token)
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;
        }
    }
}

impl ImageProvider for ReplicateProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<u8>, GenerationError> {
        let prediction = self.create_prediction(request).await?;
        let prediction = self.wait_for(prediction).await?;

        let url = first_output_url(&prediction.output).ok_or_else(|| {
            GenerationError::Provider(format!("no image in output {}", prediction.output))
        })?;

        let bytes = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        Ok(bytes.to_vec())
    }
}

/// Image URL from a prediction output, which is either a URL or a list of them.
fn first_output_url(output: &Value) -> Option<&str> {
    match output {
        Value::String(url) => Some(url),
        Value::Array(urls) => urls.first().and_then(Value::as_str),
        _ => None,
    }
}
