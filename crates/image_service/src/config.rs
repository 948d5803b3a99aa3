use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

pub const DEFAULT_MODEL_VERSION: &str = "db21e45d3f8f5f12345b364ab8795";
pub const DEFAULT_API_BASE: &str = "https://api.replicate.com/v1";

#[derive(Parser, Debug, Clone)]
#[command(name = "image-service")]
#[command(about = "Turns text prompts into images through Replicate")]
pub struct Config {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Where generated images are written, created if absent
    #[arg(long, env = "OUTPUT_DIR", default_value = "generated")]
    pub output_dir: PathBuf,

    /// Directory served for every other path
    #[arg(long, env = "STATIC_DIR", default_value = ".")]
    pub static_dir: PathBuf,

    #[arg(long, env = "REPLICATE_API_TOKEN", default_value = "", hide_env_values = true)]
    pub replicate_token: String,

    /// Stable diffusion model version on Replicate
    #[arg(long, env = "REPLICATE_MODEL_VERSION", default_value = DEFAULT_MODEL_VERSION)]
    pub model_version: String,

    #[arg(long, env = "REPLICATE_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Seconds between prediction status checks
    #[arg(long, default_value_t = 1)]
    pub poll_interval_secs: u64,

    /// Status checks before a prediction is given up on
    #[arg(long, default_value_t = 120)]
    pub max_polls: u32,
}

impl Config {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}
