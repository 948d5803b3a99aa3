use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::distributions::Alphanumeric;
use rand::Rng;
use tokio::io::AsyncWriteExt;

use crate::error::GenerationError;

const SUFFIX_LEN: usize = 8;

/// Directory of generated images.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    /// Opens the store, creating its directory if needed.
    pub fn create(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;

        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `bytes` under a fresh name and returns that name.
    ///
    /// The image only appears under its final name once fully written.
    pub async fn save(&self, bytes: &[u8]) -> Result<String, GenerationError> {
        let name = unique_name();
        let partial = self.dir.join(format!(".{name}.part"));
        let complete = self.dir.join(&name);

        if let Err(err) = write_then_rename(&partial, &complete, bytes).await {
            if let Err(cleanup) = tokio::fs::remove_file(&partial).await {
                tracing::debug!("Nothing to clean up at {}: {cleanup}", partial.display());
            }
            return Err(err.into());
        }

        Ok(name)
    }
}

async fn write_then_rename(partial: &Path, complete: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(partial).await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    drop(file);

    tokio::fs::rename(partial, complete).await
}

/// `<unix millis>_<random lowercase suffix>.png`
fn unique_name() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default();

    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(|byte| char::from(byte).to_ascii_lowercase())
        .collect();

    format!("{millis}_{suffix}.png")
}
