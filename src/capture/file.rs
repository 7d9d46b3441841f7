use std::path::PathBuf;

use async_trait::async_trait;

use crate::capture::transport::CaptureTransport;
use crate::errors::{DroidScopeError, DroidScopeResult};

/// Replays a dump previously saved to disk.
pub struct FileTransport {
    pub path: PathBuf,
}

impl FileTransport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CaptureTransport for FileTransport {
    async fn capture(&self) -> DroidScopeResult<Vec<u8>> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            DroidScopeError::Acquisition(format!("read {}: {e}", self.path.display()))
        })?;
        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "dump loaded from file");
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_saved_dump() {
        let path = std::env::temp_dir().join(format!("droidscope-dump-{}.xml", std::process::id()));
        tokio::fs::write(&path, b"<hierarchy />").await.unwrap();
        let bytes = FileTransport::new(&path).capture().await;
        let _ = tokio::fs::remove_file(&path).await;
        assert_eq!(bytes.unwrap(), b"<hierarchy />");
    }

    #[tokio::test]
    async fn missing_file_is_acquisition_failure() {
        let err = FileTransport::new("/nonexistent/window_dump.xml")
            .capture()
            .await
            .unwrap_err();
        assert!(matches!(err, DroidScopeError::Acquisition(_)));
    }
}
