//! Storage collaborator for captured enrollment images.
//!
//! Captures are handed off fire-and-forget: the sink reports a boolean-style
//! outcome and the pipeline logs failures without retrying inside the current
//! debounce window.

use crate::{capture::CapturedImage, Error, Result};
use std::path::{Path, PathBuf};

/// Consumer of encoded capture submissions
#[allow(async_fn_in_trait)]
pub trait StorageSink {
    /// Submit one capture.
    ///
    /// # Errors
    ///
    /// Returns an error if the capture could not be persisted; the caller
    /// logs and moves on (at-most-once delivery).
    async fn submit(&self, image: &CapturedImage) -> Result<()>;
}

/// Sink writing captures into a local directory
#[derive(Debug, Clone)]
pub struct DiskSink {
    dir: PathBuf,
}

impl DiskSink {
    /// Create the sink, creating the target directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir: dir.as_ref().to_path_buf(),
        })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl StorageSink for DiskSink {
    async fn submit(&self, image: &CapturedImage) -> Result<()> {
        let path = self.dir.join(&image.filename);
        tokio::fs::write(&path, &image.bytes).await?;
        log::debug!("stored capture at {}", path.display());
        Ok(())
    }
}

/// Sink posting captures to an HTTP endpoint as a multipart form.
///
/// Mirrors the enrollment backend's save-image route: one form field named
/// `image` carrying the JPEG bytes and the capture filename.
#[derive(Debug, Clone)]
pub struct HttpSink {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSink {
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

impl StorageSink for HttpSink {
    async fn submit(&self, image: &CapturedImage) -> Result<()> {
        let part = reqwest::multipart::Part::bytes(image.bytes.clone())
            .file_name(image.filename.clone())
            .mime_str("image/jpeg")
            .map_err(|e| Error::Storage(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("image", part);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::Storage(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Storage(format!(
                "endpoint {} returned {}",
                self.endpoint,
                response.status()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;

    fn test_image() -> CapturedImage {
        CapturedImage {
            bytes: vec![0xFF, 0xD8, 0xFF, 0xD9],
            width: 224,
            height: 224,
            label: Direction::Straight,
            filename: "capture-straight-1.jpg".to_string(),
        }
    }

    #[tokio::test]
    async fn test_disk_sink_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DiskSink::new(dir.path().join("pics")).unwrap();

        sink.submit(&test_image()).await.unwrap();

        let written = std::fs::read(sink.dir().join("capture-straight-1.jpg")).unwrap();
        assert_eq!(written, vec![0xFF, 0xD8, 0xFF, 0xD9]);
    }

    #[tokio::test]
    async fn test_http_sink_unreachable_endpoint_errors() {
        // Port 9 is discard; nothing should be listening
        let sink = HttpSink::new("http://127.0.0.1:9/api/save-image");
        let result = sink.submit(&test_image()).await;
        assert!(matches!(result, Err(Error::Storage(_))));
    }
}
