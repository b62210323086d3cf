//! Scratch staging for inbound uploads.
//!
//! Every upload is streamed to a file under the scratch root before it is
//! placed anywhere. The file is owned by a [`StagedFile`] guard and removed
//! when the guard is released or dropped, so the scratch root only ever holds
//! files for requests that are still in flight.

use bytes::Bytes;
use futures::{Stream, StreamExt};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tempfile::TempPath;
use thiserror::Error;
use tokio::io::AsyncWriteExt;

#[derive(Debug, Error)]
pub enum StagingError {
    #[error("Upload exceeds the maximum size of {limit} bytes")]
    TooLarge { limit: u64 },

    #[error("Upload is empty")]
    Empty,

    #[error("Failed to read upload stream: {0}")]
    Read(String),

    #[error("Staging IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Directory uploads are staged into.
#[derive(Debug, Clone)]
pub struct StagingArea {
    root: PathBuf,
}

/// An upload written to scratch. The file is deleted when this is dropped.
#[derive(Debug)]
pub struct StagedFile {
    path: TempPath,
    len: u64,
    content_type: String,
}

impl StagedFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Delete the scratch file now, reporting any failure.
    pub fn release(self) -> std::io::Result<()> {
        self.path.close()
    }
}

impl StagingArea {
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self, StagingError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `stream` to a fresh scratch file, failing once more than
    /// `max_bytes` have arrived. Nothing is left on disk on failure.
    pub async fn stage<S, E>(
        &self,
        stream: S,
        content_type: &str,
        max_bytes: u64,
    ) -> Result<StagedFile, StagingError>
    where
        S: Stream<Item = Result<Bytes, E>>,
        E: Display,
    {
        let start = std::time::Instant::now();

        let (file, path) = tempfile::Builder::new()
            .prefix("upload-")
            .tempfile_in(&self.root)?
            .into_parts();
        let mut file = tokio::fs::File::from_std(file);

        let mut stream = std::pin::pin!(stream);
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| StagingError::Read(e.to_string()))?;
            written += chunk.len() as u64;
            if written > max_bytes {
                tracing::debug!(
                    limit = max_bytes,
                    received = written,
                    "Upload exceeded size limit while staging"
                );
                return Err(StagingError::TooLarge { limit: max_bytes });
            }
            file.write_all(&chunk).await?;
        }

        if written == 0 {
            return Err(StagingError::Empty);
        }

        file.flush().await?;
        drop(file);

        tracing::debug!(
            path = %path.display(),
            size_bytes = written,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Upload staged"
        );

        Ok(StagedFile {
            path,
            len: written,
            content_type: content_type.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use tempfile::tempdir;

    fn chunks(parts: &[&'static [u8]]) -> impl Stream<Item = Result<Bytes, std::io::Error>> {
        stream::iter(
            parts
                .iter()
                .map(|p| Ok(Bytes::from_static(p)))
                .collect::<Vec<_>>(),
        )
    }

    fn entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[tokio::test]
    async fn stages_all_chunks() {
        let dir = tempdir().unwrap();
        let area = StagingArea::new(dir.path().join("scratch")).await.unwrap();

        let staged = area
            .stage(chunks(&[b"hello ", b"world"]), "image/png", 1024)
            .await
            .unwrap();

        assert_eq!(staged.len(), 11);
        assert_eq!(staged.content_type(), "image/png");
        assert_eq!(std::fs::read(staged.path()).unwrap(), b"hello world");

        let path = staged.path().to_path_buf();
        staged.release().unwrap();
        assert!(!path.exists());
        assert_eq!(entries(area.root()), 0);
    }

    #[tokio::test]
    async fn dropping_the_guard_removes_the_file() {
        let dir = tempdir().unwrap();
        let area = StagingArea::new(dir.path()).await.unwrap();

        let staged = area.stage(chunks(&[b"abc"]), "video/mp4", 3).await.unwrap();
        assert_eq!(entries(dir.path()), 1);
        drop(staged);
        assert_eq!(entries(dir.path()), 0);
    }

    #[tokio::test]
    async fn oversize_stream_is_rejected_and_cleaned_up() {
        let dir = tempdir().unwrap();
        let area = StagingArea::new(dir.path()).await.unwrap();

        let result = area.stage(chunks(&[b"12345", b"6"]), "video/mp4", 5).await;

        assert!(matches!(result, Err(StagingError::TooLarge { limit: 5 })));
        assert_eq!(entries(dir.path()), 0);
    }

    #[tokio::test]
    async fn empty_stream_is_rejected() {
        let dir = tempdir().unwrap();
        let area = StagingArea::new(dir.path()).await.unwrap();

        let result = area.stage(chunks(&[]), "image/png", 5).await;

        assert!(matches!(result, Err(StagingError::Empty)));
        assert_eq!(entries(dir.path()), 0);
    }

    #[tokio::test]
    async fn stream_errors_surface_as_read_errors() {
        let dir = tempdir().unwrap();
        let area = StagingArea::new(dir.path()).await.unwrap();

        let broken = stream::iter(vec![
            Ok(Bytes::from_static(b"part")),
            Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset")),
        ]);
        let result = area.stage(broken, "image/png", 1024).await;

        assert!(matches!(result, Err(StagingError::Read(msg)) if msg.contains("reset")));
        assert_eq!(entries(dir.path()), 0);
    }
}
