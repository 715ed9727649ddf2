use std::fmt::Display;
use std::io;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use futures::{Stream, StreamExt};
use tokio::io::AsyncWriteExt;

use crate::domain::AudioUpload;

/// Spools incoming audio into uniquely named files under one directory.
pub struct TempAudioStore {
    dir: PathBuf,
}

impl TempAudioStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, UploadStoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes the whole stream to a new temporary file.
    ///
    /// The file is removed again if the stream or the write fails.
    pub async fn spool<S, E>(&self, filename: &str, stream: S) -> Result<AudioUpload, UploadStoreError>
    where
        S: Stream<Item = Result<Bytes, E>>,
        E: Display,
    {
        let (file, path) = tempfile::Builder::new()
            .prefix("call-")
            .suffix(".upload")
            .tempfile_in(&self.dir)?
            .into_parts();

        let mut file = tokio::fs::File::from_std(file);
        let mut stream = std::pin::pin!(stream);
        let mut size_bytes: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let bytes = chunk.map_err(|e| UploadStoreError::Stream(e.to_string()))?;
            file.write_all(&bytes).await?;
            size_bytes += bytes.len() as u64;
        }

        file.flush().await?;

        tracing::debug!(
            path = %path.display(),
            bytes = size_bytes,
            "Audio upload spooled to temporary file"
        );

        Ok(AudioUpload::new(path, filename.to_string(), size_bytes))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UploadStoreError {
    #[error("reading upload stream: {0}")]
    Stream(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
