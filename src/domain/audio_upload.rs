use std::io;
use std::path::Path;

use bytes::Bytes;
use futures::StreamExt;
use futures::stream::BoxStream;
use tempfile::TempPath;
use tokio_util::io::ReaderStream;

pub type AudioStream = BoxStream<'static, Result<Bytes, io::Error>>;

/// A spooled audio file owned by a single request.
///
/// The backing file is removed exactly once: by [`AudioUpload::release`] when the
/// caller is done with it, or when the value is dropped on any other path.
#[derive(Debug)]
pub struct AudioUpload {
    path: TempPath,
    filename: String,
    size_bytes: u64,
}

impl AudioUpload {
    pub fn new(path: TempPath, filename: String, size_bytes: u64) -> Self {
        Self {
            path,
            filename,
            size_bytes,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub async fn open_stream(&self) -> Result<AudioStream, io::Error> {
        let file = tokio::fs::File::open(&self.path).await?;
        Ok(ReaderStream::new(file).boxed())
    }

    /// Deletes the backing file, reporting the failure instead of swallowing it.
    pub fn release(self) -> io::Result<()> {
        self.path.close()
    }
}
