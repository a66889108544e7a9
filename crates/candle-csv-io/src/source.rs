use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::SourceError;

/// Something that yields the full text of a candle file in one awaited call.
#[async_trait]
pub trait TextSource: Send + Sync {
    /// Source name (for logging/display).
    fn name(&self) -> &str;

    /// Read the whole content as text. Invalid UTF-8 sequences are replaced
    /// with U+FFFD rather than failing the read.
    async fn read_text(&self) -> Result<String, SourceError>;
}

/// Reads a file from the local filesystem.
pub struct FileSource {
    path: PathBuf,
    name: String,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            name: path.display().to_string(),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TextSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read_text(&self) -> Result<String, SourceError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// In-memory text, handy for embedding and tests.
pub struct StaticSource {
    name: String,
    content: String,
}

impl StaticSource {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

#[async_trait]
impl TextSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read_text(&self) -> Result<String, SourceError> {
        Ok(self.content.clone())
    }
}
