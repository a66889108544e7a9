use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use candle_csv_core::Candle;
use tokio::io::AsyncWriteExt;

use crate::error::SinkError;

/// Receiver of a parsed candle series, usually a chart renderer.
///
/// Each call replaces the whole series, the way a chart series' data is set.
#[async_trait]
pub trait CandleSink: Send + Sync {
    /// Sink name (for logging/display).
    fn name(&self) -> &str;

    async fn set_data(&self, candles: &[Candle]) -> Result<(), SinkError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonTarget {
    Stdout,
    File(PathBuf),
}

/// Writes the series as a JSON array of `{time, open, high, low, close}`.
/// NaN prices and timestamps are written as `null`.
pub struct JsonSink {
    target: JsonTarget,
    pretty: bool,
    name: String,
}

impl JsonSink {
    pub fn stdout() -> Self {
        Self {
            target: JsonTarget::Stdout,
            pretty: false,
            name: "stdout".to_string(),
        }
    }

    pub fn file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            name: path.display().to_string(),
            target: JsonTarget::File(path),
            pretty: false,
        }
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn target(&self) -> &JsonTarget {
        &self.target
    }

    fn render(&self, candles: &[Candle]) -> Result<Vec<u8>, SinkError> {
        let mut buf = if self.pretty {
            serde_json::to_vec_pretty(candles)?
        } else {
            serde_json::to_vec(candles)?
        };
        buf.push(b'\n');
        Ok(buf)
    }
}

#[async_trait]
impl CandleSink for JsonSink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn set_data(&self, candles: &[Candle]) -> Result<(), SinkError> {
        let buf = self.render(candles)?;
        match &self.target {
            JsonTarget::Stdout => {
                let mut out = tokio::io::stdout();
                out.write_all(&buf).await?;
                out.flush().await?;
            }
            JsonTarget::File(path) => {
                if let Some(parent) = path.parent()
                    && !parent.as_os_str().is_empty()
                {
                    tokio::fs::create_dir_all(parent).await?;
                }
                tokio::fs::write(path, &buf).await?;
            }
        }
        Ok(())
    }
}

/// Keeps the most recent series in memory.
#[derive(Default)]
pub struct MemorySink {
    data: Mutex<Option<Vec<Candle>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last series received, `None` if `set_data` was never called.
    pub fn data(&self) -> Option<Vec<Candle>> {
        self.data
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl CandleSink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    async fn set_data(&self, candles: &[Candle]) -> Result<(), SinkError> {
        let mut data = self
            .data
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *data = Some(candles.to_vec());
        Ok(())
    }
}
