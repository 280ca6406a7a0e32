//! Rate sources - where a rate table payload comes from

use crate::error::{CursError, Result};
use std::future::Future;
use std::path::{Path, PathBuf};

/// Trait for rate table sources
///
/// A source hands back the raw `rates.json` text; parsing and validation
/// happen in [`RateTable::from_json`](super::RateTable::from_json).
pub trait RateSource: Send + Sync {
    /// Fetch the current payload
    fn fetch(&self) -> impl Future<Output = Result<String>> + Send;

    /// Human-readable location, for logs
    fn name(&self) -> String;
}

/// Reads `rates.json` from the local filesystem
#[derive(Debug, Clone)]
pub struct FileRateSource {
    path: PathBuf,
}

impl FileRateSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RateSource for FileRateSource {
    fn fetch(&self) -> impl Future<Output = Result<String>> + Send {
        async move {
            std::fs::read_to_string(&self.path).map_err(|e| {
                CursError::RatesUnavailable(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                ))
            })
        }
    }

    fn name(&self) -> String {
        self.path.display().to_string()
    }
}

/// Fixed in-memory payload
#[derive(Debug, Clone)]
pub struct StaticRateSource {
    payload: String,
}

impl StaticRateSource {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }
}

impl RateSource for StaticRateSource {
    fn fetch(&self) -> impl Future<Output = Result<String>> + Send {
        let payload = self.payload.clone();
        async move { Ok(payload) }
    }

    fn name(&self) -> String {
        "static".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_file_source_reads_payload() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"rates":{{"mdl":1}}}}"#).unwrap();

        let source = FileRateSource::new(file.path());
        let payload = source.fetch().await.unwrap();
        assert!(payload.contains("mdl"));
        assert_eq!(source.name(), file.path().display().to_string());
    }

    #[tokio::test]
    async fn test_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileRateSource::new(dir.path().join("rates.json"));
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, CursError::RatesUnavailable(_)));
    }

    #[tokio::test]
    async fn test_static_source() {
        let source = StaticRateSource::new("{}");
        assert_eq!(source.fetch().await.unwrap(), "{}");
        assert_eq!(source.name(), "static");
    }
}
