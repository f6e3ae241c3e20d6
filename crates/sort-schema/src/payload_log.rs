use std::path::Path;
use std::path::PathBuf;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

/// Writes each proxied payload to disk, as received and as sorted.
///
/// Files are named `result-<unix seconds>.json` and
/// `result-<unix seconds>-raw.json`; a second response within the same second
/// replaces the first.
#[derive(Debug, Clone)]
pub struct PayloadLog {
    dir: PathBuf,
}

impl PayloadLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist both payloads. Failures are logged and otherwise ignored: the
    /// caller already has its response.
    pub async fn persist(&self, raw: &[u8], sorted: &[u8]) {
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        let stem = format!("result-{seconds}");

        for (path, contents) in [
            (self.dir.join(format!("{stem}.json")), sorted),
            (self.dir.join(format!("{stem}-raw.json")), raw),
        ] {
            match tokio::fs::write(&path, contents).await {
                Ok(()) => tracing::debug!(path = %path.display(), "wrote payload"),
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "could not write payload")
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn it_writes_raw_and_sorted_payloads() {
        let dir = tempfile::tempdir().unwrap();
        let log = PayloadLog::new(dir.path());

        log.persist(b"raw", b"sorted").await;

        let mut files: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        files.sort();
        assert_eq!(files.len(), 2);
        assert!(files[0].to_string_lossy().ends_with("-raw.json"));
        assert_eq!(std::fs::read(&files[0]).unwrap(), b"raw");
        assert_eq!(std::fs::read(&files[1]).unwrap(), b"sorted");
    }

    #[tokio::test]
    async fn it_survives_a_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let log = PayloadLog::new(dir.path().join("missing"));
        log.persist(b"raw", b"sorted").await;
        assert!(!log.dir().exists());
    }
}
