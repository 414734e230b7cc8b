use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tracing::debug;

use crate::errors::DashboardError;
use crate::transport::ReviewResource;

/// Filesystem-backed review resource with an optional read timeout.
pub struct FileResource {
    path: PathBuf,
    timeout: Option<Duration>,
}

impl FileResource {
    /// Create a resource reading `path` with no timeout.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            timeout: None,
        }
    }

    /// Bound how long a fetch may wait for the read to finish.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Path this resource reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReviewResource for FileResource {
    fn id(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<Vec<u8>, DashboardError> {
        let Some(timeout) = self.timeout else {
            return Ok(fs::read(&self.path)?);
        };
        read_with_timeout(&self.path, timeout)
    }
}

/// Read a file's bytes on a helper thread, giving up after `timeout`.
///
/// A timed-out read is abandoned, not cancelled; its result is dropped when it
/// eventually completes.
pub fn read_with_timeout(path: &Path, timeout: Duration) -> Result<Vec<u8>, DashboardError> {
    let (tx, rx) = mpsc::channel();
    let owned = path.to_path_buf();
    thread::Builder::new()
        .name("review-resource-read".to_string())
        .spawn(move || {
            let _ = tx.send(fs::read(&owned));
        })?;

    match rx.recv_timeout(timeout) {
        Ok(result) => {
            let bytes = result?;
            debug!(path = %path.display(), bytes = bytes.len(), "read review resource");
            Ok(bytes)
        }
        Err(mpsc::RecvTimeoutError::Timeout) => Err(DashboardError::ResourceTimeout {
            path: path.to_path_buf(),
            timeout,
        }),
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(DashboardError::Io(io::Error::other(
            "review resource reader stopped before producing a result",
        ))),
    }
}
