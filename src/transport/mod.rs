//! Raw review resource transports.
//!
//! A transport only produces bytes. Decoding and parsing happen afterwards, so
//! a failed read (`DashboardError::Io` / `ResourceTimeout`) is never reported as
//! a format problem, and undecodable content never as an IO problem.

use crate::errors::DashboardError;

/// Filesystem transport.
pub mod fs;

pub use fs::FileResource;

/// Source of raw review CSV bytes.
pub trait ReviewResource: Send + Sync {
    /// Human-readable identifier used in logs.
    fn id(&self) -> String;
    /// Read the complete resource, undecoded.
    fn fetch(&self) -> Result<Vec<u8>, DashboardError>;
}

/// Resource backed by text already in memory.
#[derive(Clone, Debug)]
pub struct InMemoryResource {
    id: String,
    text: String,
}

impl InMemoryResource {
    /// Wrap `text` under identifier `id`.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

impl ReviewResource for InMemoryResource {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn fetch(&self) -> Result<Vec<u8>, DashboardError> {
        Ok(self.text.clone().into_bytes())
    }
}
