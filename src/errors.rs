use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::types::LoadToken;

/// Error type for resource loading, CSV format, and configuration failures.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The resource could not be read.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// A bounded read did not complete in time.
    #[error("reading '{}' did not finish within {timeout:?}", path.display())]
    ResourceTimeout {
        /// File being read.
        path: PathBuf,
        /// Configured bound.
        timeout: Duration,
    },
    /// The resource was read but is not valid review CSV.
    #[error("malformed review data{}: {reason}", line_suffix(*line))]
    Format {
        /// 1-based source line, when known.
        line: Option<u64>,
        /// What was wrong with the data.
        reason: String,
    },
    /// Rejected configuration value.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// A newer load started before this one finished.
    #[error("load {token} was superseded by load {latest}")]
    StaleLoad {
        /// Token of the discarded load.
        token: LoadToken,
        /// Newest token issued at commit time.
        latest: LoadToken,
    },
}

impl DashboardError {
    /// True when the failure came from reaching the resource rather than reading its contents.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_) | Self::ResourceTimeout { .. })
    }

    pub(crate) fn format(line: Option<u64>, reason: impl Into<String>) -> Self {
        Self::Format {
            line,
            reason: reason.into(),
        }
    }
}

impl From<csv::Error> for DashboardError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|pos| pos.line());
        match err.into_kind() {
            csv::ErrorKind::Io(io_err) => Self::Io(io_err),
            kind => Self::Format {
                line,
                reason: csv_kind_reason(&kind),
            },
        }
    }
}

pub(crate) fn csv_kind_reason(kind: &csv::ErrorKind) -> String {
    match kind {
        csv::ErrorKind::Utf8 { err, .. } => err.to_string(),
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("expected {expected_len} fields, found {len}"),
        other => format!("{other:?}"),
    }
}

fn line_suffix(line: Option<u64>) -> String {
    line.map(|line| format!(" at line {line}"))
        .unwrap_or_default()
}
