use std::time::Duration;

use thiserror::Error;

/// Per-item failure taxonomy. None of these abort a run; the pipeline
/// counts them and moves on. Only session acquisition failures (anyhow,
/// at launch) are fatal.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("timed out after {timeout:?} waiting for `{selector}`")]
    LoadTimeout { selector: String, timeout: Duration },

    #[error("error page detected: {0}")]
    ErrorPageDetected(String),

    #[error("parse failure: {0}")]
    Parse(String),

    #[error("browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),
}

impl ScrapeError {
    pub fn timeout(selector: &str, timeout: Duration) -> Self {
        Self::LoadTimeout {
            selector: selector.to_string(),
            timeout,
        }
    }
}
