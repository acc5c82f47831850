use thiserror::Error;

pub type Result<T> = std::result::Result<T, SdkError>;

/// Failures surfaced by the networked client.
///
/// Configuration problems (`Core`, `Config`) are synchronous and never
/// retried; transport and status errors are reported per call, and the
/// paginated lister forwards them as the terminal item of its stream.
#[derive(Debug, Error)]
pub enum SdkError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Core(#[from] privault_core::Error),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("platform returned http {status}: {message}")]
    Status { status: u16, message: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SdkError {
    /// Status code for `Status` errors, if that is what this is.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the platform answered 404 for the requested resource.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
