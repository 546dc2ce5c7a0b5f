//! VoxCLOUD API client error types.

/// Errors from VoxCLOUD API calls.
#[derive(Debug, thiserror::Error)]
pub enum ComputeApiError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        /// The operation endpoint being called.
        endpoint: String,
        /// The underlying transport failure.
        source: reqwest::Error,
    },

    /// The provider rejected the operation — a non-2xx status, or a 2xx
    /// body carrying `"stat": "fail"` (the provider reports some
    /// failures in-band).
    #[error("VoxCLOUD {endpoint} returned {status}: {body}")]
    Api {
        /// The operation endpoint being called.
        endpoint: String,
        /// HTTP status of the response.
        status: u16,
        /// Response body excerpt or provider error message.
        body: String,
    },

    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        /// The operation endpoint being called.
        endpoint: String,
        /// The underlying decode failure.
        source: reqwest::Error,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl ComputeApiError {
    /// The coarse error kind, for kind-only comparison in error-path
    /// assertions.
    pub fn kind(&self) -> ComputeErrorKind {
        match self {
            Self::Http { .. } => ComputeErrorKind::Http,
            Self::Api { .. } => ComputeErrorKind::Api,
            Self::Deserialization { .. } => ComputeErrorKind::Deserialization,
            Self::Config(_) => ComputeErrorKind::Config,
        }
    }
}

/// Coarse classification of [`ComputeApiError`] variants.
///
/// Error-path tests assert only that an operation failed with a given
/// kind; the payload (status codes, messages) is diagnostic detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComputeErrorKind {
    /// Transport-level failure.
    Http,
    /// Provider rejected the operation.
    Api,
    /// Response body did not decode.
    Deserialization,
    /// Client misconfiguration.
    Config,
}

impl std::fmt::Display for ComputeErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http => write!(f, "Http"),
            Self::Api => write!(f, "Api"),
            Self::Deserialization => write!(f, "Deserialization"),
            Self::Config => write!(f, "Config"),
        }
    }
}
