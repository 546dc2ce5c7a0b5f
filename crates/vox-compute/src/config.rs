//! Client configuration.
//!
//! Configuration is env-var based: deployments set `VOX_COMPUTE_URL` and
//! `VOX_COMPUTE_KEY`; tests construct [`ComputeConfig`] directly with
//! the mock server's URL.

/// Configuration for the VoxCLOUD API client.
#[derive(Debug, Clone)]
pub struct ComputeConfig {
    /// Base URL of the VoxCLOUD API (e.g. `https://api.voxcloud.example`).
    pub base_url: String,
    /// Bearer token for API authentication.
    pub api_key: String,
    /// Per-request timeout in seconds (default: 30).
    pub timeout_secs: u64,
}

impl ComputeConfig {
    /// Create a new configuration with the default timeout.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout_secs: 30,
        }
    }

    /// Read configuration from `VOX_COMPUTE_URL` and `VOX_COMPUTE_KEY`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("VOX_COMPUTE_URL").map_err(|_| ConfigError::MissingEnv {
            var: "VOX_COMPUTE_URL",
        })?;
        let api_key = std::env::var("VOX_COMPUTE_KEY").map_err(|_| ConfigError::MissingEnv {
            var: "VOX_COMPUTE_KEY",
        })?;
        url::Url::parse(&base_url).map_err(|e| ConfigError::InvalidUrl {
            value: base_url.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self::new(base_url, api_key))
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing environment variable {var}")]
    MissingEnv {
        /// Name of the variable.
        var: &'static str,
    },

    /// The configured base URL does not parse.
    #[error("invalid base URL {value:?}: {reason}")]
    InvalidUrl {
        /// The offending value.
        value: String,
        /// Parse failure description.
        reason: String,
    },

    /// The API key contains characters that cannot appear in an HTTP
    /// header value.
    #[error("invalid API key: {reason}")]
    InvalidApiKey {
        /// Description of the problem (the key itself is never echoed).
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_applies_default_timeout() {
        let config = ComputeConfig::new("http://localhost:1", "key");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.base_url, "http://localhost:1");
    }

    #[test]
    fn from_env_reports_missing_variable() {
        // Variables deliberately unset in the test environment.
        std::env::remove_var("VOX_COMPUTE_URL");
        let err = ComputeConfig::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingEnv {
                var: "VOX_COMPUTE_URL"
            }
        ));
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::InvalidUrl {
            value: "not a url".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        assert!(format!("{err}").contains("not a url"));
    }
}
