//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the error-backend endpoint before any connection attempt
//! - Catch sampling settings that silently discard everything
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure function: LogConfig → Result<(), Vec<ValidationError>>
//! - Runs before a config is handed to the builder

use url::Url;

use crate::config::schema::LogConfig;
use crate::reporter::is_skip_endpoint;

/// One semantic problem in a config.
#[derive(Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Endpoint set but not a parseable http(s) URL.
    BadEndpoint { endpoint: String, reason: String },

    /// A static tag or field has an empty key.
    EmptyKey { section: &'static str },

    /// Sampling admits nothing (initial and thereafter both zero).
    SamplingDropsEverything,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::BadEndpoint { endpoint, reason } => {
                write!(f, "error_backend.endpoint {endpoint:?}: {reason}")
            }
            ValidationError::EmptyKey { section } => {
                write!(f, "{section} contains an empty key")
            }
            ValidationError::SamplingDropsEverything => {
                write!(f, "sampling.initial and sampling.thereafter are both 0")
            }
        }
    }
}

/// Validate a parsed config, collecting every problem.
pub fn validate_config(config: &LogConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let endpoint = &config.error_backend.endpoint;
    if !is_skip_endpoint(endpoint) {
        match Url::parse(endpoint) {
            Ok(url) if !matches!(url.scheme(), "http" | "https") => {
                errors.push(ValidationError::BadEndpoint {
                    endpoint: endpoint.clone(),
                    reason: format!("unsupported scheme {:?}", url.scheme()),
                });
            }
            Err(e) => errors.push(ValidationError::BadEndpoint {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            }),
            Ok(_) => {}
        }
    }

    if config.error_backend.tags.keys().any(|k| k.is_empty()) {
        errors.push(ValidationError::EmptyKey {
            section: "error_backend.tags",
        });
    }
    if config.error_backend.fields.keys().any(|k| k.is_empty()) {
        errors.push(ValidationError::EmptyKey {
            section: "error_backend.fields",
        });
    }

    if config.sampling.initial == 0 && config.sampling.thereafter == 0 {
        errors.push(ValidationError::SamplingDropsEverything);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
