//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files and
//! carry defaults so minimal configs work.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Deployment stage selecting the base backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Development,
    Production,
    Nop,
}

impl Stage {
    /// Resolve a stage name. Case-sensitive; anything that is not exactly
    /// "production" or "nop" (the empty string included) is development.
    /// Never fails.
    pub fn parse(name: &str) -> Self {
        match name {
            "production" => Stage::Production,
            "nop" => Stage::Nop,
            _ => Stage::Development,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Development => "development",
            Stage::Production => "production",
            Stage::Nop => "nop",
        }
    }
}

/// Root logger configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LogConfig {
    /// Stage name ("development", "production", "nop"; unknown → development).
    pub stage: String,

    /// Production sink: "stdout", "stderr", or a file path.
    pub sink: String,

    /// Production sampling knobs.
    pub sampling: SamplingConfig,

    /// Error-tracking backend settings.
    pub error_backend: ErrorBackendConfig,
}

/// Per-message sampling for the production backend.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Records per message admitted unconditionally each second.
    pub initial: u64,

    /// After `initial`, admit every n-th record. 0 drops the rest.
    pub thereafter: u64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            initial: 100,
            thereafter: 100,
        }
    }
}

/// Error-tracking backend settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ErrorBackendConfig {
    /// Ingest endpoint. Empty or "test" disables the error backend.
    pub endpoint: String,

    /// Static tags attached to every event.
    pub tags: BTreeMap<String, String>,

    /// Static fields merged into every event.
    pub fields: BTreeMap<String, serde_json::Value>,
}
