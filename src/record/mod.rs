//! Structured record data model.
//!
//! # Responsibilities
//! - Define severity levels and their ordering
//! - Define structured key-value fields
//! - Define the record handed to backends
//!
//! # Design Decisions
//! - Levels serialize as lowercase strings for machine-readable output
//! - Field values are `serde_json::Value` so callers can attach anything
//!   JSON-representable without a custom value enum
//! - Records are borrowed views; backends must not retain them past the call

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record severity. Ordering follows declaration: Debug < Info < Warn < Error < Fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Level {
    /// Lowercase name, as used in JSON output and event payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structured key-value pair attached to a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub key: String,
    pub value: serde_json::Value,
}

impl Field {
    pub fn new(key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A structured log record as seen by backends.
///
/// Fields preserve insertion order: context fields from the facade come
/// first, per-call fields after.
#[derive(Debug, Clone)]
pub struct Record<'a> {
    pub level: Level,
    pub message: &'a str,
    pub timestamp: DateTime<Utc>,
    pub fields: &'a [Field],
}

impl<'a> Record<'a> {
    pub fn new(level: Level, message: &'a str, fields: &'a [Field]) -> Self {
        Self {
            level,
            message,
            timestamp: Utc::now(),
            fields,
        }
    }
}
