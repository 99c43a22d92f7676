//! Logging backends.
//!
//! # Data Flow
//! ```text
//! Logger facade emits Record
//!     → tee.rs (fan-out to N children, no filtering of its own)
//!         → development.rs (pretty text, debug threshold)
//!         → production.rs (JSON lines, info threshold, sampled)
//!         → nop.rs (drops everything)
//!         → reporter (error-backend adapter, error threshold)
//! ```
//!
//! # Design Decisions
//! - Backends are trait objects shared via Arc; all are Send + Sync and
//!   safe for concurrent callers without external locking
//! - Each backend applies its own severity threshold inside `log`
//! - Backend failures are returned to the immediate caller only; the tee
//!   and the facade route them to self-monitoring, never to call sites
//! - Production sink-open failures surface as `BuildError` at construction
//!   (fail fast, no silent fallback)

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::config::schema::Stage;
use crate::reporter::client::TransmissionError;

pub mod development;
pub mod nop;
pub mod production;
pub mod sampler;
pub mod tee;

pub use development::DevelopmentBackend;
pub use nop::NopBackend;
pub use production::ProductionBackend;
pub use sampler::SamplingPolicy;
pub use tee::{compose, TeeBackend};

use crate::record::{Level, Record};

/// Errors constructing a logger or one of its backends.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The production sink could not be opened.
    #[error("failed to open log sink {spec:?}: {source}")]
    Sink {
        spec: String,
        source: std::io::Error,
    },

    /// The error-backend endpoint did not parse as a URL.
    #[error("invalid error-backend endpoint {endpoint:?}: {source}")]
    InvalidEndpoint {
        endpoint: String,
        source: url::ParseError,
    },

    /// The error-backend endpoint parsed but uses an unsupported scheme.
    #[error("unsupported error-backend endpoint scheme {scheme:?}")]
    UnsupportedScheme { scheme: String },

    /// The error-backend client could not validate the endpoint at startup.
    #[error("error-backend handshake failed: {0}")]
    Handshake(#[from] TransmissionError),
}

/// Errors accepting a single record. Swallowed above the backend layer.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("sink write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Transmission(#[from] TransmissionError),
}

/// A sink capable of accepting structured records.
pub trait Backend: Send + Sync {
    /// Short name for self-monitoring labels.
    fn kind(&self) -> &'static str;

    /// Whether a record at `level` would be acted upon.
    fn enabled(&self, level: Level) -> bool;

    /// Accept one record. Backends below their threshold return Ok and drop it.
    fn log(&self, record: &Record<'_>) -> Result<(), BackendError>;

    /// Flush any buffered output.
    fn flush(&self) -> Result<(), BackendError>;
}

/// Where the production backend writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    Stdout,
    Stderr,
    File(PathBuf),
}

impl Sink {
    /// Parse a sink spec: "stdout", "stderr", or a file path. Empty means stdout.
    pub fn parse(spec: &str) -> Self {
        match spec {
            "" | "stdout" => Sink::Stdout,
            "stderr" => Sink::Stderr,
            path => Sink::File(PathBuf::from(path)),
        }
    }

    /// Open the sink for appending.
    pub(crate) fn open(&self) -> Result<Box<dyn Write + Send>, BuildError> {
        match self {
            Sink::Stdout => Ok(Box::new(std::io::stdout())),
            Sink::Stderr => Ok(Box::new(std::io::stderr())),
            Sink::File(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|source| BuildError::Sink {
                        spec: path.display().to_string(),
                        source,
                    })?;
                Ok(Box::new(file))
            }
        }
    }
}

/// Construct the base backend for a stage.
///
/// Production sink-open failures are returned, never swallowed: a broken
/// production sink must fail at startup, not on first use.
pub fn select(
    stage: Stage,
    sink: &Sink,
    sampling: SamplingPolicy,
) -> Result<Arc<dyn Backend>, BuildError> {
    match stage {
        Stage::Production => Ok(Arc::new(ProductionBackend::open(sink, sampling)?)),
        Stage::Nop => Ok(Arc::new(NopBackend)),
        Stage::Development => Ok(Arc::new(DevelopmentBackend::stderr())),
    }
}
