//! Error-reporter adapter.
//!
//! # Data Flow
//! ```text
//! tee → ReporterBackend (threshold: Error+)
//!     → Client (static tags, static fields, endpoint)
//!     → Transport (bounded queue → worker → HTTP POST)
//! ```
//!
//! # Design Decisions
//! - The severity threshold is this adapter's private concern; the tee
//!   forwards everything and this backend drops what it does not want
//! - An empty endpoint or the literal "test" means "no error backend":
//!   no client is built and no connection is attempted
//! - Construction errors are returned to the builder; a broken error
//!   backend must never abort the process from inside this library

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::backend::{Backend, BackendError, BuildError};
use crate::record::{Field, Level, Record};

pub mod client;
pub mod transport;

pub use client::{Client, Event, TransmissionError, Transport};
pub use transport::HttpTransport;

/// Endpoint sentinel that disables the error backend (besides "").
pub const SKIP_SENTINEL: &str = "test";

/// True when this endpoint means "do not attach an error backend".
pub fn is_skip_endpoint(endpoint: &str) -> bool {
    endpoint.is_empty() || endpoint == SKIP_SENTINEL
}

/// Backend forwarding Error+ records to the tracking client.
pub struct ReporterBackend {
    client: Client,
    static_fields: Vec<Field>,
}

/// Build the adapter, or `None` when the endpoint is a skip sentinel.
pub fn build(
    endpoint: &str,
    tags: BTreeMap<String, String>,
    static_fields: Vec<Field>,
    transport: Arc<dyn Transport>,
) -> Result<Option<Arc<dyn Backend>>, BuildError> {
    if is_skip_endpoint(endpoint) {
        return Ok(None);
    }
    let client = Client::connect(endpoint, tags, transport)?;
    Ok(Some(Arc::new(ReporterBackend {
        client,
        static_fields,
    })))
}

impl Backend for ReporterBackend {
    fn kind(&self) -> &'static str {
        "error-reporter"
    }

    fn enabled(&self, level: Level) -> bool {
        level >= Level::Error
    }

    fn log(&self, record: &Record<'_>) -> Result<(), BackendError> {
        if !self.enabled(record.level) {
            return Ok(());
        }
        self.client.capture(record, &self.static_fields)?;
        Ok(())
    }

    fn flush(&self) -> Result<(), BackendError> {
        self.client.flush()?;
        Ok(())
    }
}
