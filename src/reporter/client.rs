//! Error-tracking client.
//!
//! # Responsibilities
//! - Validate the endpoint URL at construction (fail fast, return errors)
//! - Perform a live handshake through the transport before accepting events
//! - Turn records into tagged events and hand them to the transport
//!
//! # Design Decisions
//! - The transport is a trait seam so tests inject a recording transport
//!   and no construction-time network traffic is hard-wired in
//! - Every event gets a v4 UUID so the backend can deduplicate retries

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use url::Url;
use uuid::Uuid;

use crate::backend::BuildError;
use crate::record::{Field, Level, Record};

/// Post-construction delivery failures. Routed to self-monitoring, never to
/// log call sites.
#[derive(Debug, Error)]
pub enum TransmissionError {
    /// The endpoint could not be reached.
    #[error("endpoint unreachable: {0}")]
    Unreachable(String),

    /// The endpoint answered with a non-success status.
    #[error("event rejected with status {0}")]
    Rejected(u16),

    /// The transport's worker is gone; no further events can be delivered.
    #[error("transport worker stopped")]
    WorkerGone,

    /// A bounded transport operation did not finish within its deadline.
    #[error("transport operation timed out")]
    Timeout,
}

/// One error event as submitted to the tracking backend.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub event_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub message: String,
    pub tags: BTreeMap<String, String>,
    pub fields: serde_json::Map<String, serde_json::Value>,
}

/// Delivery mechanism for events. Implementations own their own buffering
/// and must not block `submit` on the network.
pub trait Transport: Send + Sync {
    /// Validate connectivity to the endpoint. Called once at construction.
    fn handshake(&self, endpoint: &Url) -> Result<(), TransmissionError>;

    /// Enqueue one event for delivery.
    fn submit(&self, endpoint: &Url, event: Event) -> Result<(), TransmissionError>;

    /// Block until previously submitted events have been handed off.
    fn flush(&self) -> Result<(), TransmissionError>;
}

/// A validated client bound to one endpoint with static tags.
pub struct Client {
    endpoint: Url,
    tags: BTreeMap<String, String>,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.endpoint)
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Parse and validate the endpoint, then handshake through the
    /// transport. All failures are returned; the caller decides whether a
    /// broken error backend is fatal.
    pub fn connect(
        endpoint: &str,
        tags: BTreeMap<String, String>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, BuildError> {
        let url = Url::parse(endpoint).map_err(|source| BuildError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            source,
        })?;
        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(BuildError::UnsupportedScheme {
                    scheme: scheme.to_string(),
                })
            }
        }
        transport.handshake(&url)?;

        Ok(Self {
            endpoint: url,
            tags,
            transport,
        })
    }

    /// Submit a record as an event, merging adapter-level fields before the
    /// record's own.
    pub fn capture(
        &self,
        record: &Record<'_>,
        static_fields: &[Field],
    ) -> Result<(), TransmissionError> {
        let mut fields = serde_json::Map::new();
        for field in static_fields.iter().chain(record.fields) {
            fields.insert(field.key.clone(), field.value.clone());
        }

        let event = Event {
            event_id: Uuid::new_v4(),
            timestamp: record.timestamp,
            level: record.level,
            message: record.message.to_string(),
            tags: self.tags.clone(),
            fields,
        };
        self.transport.submit(&self.endpoint, event)
    }

    pub fn flush(&self) -> Result<(), TransmissionError> {
        self.transport.flush()
    }
}
