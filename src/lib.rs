//! Stage-selected structured logging with an optional error-backend tee.
//!
//! Build a logger for a deployment stage (development, production, nop) and
//! optionally tee records at error severity and above to an error-tracking
//! backend:
//!
//! ```no_run
//! use logtee::{Builder, Field, Stage};
//! use std::collections::BTreeMap;
//!
//! let logger = Builder::new()
//!     .stage(Stage::Production)
//!     .error_backend(
//!         "https://errors.example.com/ingest",
//!         BTreeMap::from([("env".to_string(), "prod".to_string())]),
//!         vec![Field::new("service", "edge")],
//!     )
//!     .build()?;
//!
//! logger.info("listener started", &[Field::new("port", 8080)]);
//! # Ok::<(), logtee::BuildError>(())
//! ```

pub mod backend;
pub mod config;
pub mod logger;
pub mod observability;
pub mod record;
pub mod reporter;

pub use backend::{compose, select, Backend, BackendError, BuildError, SamplingPolicy, Sink};
pub use config::{LogConfig, Stage};
pub use logger::{default, install_default, set_default, Builder, Logger};
pub use record::{Field, Level, Record};
pub use reporter::{Transport, TransmissionError};
