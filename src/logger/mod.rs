//! Logger facade and process-wide default.
//!
//! # Design Decisions
//! - The facade owns exactly one backend (usually a tee) and swallows
//!   backend failures into self-monitoring; logging never returns errors
//!   and never panics at call sites
//! - `fatal` flushes every attached backend before terminating so the last
//!   record is not lost on exit
//! - The default logger lives behind an atomic Arc swap: readers during a
//!   reconfiguration see either the old or the new facade, never a partial
//!   one; facades captured before a swap stay valid

use std::sync::Arc;
use std::sync::LazyLock;

use arc_swap::ArcSwap;

use crate::backend::{Backend, BuildError, DevelopmentBackend};
use crate::observability::metrics;
use crate::record::{Field, Level, Record};

pub mod builder;

pub use builder::Builder;

/// The object call sites use to emit records.
#[derive(Clone)]
pub struct Logger {
    backend: Arc<dyn Backend>,
    context: Vec<Field>,
}

impl Logger {
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Verbose stderr logger, the process-wide initial default.
    pub fn development() -> Self {
        Self::from_backend(Arc::new(DevelopmentBackend::stderr()))
    }

    pub(crate) fn from_backend(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            context: Vec::new(),
        }
    }

    /// A child facade sharing this backend, with extra context fields
    /// prepended to every record.
    pub fn with_fields(&self, fields: impl IntoIterator<Item = Field>) -> Self {
        let mut context = self.context.clone();
        context.extend(fields);
        Self {
            backend: self.backend.clone(),
            context,
        }
    }

    pub fn debug(&self, message: &str, fields: &[Field]) {
        self.emit(Level::Debug, message, fields);
    }

    pub fn info(&self, message: &str, fields: &[Field]) {
        self.emit(Level::Info, message, fields);
    }

    pub fn warn(&self, message: &str, fields: &[Field]) {
        self.emit(Level::Warn, message, fields);
    }

    pub fn error(&self, message: &str, fields: &[Field]) {
        self.emit(Level::Error, message, fields);
    }

    /// Emit at fatal severity, flush every backend, then exit(1). The flush
    /// happens before termination so nothing in-flight is lost.
    pub fn fatal(&self, message: &str, fields: &[Field]) -> ! {
        self.emit(Level::Fatal, message, fields);
        self.flush();
        std::process::exit(1);
    }

    /// Flush the composed backend tree.
    pub fn flush(&self) {
        if self.backend.flush().is_err() {
            metrics::record_forward_failure(self.backend.kind());
        }
    }

    fn emit(&self, level: Level, message: &str, fields: &[Field]) {
        if level < Level::Fatal && !self.backend.enabled(level) {
            return;
        }

        let result = if self.context.is_empty() {
            self.backend.log(&Record::new(level, message, fields))
        } else {
            let mut combined = self.context.clone();
            combined.extend_from_slice(fields);
            self.backend.log(&Record::new(level, message, &combined))
        };

        if result.is_err() {
            metrics::record_forward_failure(self.backend.kind());
        }
    }
}

static DEFAULT: LazyLock<ArcSwap<Logger>> =
    LazyLock::new(|| ArcSwap::from_pointee(Logger::development()));

/// Snapshot of the process-wide default logger.
pub fn default() -> Arc<Logger> {
    DEFAULT.load_full()
}

/// Atomically replace the process-wide default.
pub fn set_default(logger: Logger) {
    DEFAULT.store(Arc::new(logger));
}

/// Build a logger and install it as the process-wide default. On build
/// failure nothing is installed and the previous default stays in effect.
pub fn install_default(builder: Builder) -> Result<(), BuildError> {
    let logger = builder.build()?;
    set_default(logger);
    Ok(())
}
