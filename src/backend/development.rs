//! Development backend: human-readable, verbose.

use std::io::Write;
use std::sync::Mutex;

use crate::backend::{Backend, BackendError};
use crate::record::{Level, Record};

/// Pretty-printing backend with a debug threshold. Writes to stderr by
/// default so application output on stdout stays clean.
pub struct DevelopmentBackend {
    out: Mutex<Box<dyn Write + Send>>,
}

impl DevelopmentBackend {
    pub fn stderr() -> Self {
        Self::with_writer(Box::new(std::io::stderr()))
    }

    pub(crate) fn with_writer(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }
}

impl Backend for DevelopmentBackend {
    fn kind(&self) -> &'static str {
        "development"
    }

    fn enabled(&self, level: Level) -> bool {
        level >= Level::Debug
    }

    fn log(&self, record: &Record<'_>) -> Result<(), BackendError> {
        if !self.enabled(record.level) {
            return Ok(());
        }

        let mut line = format!(
            "{}  {:<5}  {}",
            record.timestamp.format("%Y-%m-%dT%H:%M:%S%.3fZ"),
            record.level.as_str().to_uppercase(),
            record.message
        );
        for field in record.fields {
            line.push_str(&format!("  {}={}", field.key, field.value));
        }
        line.push('\n');

        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        out.write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<(), BackendError> {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        out.flush()?;
        Ok(())
    }
}
