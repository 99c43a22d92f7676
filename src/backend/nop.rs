//! No-op backend: accepts and discards everything.

use crate::backend::{Backend, BackendError};
use crate::record::{Level, Record};

pub struct NopBackend;

impl Backend for NopBackend {
    fn kind(&self) -> &'static str {
        "nop"
    }

    fn enabled(&self, _level: Level) -> bool {
        false
    }

    fn log(&self, _record: &Record<'_>) -> Result<(), BackendError> {
        Ok(())
    }

    fn flush(&self) -> Result<(), BackendError> {
        Ok(())
    }
}
