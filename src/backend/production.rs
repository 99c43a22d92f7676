//! Production backend: JSON lines, info threshold, sampled.

use std::io::Write;
use std::sync::Mutex;

use serde_json::{Map, Value};

use crate::backend::sampler::{Sampler, SamplingPolicy};
use crate::backend::{Backend, BackendError, BuildError, Sink};
use crate::record::{Level, Record};

/// Machine-readable backend. One JSON object per line:
/// `{"ts":...,"level":...,"msg":...,<fields>}`.
pub struct ProductionBackend {
    out: Mutex<Box<dyn Write + Send>>,
    sampler: Sampler,
}

impl ProductionBackend {
    /// Open the configured sink. A sink that cannot be opened is a
    /// construction error, not something to paper over at runtime.
    pub fn open(sink: &Sink, policy: SamplingPolicy) -> Result<Self, BuildError> {
        Ok(Self {
            out: Mutex::new(sink.open()?),
            sampler: Sampler::new(policy),
        })
    }

    #[cfg(test)]
    pub(crate) fn with_writer(out: Box<dyn Write + Send>, policy: SamplingPolicy) -> Self {
        Self {
            out: Mutex::new(out),
            sampler: Sampler::new(policy),
        }
    }

    fn encode(record: &Record<'_>) -> Value {
        let mut obj = Map::new();
        obj.insert("ts".into(), Value::String(record.timestamp.to_rfc3339()));
        obj.insert("level".into(), Value::String(record.level.as_str().into()));
        obj.insert("msg".into(), Value::String(record.message.into()));
        for field in record.fields {
            obj.insert(field.key.clone(), field.value.clone());
        }
        Value::Object(obj)
    }
}

impl Backend for ProductionBackend {
    fn kind(&self) -> &'static str {
        "production"
    }

    fn enabled(&self, level: Level) -> bool {
        level >= Level::Info
    }

    fn log(&self, record: &Record<'_>) -> Result<(), BackendError> {
        if !self.enabled(record.level) {
            return Ok(());
        }
        if !self.sampler.admit(record.message) {
            return Ok(());
        }

        let mut line = Self::encode(record).to_string();
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
