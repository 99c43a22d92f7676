//! Logger construction.
//!
//! # Design Decisions
//! - Owning builder: every setter consumes and returns the builder, and a
//!   repeated setting simply overwrites the previous one (last wins); there
//!   is no shared mutable option state
//! - Construction errors are returned, never panicked; whether a broken
//!   sink or error backend aborts the process is the caller's decision

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::backend::{self, compose, BuildError, SamplingPolicy, Sink};
use crate::config::schema::{LogConfig, Stage};
use crate::logger::Logger;
use crate::record::Field;
use crate::reporter::{self, HttpTransport, Transport};

struct ErrorBackendSettings {
    endpoint: String,
    tags: BTreeMap<String, String>,
    fields: Vec<Field>,
}

/// Accumulates logger settings; `build` turns them into a facade.
pub struct Builder {
    stage: Stage,
    sink: Sink,
    sampling: SamplingPolicy,
    error_backend: Option<ErrorBackendSettings>,
    transport: Option<Arc<dyn Transport>>,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            stage: Stage::Development,
            sink: Sink::Stdout,
            sampling: SamplingPolicy::default(),
            error_backend: None,
            transport: None,
        }
    }

    /// Populate a builder from a validated config file.
    pub fn from_config(config: &LogConfig) -> Self {
        let mut builder = Self::new()
            .stage(Stage::parse(&config.stage))
            .sink(Sink::parse(&config.sink))
            .sampling(SamplingPolicy {
                initial: config.sampling.initial,
                thereafter: config.sampling.thereafter,
            });

        if !config.error_backend.endpoint.is_empty() {
            let fields = config
                .error_backend
                .fields
                .iter()
                .map(|(k, v)| Field::new(k.clone(), v.clone()))
                .collect();
            builder = builder.error_backend(
                config.error_backend.endpoint.clone(),
                config.error_backend.tags.clone(),
                fields,
            );
        }
        builder
    }

    pub fn stage(mut self, stage: Stage) -> Self {
        self.stage = stage;
        self
    }

    /// Resolve a stage by name; unknown names mean development.
    pub fn stage_name(self, name: &str) -> Self {
        self.stage(Stage::parse(name))
    }

    /// Production sink. Ignored outside the production stage.
    pub fn sink(mut self, sink: Sink) -> Self {
        self.sink = sink;
        self
    }

    pub fn sampling(mut self, policy: SamplingPolicy) -> Self {
        self.sampling = policy;
        self
    }

    /// Attach an error-tracking backend. An empty endpoint or the literal
    /// "test" leaves the logger without one.
    pub fn error_backend(
        mut self,
        endpoint: impl Into<String>,
        tags: BTreeMap<String, String>,
        fields: Vec<Field>,
    ) -> Self {
        self.error_backend = Some(ErrorBackendSettings {
            endpoint: endpoint.into(),
            tags,
            fields,
        });
        self
    }

    /// Override the event transport (used by tests; defaults to HTTP).
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Select the base backend, attach the error reporter if configured,
    /// and tie them together.
    pub fn build(self) -> Result<Logger, BuildError> {
        let base = backend::select(self.stage, &self.sink, self.sampling)?;

        let extra = match &self.error_backend {
            Some(settings) if !reporter::is_skip_endpoint(&settings.endpoint) => {
                let transport = self
                    .transport
                    .clone()
                    .unwrap_or_else(|| Arc::new(HttpTransport::new()));
                reporter::build(
                    &settings.endpoint,
                    settings.tags.clone(),
                    settings.fields.clone(),
                    transport,
                )?
            }
            _ => None,
        };

        Ok(Logger::from_backend(compose(base, extra)))
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}
