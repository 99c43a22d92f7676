//! Self-monitoring.
//!
//! # Design Decisions
//! - Failures inside the logging pipeline never surface at log call sites,
//!   so they are counted here instead
//! - Facade-only: the embedding application installs the metrics recorder
//!   and exporter; without one these calls are no-ops

pub mod metrics;
