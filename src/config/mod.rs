//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks, all errors reported)
//!     → LogConfig (validated, immutable)
//!     → logger::Builder::from_config
//! ```
//!
//! # Design Decisions
//! - Every field has a default so an empty config is a valid development
//!   setup
//! - Stage stays a string in the schema; unknown names resolve to the
//!   development stage instead of failing deserialization

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::{ErrorBackendConfig, LogConfig, SamplingConfig, Stage};
