//! Core decision procedures of the enrollment-statistics assistant.
//!
//! Two components do the real work:
//!
//! - the **query synthesizer** ([`synthesizer::SqlSynthesizer`]) turns a
//!   natural-language question into a single SQL query, grounded by a fixed
//!   [`shared_types::SchemaDescription`] and five authoring rules;
//! - the **chart selector** ([`chart::select_charts`]) picks one categorical
//!   and one numeric column from a result table and produces a bar and a pie
//!   spec.
//!
//! [`service::AskService`] wires them into the sequential
//! synthesize → validate → execute → select pipeline. Collaborators (the LLM
//! client, the store executor) are injected, never read from globals.

pub mod chart;
pub mod executor;
pub mod prompt;
pub mod service;
pub mod synthesizer;
pub mod validate;

pub use chart::select_charts;
pub use executor::{ExecutionError, QueryExecutor};
pub use service::{AskError, AskOutcome, AskService};
pub use synthesizer::{SqlSynthesizer, SynthesisError};
pub use validate::{validate_against_schema, ValidationError};
