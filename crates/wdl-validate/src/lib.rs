//! Validation engine for WDL worlds.
//!
//! Runs an ordered, extensible list of independent rules over a
//! [`wdl_core::World`] and aggregates severity-tagged issues into a
//! report. Referential problems — duplicate ids, dangling references,
//! out-of-bounds placement, suspicious numeric values — are surfaced as
//! issues, never thrown; a validation pass always completes.

/// Issue and report types.
pub mod issue;
/// The built-in validation rules.
pub mod rules;
/// The rule-running engine.
pub mod validator;

/// Re-export issue types.
pub use issue::{Issue, Severity, ValidationReport};
/// Re-exports of the engine and the convenience entry point.
pub use validator::{Validator, validate};
