use std::fmt;

use serde::{Deserialize, Serialize};

use wdl_core::EntityId;

/// Severity of a validation issue.
///
/// Only [`Severity::Error`] affects a report's validity; warnings and
/// info are advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// A single finding produced by a validation rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub message: String,
    /// The entity the issue concerns, when there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<EntityId>,
    /// Dotted path to the offending field, when there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_path: Option<String>,
}

impl Issue {
    /// An error-level issue.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            entity_id: None,
            field_path: None,
        }
    }

    /// A warning-level issue.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            entity_id: None,
            field_path: None,
        }
    }

    /// An info-level issue.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
            entity_id: None,
            field_path: None,
        }
    }

    /// Attach the entity the issue concerns.
    pub fn for_entity(mut self, id: EntityId) -> Self {
        self.entity_id = Some(id);
        self
    }

    /// Attach the offending field path.
    pub fn at_field(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if let Some(path) = &self.field_path {
            write!(f, " ({path})")?;
        }
        Ok(())
    }
}

/// The aggregated outcome of a validation pass.
///
/// `is_valid` is false iff at least one issue is an error. The issue
/// list preserves the order rules ran in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    /// An empty, valid report.
    pub fn new() -> Self {
        Self {
            is_valid: true,
            issues: Vec::new(),
        }
    }

    /// Append an issue, flipping `is_valid` when it is an error.
    pub fn push(&mut self, issue: Issue) {
        if issue.severity == Severity::Error {
            self.is_valid = false;
        }
        self.issues.push(issue);
    }

    /// All error-level issues.
    pub fn errors(&self) -> Vec<&Issue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .collect()
    }

    /// All warning-level issues.
    pub fn warnings(&self) -> Vec<&Issue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .collect()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}
