use serde_json::Value;

use wdl_core::World;

use crate::issue::{Issue, ValidationReport};
use crate::rules;

/// A validation rule: a pure function from a world to zero or more
/// issues.
pub type Rule = Box<dyn Fn(&World) -> Vec<Issue>>;

/// Runs a fixed, ordered list of independent rules over a world and
/// aggregates their issues into a [`ValidationReport`].
///
/// The built-in rules are installed in a documented order; callers may
/// append custom rules, which run after the built-ins. Validation always
/// completes and returns a report — referential problems are issues, not
/// errors.
pub struct Validator {
    rules: Vec<Rule>,
}

impl Validator {
    /// A validator with the six built-in rules, in order: unique entity
    /// ids, parent references, entity bounds, light intensity, system
    /// references, physics sanity.
    pub fn new() -> Self {
        let rules: Vec<Rule> = vec![
            Box::new(rules::unique_entity_ids),
            Box::new(rules::parent_references),
            Box::new(rules::entity_bounds),
            Box::new(rules::light_intensity),
            Box::new(rules::system_references),
            Box::new(rules::physics_sanity),
        ];
        Self { rules }
    }

    /// Register a custom rule, appended after the built-ins. Custom
    /// rules contribute issues without suppressing built-in output.
    pub fn add_rule<F>(&mut self, rule: F)
    where
        F: Fn(&World) -> Vec<Issue> + 'static,
    {
        self.rules.push(Box::new(rule));
    }

    /// Run every rule over the world, in registration order.
    pub fn validate(&self, world: &World) -> ValidationReport {
        let mut report = ValidationReport::new();
        for rule in &self.rules {
            for issue in rule(world) {
                report.push(issue);
            }
        }
        report
    }

    /// Validate untrusted raw data by first reconstructing a typed
    /// world from it.
    ///
    /// Upstream authoring pipelines hand over JSON they assembled
    /// themselves; when it does not reconstruct, the failure becomes a
    /// single error issue in the report rather than an error the caller
    /// has to catch.
    pub fn validate_value(&self, value: &Value) -> ValidationReport {
        match serde_json::from_value::<World>(value.clone()) {
            Ok(world) => self.validate(&world),
            Err(e) => {
                let mut report = ValidationReport::new();
                report.push(Issue::error(format!("Failed to validate: {e}")));
                report
            }
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate a world with the built-in rules only.
pub fn validate(world: &World) -> ValidationReport {
    Validator::new().validate(world)
}
