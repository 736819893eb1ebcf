//! Explicit field validation.
//!
//! Rules are plain functions over the payload and report every violation at
//! once, so a client can fix all fields in a single round trip.

use serde::Serialize;

/// A single failed rule, keyed by the offending field name.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Payloads that can check their own bounds.
pub trait Validate {
    /// Returns `Err` with all violations found, `Ok(())` when the value is acceptable.
    fn validate(&self) -> Result<(), Vec<FieldViolation>>;
}

/// Accumulates violations while a payload is checked field by field.
#[derive(Default, Debug)]
pub struct Violations(Vec<FieldViolation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the character length of `value` against an inclusive range.
    pub fn length(&mut self, field: &str, value: &str, min: usize, max: usize) {
        let len = value.chars().count();
        if len < min {
            self.push(
                field,
                format!("must be at least {} characters (got {})", min, len),
            );
        } else if len > max {
            self.push(
                field,
                format!("must be at most {} characters (got {})", max, len),
            );
        }
    }

    /// Check an integer against an inclusive range.
    pub fn int_range(&mut self, field: &str, value: i64, min: i64, max: i64) {
        if value < min || value > max {
            self.push(
                field,
                format!("must be between {} and {} (got {})", min, max, value),
            );
        }
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldViolation::new(field, message));
    }

    pub fn into_result(self) -> Result<(), Vec<FieldViolation>> {
        if self.0.is_empty() { Ok(()) } else { Err(self.0) }
    }
}
