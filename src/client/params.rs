//! Aggregate validation failures for operation inputs
//!
//! Required-field checks collect every violation before reporting, so a
//! caller fixing its input sees the complete list in one pass rather than
//! one field per attempt.

use std::fmt;
use thiserror::Error;

/// A single parameter violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("missing required field: {field}")]
    Required { field: &'static str },
}

impl ParamError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Required { field } => field,
        }
    }
}

/// Every violation found while validating one operation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidParams {
    context: &'static str,
    violations: Vec<ParamError>,
}

impl InvalidParams {
    /// Start collecting violations for the named input type.
    pub fn new(context: &'static str) -> Self {
        Self {
            context,
            violations: Vec::new(),
        }
    }

    pub fn add(&mut self, violation: ParamError) {
        self.violations.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn context(&self) -> &'static str {
        self.context
    }

    pub fn violations(&self) -> &[ParamError] {
        &self.violations
    }

    /// Collapse into a `Result`: `Ok` when nothing was collected.
    pub fn into_result(self) -> Result<(), InvalidParams> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for InvalidParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} validation error(s): ",
            self.context,
            self.violations.len()
        )?;
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for InvalidParams {}
