use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// A single broken rule on a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    /// The JSON name of the offending field (e.g. `fullName`).
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every rule that failed for one validated value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("validation failed with {} error(s)", .failures.len())]
pub struct ValidationErrors {
    failures: Vec<ValidationFailure>,
}

impl ValidationErrors {
    pub fn new(failures: Vec<ValidationFailure>) -> Self {
        Self { failures }
    }

    pub fn failures(&self) -> &[ValidationFailure] {
        &self.failures
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Groups the messages by field, keeping rule order within a field.
    pub fn by_field(&self) -> BTreeMap<String, Vec<String>> {
        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for failure in &self.failures {
            grouped
                .entry(failure.field.to_string())
                .or_default()
                .push(failure.message.clone());
        }
        grouped
    }
}
