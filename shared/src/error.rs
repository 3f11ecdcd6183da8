//! Validation error type
//!
//! A [`ValidationReport`] collects one message per failing field. An empty
//! report means the draft is valid.

use crate::models::Field;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Field-level validation outcome
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    field_errors: BTreeMap<Field, String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report with a single failing field
    pub fn single(field: Field, message: impl Into<String>) -> Self {
        let mut report = Self::new();
        report.insert(field, message);
        report
    }

    pub fn is_valid(&self) -> bool {
        self.field_errors.is_empty()
    }

    pub fn field_errors(&self) -> &BTreeMap<Field, String> {
        &self.field_errors
    }

    pub fn into_field_errors(self) -> BTreeMap<Field, String> {
        self.field_errors
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.field_errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.field_errors.contains_key(&field)
    }

    /// Record a message for a field. The first message recorded wins.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.field_errors.entry(field).or_insert_with(|| message.into());
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.field_errors.keys().map(Field::key).collect();
        write!(f, "Validation failed: {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationReport {}
