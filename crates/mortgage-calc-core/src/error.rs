use std::collections::BTreeMap;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MortgageCalcError {
    #[error("Validation failed: {0}")]
    Validation(#[from] FieldErrors),

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Arithmetic overflow in {context}")]
    Overflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for MortgageCalcError {
    fn from(e: serde_json::Error) -> Self {
        MortgageCalcError::SerializationError(e.to_string())
    }
}

/// Form fields checked by the validator, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Amount,
    Term,
    InterestRate,
    MortgageType,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::Amount,
        Field::Term,
        Field::InterestRate,
        Field::MortgageType,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Amount => "amount",
            Field::Term => "term",
            Field::InterestRate => "interest_rate",
            Field::MortgageType => "mortgage_type",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field-level validation failure. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("This field is required")]
    Required,

    #[error("Please enter a valid number")]
    InvalidNumber,

    #[error("{reason}")]
    OutOfRange { reason: String },
}

impl FieldError {
    pub fn out_of_range(reason: impl Into<String>) -> Self {
        FieldError::OutOfRange {
            reason: reason.into(),
        }
    }
}

/// Every validation failure of one form submission, keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<Field, FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, error: FieldError) {
        self.errors.insert(field, error);
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldError)> {
        self.errors.iter().map(|(field, err)| (*field, err))
    }

    /// Keep only the errors whose field passes `touched`.
    pub fn only(&self, touched: impl Fn(Field) -> bool) -> FieldErrors {
        FieldErrors {
            errors: self
                .errors
                .iter()
                .filter(|(field, _)| touched(**field))
                .map(|(field, err)| (*field, err.clone()))
                .collect(),
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, err)| format!("{field}: {err}"))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for (field, err) in &self.errors {
            map.serialize_entry(field.as_str(), &err.to_string())?;
        }
        map.end()
    }
}
