//! Error types shared across the calculators

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A single rejected input field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    /// Input field name as it appears in the JSON record (camelCase)
    pub field: String,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every violation found while validating one input record
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Look up the message reported for a field, if any
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

/// Errors surfaced by the library
#[derive(Debug, Error)]
pub enum CalcError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("unknown calculator: {0}")]
    UnknownCalculator(String),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid assumption {name}: {message}")]
    Assumption { name: String, message: String },
}

pub type Result<T> = std::result::Result<T, CalcError>;
