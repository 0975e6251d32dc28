//! Field-by-field input validation
//!
//! Every calculator input implements [`Validate`]. Checks accumulate in a
//! [`Validator`] so a caller sees every rejected field at once rather than
//! the first one.

use crate::error::{FieldError, ValidationErrors};

/// Implemented by every calculator input record
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Collects field errors for one input record
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Returns false (and records an error) for NaN or infinite values
    fn finite(&mut self, field: &str, value: f64) -> bool {
        if value.is_finite() {
            true
        } else {
            self.push(field, "must be a finite number");
            false
        }
    }

    /// Inclusive range `[min, max]`
    pub fn range(&mut self, field: &str, value: f64, min: f64, max: f64) -> &mut Self {
        if self.finite(field, value) {
            if value < min {
                self.push(field, format!("must be at least {}", min));
            } else if value > max {
                self.push(field, format!("must be at most {}", max));
            }
        }
        self
    }

    /// Half-open range `[min, max)`
    pub fn range_exclusive(&mut self, field: &str, value: f64, min: f64, max: f64) -> &mut Self {
        if self.finite(field, value) {
            if value < min {
                self.push(field, format!("must be at least {}", min));
            } else if value >= max {
                self.push(field, format!("must be less than {}", max));
            }
        }
        self
    }

    pub fn at_least(&mut self, field: &str, value: f64, min: f64) -> &mut Self {
        if self.finite(field, value) && value < min {
            self.push(field, format!("must be at least {}", min));
        }
        self
    }

    /// Strictly greater than zero
    pub fn positive(&mut self, field: &str, value: f64) -> &mut Self {
        if self.finite(field, value) && value <= 0.0 {
            self.push(field, "must be positive");
        }
        self
    }

    /// Inclusive range for counts (years, months, ages)
    ///
    /// Counts arrive as JSON numbers, so a fractional or negative value is
    /// reported here instead of failing deserialization.
    pub fn whole(&mut self, field: &str, value: f64, min: f64, max: f64) -> &mut Self {
        if self.finite(field, value) {
            if value.fract() != 0.0 {
                self.push(field, "must be a whole number");
            } else if value < min {
                self.push(field, format!("must be at least {}", min));
            } else if value > max {
                self.push(field, format!("must be at most {}", max));
            }
        }
        self
    }

    pub fn non_empty(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.push(field, "is required");
        }
        self
    }

    pub fn non_empty_list<T>(&mut self, field: &str, items: &[T], message: &str) -> &mut Self {
        if items.is_empty() {
            self.push(field, message);
        }
        self
    }

    /// Cross-field rule; records `message` against `field` when `ok` is false
    pub fn check(&mut self, field: &str, ok: bool, message: &str) -> &mut Self {
        if !ok {
            self.push(field, message);
        }
        self
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { errors: self.errors })
        }
    }
}
