//! Error types for field decoding and typed value access.

use std::fmt;

/// A raw field value that does not conform to its declared primitive type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// A non-nullable field was supplied empty.
    #[error("required value is empty")]
    Missing,

    /// Integer fields accept an optional sign followed by ASCII digits only.
    #[error("not an integer")]
    InvalidInteger,

    /// The digits are well formed but do not fit in an `i64`.
    #[error("integer out of range")]
    IntegerOverflow,

    /// Signed decimals always start with a sign slot (`-`, `+` or `0`).
    #[error("expected a leading sign character, found '{found}'")]
    MissingSign { found: char },

    /// The body after the sign slot is not a zero-padded decimal of the declared shape.
    #[error("not a decimal({precision},{scale}) value")]
    InvalidDecimal { precision: u8, scale: u8 },

    /// Boolean flags are exactly `0` or `1`.
    #[error("boolean flag must be '0' or '1'")]
    InvalidFlag,
}

/// A [`ValueError`] located at one position of a decoded line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("field '{name}' at position {position} ('{raw}'): {error}")]
pub struct FieldError {
    pub name: &'static str,
    pub position: usize,
    pub raw: String,
    #[source]
    pub error: ValueError,
}

/// Every malformed field of one line, in position order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors(pub Vec<FieldError>);

impl FieldErrors {
    pub fn as_slice(&self) -> &[FieldError] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }
}

impl From<Vec<FieldError>> for FieldErrors {
    fn from(value: Vec<FieldError>) -> Self {
        Self(value)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

/// Returned by the `try_*` accessors of [`Value`](crate::Value) on a variant mismatch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected} value, found {found}")]
pub struct ValueTypeError {
    pub expected: String,
    pub found: &'static str,
}

impl ValueTypeError {
    pub fn new(expected: impl Into<String>, found: &'static str) -> Self {
        Self {
            expected: expected.into(),
            found,
        }
    }
}
