use super::Error;
use crate::value::Value;

/// Error when a payload value fails property validation.
#[derive(Debug)]
pub(super) struct ValidationError {
    pub(super) kind: ValidationErrorKind,
}

#[derive(Debug)]
pub(super) enum ValidationErrorKind {
    /// Null assigned to a non-nullable property
    NotNullable { entity: String, property: String },

    /// Scalar value does not match the declared scalar type
    Scalar {
        entity: String,
        property: String,
        expected: &'static str,
        value: Value,
    },
}

impl std::error::Error for ValidationError {}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.kind {
            ValidationErrorKind::NotNullable { entity, property } => {
                write!(
                    f,
                    "you must pass a non-null value to property `{entity}.{property}`"
                )
            }
            ValidationErrorKind::Scalar {
                entity,
                property,
                expected,
                value,
            } => {
                write!(
                    f,
                    "invalid value for `{entity}.{property}`: expected {expected}, got {value:?}"
                )
            }
        }
    }
}

impl Error {
    /// Creates a validation error for a null value assigned to a
    /// non-nullable property.
    pub fn not_nullable(entity: impl Into<String>, property: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Validation(ValidationError {
            kind: ValidationErrorKind::NotNullable {
                entity: entity.into(),
                property: property.into(),
            },
        }))
    }

    /// Creates a validation error for a scalar value that does not match
    /// the property's declared type.
    pub fn invalid_scalar(
        entity: impl Into<String>,
        property: impl Into<String>,
        expected: &'static str,
        value: Value,
    ) -> Error {
        Error::from(super::ErrorKind::Validation(ValidationError {
            kind: ValidationErrorKind::Scalar {
                entity: entity.into(),
                property: property.into(),
                expected,
                value,
            },
        }))
    }

    /// Returns `true` if this error is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Validation(_))
    }
}
