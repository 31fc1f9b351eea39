use super::Error;
use crate::value::Value;

/// Error when a to-one payload value is neither an entity, a primary key,
/// nor a mergeable/creatable object.
#[derive(Debug)]
pub(super) struct InvalidReferenceError {
    pub(super) entity: String,
    pub(super) property: String,
    pub(super) value: Value,
}

impl std::error::Error for InvalidReferenceError {}

impl core::fmt::Display for InvalidReferenceError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "invalid reference value provided for `{}.{}`: {:?}",
            self.entity, self.property, self.value
        )
    }
}

impl Error {
    /// Creates an invalid reference error.
    pub fn invalid_reference(
        entity: impl Into<String>,
        property: impl Into<String>,
        value: Value,
    ) -> Error {
        Error::from(super::ErrorKind::InvalidReference(InvalidReferenceError {
            entity: entity.into(),
            property: property.into(),
            value,
        }))
    }

    /// Returns `true` if this error is an invalid reference error.
    pub fn is_invalid_reference(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidReference(_))
    }
}
