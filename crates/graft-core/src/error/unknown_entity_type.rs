use super::Error;

/// Error when a type name has no entry in the metadata registry.
#[derive(Debug)]
pub(super) struct UnknownEntityTypeError {
    pub(super) name: String,
}

impl std::error::Error for UnknownEntityTypeError {}

impl core::fmt::Display for UnknownEntityTypeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unknown entity type `{}`", self.name)
    }
}

impl Error {
    /// Creates an unknown entity type error.
    pub fn unknown_entity_type(name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownEntityType(UnknownEntityTypeError {
            name: name.into(),
        }))
    }

    /// Returns `true` if this error is an unknown entity type error.
    pub fn is_unknown_entity_type(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnknownEntityType(_))
    }
}
