use super::Error;
use crate::value::Value;

/// Error when one or more collection payload items cannot be resolved.
///
/// Reported once per call with every offending item, not one at a time.
#[derive(Debug)]
pub(super) struct InvalidCollectionItemError {
    pub(super) entity: String,
    pub(super) property: String,
    pub(super) items: Vec<Value>,
}

impl std::error::Error for InvalidCollectionItemError {}

impl core::fmt::Display for InvalidCollectionItemError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "invalid collection values provided for `{}.{}`: {:?}",
            self.entity, self.property, self.items
        )
    }
}

impl Error {
    /// Creates an invalid collection item error listing every unresolvable
    /// item.
    pub fn invalid_collection_items(
        entity: impl Into<String>,
        property: impl Into<String>,
        items: Vec<Value>,
    ) -> Error {
        Error::from(super::ErrorKind::InvalidCollectionItem(
            InvalidCollectionItemError {
                entity: entity.into(),
                property: property.into(),
                items,
            },
        ))
    }

    /// Returns `true` if this error is an invalid collection item error.
    pub fn is_invalid_collection_item(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidCollectionItem(_))
    }
}
