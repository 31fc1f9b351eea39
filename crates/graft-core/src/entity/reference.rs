use super::Entity;
use crate::value::Value;
use std::fmt;

/// Lazy handle to a to-one related entity.
///
/// Wraps either a fully loaded entity or an uninitialized shell carrying
/// only its primary key. Unwrapping preserves identity.
#[derive(Clone)]
pub struct Reference {
    entity: Entity,
}

impl Reference {
    pub fn new(entity: Entity) -> Reference {
        Reference { entity }
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn into_entity(self) -> Entity {
        self.entity
    }

    pub fn is_initialized(&self) -> bool {
        self.entity.is_initialized()
    }

    pub fn primary_key(&self) -> Option<Value> {
        self.entity.primary_key()
    }

    pub fn serialized_primary_key(&self) -> Option<String> {
        self.entity.serialized_primary_key()
    }

    /// Equal-by-target: the unwrapped entities share the same serialized
    /// primary key.
    pub fn same_target(&self, other: &Reference) -> bool {
        self.entity.same_target(&other.entity)
    }
}

impl PartialEq for Reference {
    fn eq(&self, other: &Reference) -> bool {
        self.same_target(other)
    }
}

impl fmt::Debug for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reference")
            .field("type", &self.entity.type_name())
            .field("pk", &self.primary_key())
            .field("initialized", &self.is_initialized())
            .finish()
    }
}
