//! Persistence boundary the assignment engine resolves, creates, and
//! merges entities through.

mod session;
pub use session::InMemorySession;

use crate::assign::AssignOptions;
use crate::entity::{Embeddable, Entity, Reference};
use crate::schema::EntityMeta;
use crate::value::{Object, Value};
use crate::Result;
use std::sync::Arc;

/// Options forwarded to the embeddable factory.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateEmbeddableOptions {
    /// Run raw values through their custom converter while building
    pub convert_custom_types: bool,

    /// The embeddable is built fresh rather than merged into an existing one
    pub new_entity: bool,
}

/// External persistence manager, as seen by the assignment engine.
///
/// Every call is synchronous; how an implementation fulfills them (loading
/// lazily, buffering writes, ...) is its own business.
pub trait EntityManager {
    /// Metadata lookup by type name.
    fn meta_of(&self, ty: &str) -> Option<Arc<EntityMeta>>;

    /// Returns a reference for the given key; an uninitialized shell when
    /// the entity is not already loaded. Never fails for a well-formed key
    /// of a known type.
    fn get_reference(&self, ty: &str, pk: Value, options: &AssignOptions) -> Result<Reference>;

    /// Constructs a new instance from a plain payload.
    fn create(&self, ty: &str, payload: &Object, options: &AssignOptions) -> Result<Entity>;

    /// Resolves the payload to an existing managed instance by primary
    /// key, updating it, or creates one when absent.
    fn merge(&self, ty: &str, payload: &Object, options: &AssignOptions) -> Result<Entity>;

    /// Identity-map lookup with no side effect.
    fn lookup_loaded_by_id(&self, ty: &str, pk: &Value, schema: Option<&str>) -> Option<Entity>;

    /// Builds an embeddable value object of the declared type from a plain
    /// payload.
    fn create_embeddable(
        &self,
        ty: &str,
        payload: &Object,
        options: CreateEmbeddableOptions,
    ) -> Result<Embeddable>;
}
