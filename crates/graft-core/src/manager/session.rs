use super::{CreateEmbeddableOptions, EntityManager};
use crate::assign::{self, AssignOptions};
use crate::entity::{Embeddable, Entity, Reference};
use crate::schema::{EntityMeta, MetadataRegistry};
use crate::value::{Object, Value};
use crate::Result;
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry-backed in-memory persistence session.
///
/// Tracks loaded entities in an identity map keyed by type, schema, and
/// serialized primary key. `create` runs the assignment engine over the
/// payload so nested structures resolve, and registers the result when it
/// carries a primary key. Reference shells handed out for unloaded keys
/// are not registered; only loaded entities count as loaded.
pub struct InMemorySession {
    registry: MetadataRegistry,
    identity: RefCell<HashMap<IdentityKey, Entity>>,
}

type IdentityKey = (String, Option<String>, String);

impl InMemorySession {
    pub fn new(registry: MetadataRegistry) -> InMemorySession {
        InMemorySession {
            registry,
            identity: RefCell::new(HashMap::new()),
        }
    }

    pub fn registry(&self) -> &MetadataRegistry {
        &self.registry
    }

    /// Registers an already-built entity in the identity map. No-op when
    /// the entity has no primary key yet.
    pub fn manage(&self, entity: &Entity, schema: Option<&str>) {
        if let Some(pk) = entity.serialized_primary_key() {
            self.identity.borrow_mut().insert(
                (entity.type_name(), schema.map(str::to_string), pk),
                entity.clone(),
            );
        }
    }

    fn key(ty: &str, schema: Option<&str>, pk: String) -> IdentityKey {
        (ty.to_string(), schema.map(str::to_string), pk)
    }
}

impl EntityManager for InMemorySession {
    fn meta_of(&self, ty: &str) -> Option<Arc<EntityMeta>> {
        self.registry.get(ty).cloned()
    }

    fn get_reference(&self, ty: &str, pk: Value, options: &AssignOptions) -> Result<Reference> {
        let meta = self.registry.expect(ty)?;
        let Some(serialized) = pk.as_pk_string() else {
            crate::bail!("malformed primary key for `{ty}`: {pk:?}");
        };

        let key = Self::key(ty, options.schema.as_deref(), serialized);
        if let Some(loaded) = self.identity.borrow().get(&key) {
            return Ok(Reference::new(loaded.clone()));
        }

        Ok(Reference::new(Entity::uninitialized(meta, pk)))
    }

    fn create(&self, ty: &str, payload: &Object, options: &AssignOptions) -> Result<Entity> {
        let meta = self.registry.expect(ty)?;
        let entity = Entity::new(meta);
        assign::assign(&entity, payload, Some(self), options.clone())?;
        self.manage(&entity, options.schema.as_deref());
        Ok(entity)
    }

    fn merge(&self, ty: &str, payload: &Object, options: &AssignOptions) -> Result<Entity> {
        let meta = self.registry.expect(ty)?;

        if let Some(pk) = meta.extract_pk(payload) {
            if let Some(existing) = self.lookup_loaded_by_id(ty, &pk, options.schema.as_deref()) {
                assign::assign(&existing, payload, Some(self), options.clone())?;
                return Ok(existing);
            }
        }

        self.create(ty, payload, options)
    }

    fn lookup_loaded_by_id(&self, ty: &str, pk: &Value, schema: Option<&str>) -> Option<Entity> {
        let serialized = pk.as_pk_string()?;
        self.identity
            .borrow()
            .get(&Self::key(ty, schema, serialized))
            .cloned()
    }

    fn create_embeddable(
        &self,
        ty: &str,
        payload: &Object,
        _options: CreateEmbeddableOptions,
    ) -> Result<Embeddable> {
        // The engine recurses over the payload keys afterwards; the factory
        // only seeds the raw values.
        Ok(Embeddable::with_values(ty, payload.clone()))
    }
}
