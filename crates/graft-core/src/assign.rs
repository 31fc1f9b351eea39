//! The recursive assignment engine: merges loosely-typed payloads into a
//! live entity graph, one property at a time.

mod collection;
mod embeddable;
mod reference;
mod validate;

pub use reference::auto_wire_one_to_one;

use crate::entity::{Collection, Entity, EntityKey};
use crate::manager::EntityManager;
use crate::schema::{EntityMeta, Property, PropertyKind};
use crate::value::{self, Object, Value};
use crate::{Error, Result};
use std::collections::HashSet;
use std::sync::Arc;

/// Merge policy configuration. Defaults favor updating what is already
/// loaded over replacing it.
#[derive(Debug, Clone)]
pub struct AssignOptions {
    /// Merge a nested payload into an already-initialized target instead
    /// of replacing the reference
    pub update_nested_entities: bool,

    /// Re-point the reference when a nested payload carries a primary key
    /// resolving to a different managed entity
    pub update_by_primary_key: bool,

    /// Silently drop payload keys that have no property metadata
    pub only_properties: bool,

    /// Run raw scalar values through their custom converter first
    pub convert_custom_types: bool,

    /// Deep-merge plain object values into the existing value instead of
    /// replacing it wholesale
    pub merge_object_properties: bool,

    /// Resolve unmatched nested payloads through the manager's `merge`
    /// instead of `create`
    pub merge: bool,

    /// Tenant/schema qualifier forwarded to reference and creation calls
    pub schema: Option<String>,
}

impl Default for AssignOptions {
    fn default() -> Self {
        AssignOptions {
            update_nested_entities: true,
            update_by_primary_key: true,
            only_properties: false,
            convert_custom_types: false,
            merge_object_properties: true,
            merge: false,
            schema: None,
        }
    }
}

/// Merges `payload` into `entity` and returns the mutated entity.
pub fn assign(
    entity: &Entity,
    payload: &Object,
    manager: Option<&dyn EntityManager>,
    options: AssignOptions,
) -> Result<Entity> {
    let mut assigner = match manager {
        Some(manager) => Assigner::with_manager(manager, options),
        None => Assigner::new(options),
    };
    assigner.assign(entity, payload)?;
    Ok(entity.clone())
}

/// Stateful assignment engine.
///
/// Holds the merge options, the optional persistence-manager capability,
/// and the visited set threaded through every recursive call spawned from
/// one top-level assignment.
pub struct Assigner<'a> {
    manager: Option<&'a dyn EntityManager>,
    options: AssignOptions,
    visited: HashSet<EntityKey>,
}

impl<'a> Assigner<'a> {
    pub fn new(options: AssignOptions) -> Assigner<'a> {
        Assigner {
            manager: None,
            options,
            visited: HashSet::new(),
        }
    }

    pub fn with_manager(manager: &'a dyn EntityManager, options: AssignOptions) -> Assigner<'a> {
        Assigner {
            manager: Some(manager),
            options,
            visited: HashSet::new(),
        }
    }

    pub fn options(&self) -> &AssignOptions {
        &self.options
    }

    /// Merges `payload` into `entity`.
    ///
    /// An entity already entered during this call is left untouched; the
    /// visited set terminates recursion on cyclic graphs.
    pub fn assign(&mut self, entity: &Entity, payload: &Object) -> Result<()> {
        if !self.visited.insert(entity.key()) {
            return Ok(());
        }

        let meta = entity.meta();
        for (key, item) in payload {
            self.assign_property(entity, &meta, key, item)?;
        }

        Ok(())
    }

    fn assign_property(
        &mut self,
        entity: &Entity,
        meta: &EntityMeta,
        key: &str,
        value: &Value,
    ) -> Result<()> {
        let prop = meta.property(key);

        if prop.is_none() && self.options.only_properties {
            return Ok(());
        }

        // The non-nullable guard fires before any mutation of the property.
        if let Some(prop) = prop {
            if !prop.nullable && value.is_null() {
                return Err(Error::not_nullable(&meta.name, key));
            }
        }

        // Collections are only ever touched through reconciliation.
        if let Some(prop) = prop {
            if prop.kind.is_to_many() {
                let collection = match entity.get(key) {
                    Some(Value::Collection(collection)) => collection,
                    _ => {
                        let collection = Collection::new();
                        entity.set(key, Value::Collection(collection.clone()));
                        collection
                    }
                };
                return collection::assign_collection(self, entity, &collection, value, prop);
            }
        }

        let mut value = value.clone();

        if self.options.convert_custom_types {
            if let Some(prop) = prop {
                if prop.kind == PropertyKind::Scalar && !value.is_entity_like() {
                    if let Some(custom_type) = &prop.custom_type {
                        value = custom_type.convert_to_runtime(value)?;
                    }
                }
            }
        }

        if let Some(prop) = prop {
            if prop.kind.is_to_one() && !value.is_null() {
                return self.assign_to_one(entity, prop, value);
            }

            if prop.kind == PropertyKind::Scalar && prop.scalar_ty.is_some() && prop.assignable {
                let validated = validate::validate_scalar(&meta.name, prop, value)?;
                entity.set(key, validated);
                return Ok(());
            }

            if prop.kind == PropertyKind::Embedded {
                self.manager("assign embedded properties")?;
                return embeddable::assign_embeddable(self, entity, &value, prop);
            }
        }

        if self.options.merge_object_properties {
            if let Value::Object(source) = &value {
                let mut target = match entity.get(key) {
                    Some(Value::Object(existing)) => existing,
                    _ => Object::new(),
                };
                value::merge_objects(&mut target, source);
                entity.set(key, Value::Object(target));
                return Ok(());
            }
        }

        // Plain assignment, skipped only for computed properties.
        if prop.map_or(true, |prop| prop.assignable) {
            entity.set(key, value);
        }

        Ok(())
    }

    /// To-one merge policy.
    ///
    /// The same-target check decides between an in-place merge and a
    /// reference swap: a nested payload whose key resolves to a different
    /// managed entity re-points the relation instead of updating the
    /// current target.
    fn assign_to_one(&mut self, entity: &Entity, prop: &Property, value: Value) -> Result<()> {
        if self.options.update_nested_entities && entity.has(&prop.name) {
            let current = entity.get(&prop.name).and_then(|slot| slot.unwrap_entity());

            if let (Some(current), Value::Object(nested)) = (current, &value) {
                if self.options.update_by_primary_key {
                    if let Some(pk) = self
                        .target_meta(prop)
                        .and_then(|meta| meta.extract_pk(nested))
                    {
                        let manager = self.manager("resolve references by primary key")?;
                        let reference =
                            manager.get_reference(prop.target_name()?, pk, &self.options)?;

                        if reference.is_initialized() && reference.entity().same_target(&current) {
                            let target = reference.entity().clone();
                            return self.assign(&target, nested);
                        }
                    }

                    return reference::resolve_reference(self, entity, value, prop);
                }

                if current.is_initialized() {
                    return self.assign(&current, nested);
                }
            }
        }

        reference::resolve_reference(self, entity, value, prop)
    }

    /// The manager capability, or a `MissingManagerError` naming the
    /// operation that needed it.
    fn manager(&self, operation: &'static str) -> Result<&'a dyn EntityManager> {
        self.manager
            .ok_or_else(|| Error::missing_manager(operation))
    }

    /// Metadata of a relation's target type, when a manager can supply it.
    fn target_meta(&self, prop: &Property) -> Option<Arc<EntityMeta>> {
        let manager = self.manager?;
        let target = prop.target.as_deref()?;
        manager.meta_of(target)
    }
}
