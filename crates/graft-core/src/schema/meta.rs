use super::Property;
use crate::value::{Object, Value};
use crate::Result;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;

/// Immutable per-type descriptor: primary key shape and property metadata.
#[derive(Debug, Clone)]
pub struct EntityMeta {
    /// Name of the entity type
    pub name: String,

    /// Primary key property names; more than one entry for composite keys,
    /// empty for embeddable-only types
    pub primary_keys: Vec<String>,

    /// Properties keyed by name, in declaration order
    pub properties: IndexMap<String, Property>,
}

impl EntityMeta {
    pub fn new(
        name: impl Into<String>,
        primary_keys: Vec<&str>,
        properties: Vec<Property>,
    ) -> EntityMeta {
        EntityMeta {
            name: name.into(),
            primary_keys: primary_keys.into_iter().map(str::to_string).collect(),
            properties: properties
                .into_iter()
                .map(|prop| (prop.name.clone(), prop))
                .collect(),
        }
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    /// Extracts a primary key value from a plain payload object.
    ///
    /// Composite keys require every part to be present; the result is a
    /// list in key declaration order.
    pub fn extract_pk(&self, object: &Object) -> Option<Value> {
        let usable = |value: &Value| value.is_primary_key_like() || value.is_entity_like();

        match self.primary_keys.as_slice() {
            [] => None,
            [single] => object.get(single).filter(|value| usable(value)).cloned(),
            keys => {
                let mut parts = Vec::with_capacity(keys.len());
                for key in keys {
                    match object.get(key) {
                        Some(value) if usable(value) => parts.push(value.clone()),
                        _ => return None,
                    }
                }
                Some(Value::List(parts))
            }
        }
    }
}

/// Read-only lookup of entity metadata by type name.
#[derive(Debug, Default)]
pub struct MetadataRegistry {
    types: HashMap<String, Arc<EntityMeta>>,
}

impl MetadataRegistry {
    pub fn new() -> MetadataRegistry {
        MetadataRegistry::default()
    }

    pub fn register(&mut self, meta: EntityMeta) -> Arc<EntityMeta> {
        let meta = Arc::new(meta);
        self.types.insert(meta.name.clone(), meta.clone());
        meta
    }

    pub fn get(&self, name: &str) -> Option<&Arc<EntityMeta>> {
        self.types.get(name)
    }

    pub fn expect(&self, name: &str) -> Result<Arc<EntityMeta>> {
        self.get(name)
            .cloned()
            .ok_or_else(|| crate::Error::unknown_entity_type(name))
    }
}
