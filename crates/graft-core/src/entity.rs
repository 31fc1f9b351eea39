//! Runtime object-graph types: entities, references, collections, and
//! embeddable value objects.

mod collection;
pub use collection::Collection;

mod embeddable;
pub use embeddable::Embeddable;

mod reference;
pub use reference::Reference;

use crate::schema::EntityMeta;
use crate::value::{Object, Value};
use by_address::ByAddress;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// Identity-bearing handle to a managed entity.
///
/// Cloning clones the handle; all clones share the same underlying object.
/// Identity is pointer identity of that object, never structural equality,
/// so cyclic graphs compare and hash safely.
#[derive(Clone)]
pub struct Entity {
    inner: Rc<RefCell<EntityInner>>,
}

pub(crate) struct EntityInner {
    meta: Arc<EntityMeta>,
    values: Object,
    initialized: bool,
}

/// Identity key used by the assignment engine's visited set.
pub(crate) type EntityKey = ByAddress<Rc<RefCell<EntityInner>>>;

impl Entity {
    /// Creates a fresh, initialized entity with no property values.
    pub fn new(meta: Arc<EntityMeta>) -> Entity {
        Entity {
            inner: Rc::new(RefCell::new(EntityInner {
                meta,
                values: Object::new(),
                initialized: true,
            })),
        }
    }

    /// Creates an uninitialized shell that only carries its primary key.
    ///
    /// Persistence managers hand these out for keys that are not loaded
    /// yet; the shell keeps its identity once the real data arrives.
    pub fn uninitialized(meta: Arc<EntityMeta>, pk: Value) -> Entity {
        let keys = meta.primary_keys.clone();
        let mut values = Object::new();

        match (keys.as_slice(), pk) {
            ([], _) => {}
            ([single], pk) => {
                values.insert(single.clone(), pk);
            }
            (keys, Value::List(parts)) if keys.len() == parts.len() => {
                for (key, part) in keys.iter().zip(parts) {
                    values.insert(key.clone(), part);
                }
            }
            (keys, pk) => {
                values.insert(keys[0].clone(), pk);
            }
        }

        Entity {
            inner: Rc::new(RefCell::new(EntityInner {
                meta,
                values,
                initialized: false,
            })),
        }
    }

    pub fn meta(&self) -> Arc<EntityMeta> {
        self.inner.borrow().meta.clone()
    }

    pub fn type_name(&self) -> String {
        self.inner.borrow().meta.name.clone()
    }

    /// Returns a clone of the property value, if set.
    pub fn get(&self, property: &str) -> Option<Value> {
        self.inner.borrow().values.get(property).cloned()
    }

    pub fn set(&self, property: &str, value: Value) {
        self.inner
            .borrow_mut()
            .values
            .insert(property.to_string(), value);
    }

    pub fn has(&self, property: &str) -> bool {
        self.inner.borrow().values.contains_key(property)
    }

    /// Snapshot of all property values.
    pub fn values(&self) -> Object {
        self.inner.borrow().values.clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.borrow().initialized
    }

    pub fn mark_initialized(&self) {
        self.inner.borrow_mut().initialized = true;
    }

    /// The primary key value, if fully assigned. Composite keys yield a
    /// list in key declaration order.
    pub fn primary_key(&self) -> Option<Value> {
        let inner = self.inner.borrow();

        match inner.meta.primary_keys.as_slice() {
            [] => None,
            [single] => inner
                .values
                .get(single)
                .filter(|value| !value.is_null())
                .cloned(),
            keys => {
                let mut parts = Vec::with_capacity(keys.len());
                for key in keys {
                    match inner.values.get(key) {
                        Some(value) if !value.is_null() => parts.push(value.clone()),
                        _ => return None,
                    }
                }
                Some(Value::List(parts))
            }
        }
    }

    /// Canonical text form of the primary key.
    pub fn serialized_primary_key(&self) -> Option<String> {
        self.primary_key()?.as_pk_string()
    }

    /// Pointer identity.
    pub fn same_identity(&self, other: &Entity) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Identity, falling back to serialized primary key equality.
    pub fn same_target(&self, other: &Entity) -> bool {
        if self.same_identity(other) {
            return true;
        }
        match (self.serialized_primary_key(), other.serialized_primary_key()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    pub(crate) fn key(&self) -> EntityKey {
        ByAddress(self.inner.clone())
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Entity) -> bool {
        self.same_identity(other)
    }
}

impl fmt::Debug for Entity {
    // deliberately shallow: entity graphs are cyclic
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("type", &self.type_name())
            .field("pk", &self.primary_key())
            .field("initialized", &self.is_initialized())
            .finish_non_exhaustive()
    }
}
