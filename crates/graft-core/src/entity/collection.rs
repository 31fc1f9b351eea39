use super::Entity;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Ordered container of related entities for to-many relations.
///
/// The collection owns its slots, not its elements; elements are
/// independently managed entities. Cloning clones the handle.
#[derive(Clone, Default)]
pub struct Collection {
    inner: Rc<RefCell<Vec<Entity>>>,
}

impl Collection {
    pub fn new() -> Collection {
        Collection::default()
    }

    pub fn with_items(items: Vec<Entity>) -> Collection {
        let collection = Collection::new();
        collection.add(items);
        collection
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Entity> {
        self.inner.borrow().get(index).cloned()
    }

    /// Snapshot of the current elements.
    pub fn items(&self) -> Vec<Entity> {
        self.inner.borrow().clone()
    }

    /// Containment by identity or by serialized primary key.
    pub fn contains(&self, entity: &Entity) -> bool {
        let pk = entity.serialized_primary_key();
        self.inner.borrow().iter().any(|item| {
            item.same_identity(entity)
                || matches!((&pk, item.serialized_primary_key()), (Some(a), Some(b)) if *a == b)
        })
    }

    /// Authoritative replacement: the entire sequence becomes `items`.
    pub fn set(&self, items: Vec<Entity>) {
        self.inner.borrow_mut().clear();
        self.add(items);
    }

    /// Non-destructive append; items already present by identity or
    /// primary key are skipped.
    pub fn add(&self, items: Vec<Entity>) {
        for item in items {
            if !self.contains(&item) {
                self.inner.borrow_mut().push(item);
            }
        }
    }
}

impl PartialEq for Collection {
    fn eq(&self, other: &Collection) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
