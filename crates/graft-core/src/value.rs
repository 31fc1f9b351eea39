use crate::entity::{Collection, Embeddable, Entity, Reference};
use indexmap::IndexMap;

/// String-keyed, insertion-ordered map used for plain payload objects.
pub type Object = IndexMap<String, Value>;

/// Loosely-typed value.
///
/// This is both the payload representation handed to [`assign`] and the
/// representation of property values stored on an [`Entity`]. Payloads only
/// ever contain the plain variants; the entity variants appear once the
/// engine has resolved nested data into managed handles.
///
/// [`assign`]: crate::assign
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Null value
    #[default]
    Null,

    /// Boolean value
    Bool(bool),

    /// Signed 64-bit integer
    I64(i64),

    /// 64-bit float
    F64(f64),

    /// String value
    String(String),

    /// Plain, non-modeled object value
    Object(Object),

    /// A list of values
    List(Vec<Value>),

    /// A managed entity handle
    Entity(Entity),

    /// A to-one reference, possibly uninitialized
    Reference(Reference),

    /// A to-many collection of related entities
    Collection(Collection),

    /// An embedded value object
    Embeddable(Embeddable),
}

impl Value {
    /// Returns a `Value` representing null
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Returns `true` if the value is an entity or a reference to one.
    pub const fn is_entity_like(&self) -> bool {
        matches!(self, Self::Entity(_) | Self::Reference(_))
    }

    /// Returns `true` if the value has the shape of a primary key: a
    /// scalar key or, for composite keys, a list of scalar keys.
    pub fn is_primary_key_like(&self) -> bool {
        match self {
            Self::I64(_) | Self::String(_) => true,
            Self::List(items) => {
                !items.is_empty()
                    && items
                        .iter()
                        .all(|item| matches!(item, Self::I64(_) | Self::String(_)))
            }
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(&**v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<&Collection> {
        match self {
            Self::Collection(collection) => Some(collection),
            _ => None,
        }
    }

    pub fn as_embeddable(&self) -> Option<&Embeddable> {
        match self {
            Self::Embeddable(embeddable) => Some(embeddable),
            _ => None,
        }
    }

    /// Unwraps the entity behind an `Entity` or `Reference` value,
    /// preserving identity.
    pub fn unwrap_entity(&self) -> Option<Entity> {
        match self {
            Self::Entity(entity) => Some(entity.clone()),
            Self::Reference(reference) => Some(reference.entity().clone()),
            _ => None,
        }
    }

    /// Canonical text form of a primary key value; used for equal-by-target
    /// comparisons and identity-map keys. Composite keys join their parts.
    pub fn as_pk_string(&self) -> Option<String> {
        match self {
            Self::I64(v) => Some(v.to_string()),
            Self::String(s) => Some(s.clone()),
            Self::List(items) => items
                .iter()
                .map(|item| item.as_pk_string())
                .collect::<Option<Vec<_>>>()
                .map(|parts| parts.join("~")),
            Self::Entity(entity) => entity.serialized_primary_key(),
            Self::Reference(reference) => reference.serialized_primary_key(),
            _ => None,
        }
    }
}

/// Deep-merges `source` into `target`: object values merge key by key,
/// everything else replaces.
pub fn merge_objects(target: &mut Object, source: &Object) {
    for (key, value) in source {
        match (target.get_mut(key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                merge_objects(existing, incoming);
            }
            _ => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::I64(src.into())
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Self {
        Self::F64(src)
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<Object> for Value {
    fn from(src: Object) -> Self {
        Self::Object(src)
    }
}

impl From<Vec<Value>> for Value {
    fn from(src: Vec<Value>) -> Self {
        Self::List(src)
    }
}

impl From<Entity> for Value {
    fn from(src: Entity) -> Self {
        Self::Entity(src)
    }
}

impl From<Reference> for Value {
    fn from(src: Reference) -> Self {
        Self::Reference(src)
    }
}

impl From<Collection> for Value {
    fn from(src: Collection) -> Self {
        Self::Collection(src)
    }
}

impl From<Embeddable> for Value {
    fn from(src: Embeddable) -> Self {
        Self::Embeddable(src)
    }
}
