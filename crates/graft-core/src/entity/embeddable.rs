use crate::value::{Object, Value};

/// Identity-less value object owned by exactly one entity property.
#[derive(Debug, Clone, PartialEq)]
pub struct Embeddable {
    ty: String,
    values: Object,
}

impl Embeddable {
    pub fn new(ty: impl Into<String>) -> Embeddable {
        Embeddable {
            ty: ty.into(),
            values: Object::new(),
        }
    }

    pub fn with_values(ty: impl Into<String>, values: Object) -> Embeddable {
        Embeddable {
            ty: ty.into(),
            values,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.ty
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    pub fn values(&self) -> &Object {
        &self.values
    }
}
