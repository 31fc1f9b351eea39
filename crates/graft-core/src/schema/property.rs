use crate::{value::Value, Result};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Relationship kind of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropertyKind {
    Scalar,
    ManyToOne,
    OneToOne,
    OneToMany,
    ManyToMany,
    Embedded,
}

impl PropertyKind {
    /// Returns `true` for relation kinds resolved through a reference.
    pub const fn is_to_one(self) -> bool {
        matches!(self, Self::ManyToOne | Self::OneToOne)
    }

    /// Returns `true` for relation kinds held in a collection.
    pub const fn is_to_many(self) -> bool {
        matches!(self, Self::OneToMany | Self::ManyToMany)
    }
}

/// Declared primitive type of a scalar property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScalarType {
    Bool,
    Int,
    Float,
    String,
}

impl ScalarType {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
        }
    }
}

/// Converter between the raw payload representation of a scalar and its
/// in-memory representation.
pub trait CustomType {
    fn convert_to_runtime(&self, value: Value) -> Result<Value>;
}

/// Static description of one property on an entity type.
#[derive(Clone)]
pub struct Property {
    /// The property name
    pub name: String,

    /// Relationship kind; drives the merge strategy during assignment
    pub kind: PropertyKind,

    /// Target entity (relations) or embeddable (embedded) type name
    pub target: Option<String>,

    /// Declared primitive type, for scalar properties the engine validates
    pub scalar_ty: Option<ScalarType>,

    /// True if the property accepts null
    pub nullable: bool,

    /// False for computed properties (getter without setter); the engine
    /// never writes a non-assignable property directly
    pub assignable: bool,

    /// Inverse-side property name when this is the owning side of a
    /// bidirectional relation
    pub inversed_by: Option<String>,

    /// Owning-side property name when this is the inverse side
    pub mapped_by: Option<String>,

    /// Embedded property holds a homogeneous sequence of embeddables
    pub array: bool,

    /// Nested metadata for embedded properties
    pub embedded_props: IndexMap<String, Property>,

    /// Store to-one values as the raw primary key instead of a reference
    pub map_to_pk: bool,

    /// Optional scalar converter
    pub custom_type: Option<Arc<dyn CustomType>>,
}

impl Property {
    fn base(name: impl Into<String>, kind: PropertyKind) -> Property {
        Property {
            name: name.into(),
            kind,
            target: None,
            scalar_ty: None,
            nullable: true,
            assignable: true,
            inversed_by: None,
            mapped_by: None,
            array: false,
            embedded_props: IndexMap::new(),
            map_to_pk: false,
            custom_type: None,
        }
    }

    pub fn scalar(name: impl Into<String>, ty: ScalarType) -> Property {
        let mut prop = Self::base(name, PropertyKind::Scalar);
        prop.scalar_ty = Some(ty);
        prop
    }

    /// A scalar property with no recognized primitive type; assignment
    /// falls through to plain or merged object assignment.
    pub fn raw(name: impl Into<String>) -> Property {
        Self::base(name, PropertyKind::Scalar)
    }

    pub fn many_to_one(name: impl Into<String>, target: impl Into<String>) -> Property {
        let mut prop = Self::base(name, PropertyKind::ManyToOne);
        prop.target = Some(target.into());
        prop
    }

    pub fn one_to_one(name: impl Into<String>, target: impl Into<String>) -> Property {
        let mut prop = Self::base(name, PropertyKind::OneToOne);
        prop.target = Some(target.into());
        prop
    }

    pub fn one_to_many(name: impl Into<String>, target: impl Into<String>) -> Property {
        let mut prop = Self::base(name, PropertyKind::OneToMany);
        prop.target = Some(target.into());
        prop
    }

    pub fn many_to_many(name: impl Into<String>, target: impl Into<String>) -> Property {
        let mut prop = Self::base(name, PropertyKind::ManyToMany);
        prop.target = Some(target.into());
        prop
    }

    pub fn embedded(name: impl Into<String>, target: impl Into<String>) -> Property {
        let mut prop = Self::base(name, PropertyKind::Embedded);
        prop.target = Some(target.into());
        prop
    }

    pub fn non_nullable(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Marks the property computed: readable but never assigned.
    pub fn computed(mut self) -> Self {
        self.assignable = false;
        self
    }

    pub fn inversed_by(mut self, name: impl Into<String>) -> Self {
        self.inversed_by = Some(name.into());
        self
    }

    pub fn mapped_by(mut self, name: impl Into<String>) -> Self {
        self.mapped_by = Some(name.into());
        self
    }

    /// Declares an embedded property as a homogeneous sequence.
    pub fn as_array(mut self) -> Self {
        self.array = true;
        self
    }

    /// Stores the raw primary key instead of a wrapped reference.
    pub fn map_to_pk(mut self) -> Self {
        self.map_to_pk = true;
        self
    }

    pub fn with_custom_type(mut self, custom_type: Arc<dyn CustomType>) -> Self {
        self.custom_type = Some(custom_type);
        self
    }

    pub fn with_embedded_props(mut self, props: Vec<Property>) -> Self {
        self.embedded_props = props
            .into_iter()
            .map(|prop| (prop.name.clone(), prop))
            .collect();
        self
    }

    /// Target type name, required for relation and embedded kinds.
    pub(crate) fn target_name(&self) -> Result<&str> {
        self.target
            .as_deref()
            .ok_or_else(|| crate::err!("property `{}` has no target type", self.name))
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("target", &self.target)
            .field("scalar_ty", &self.scalar_ty)
            .field("nullable", &self.nullable)
            .field("assignable", &self.assignable)
            .finish_non_exhaustive()
    }
}
