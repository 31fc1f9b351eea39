#[macro_use]
mod macros;

mod error;
pub use error::Error;

pub mod schema;
pub use schema::{CustomType, EntityMeta, MetadataRegistry, Property, PropertyKind, ScalarType};

pub mod value;
pub use value::{Object, Value};

pub mod entity;
pub use entity::{Collection, Embeddable, Entity, Reference};

pub mod manager;
pub use manager::{CreateEmbeddableOptions, EntityManager, InMemorySession};

pub mod assign;
pub use assign::{assign, auto_wire_one_to_one, AssignOptions, Assigner};

/// A Result type alias that uses Graft's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
