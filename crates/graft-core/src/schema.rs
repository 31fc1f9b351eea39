//! Static property metadata describing entity types.

mod meta;
pub use meta::{EntityMeta, MetadataRegistry};

mod property;
pub use property::{CustomType, Property, PropertyKind, ScalarType};
