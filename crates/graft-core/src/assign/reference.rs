use super::Assigner;
use crate::entity::{Entity, Reference};
use crate::schema::{Property, PropertyKind};
use crate::value::Value;
use crate::{Error, Result};

/// Resolves a to-one payload value into a reference and assigns it.
///
/// An entity value wraps as-is; a primary key resolves through the
/// manager (or assigns verbatim for `map_to_pk` properties); a plain
/// object goes through `merge` or `create` depending on the options.
pub(super) fn resolve_reference(
    assigner: &mut Assigner<'_>,
    entity: &Entity,
    value: Value,
    prop: &Property,
) -> Result<()> {
    match value {
        Value::Entity(related) => {
            entity.set(&prop.name, Value::Reference(Reference::new(related)));
        }
        Value::Reference(reference) => {
            entity.set(&prop.name, Value::Reference(reference));
        }
        value if value.is_primary_key_like() => {
            if prop.map_to_pk {
                entity.set(&prop.name, value);
            } else {
                let manager = assigner.manager("resolve references by primary key")?;
                let reference =
                    manager.get_reference(prop.target_name()?, value, assigner.options())?;
                entity.set(&prop.name, Value::Reference(reference));
            }
        }
        Value::Object(ref payload) if assigner.options().merge => {
            let manager = assigner.manager("merge nested payloads")?;
            let merged = manager.merge(prop.target_name()?, payload, assigner.options())?;
            entity.set(&prop.name, Value::Reference(Reference::new(merged)));
        }
        Value::Object(ref payload) => {
            let manager = assigner.manager("create entities from nested payloads")?;
            let created = manager.create(prop.target_name()?, payload, assigner.options())?;
            entity.set(&prop.name, Value::Reference(Reference::new(created)));
        }
        other => {
            return Err(Error::invalid_reference(
                entity.type_name(),
                &prop.name,
                other,
            ));
        }
    }

    auto_wire_one_to_one(prop, entity);

    Ok(())
}

/// Fixes up the inverse side of a one-to-one relation after the owning
/// side was set, keeping the link bidirectional when the inverse side is
/// currently empty. Usable standalone after external mutation.
pub fn auto_wire_one_to_one(prop: &Property, entity: &Entity) {
    if prop.kind != PropertyKind::OneToOne {
        return;
    }

    let Some(related) = entity.get(&prop.name).and_then(|slot| slot.unwrap_entity()) else {
        return;
    };

    let Some(inverse) = prop.inversed_by.as_deref().or(prop.mapped_by.as_deref()) else {
        return;
    };

    // only wire an inverse property the target type declares
    if related.meta().property(inverse).is_none() {
        return;
    }

    let empty = matches!(related.get(inverse), None | Some(Value::Null));
    if empty {
        related.set(inverse, Value::Reference(Reference::new(entity.clone())));
    }
}
