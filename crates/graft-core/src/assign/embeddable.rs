use super::Assigner;
use crate::entity::Entity;
use crate::manager::CreateEmbeddableOptions;
use crate::schema::{Property, PropertyKind};
use crate::value::Value;
use crate::Result;

/// Merges a payload value into an embedded property slot.
pub(super) fn assign_embeddable(
    assigner: &mut Assigner<'_>,
    entity: &Entity,
    value: &Value,
    prop: &Property,
) -> Result<()> {
    let current = entity.get(&prop.name);
    let next = build_embedded_value(assigner, current, value, prop)?;
    entity.set(&prop.name, next);
    Ok(())
}

/// Computes the new slot value for an embedded property.
///
/// Array properties rebuild their sequence, each element constructed
/// fresh through the non-array form; a bare value appends to an existing
/// sequence instead. Non-array properties reuse the existing embeddable
/// when merging, otherwise ask the manager's factory for a fresh one,
/// then recurse into nested embedded keys.
fn build_embedded_value(
    assigner: &mut Assigner<'_>,
    current: Option<Value>,
    value: &Value,
    prop: &Property,
) -> Result<Value> {
    if value.is_null() {
        return Ok(Value::Null);
    }

    if prop.array {
        let mut items = match (value, current) {
            (Value::List(_), _) => Vec::new(),
            (_, Some(Value::List(existing))) => existing,
            _ => Vec::new(),
        };

        let incoming: Vec<&Value> = match value {
            Value::List(list) => list.iter().collect(),
            other => vec![other],
        };

        let element_prop = non_array(prop);
        for item in incoming {
            items.push(build_embedded_value(assigner, None, item, &element_prop)?);
        }

        return Ok(Value::List(items));
    }

    let payload = match value {
        Value::Object(payload) => payload,
        Value::Embeddable(embeddable) => return Ok(Value::Embeddable(embeddable.clone())),
        other => crate::bail!(
            "invalid embedded value provided for `{}`: {:?}",
            prop.name,
            other
        ),
    };

    let has_current = matches!(&current, Some(existing) if !existing.is_null());
    let mut embeddable = match current {
        Some(Value::Embeddable(existing)) if assigner.options().merge_object_properties => {
            existing
        }
        _ => {
            let manager = assigner.manager("create embeddable value objects")?;
            let new_entity = if assigner.options().merge_object_properties {
                !has_current
            } else {
                true
            };
            manager.create_embeddable(
                prop.target_name()?,
                payload,
                CreateEmbeddableOptions {
                    convert_custom_types: assigner.options().convert_custom_types,
                    new_entity,
                },
            )?
        }
    };

    for (key, item) in payload {
        if let Some(child) = prop.embedded_props.get(key) {
            if child.kind == PropertyKind::Embedded {
                let nested = embeddable.get(key).cloned();
                let built = build_embedded_value(assigner, nested, item, child)?;
                embeddable.set(key, built);
                continue;
            }
        }
        embeddable.set(key, item.clone());
    }

    Ok(Value::Embeddable(embeddable))
}

fn non_array(prop: &Property) -> Property {
    let mut element = prop.clone();
    element.array = false;
    element
}
