use super::Assigner;
use crate::entity::{Collection, Entity, Reference};
use crate::schema::Property;
use crate::value::Value;
use crate::{Error, Result};

/// Reconciles an incoming payload against a collection property.
///
/// Every item resolves before the collection mutates; if any item is
/// unresolvable the whole assignment fails and the collection is left
/// untouched. A list payload replaces the contents, a bare payload
/// appends.
pub(super) fn assign_collection(
    assigner: &mut Assigner<'_>,
    entity: &Entity,
    collection: &Collection,
    value: &Value,
    prop: &Property,
) -> Result<()> {
    let is_list = value.is_list();
    let incoming: Vec<Value> = match value {
        Value::List(items) => items.clone(),
        other => vec![other.clone()],
    };

    let mut invalid = Vec::new();
    let mut items = Vec::with_capacity(incoming.len());

    for (index, item) in incoming.into_iter().enumerate() {
        let item = inject_owning_side(assigner, entity, prop, item);

        if assigner.options().update_nested_entities && assigner.options().update_by_primary_key {
            if let Value::Object(payload) = &item {
                if let Some(pk) = assigner
                    .target_meta(prop)
                    .and_then(|meta| meta.extract_pk(payload))
                {
                    let manager = assigner.manager("resolve collection items by primary key")?;
                    let loaded = manager.lookup_loaded_by_id(
                        prop.target_name()?,
                        &pk,
                        assigner.options().schema.as_deref(),
                    );

                    if let Some(loaded) = loaded {
                        assigner.assign(&loaded, payload)?;
                        items.push(loaded);
                        continue;
                    }
                }

                if let Some(resolved) = create_collection_item(assigner, item, prop, &mut invalid)?
                {
                    items.push(resolved);
                }
                continue;
            }
        } else if assigner.options().update_nested_entities
            && !assigner.options().update_by_primary_key
        {
            if let (Some(existing), Value::Object(payload)) = (collection.get(index), &item) {
                if existing.is_initialized() {
                    assigner.assign(&existing, payload)?;
                    items.push(existing);
                    continue;
                }
            }
        }

        if let Some(resolved) = create_collection_item(assigner, item, prop, &mut invalid)? {
            items.push(resolved);
        }
    }

    if !invalid.is_empty() {
        return Err(Error::invalid_collection_items(
            entity.type_name(),
            &prop.name,
            invalid,
        ));
    }

    if is_list {
        collection.set(items);
    } else {
        collection.add(items);
    }

    Ok(())
}

/// Resolves one collection item to a managed entity, collecting
/// unresolvable values instead of failing one at a time.
fn create_collection_item(
    assigner: &Assigner<'_>,
    item: Value,
    prop: &Property,
    invalid: &mut Vec<Value>,
) -> Result<Option<Entity>> {
    match item {
        Value::Entity(entity) => Ok(Some(entity)),
        Value::Reference(reference) => Ok(Some(reference.into_entity())),
        item if item.is_primary_key_like() => {
            let manager = assigner.manager("resolve collection items by primary key")?;
            let reference = manager.get_reference(prop.target_name()?, item, assigner.options())?;
            Ok(Some(reference.into_entity()))
        }
        Value::Object(ref payload) if assigner.options().merge => {
            let manager = assigner.manager("merge collection items")?;
            let merged = manager.merge(prop.target_name()?, payload, assigner.options())?;
            Ok(Some(merged))
        }
        Value::Object(ref payload) => {
            let manager = assigner.manager("create collection items")?;
            let created = manager.create(prop.target_name()?, payload, assigner.options())?;
            Ok(Some(created))
        }
        other => {
            invalid.push(other);
            Ok(None)
        }
    }
}

/// Propagates the owning side onto plain-object items, so a child created
/// from a nested array carries its back-reference.
fn inject_owning_side(
    assigner: &Assigner<'_>,
    entity: &Entity,
    prop: &Property,
    item: Value,
) -> Value {
    let Some(owning) = prop.mapped_by.as_deref() else {
        return item;
    };
    let Some(target_meta) = assigner.target_meta(prop) else {
        return item;
    };
    if target_meta.property(owning).is_none() {
        return item;
    }

    if let Value::Object(mut payload) = item {
        if matches!(payload.get(owning), None | Some(Value::Null)) {
            payload.insert(
                owning.to_string(),
                Value::Reference(Reference::new(entity.clone())),
            );
        }
        Value::Object(payload)
    } else {
        item
    }
}
