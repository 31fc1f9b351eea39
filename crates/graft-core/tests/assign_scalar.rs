use graft_core::{
    assign, object, AssignOptions, CustomType, Entity, EntityMeta, MetadataRegistry, Property,
    Result, ScalarType, Value,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn user_meta() -> Arc<EntityMeta> {
    let mut registry = MetadataRegistry::new();
    registry.register(EntityMeta::new(
        "User",
        vec!["id"],
        vec![
            Property::scalar("id", ScalarType::Int),
            Property::scalar("name", ScalarType::String),
            Property::scalar("age", ScalarType::Int),
            Property::scalar("email", ScalarType::String).non_nullable(),
            Property::raw("settings"),
            Property::raw("slug").computed(),
        ],
    ));
    registry.expect("User").unwrap()
}

fn user() -> Entity {
    Entity::new(user_meta())
}

// ---------------------------------------------------------------------------
// Plain scalar assignment
// ---------------------------------------------------------------------------

#[test]
fn assign_string_scalar() {
    let entity = user();

    assign(
        &entity,
        &object! { "name" => "Ada" },
        None,
        AssignOptions::default(),
    )
    .unwrap();

    assert_eq!(entity.get("name"), Some(Value::from("Ada")));
}

#[test]
fn coerce_string_to_int() {
    let entity = user();

    assign(
        &entity,
        &object! { "age" => "42" },
        None,
        AssignOptions::default(),
    )
    .unwrap();

    assert_eq!(entity.get("age"), Some(Value::from(42)));
}

#[test]
fn coerce_int_to_string() {
    let entity = user();

    assign(
        &entity,
        &object! { "name" => 7 },
        None,
        AssignOptions::default(),
    )
    .unwrap();

    assert_eq!(entity.get("name"), Some(Value::from("7")));
}

#[test]
fn invalid_scalar_fails() {
    let entity = user();

    let err = assign(
        &entity,
        &object! { "age" => "not a number" },
        None,
        AssignOptions::default(),
    )
    .unwrap_err();

    assert!(err.is_validation());
    assert!(entity.get("age").is_none());
}

// ---------------------------------------------------------------------------
// Non-nullable guard
// ---------------------------------------------------------------------------

#[test]
fn non_nullable_rejects_null() {
    let entity = user();
    entity.set("email", Value::from("ada@example.com"));

    let err = assign(
        &entity,
        &object! { "email" => Value::Null },
        None,
        AssignOptions::default(),
    )
    .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(
        err.to_string(),
        "you must pass a non-null value to property `User.email`"
    );
    // the guard fires before any mutation of the property
    assert_eq!(entity.get("email"), Some(Value::from("ada@example.com")));
}

#[test]
fn nullable_scalar_accepts_null() {
    let entity = user();
    entity.set("name", Value::from("Ada"));

    assign(
        &entity,
        &object! { "name" => Value::Null },
        None,
        AssignOptions::default(),
    )
    .unwrap();

    assert_eq!(entity.get("name"), Some(Value::Null));
}

// ---------------------------------------------------------------------------
// Keys without metadata
// ---------------------------------------------------------------------------

#[test]
fn unknown_key_assigned_as_own_property() {
    let entity = user();

    assign(
        &entity,
        &object! { "nickname" => "queen of engines" },
        None,
        AssignOptions::default(),
    )
    .unwrap();

    assert_eq!(entity.get("nickname"), Some(Value::from("queen of engines")));
}

#[test]
fn only_properties_drops_unknown_keys() {
    let entity = user();

    assign(
        &entity,
        &object! { "nickname" => "dropped", "name" => "Ada" },
        None,
        AssignOptions {
            only_properties: true,
            ..Default::default()
        },
    )
    .unwrap();

    assert!(entity.get("nickname").is_none());
    assert_eq!(entity.get("name"), Some(Value::from("Ada")));
}

#[test]
fn computed_property_is_never_written() {
    let entity = user();

    assign(
        &entity,
        &object! { "slug" => "forced" },
        None,
        AssignOptions::default(),
    )
    .unwrap();

    assert!(entity.get("slug").is_none());
}

// ---------------------------------------------------------------------------
// Plain object properties
// ---------------------------------------------------------------------------

#[test]
fn object_property_deep_merges() {
    let entity = user();
    entity.set(
        "settings",
        Value::Object(object! { "theme" => "dark", "layout" => object! { "cols" => 2 } }),
    );

    assign(
        &entity,
        &object! { "settings" => object! { "layout" => object! { "rows" => 3 } } },
        None,
        AssignOptions::default(),
    )
    .unwrap();

    assert_eq!(
        entity.get("settings"),
        Some(Value::Object(object! {
            "theme" => "dark",
            "layout" => object! { "cols" => 2, "rows" => 3 },
        }))
    );
}

#[test]
fn object_property_replaces_when_not_merging() {
    let entity = user();
    entity.set("settings", Value::Object(object! { "theme" => "dark" }));

    assign(
        &entity,
        &object! { "settings" => object! { "layout" => "wide" } },
        None,
        AssignOptions {
            merge_object_properties: false,
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(
        entity.get("settings"),
        Some(Value::Object(object! { "layout" => "wide" }))
    );
}

// ---------------------------------------------------------------------------
// Custom scalar converters
// ---------------------------------------------------------------------------

struct Uppercase;

impl CustomType for Uppercase {
    fn convert_to_runtime(&self, value: Value) -> Result<Value> {
        Ok(match value {
            Value::String(raw) => Value::String(raw.to_uppercase()),
            other => other,
        })
    }
}

fn meta_with_converter() -> Arc<EntityMeta> {
    let mut registry = MetadataRegistry::new();
    registry.register(EntityMeta::new(
        "Tag",
        vec!["id"],
        vec![
            Property::scalar("id", ScalarType::Int),
            Property::scalar("label", ScalarType::String).with_custom_type(Arc::new(Uppercase)),
        ],
    ));
    registry.expect("Tag").unwrap()
}

#[test]
fn custom_type_converts_when_enabled() {
    let entity = Entity::new(meta_with_converter());

    assign(
        &entity,
        &object! { "label" => "rust" },
        None,
        AssignOptions {
            convert_custom_types: true,
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(entity.get("label"), Some(Value::from("RUST")));
}

#[test]
fn custom_type_ignored_by_default() {
    let entity = Entity::new(meta_with_converter());

    assign(
        &entity,
        &object! { "label" => "rust" },
        None,
        AssignOptions::default(),
    )
    .unwrap();

    assert_eq!(entity.get("label"), Some(Value::from("rust")));
}
