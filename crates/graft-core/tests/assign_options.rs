use graft_core::{
    assign, object, AssignOptions, Entity, EntityManager, EntityMeta, InMemorySession,
    MetadataRegistry, Property, ScalarType, Value,
};
use pretty_assertions::assert_eq;

fn session() -> InMemorySession {
    let mut registry = MetadataRegistry::new();
    registry.register(EntityMeta::new(
        "Author",
        vec!["id"],
        vec![
            Property::scalar("id", ScalarType::Int),
            Property::scalar("name", ScalarType::String),
        ],
    ));
    registry.register(EntityMeta::new(
        "Book",
        vec!["id"],
        vec![
            Property::scalar("id", ScalarType::Int),
            Property::scalar("title", ScalarType::String),
            Property::many_to_one("author", "Author"),
        ],
    ));
    InMemorySession::new(registry)
}

fn related(entity: &Entity, property: &str) -> Entity {
    entity
        .get(property)
        .and_then(|value| value.unwrap_entity())
        .unwrap()
}

// ---------------------------------------------------------------------------
// Schema-qualified identity
// ---------------------------------------------------------------------------

#[test]
fn schema_scopes_identity_lookups() {
    let session = session();
    let author = Entity::new(session.registry().expect("Author").unwrap());
    author.set("id", Value::from(1));
    session.manage(&author, Some("tenant1"));

    let book = Entity::new(session.registry().expect("Book").unwrap());
    assign(
        &book,
        &object! { "author" => 1 },
        Some(&session),
        AssignOptions {
            schema: Some("tenant1".into()),
            ..Default::default()
        },
    )
    .unwrap();

    assert!(related(&book, "author").same_identity(&author));
}

#[test]
fn foreign_schema_gets_a_fresh_shell() {
    let session = session();
    let author = Entity::new(session.registry().expect("Author").unwrap());
    author.set("id", Value::from(1));
    session.manage(&author, Some("tenant1"));

    let book = Entity::new(session.registry().expect("Book").unwrap());
    assign(
        &book,
        &object! { "author" => 1 },
        Some(&session),
        AssignOptions {
            schema: Some("tenant2".into()),
            ..Default::default()
        },
    )
    .unwrap();

    let target = related(&book, "author");
    assert!(!target.same_identity(&author));
    assert!(!target.is_initialized());
}

// ---------------------------------------------------------------------------
// Session-level merge
// ---------------------------------------------------------------------------

#[test]
fn merge_updates_loaded_entity() {
    let session = session();
    let author = Entity::new(session.registry().expect("Author").unwrap());
    author.set("id", Value::from(1));
    author.set("name", Value::from("old"));
    session.manage(&author, None);

    let merged = session
        .merge(
            "Author",
            &object! { "id" => 1, "name" => "new" },
            &AssignOptions::default(),
        )
        .unwrap();

    assert!(merged.same_identity(&author));
    assert_eq!(author.get("name"), Some(Value::from("new")));
}

#[test]
fn merge_creates_when_unloaded() {
    let session = session();

    let merged = session
        .merge(
            "Author",
            &object! { "id" => 3, "name" => "fresh" },
            &AssignOptions::default(),
        )
        .unwrap();

    assert_eq!(merged.get("name"), Some(Value::from("fresh")));
    assert!(session
        .lookup_loaded_by_id("Author", &Value::from(3), None)
        .unwrap()
        .same_identity(&merged));
}

#[test]
fn unknown_entity_type_fails() {
    let session = session();

    let err = session
        .merge("Ghost", &object! { "id" => 1 }, &AssignOptions::default())
        .unwrap_err();

    assert!(err.is_unknown_entity_type());
    assert_eq!(err.to_string(), "unknown entity type `Ghost`");
}

// ---------------------------------------------------------------------------
// Option propagation into nested creation
// ---------------------------------------------------------------------------

#[test]
fn only_properties_applies_to_created_children() {
    let session = session();
    let book = Entity::new(session.registry().expect("Book").unwrap());

    assign(
        &book,
        &object! { "author" => object! { "id" => 4, "junk" => "dropped" } },
        Some(&session),
        AssignOptions {
            only_properties: true,
            ..Default::default()
        },
    )
    .unwrap();

    let author = related(&book, "author");
    assert_eq!(author.get("id"), Some(Value::from(4)));
    assert!(author.get("junk").is_none());
}
