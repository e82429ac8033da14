// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use anyhow::Result;
use serde_json::{json, Value};
use typemeta::*;

fn metadata() -> Result<EntityMetadata> {
    Ok(serde_json::from_value(json!({
        "database": { "name": "shop", "alias": "default" },
        "columns": [
            { "propertyName": "id", "options": { "type": "int", "primary": true } },
            { "propertyName": "title", "options": { "type": "varchar", "length": 64 } },
            { "propertyName": "price", "options": { "type": "decimal" } }
        ],
        "primaryColumns": [
            { "propertyName": "id", "options": { "type": "int", "primary": true } }
        ],
        "relations": [
            { "propertyName": "orders", "relationType": "one-to-many" },
            { "propertyName": "vendor", "relationType": "many-to-one" }
        ]
    }))?)
}

fn product(registry: &mut Registry) -> Result<()> {
    registry.declare_design_type("Product", "title", Marker::String.into());
    registry.register_field("Product", "id", Some(Marker::Id.into()), true)?;
    registry.register_field("Product", "title", None, true)?;
    registry.register_field("Product", "price", Some(Marker::Float.into()), false)?;
    registry.commit_struct("Product", Kind::Entity, None)?;
    Ok(())
}

#[test]
fn entity_schema_resolvers() -> Result<()> {
    let mut registry = Registry::new();
    product(&mut registry)?;
    let schema = EntitySchema::lookup(&registry, "Product", metadata()?)?;

    assert_eq!(schema.resolve("kind", &Value::Null), json!("Entity"));
    assert_eq!(schema.resolve("name", &Value::Null), json!("Product"));
    assert_eq!(schema.database()["name"], json!("shop"));

    let varchar = schema.resolve("columns", &json!({"options": {"type": "varchar"}}));
    assert_eq!(varchar, json!([{ "propertyName": "title", "options": { "type": "varchar", "length": 64 } }]));

    let many = schema.relations(&Filter::predicate(|r| {
        r["relationType"].as_str().is_some_and(|t| t.ends_with("-to-many"))
    }));
    assert_eq!(many.len(), 1);
    assert_eq!(many[0]["propertyName"], json!("orders"));

    let required: Vec<Value> = schema
        .members(&Filter::from(json!({"required": true})))
        .into_iter()
        .map(|m| m["name"].clone())
        .collect();
    assert_eq!(required, [json!("id"), json!("title")]);
    Ok(())
}

#[test]
fn schema_node_describes_itself() -> Result<()> {
    let mut registry = Registry::new();
    product(&mut registry)?;
    let node = EntitySchema::declare(&mut registry)?;

    assert!(registry.metadata().contains("EntityMetadataSchema"));
    let names: Vec<&str> = node.members().map(|m| m.name()).collect();
    assert_eq!(
        names,
        ["kind", "target", "name", "database", "members", "columns", "primaryColumns", "relations"]
    );

    // Companion schemas are forward references until declared.
    let database = node.member("database").unwrap();
    assert!(registry.deref(database).is_none());
    assert!(export::js_type(database, &registry).is_err());

    let schema = EntitySchema::lookup(&registry, "Product", metadata()?)?;
    let value = schema.to_value();
    let exported: Vec<&String> = value.as_object().map(|o| o.keys().collect()).unwrap_or_default();
    assert_eq!(exported.len(), names.len());
    Ok(())
}
