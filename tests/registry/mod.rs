// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::thread;

use anyhow::Result;
use serde_json::json;
use typemeta::*;

fn color() -> Rc<EnumObject> {
    let mut backing = EnumObject::new();
    backing.insert("Red".to_string(), json!("red"));
    backing.insert("Green".to_string(), json!("green"));
    Rc::new(backing)
}

#[test]
fn declare_commit_and_resolve() -> Result<()> {
    let mut registry = Registry::new();
    let color = registry.register_enum(&color(), Some("Color"))?;

    registry.register_field("Car", "id", Some(Marker::Id.into()), true)?;
    registry.register_field("Car", "color", Some(TypeRef::from(&color)), false)?;
    registry.register_field("Car", "owner", Some(TypeRef::named("Person")), false)?;
    registry.commit_struct("Car", Kind::Entity, None)?;

    registry.register_field("Person", "name", Some(Marker::String.into()), true)?;
    registry.commit_struct("Person", Kind::Type, None)?;

    let registry = registry.finish();
    let car = registry
        .entities()
        .get("Car")
        .ok_or_else(|| anyhow::anyhow!("Car not bound"))?;

    let kinds: Vec<Kind> = car
        .members()
        .filter_map(|f| registry.deref(f).map(|r| r.kind()))
        .collect();
    assert_eq!(kinds, [Kind::Enum, Kind::Type]);

    assert_eq!(export::gql_type(car.member("id").unwrap(), &registry, true)?, "ID!");
    assert_eq!(export::js_type(car.member("color").unwrap(), &registry)?, "Color");
    Ok(())
}

#[test]
fn design_types_from_options_and_env() -> Result<()> {
    let options = RegistryOptions::from_json_str(r#"{"development": true}"#)?;
    let mut registry = Registry::with_options(options);
    assert!(registry.options().development);

    registry.declare_design_type("Point", "x", Marker::Number.into());
    registry.declare_design_type("Point", "label", Marker::String.into());
    registry.register_field("Point", "x", Some(Marker::Int.into()), true)?;
    // Mismatch only warns.
    registry.register_field("Point", "label", Some(Marker::Boolean.into()), false)?;
    let point = registry.commit_struct("Point", Kind::Input, None)?;

    assert_eq!(point.member("x").map(|f| f.kind()), Some(Kind::Int));
    assert_eq!(point.member("label").map(|f| f.kind()), Some(Kind::Boolean));
    assert!(registry.inputs().contains("Point"));
    Ok(())
}

#[test]
fn failed_calls_leave_registry_unchanged() -> Result<()> {
    let mut registry = Registry::new();
    registry.register_enum(&color(), Some("Color"))?;
    registry.commit_struct("Color", Kind::Type, None)?;

    assert!(registry.register_enum(&color(), Some("Color")).is_err());
    assert!(registry.commit_struct("Color", Kind::Entity, None).is_err());
    assert!(registry.commit_struct("Color", Kind::Type, None).is_err());

    assert_eq!(registry.enums().len(), 1);
    assert_eq!(registry.types().len(), 1);
    assert!(registry.entities().is_empty());
    Ok(())
}

#[test]
fn use_site_descriptors() -> Result<()> {
    let input = InputDescriptor::of(TypeRef::list(Marker::String))?;
    assert_eq!(input.kind(), Kind::Array);

    let result = ResultDescriptor::of(json!({"kind": "#REF", "ref": {"type": "Person"}}))?;
    assert_eq!(result.reference(), Some(&TypeHandle::Type("Person".into())));

    let err = InputDescriptor::of(json!({"item": {"kind": "Int"}})).unwrap_err();
    assert!(err.to_string().starts_with("Internal metadata error"));

    let built = ResultDescriptor::of(VarDescriptor::void())?;
    assert!(built.kind().is_void());
    Ok(())
}

#[cfg(feature = "arc")]
#[test]
fn finished_registry_is_shared_across_threads() -> Result<()> {
    let mut registry = Registry::new();
    registry.register_field("Person", "name", Some(Marker::String.into()), false)?;
    registry.commit_struct("Person", Kind::Type, None)?;
    let registry = registry.finish();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = Rc::clone(&registry);
            thread::spawn(move || registry.types().get("Person").map(|t| t.len()))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().ok().flatten(), Some(1));
    }
    Ok(())
}
