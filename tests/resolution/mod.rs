// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use anyhow::{anyhow, bail, Result};
use serde::Deserialize;
use test_generator::test_resources;
use typemeta::*;

/// Parse the notation used by the yaml cases into a type reference.
///
/// `[T]` is a list, `[]` the void sentinel, `undefined` the absent type,
/// `enum:Name` an enum registered under `Name`; marker names map to markers
/// and anything else is a named reference.
fn parse_type(registry: &mut Registry, s: &str) -> Result<TypeRef> {
    let s = s.trim();
    if let Some(inner) = s.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        return Ok(match inner.trim() {
            "" => TypeRef::void(),
            inner => TypeRef::list(parse_type(registry, inner)?),
        });
    }
    if let Some(name) = s.strip_prefix("enum:") {
        let mut backing = EnumObject::new();
        for (i, option) in ["A", "B"].iter().enumerate() {
            backing.insert(option.to_string(), serde_json::json!(i));
        }
        let e = registry.register_enum(&Rc::new(backing), Some(name))?;
        return Ok(TypeRef::Enum(e));
    }
    let marker = match s {
        "undefined" => return Ok(TypeRef::Undefined),
        "String" => Marker::String,
        "ID" => Marker::Id,
        "Boolean" => Marker::Boolean,
        "Int" => Marker::Int,
        "Number" => Marker::Number,
        "Float" => Marker::Float,
        "Object" => Marker::Object,
        "Date" => Marker::Date,
        "Any" => Marker::Any,
        "$Obj" => Marker::Obj,
        "$Args" => Marker::Args,
        "$Ctx" => Marker::Ctx,
        "$Info" => Marker::Info,
        "" => bail!("empty type notation"),
        name => return Ok(TypeRef::named(name)),
    };
    Ok(TypeRef::Marker(marker))
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct TestCase {
    note: String,
    #[serde(rename = "type")]
    type_ref: String,
    #[serde(default)]
    design: bool,
    #[serde(default)]
    types: Vec<String>,
    want: Option<serde_json::Value>,
    js: Option<String>,
    idl: Option<String>,
    gql: Option<String>,
    #[serde(default)]
    required: bool,
    error: Option<String>,
}

#[derive(Deserialize, Debug)]
struct YamlTest {
    cases: Vec<TestCase>,
}

fn check_export(case: &TestCase, desc: &VarDescriptor, registry: &Registry) -> Result<()> {
    let exported = [
        (&case.js, export::js_type(desc, registry)),
        (&case.idl, export::idl_type(desc, registry)),
        (&case.gql, export::gql_type(desc, registry, case.required)),
    ];
    for (want, actual) in exported {
        match (want, actual, &case.error) {
            (Some(want), Ok(actual), _) if *want == actual => (),
            (Some(want), actual, _) => bail!("expected {want}, got {actual:?}"),
            (None, Err(e), Some(error)) if e.to_string().contains(error.as_str()) => (),
            (None, Err(e), Some(error)) => bail!("expected error {error}, got {e}"),
            (None, _, _) => (),
        }
    }
    Ok(())
}

fn yaml_test_impl(file: &str) -> Result<()> {
    let yaml_str = std::fs::read_to_string(file)?;
    let test: YamlTest = serde_yaml::from_str(&yaml_str)?;

    println!("running {file}");

    for case in test.cases {
        print!("case {} ", case.note);
        let mut registry = Registry::new();
        for name in &case.types {
            registry.commit_struct(name, Kind::Type, None)?;
        }
        let type_ref = parse_type(&mut registry, &case.type_ref)?;

        let desc = VarDescriptor::of(&type_ref, case.design);
        match (&desc, &case.want) {
            (None, None) => (),
            (Some(desc), Some(want)) => {
                let actual = serde_json::to_value(desc)?;
                if actual != *want {
                    bail!(
                        "{}: mismatch\nleft  = {}\nright = {}",
                        case.note,
                        serde_json::to_string_pretty(&actual)?,
                        serde_json::to_string_pretty(want)?
                    );
                }
            }
            (desc, want) => bail!("{}: expected {want:?}, got {desc:?}", case.note),
        }

        if let Some(desc) = &desc {
            check_export(&case, desc, &registry).map_err(|e| anyhow!("{}: {e}", case.note))?;
        }
        println!("passed");
    }

    Ok(())
}

fn yaml_test(file: &str) -> Result<()> {
    match yaml_test_impl(file) {
        Ok(_) => Ok(()),
        Err(e) => {
            // If Err is returned, it doesn't always get printed by cargo test.
            // Therefore, panic with the error.
            panic!("{}", e);
        }
    }
}

#[test_resources("tests/resolution/cases/*.yaml")]
fn run(path: &str) {
    yaml_test(path).unwrap()
}
