// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Type-name emission for generated bindings.
//!
//! Walks a [`VarDescriptor`] and spells it in one of three target notations:
//!
//! | descriptor   | JS        | IDL          | GraphQL     |
//! |--------------|-----------|--------------|-------------|
//! | scalar       | `to_js`   | `to_idl`     | wire name   |
//! | `Array` of T | `T[]`     | `list<T>`    | `[T]`       |
//! | `#REF`       | ref name  | ref name     | ref name    |
//! | `#VOID`      | `void`    | `void`       | `void`      |
//!
//! A name hint for the target replaces the derived name of the descriptor it
//! is attached to. References are resolved through the registry and must point
//! at something registered.

use crate::descriptor::VarDescriptor;
use crate::error::MetadataError;
use crate::kind::Kind;
use crate::registry::Registry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Js,
    Idl,
    Gql,
}

pub fn js_type(desc: &VarDescriptor, registry: &Registry) -> Result<String, MetadataError> {
    emit(desc, registry, Target::Js)
}

pub fn idl_type(desc: &VarDescriptor, registry: &Registry) -> Result<String, MetadataError> {
    emit(desc, registry, Target::Idl)
}

/// GraphQL type expression. `required` adds the non-null marker to the
/// outermost type only.
pub fn gql_type(
    desc: &VarDescriptor,
    registry: &Registry,
    required: bool,
) -> Result<String, MetadataError> {
    let mut name = emit(desc, registry, Target::Gql)?;
    if required && !desc.kind().is_void() {
        name.push('!');
    }
    Ok(name)
}

fn emit(desc: &VarDescriptor, registry: &Registry, target: Target) -> Result<String, MetadataError> {
    let hints = desc.hints();
    let hint = match target {
        Target::Js => &hints.js,
        Target::Idl => &hints.idl,
        Target::Gql => &hints.gql,
    };
    if let Some(hint) = hint {
        return Ok(hint.to_string());
    }

    let kind = desc.kind();
    if kind.is_array() {
        let item = desc.item().ok_or_else(|| {
            MetadataError::MalformedDescriptor("array descriptor without item".to_string())
        })?;
        let item = emit(item, registry, target)?;
        return Ok(match target {
            Target::Js => format!("{item}[]"),
            Target::Idl => format!("list<{item}>"),
            Target::Gql => format!("[{item}]"),
        });
    }

    if kind.is_ref() {
        let handle = desc.reference().ok_or_else(|| {
            MetadataError::MalformedDescriptor("reference descriptor without target".to_string())
        })?;
        return registry
            .resolve(handle)
            .map(|resolved| resolved.name().to_string())
            .ok_or_else(|| MetadataError::Unresolved(handle.name().into()));
    }

    let name = match target {
        Target::Js => kind.to_js(),
        Target::Idl => kind.to_idl(),
        Target::Gql if kind.is_scalar() => Some(kind.as_str()),
        Target::Gql if kind.is_void() => Some("void"),
        Target::Gql => None,
    };
    name.map(str::to_string).ok_or_else(|| unsupported(kind, target))
}

fn unsupported(kind: Kind, target: Target) -> MetadataError {
    MetadataError::MalformedDescriptor(format!("kind {kind} has no {target:?} type name"))
}
