// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use anyhow::Result;
use typemeta::*;

#[test]
fn scalar_markers_are_leaves() -> Result<()> {
    let markers = [
        Marker::String,
        Marker::Id,
        Marker::Boolean,
        Marker::Int,
        Marker::Number,
        Marker::Float,
        Marker::Object,
        Marker::Date,
        Marker::Any,
    ];
    for marker in markers {
        let desc = VarDescriptor::of(&marker.into(), false)
            .ok_or_else(|| anyhow::anyhow!("{marker:?} did not resolve"))?;
        assert!(desc.kind().is_scalar(), "{marker:?}");
        assert!(desc.item().is_none());
        assert!(desc.reference().is_none());
    }
    Ok(())
}

#[test]
fn to_var_round_trips_through_of() {
    for kind in Kind::ALL {
        let Some(type_ref) = kind.to_var() else {
            assert!(!kind.is_scalar() && !kind.is_void() && !kind.is_resolver());
            continue;
        };
        let resolved = VarDescriptor::of(&type_ref, false).map(|d| d.kind());
        let expected = match kind {
            Kind::DateTime | Kind::Timestamp => Kind::Date,
            kind => kind,
        };
        assert_eq!(resolved, Some(expected), "{kind}");
    }
}

#[test]
fn void_is_void_everywhere() {
    assert_eq!(Kind::Void.to_js(), Some("void"));
    assert_eq!(Kind::Void.to_idl(), Some("void"));
    assert_eq!(Kind::of(&TypeRef::void()), Kind::Ref);
    assert_eq!(
        VarDescriptor::of(&TypeRef::void(), false).map(|d| d.kind()),
        Some(Kind::Void)
    );
}

#[test]
fn kinds_serialize_as_wire_names() -> Result<()> {
    assert_eq!(serde_json::to_value(Kind::Ref)?, "#REF");
    assert_eq!(serde_json::to_value(Kind::Object)?, "JSON");
    let kind: Kind = serde_json::from_value(serde_json::json!("$Info"))?;
    assert_eq!(kind, Kind::Info);
    assert_eq!("#VOID".parse::<Kind>()?, Kind::Void);
    Ok(())
}

#[test]
fn classification_is_total() {
    assert_eq!(Kind::of(&TypeRef::Undefined), Kind::Any);
    assert_eq!(Kind::of(&Marker::Number.into()), Kind::Float);
    assert_eq!(Kind::of(&TypeRef::named("Anything")), Kind::Ref);
    assert_eq!(Kind::of(&TypeRef::list(Marker::Int)), Kind::Ref);
    assert_eq!(
        VarDescriptor::of(&TypeRef::list(Marker::Int), false).map(|d| d.kind()),
        Some(Kind::Array)
    );
}
