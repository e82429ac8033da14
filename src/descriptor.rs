// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Normalized type descriptors.
//!
//! A [`VarDescriptor`] is what every raw [`TypeRef`] collapses into. Its shape is
//! fixed by its kind:
//!
//! | kind            | item              | reference            |
//! |-----------------|-------------------|----------------------|
//! | `Array`         | element type      | -                    |
//! | `#REF`          | -                 | struct or enum name  |
//! | everything else | -                 | -                    |
//!
//! References are never followed at construction time. The referenced struct
//! may be declared after the field that uses it, so a [`TypeHandle`] stores a
//! name and is dereferenced through the [`Registry`](crate::Registry) when the
//! descriptor is consumed.
//!
//! The specialized descriptors live in submodules:
//! - [`EnumDescriptor`]: named option list backed by an enum object.
//! - [`TypeDescriptor`]: the definition of a struct with its member fields.
//! - [`FieldDescriptor`]: one member of a struct.
//! - [`InputDescriptor`] / [`ResultDescriptor`]: the declared type at a use site.

use core::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::error::MetadataError;
use crate::kind::Kind;
use crate::type_ref::TypeRef;
use crate::Rc;

mod enumeration;
mod structure;

pub use enumeration::{EnumDescriptor, EnumObject};
pub use structure::{DesignRef, FieldDescriptor, TypeDescriptor};

/// Deferred pointer to a named struct or enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeHandle {
    /// A struct (or a forward reference that may turn out to be an enum).
    Type(Rc<str>),
    /// A registered enum.
    Enum(Rc<str>),
}

impl TypeHandle {
    pub fn name(&self) -> &str {
        match self {
            TypeHandle::Type(name) | TypeHandle::Enum(name) => name,
        }
    }
}

/// Optional target-language names overriding the derived ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameHints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gql: Option<Rc<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub js: Option<Rc<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idl: Option<Rc<str>>,
}

impl NameHints {
    pub fn is_empty(&self) -> bool {
        self.gql.is_none() && self.js.is_none() && self.idl.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarDescriptor {
    kind: Kind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    item: Option<Box<VarDescriptor>>,
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    reference: Option<TypeHandle>,
    #[serde(flatten, default)]
    hints: NameHints,
}

impl VarDescriptor {
    /// Leaf descriptor. Callers guarantee `kind` is neither `Array` nor `#REF`.
    pub(crate) fn leaf(kind: Kind) -> Self {
        debug_assert!(!kind.is_array() && !kind.is_ref());
        VarDescriptor {
            kind,
            item: None,
            reference: None,
            hints: NameHints::default(),
        }
    }

    pub fn void() -> Self {
        Self::leaf(Kind::Void)
    }

    pub fn array(item: VarDescriptor) -> Self {
        VarDescriptor {
            kind: Kind::Array,
            item: Some(Box::new(item)),
            reference: None,
            hints: NameHints::default(),
        }
    }

    pub fn reference_to(handle: TypeHandle) -> Self {
        VarDescriptor {
            kind: Kind::Ref,
            item: None,
            reference: Some(handle),
            hints: NameHints::default(),
        }
    }

    pub fn with_hints(mut self, hints: NameHints) -> Self {
        self.hints = hints;
        self
    }

    /// Resolve a raw type reference into a descriptor.
    ///
    /// With `design` set only the four primitive design markers (`String`,
    /// `Number`, `Boolean`, `Date`) are accepted and anything else yields `None`.
    /// This is how an inferred field type gets rejected quietly.
    ///
    /// One level of list wrapping becomes an `Array`; the wrapper around
    /// `Undefined` is the "no payload" sentinel and yields `#VOID`.
    pub fn of(type_ref: &TypeRef, design: bool) -> Option<VarDescriptor> {
        if design && !type_ref.is_design() {
            return None;
        }
        Some(Self::resolve(type_ref))
    }

    pub(crate) fn resolve(type_ref: &TypeRef) -> VarDescriptor {
        let (inner, list) = match type_ref {
            TypeRef::List(inner) if matches!(**inner, TypeRef::Undefined) => {
                return Self::void();
            }
            TypeRef::List(inner) => (&**inner, true),
            other => (other, false),
        };

        let wrap = |meta: VarDescriptor| if list { Self::array(meta) } else { meta };

        // Enums are ref-like too; they must be matched before plain named refs so
        // that the handle points into the enum bucket.
        match inner {
            TypeRef::Enum(e) => wrap(Self::reference_to(TypeHandle::Enum(e.name_rc()))),
            TypeRef::Named(name) => wrap(Self::reference_to(TypeHandle::Type(Rc::clone(name)))),
            // Only reachable inside a list: `[[T]]`.
            TypeRef::List(_) => Self::array(Self::resolve(inner)),
            TypeRef::Undefined | TypeRef::Marker(_) => wrap(Self::leaf(Kind::of(inner))),
        }
    }

    /// Decode a descriptor object, e.g. one read back from exported metadata.
    ///
    /// The object must carry a truthy `kind`; the item/reference fields must
    /// agree with it.
    pub fn from_value(value: serde_json::Value) -> Result<Self, MetadataError> {
        let has_kind = match value.get("kind") {
            Some(serde_json::Value::String(s)) => !s.is_empty(),
            Some(serde_json::Value::Null) | Some(serde_json::Value::Bool(false)) | None => false,
            Some(_) => true,
        };
        if !has_kind {
            return Err(MetadataError::MalformedDescriptor(format!(
                "descriptor without kind: {value}"
            )));
        }
        let descriptor: VarDescriptor = serde_json::from_value(value)?;
        descriptor.check()?;
        Ok(descriptor)
    }

    fn check(&self) -> Result<(), MetadataError> {
        if self.item.is_some() != self.kind.is_array() {
            return Err(MetadataError::MalformedDescriptor(format!(
                "kind {} {} an item",
                self.kind,
                if self.kind.is_array() { "requires" } else { "does not take" }
            )));
        }
        if self.reference.is_some() != self.kind.is_ref() {
            return Err(MetadataError::MalformedDescriptor(format!(
                "kind {} {} a reference",
                self.kind,
                if self.kind.is_ref() { "requires" } else { "does not take" }
            )));
        }
        match &self.item {
            Some(item) => item.check(),
            None => Ok(()),
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn item(&self) -> Option<&VarDescriptor> {
        self.item.as_deref()
    }

    pub fn reference(&self) -> Option<&TypeHandle> {
        self.reference.as_ref()
    }

    pub fn hints(&self) -> &NameHints {
        &self.hints
    }
}

/// Anything a use-site descriptor can be built from.
#[derive(Debug, Clone)]
pub enum DescriptorSource {
    Type(TypeRef),
    Built(VarDescriptor),
    /// A plain descriptor object, typically deserialized metadata.
    Raw(serde_json::Value),
}

impl DescriptorSource {
    fn into_descriptor(self) -> Result<VarDescriptor, MetadataError> {
        match self {
            DescriptorSource::Type(type_ref) => Ok(VarDescriptor::resolve(&type_ref)),
            DescriptorSource::Built(descriptor) => Ok(descriptor),
            DescriptorSource::Raw(value) => VarDescriptor::from_value(value),
        }
    }
}

impl From<TypeRef> for DescriptorSource {
    fn from(type_ref: TypeRef) -> Self {
        DescriptorSource::Type(type_ref)
    }
}

impl From<crate::Marker> for DescriptorSource {
    fn from(marker: crate::Marker) -> Self {
        DescriptorSource::Type(TypeRef::Marker(marker))
    }
}

impl From<VarDescriptor> for DescriptorSource {
    fn from(descriptor: VarDescriptor) -> Self {
        DescriptorSource::Built(descriptor)
    }
}

impl From<serde_json::Value> for DescriptorSource {
    fn from(value: serde_json::Value) -> Self {
        DescriptorSource::Raw(value)
    }
}

/// Declared type of an input parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InputDescriptor(VarDescriptor);

impl InputDescriptor {
    pub fn of(source: impl Into<DescriptorSource>) -> Result<Self, MetadataError> {
        source.into().into_descriptor().map(InputDescriptor)
    }

    pub fn into_inner(self) -> VarDescriptor {
        self.0
    }
}

impl Deref for InputDescriptor {
    type Target = VarDescriptor;

    fn deref(&self) -> &VarDescriptor {
        &self.0
    }
}

/// Declared result type of a resolver or method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultDescriptor(VarDescriptor);

impl ResultDescriptor {
    pub fn of(source: impl Into<DescriptorSource>) -> Result<Self, MetadataError> {
        source.into().into_descriptor().map(ResultDescriptor)
    }

    pub fn into_inner(self) -> VarDescriptor {
        self.0
    }
}

/// A result without a declared type is an object type.
impl Default for ResultDescriptor {
    fn default() -> Self {
        ResultDescriptor(VarDescriptor::leaf(Kind::Type))
    }
}

impl Deref for ResultDescriptor {
    type Target = VarDescriptor;

    fn deref(&self) -> &VarDescriptor {
        &self.0
    }
}
