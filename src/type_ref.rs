// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use core::fmt;

use crate::descriptor::EnumDescriptor;
use crate::kind::Kind;
use crate::Rc;

/// Runtime marker types with a fixed kind.
///
/// `String`, `Number`, `Boolean` and `Date` are also the only design types a
/// field type can be inferred from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    String,
    Id,
    Boolean,
    Int,
    Number,
    Float,
    Object,
    Date,
    Any,
    Obj,
    Args,
    Ctx,
    Info,
}

impl Marker {
    pub const DESIGN_TYPES: [Marker; 4] =
        [Marker::String, Marker::Number, Marker::Boolean, Marker::Date];

    pub const fn kind(self) -> Kind {
        match self {
            Marker::String => Kind::String,
            Marker::Id => Kind::Id,
            Marker::Boolean => Kind::Boolean,
            Marker::Int => Kind::Int,
            Marker::Number | Marker::Float => Kind::Float,
            Marker::Object => Kind::Object,
            Marker::Date => Kind::Date,
            Marker::Any => Kind::Any,
            Marker::Obj => Kind::Obj,
            Marker::Args => Kind::Args,
            Marker::Ctx => Kind::Ctx,
            Marker::Info => Kind::Info,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Marker::String => "String",
            Marker::Id => "ID",
            Marker::Boolean => "Boolean",
            Marker::Int => "Int",
            Marker::Number => "Number",
            Marker::Float => "Float",
            Marker::Object => "Object",
            Marker::Date => "Date",
            Marker::Any => "Any",
            Marker::Obj => "Obj",
            Marker::Args => "Args",
            Marker::Ctx => "Ctx",
            Marker::Info => "Info",
        }
    }

    pub const fn is_design(self) -> bool {
        matches!(
            self,
            Marker::String | Marker::Number | Marker::Boolean | Marker::Date
        )
    }
}

/// A raw type reference as handed in by the declaration producer.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    /// No type at all (`null` / `undefined`).
    Undefined,
    Marker(Marker),
    /// A structural type, possibly declared later. Resolved by name on use.
    Named(Rc<str>),
    /// An already registered enum.
    Enum(Rc<EnumDescriptor>),
    /// One-element list wrapper. `List(Undefined)` means "no payload".
    List(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(name: impl Into<Rc<str>>) -> Self {
        TypeRef::Named(name.into())
    }

    pub fn list(item: impl Into<TypeRef>) -> Self {
        TypeRef::List(Box::new(item.into()))
    }

    /// The empty list sentinel.
    pub fn void() -> Self {
        TypeRef::List(Box::new(TypeRef::Undefined))
    }

    pub fn is_design(&self) -> bool {
        matches!(self, TypeRef::Marker(m) if m.is_design())
    }

    /// Human readable name, used in diagnostics.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            TypeRef::Undefined => None,
            TypeRef::Marker(m) => Some(m.name()),
            TypeRef::Named(name) => Some(&**name),
            TypeRef::Enum(e) => Some(e.name()),
            TypeRef::List(_) => Some("Array"),
        }
    }
}

impl From<Marker> for TypeRef {
    fn from(marker: Marker) -> Self {
        TypeRef::Marker(marker)
    }
}

impl From<Rc<EnumDescriptor>> for TypeRef {
    fn from(descriptor: Rc<EnumDescriptor>) -> Self {
        TypeRef::Enum(descriptor)
    }
}

impl From<&Rc<EnumDescriptor>> for TypeRef {
    fn from(descriptor: &Rc<EnumDescriptor>) -> Self {
        TypeRef::Enum(Rc::clone(descriptor))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::List(item) => write!(f, "[{item}]"),
            TypeRef::Undefined => f.write_str("undefined"),
            other => f.write_str(other.type_name().unwrap_or_default()),
        }
    }
}
