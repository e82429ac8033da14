// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The closed set of descriptor kinds.
//!
//! Every descriptor carries exactly one [`Kind`]. Kinds fall into four disjoint
//! families:
//!
//! - *scalar*: `ID`, `Int`, `Float`, `String`, `Boolean`, `Date`, `DateTime`,
//!   `Timestamp`, `JSON` and `ANY`. Leaves, directly representable in every
//!   target language.
//! - *struct*: `Metadata`, `Input`, `Type` and `Entity`. Named types with members.
//! - *complex*: `Array` and `Enum`. Carry a nested descriptor or option list.
//! - *meta*: `#REF`, a deferred pointer to a named struct or enum, and `#VOID`,
//!   the absent type.
//!
//! The four resolver-context markers (`$Obj`, `$Args`, `$Ctx`, `$Info`) only
//! appear in callable-field signatures and belong to none of the families.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MetadataError;
use crate::type_ref::{Marker, TypeRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Kind {
    #[serde(rename = "ID")]
    Id,
    Int,
    Float,
    String,
    Boolean,
    Date,
    DateTime,
    Timestamp,
    #[serde(rename = "JSON")]
    Object,
    #[serde(rename = "ANY")]
    Any,

    // Complex
    Array,
    Enum,

    // Roots
    Metadata,
    Input,
    Type,
    Entity,

    #[serde(rename = "#REF")]
    Ref,
    #[serde(rename = "#VOID")]
    Void,

    // Resolver context
    #[serde(rename = "$Obj")]
    Obj,
    #[serde(rename = "$Args")]
    Args,
    #[serde(rename = "$Ctx")]
    Ctx,
    #[serde(rename = "$Info")]
    Info,
}

impl Kind {
    /// Every kind, in declaration order.
    pub const ALL: [Kind; 22] = [
        Kind::Id,
        Kind::Int,
        Kind::Float,
        Kind::String,
        Kind::Boolean,
        Kind::Date,
        Kind::DateTime,
        Kind::Timestamp,
        Kind::Object,
        Kind::Any,
        Kind::Array,
        Kind::Enum,
        Kind::Metadata,
        Kind::Input,
        Kind::Type,
        Kind::Entity,
        Kind::Ref,
        Kind::Void,
        Kind::Obj,
        Kind::Args,
        Kind::Ctx,
        Kind::Info,
    ];

    /// The wire name of the kind, as used in exported schemas.
    pub const fn as_str(self) -> &'static str {
        match self {
            Kind::Id => "ID",
            Kind::Int => "Int",
            Kind::Float => "Float",
            Kind::String => "String",
            Kind::Boolean => "Boolean",
            Kind::Date => "Date",
            Kind::DateTime => "DateTime",
            Kind::Timestamp => "Timestamp",
            Kind::Object => "JSON",
            Kind::Any => "ANY",
            Kind::Array => "Array",
            Kind::Enum => "Enum",
            Kind::Metadata => "Metadata",
            Kind::Input => "Input",
            Kind::Type => "Type",
            Kind::Entity => "Entity",
            Kind::Ref => "#REF",
            Kind::Void => "#VOID",
            Kind::Obj => "$Obj",
            Kind::Args => "$Args",
            Kind::Ctx => "$Ctx",
            Kind::Info => "$Info",
        }
    }

    /// Name of the JS-level type the kind maps to.
    /// Returns `None` for kinds that have no primitive JS counterpart.
    pub const fn to_js(self) -> Option<&'static str> {
        match self {
            Kind::Id | Kind::String => Some("string"),
            Kind::Int | Kind::Float => Some("number"),
            Kind::Boolean => Some("boolean"),
            Kind::Date | Kind::DateTime | Kind::Timestamp => Some("Date"),
            Kind::Object | Kind::Any => Some("any"),
            Kind::Void => Some("void"),
            Kind::Obj | Kind::Args | Kind::Ctx | Kind::Info => Some("any"),
            _ => None,
        }
    }

    /// Name of the IDL primitive used for cross-language schema export.
    pub const fn to_idl(self) -> Option<&'static str> {
        match self {
            Kind::Id | Kind::String => Some("string"),
            Kind::Int => Some("i64"),
            Kind::Float => Some("double"),
            Kind::Boolean => Some("bool"),
            Kind::Date | Kind::DateTime | Kind::Timestamp => Some("Date"),
            Kind::Object | Kind::Any => Some("Json"),
            Kind::Void => Some("void"),
            Kind::Obj | Kind::Args | Kind::Ctx | Kind::Info => Some("Json"),
            _ => None,
        }
    }

    /// The canonical type reference that classifies back to this kind.
    ///
    /// `DateTime` and `Timestamp` share the `Date` marker, and `Void` maps to the
    /// empty list sentinel.
    pub fn to_var(self) -> Option<TypeRef> {
        let marker = match self {
            Kind::Id => Marker::Id,
            Kind::String => Marker::String,
            Kind::Int => Marker::Int,
            Kind::Float => Marker::Float,
            Kind::Boolean => Marker::Boolean,
            Kind::Date | Kind::DateTime | Kind::Timestamp => Marker::Date,
            Kind::Object => Marker::Object,
            Kind::Any => Marker::Any,
            Kind::Void => return Some(TypeRef::void()),
            Kind::Obj => Marker::Obj,
            Kind::Args => Marker::Args,
            Kind::Ctx => Marker::Ctx,
            Kind::Info => Marker::Info,
            _ => return None,
        };
        Some(TypeRef::Marker(marker))
    }

    pub const fn is_scalar(self) -> bool {
        matches!(
            self,
            Kind::Id
                | Kind::Int
                | Kind::Float
                | Kind::String
                | Kind::Boolean
                | Kind::Date
                | Kind::DateTime
                | Kind::Timestamp
                | Kind::Object
                | Kind::Any
        )
    }

    pub const fn is_struc(self) -> bool {
        matches!(
            self,
            Kind::Metadata | Kind::Input | Kind::Type | Kind::Entity
        )
    }

    pub const fn is_enum(self) -> bool {
        matches!(self, Kind::Enum)
    }

    pub const fn is_metadata(self) -> bool {
        matches!(self, Kind::Metadata)
    }

    pub const fn is_entity(self) -> bool {
        matches!(self, Kind::Entity)
    }

    pub const fn is_ref(self) -> bool {
        matches!(self, Kind::Ref)
    }

    pub const fn is_array(self) -> bool {
        matches!(self, Kind::Array)
    }

    pub const fn is_void(self) -> bool {
        matches!(self, Kind::Void)
    }

    pub const fn is_input(self) -> bool {
        matches!(self, Kind::Input)
    }

    pub const fn is_type(self) -> bool {
        matches!(self, Kind::Type)
    }

    pub const fn is_resolver(self) -> bool {
        matches!(self, Kind::Obj | Kind::Args | Kind::Ctx | Kind::Info)
    }

    /// Classify a raw type reference.
    ///
    /// Total and stable: anything that is not a known marker or the absent type
    /// is a reference, list wrappers included. Lists only become `Array` when a
    /// descriptor is built, which unwraps them first.
    pub fn of(type_ref: &TypeRef) -> Kind {
        match type_ref {
            TypeRef::Undefined => Kind::Any,
            TypeRef::Marker(marker) => marker.kind(),
            TypeRef::Named(_) | TypeRef::Enum(_) | TypeRef::List(_) => Kind::Ref,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| MetadataError::MalformedDescriptor(format!("unknown kind '{s}'")))
    }
}
