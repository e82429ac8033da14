// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use core::ops::Deref;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

use super::VarDescriptor;
use crate::error::MetadataError;
use crate::kind::Kind;
use crate::options::RegistryOptions;
use crate::type_ref::{Marker, TypeRef};
use crate::Rc;

/// The design-time type a field was declared with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignRef {
    #[serde(rename = "type")]
    pub type_name: Rc<str>,
    #[serde(skip)]
    pub target: TypeRef,
}

/// One member of a struct.
///
/// Dereferences to the resolved [`VarDescriptor`] the field was built with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    name: Rc<str>,
    required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    design: Option<DesignRef>,
    #[serde(flatten)]
    build: VarDescriptor,
}

impl FieldDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn design(&self) -> Option<&DesignRef> {
        self.design.as_ref()
    }

    pub fn build(&self) -> &VarDescriptor {
        &self.build
    }
}

impl Deref for FieldDescriptor {
    type Target = VarDescriptor;

    fn deref(&self) -> &VarDescriptor {
        &self.build
    }
}

/// Definition of a struct: its name, owning type and member fields.
///
/// Members accumulate while fields are declared. The kind stays unset until
/// [`commit`](Self::commit).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<Kind>,
    name: Rc<str>,
    target: Rc<str>,
    members: IndexMap<Rc<str>, FieldDescriptor>,
}

impl TypeDescriptor {
    pub fn new(target: impl Into<Rc<str>>) -> Self {
        let target = target.into();
        TypeDescriptor {
            kind: None,
            name: Rc::clone(&target),
            target,
            members: IndexMap::new(),
        }
    }

    pub fn kind(&self) -> Option<Kind> {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Intrinsic name of the owning structural type.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn members(&self) -> impl Iterator<Item = &FieldDescriptor> + '_ {
        self.members.values()
    }

    pub fn member(&self, name: &str) -> Option<&FieldDescriptor> {
        self.members.get(name)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Add a member field.
    ///
    /// The explicit `type_ref` wins; without one the field type is inferred from
    /// `design`, which must then be `String`, `Number`, `Boolean` or `Date`.
    pub fn add_field(
        &mut self,
        property: &str,
        type_ref: Option<&TypeRef>,
        required: bool,
        design: Option<&TypeRef>,
        options: &RegistryOptions,
    ) -> Result<&mut Self, MetadataError> {
        if self.members.contains_key(property) {
            return Err(MetadataError::DuplicateField {
                owner: Rc::clone(&self.target),
                field: property.into(),
            });
        }

        let build = match type_ref {
            Some(type_ref) => VarDescriptor::of(type_ref, false),
            None => design.and_then(|d| VarDescriptor::of(d, true)),
        };
        let Some(build) = build else {
            return Err(MetadataError::UnsupportedDesignType {
                owner: Rc::clone(&self.target),
                property: property.into(),
                design: design.and_then(TypeRef::type_name).map(Rc::from),
            });
        };

        if options.development && type_ref.is_some() {
            if let Some(TypeRef::Marker(marker)) = design.filter(|d| d.is_design()) {
                if let Some(mismatch) = self.check_design(property, &build, *marker) {
                    warn!("{}", mismatch);
                }
            }
        }

        let design = design.and_then(|d| {
            d.type_name().map(|type_name| DesignRef {
                type_name: type_name.into(),
                target: d.clone(),
            })
        });

        debug!(owner = %self.target, field = property, kind = %build.kind(), "field declared");
        self.members.insert(
            property.into(),
            FieldDescriptor {
                name: property.into(),
                required,
                design,
                build,
            },
        );
        Ok(self)
    }

    // Int over Number and ID over String are deliberate refinements.
    fn check_design(&self, property: &str, build: &VarDescriptor, design: Marker) -> Option<String> {
        let kind = build.kind();
        if kind == design.kind()
            || (kind == Kind::Int && design == Marker::Number)
            || (kind == Kind::Id && design == Marker::String)
        {
            return None;
        }
        Some(format!(
            "Field [{}.{}]: kind [{}] <> design [{}]",
            self.target,
            property,
            kind,
            design.name()
        ))
    }

    /// Finalize the definition as a struct of the given kind.
    ///
    /// `name` defaults to the owning type's intrinsic name.
    pub fn commit(&mut self, kind: Kind, name: Option<&str>) -> Result<&mut Self, MetadataError> {
        if !kind.is_struc() {
            return Err(MetadataError::NotStruct(kind));
        }
        self.kind = Some(kind);
        self.name = match name {
            Some(name) => name.into(),
            None => Rc::clone(&self.target),
        };
        Ok(self)
    }
}
