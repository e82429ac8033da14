// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Name-keyed storage of committed structs and enums.
//!
//! The registry has two phases. While declarations are processed it is owned
//! mutably and every registration goes through `&mut Registry`. Once
//! [`Registry::finish`] is called it becomes an immutable shared value that any
//! number of readers may use concurrently. Registration after that point is not
//! possible through the shared handle; a deployment that needs late
//! registration has to wrap the registry in its own lock.

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::descriptor::{EnumDescriptor, EnumObject, TypeDescriptor, TypeHandle, VarDescriptor};
use crate::design::DesignTable;
use crate::error::MetadataError;
use crate::kind::Kind;
use crate::options::RegistryOptions;
use crate::type_ref::TypeRef;
use crate::Rc;


/// Validates that a name is not empty or whitespace-only.
fn validate_name(name: &str, bucket: Kind) -> Result<(), MetadataError> {
    if name.trim().is_empty() {
        Err(MetadataError::InvalidName {
            name: name.into(),
            bucket,
        })
    } else {
        Ok(())
    }
}

/// Insertion-ordered map from unique names to shared items.
#[derive(Debug, Clone)]
pub struct Bucket<T> {
    inner: IndexMap<Rc<str>, Rc<T>>,
    kind: Kind,
}

impl<T> Bucket<T> {
    /// Create a new, empty bucket holding items of the given kind.
    pub fn new(kind: Kind) -> Self {
        Self {
            inner: IndexMap::new(),
            kind,
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Check that `name` could be registered.
    pub fn check(&self, name: &str) -> Result<(), MetadataError> {
        validate_name(name, self.kind)?;
        if self.inner.contains_key(name) {
            return Err(MetadataError::DuplicateName {
                name: name.into(),
                bucket: self.kind,
            });
        }
        Ok(())
    }

    /// Register an item with a given name. Returns Err if name already exists.
    pub fn register(&mut self, name: impl Into<Rc<str>>, item: Rc<T>) -> Result<(), MetadataError> {
        let name = name.into();
        self.check(&name)?;
        self.inner.insert(name, item);
        Ok(())
    }

    /// Retrieve an item by name, if it exists.
    pub fn get(&self, name: &str) -> Option<&Rc<T>> {
        self.inner.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    /// All registered names, in registration order.
    pub fn list_names(&self) -> Vec<Rc<str>> {
        self.inner.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate over (name, item) pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rc<T>)> + '_ {
        self.inner.iter().map(|(name, item)| (&**name, item))
    }

    pub fn items(&self) -> impl Iterator<Item = &Rc<T>> + '_ {
        self.inner.values()
    }
}

/// Target of a dereferenced [`TypeHandle`].
#[derive(Debug, Clone, Copy)]
pub enum Resolved<'a> {
    Struct(&'a Rc<TypeDescriptor>),
    Enum(&'a Rc<EnumDescriptor>),
}

impl<'a> Resolved<'a> {
    pub fn name(&self) -> &'a str {
        match *self {
            Resolved::Struct(t) => t.name(),
            Resolved::Enum(e) => e.name(),
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            // Committed structs always carry a kind.
            Resolved::Struct(t) => t.kind().unwrap_or(Kind::Type),
            Resolved::Enum(_) => Kind::Enum,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Registry {
    metadata: Bucket<TypeDescriptor>,
    inputs: Bucket<TypeDescriptor>,
    types: Bucket<TypeDescriptor>,
    entities: Bucket<TypeDescriptor>,
    enums: Bucket<EnumDescriptor>,
    pending: IndexMap<Rc<str>, TypeDescriptor>,
    committed: IndexMap<Rc<str>, Rc<TypeDescriptor>>,
    design: DesignTable,
    options: RegistryOptions,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::with_options(RegistryOptions::default())
    }

    pub fn with_options(options: RegistryOptions) -> Self {
        Registry {
            metadata: Bucket::new(Kind::Metadata),
            inputs: Bucket::new(Kind::Input),
            types: Bucket::new(Kind::Type),
            entities: Bucket::new(Kind::Entity),
            enums: Bucket::new(Kind::Enum),
            pending: IndexMap::new(),
            committed: IndexMap::new(),
            design: DesignTable::new(),
            options,
        }
    }

    pub fn options(&self) -> &RegistryOptions {
        &self.options
    }

    /// Record the design-time type of `owner.property`.
    ///
    /// Consulted by [`register_field`](Self::register_field) when no explicit
    /// type is given, and for the development-mode consistency check.
    pub fn declare_design_type(&mut self, owner: &str, property: &str, design: TypeRef) {
        self.design.declare(owner, property, design);
    }

    pub fn design_types(&self) -> &DesignTable {
        &self.design
    }

    /// The definition of `owner`: still pending, or as first committed.
    pub fn definition(&self, owner: &str) -> Option<&TypeDescriptor> {
        self.pending
            .get(owner)
            .or_else(|| self.committed.get(owner).map(|t| &**t))
    }

    pub fn is_committed(&self, owner: &str) -> bool {
        self.committed.contains_key(owner)
    }

    pub fn is_pending(&self, owner: &str) -> bool {
        self.pending.contains_key(owner)
    }

    /// Uncommitted definitions, in declaration order.
    pub fn pending(&self) -> impl Iterator<Item = &TypeDescriptor> + '_ {
        self.pending.values()
    }

    /// Declare a field of `owner`.
    ///
    /// Members are frozen once `owner` is committed.
    pub fn register_field(
        &mut self,
        owner: &str,
        property: &str,
        type_ref: Option<TypeRef>,
        required: bool,
    ) -> Result<(), MetadataError> {
        if self.committed.contains_key(owner) {
            return Err(MetadataError::AlreadyCommitted {
                owner: owner.into(),
                field: property.into(),
            });
        }
        let design = self.design.get(owner, property);
        self.pending
            .entry(owner.into())
            .or_insert_with(|| TypeDescriptor::new(owner))
            .add_field(property, type_ref.as_ref(), required, design, &self.options)?;
        Ok(())
    }

    /// Commit the definition of `owner` as a struct of `kind` and bind it.
    ///
    /// A struct without declared fields is committed with an empty member map.
    /// Committing an owner again binds another struct with the same members,
    /// e.g. the input counterpart of an object type. On error the definition
    /// stays pending and untouched.
    pub fn commit_struct(
        &mut self,
        owner: &str,
        kind: Kind,
        name: Option<&str>,
    ) -> Result<Rc<TypeDescriptor>, MetadataError> {
        if !kind.is_struc() {
            return Err(MetadataError::NotStruct(kind));
        }
        let name: Rc<str> = name.filter(|n| !n.is_empty()).unwrap_or(owner).into();
        if kind.is_entity() && self.enums.contains(&name) {
            return Err(MetadataError::DuplicateName {
                name,
                bucket: Kind::Enum,
            });
        }
        self.struct_bucket(kind).check(&name)?;

        let mut definition = match self.pending.shift_remove(owner) {
            Some(definition) => definition,
            None => match self.committed.get(owner) {
                Some(committed) => TypeDescriptor::clone(committed),
                None => TypeDescriptor::new(owner),
            },
        };
        definition.commit(kind, Some(&name))?;
        let definition = Rc::new(definition);
        self.struct_bucket_mut(kind)
            .register(Rc::clone(&name), Rc::clone(&definition))?;
        self.committed
            .entry(owner.into())
            .or_insert_with(|| Rc::clone(&definition));

        debug!(%name, %kind, members = definition.len(), "struct committed");
        Ok(definition)
    }

    /// Register the enum declared by `backing`.
    ///
    /// The backing object identifies the enum: registering it again returns the
    /// same descriptor, unless a different name is requested.
    pub fn register_enum(
        &mut self,
        backing: &Rc<EnumObject>,
        name: Option<&str>,
    ) -> Result<Rc<EnumDescriptor>, MetadataError> {
        if let Some(existing) = self
            .enums
            .items()
            .find(|e| Rc::ptr_eq(e.backing(), backing))
        {
            return match name {
                Some(name) if !name.is_empty() && name != existing.name() => {
                    Err(MetadataError::RenameEnum {
                        from: existing.name_rc(),
                        to: name.into(),
                    })
                }
                _ => Ok(Rc::clone(existing)),
            };
        }

        let descriptor = EnumDescriptor::new(Rc::clone(backing), name)?;
        if self.entities.contains(descriptor.name()) {
            return Err(MetadataError::DuplicateName {
                name: descriptor.name_rc(),
                bucket: Kind::Entity,
            });
        }
        let descriptor = Rc::new(descriptor);
        self.enums
            .register(descriptor.name_rc(), Rc::clone(&descriptor))?;

        debug!(name = descriptor.name(), options = descriptor.options().len(), "enum registered");
        Ok(descriptor)
    }

    fn struct_bucket(&self, kind: Kind) -> &Bucket<TypeDescriptor> {
        match kind {
            Kind::Metadata => &self.metadata,
            Kind::Input => &self.inputs,
            Kind::Entity => &self.entities,
            _ => &self.types,
        }
    }

    fn struct_bucket_mut(&mut self, kind: Kind) -> &mut Bucket<TypeDescriptor> {
        match kind {
            Kind::Metadata => &mut self.metadata,
            Kind::Input => &mut self.inputs,
            Kind::Entity => &mut self.entities,
            _ => &mut self.types,
        }
    }

    /// The struct bucket for `kind`, `None` for kinds outside the struct family.
    pub fn bucket(&self, kind: Kind) -> Option<&Bucket<TypeDescriptor>> {
        kind.is_struc().then(|| self.struct_bucket(kind))
    }

    pub fn metadata(&self) -> &Bucket<TypeDescriptor> {
        &self.metadata
    }

    pub fn inputs(&self) -> &Bucket<TypeDescriptor> {
        &self.inputs
    }

    pub fn types(&self) -> &Bucket<TypeDescriptor> {
        &self.types
    }

    pub fn entities(&self) -> &Bucket<TypeDescriptor> {
        &self.entities
    }

    pub fn enums(&self) -> &Bucket<EnumDescriptor> {
        &self.enums
    }

    /// Follow a deferred reference.
    ///
    /// Struct handles are looked up in the Type, Input, Entity and Metadata
    /// buckets in that order, then among enums, since a forward reference may
    /// name an enum as well.
    pub fn resolve(&self, handle: &TypeHandle) -> Option<Resolved<'_>> {
        match handle {
            TypeHandle::Enum(name) => self.enums.get(name).map(Resolved::Enum),
            TypeHandle::Type(name) => [&self.types, &self.inputs, &self.entities, &self.metadata]
                .into_iter()
                .find_map(|bucket| bucket.get(name))
                .map(Resolved::Struct)
                .or_else(|| self.enums.get(name).map(Resolved::Enum)),
        }
    }

    /// Dereference a `#REF` descriptor. `None` for other kinds and for
    /// references to names that were never registered.
    pub fn deref(&self, descriptor: &VarDescriptor) -> Option<Resolved<'_>> {
        descriptor.reference().and_then(|handle| self.resolve(handle))
    }

    /// End the build phase.
    ///
    /// Definitions that were never committed are dropped.
    pub fn finish(mut self) -> Rc<Registry> {
        for definition in self.pending.values() {
            warn!(
                "Type [{}] has {} declared field(s) but was never committed; dropped",
                definition.target(),
                definition.len()
            );
        }
        self.pending.clear();
        Rc::new(self)
    }
}
