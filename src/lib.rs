// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

// Use README.md as crate documentation.
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

mod descriptor;
mod design;
mod entity;
mod error;
pub mod export;
mod kind;
mod options;
mod registry;
mod type_ref;

pub use descriptor::{
    DescriptorSource, DesignRef, EnumDescriptor, EnumObject, FieldDescriptor, InputDescriptor,
    NameHints, ResultDescriptor, TypeDescriptor, TypeHandle, VarDescriptor,
};
pub use design::DesignTable;
pub use entity::{EntityMetadata, EntitySchema, Filter, SCHEMA_NAME};
pub use error::MetadataError;
pub use kind::Kind;
pub use options::RegistryOptions;
pub use registry::{Bucket, Registry, Resolved};
pub use type_ref::{Marker, TypeRef};

/// Shared pointer used for descriptors held by the registry.
///
/// With the `arc` feature (default) this is `Arc`, which makes a finished
/// [`Registry`] shareable between threads.
#[cfg(feature = "arc")]
pub use std::sync::Arc as Rc;

#[cfg(not(feature = "arc"))]
pub use std::rc::Rc;
