// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::kind::Kind;
use crate::Rc;

type String = Rc<str>;

/// Errors raised while declaring and binding type metadata.
///
/// All of them are fatal to the declaration being processed. A failed call
/// leaves the registry and the descriptors it holds unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetadataError {
    /// An enum was registered for the first time without a name.
    #[error("Unnamed enum")]
    UnnamedEnum,

    /// The same field was added twice to one struct.
    #[error("Duplicate field decoration on [{field}] of [{owner}]")]
    DuplicateField { owner: String, field: String },

    /// A field has no explicit type and its design type cannot be used instead.
    #[error("Design type of [{owner}.{property}]: [{}] not in [String, Number, Boolean, Date]", .design.as_deref().unwrap_or("undefined"))]
    UnsupportedDesignType {
        owner: String,
        property: String,
        design: Option<String>,
    },

    /// A name is already taken in the bucket, or by a conflicting enum/entity.
    #[error("Duplicate {bucket} name: {name}")]
    DuplicateName { name: String, bucket: Kind },

    /// A field was added to a struct that has already been committed.
    #[error("Can not add field [{field}] to [{owner}]: already committed")]
    AlreadyCommitted { owner: String, field: String },

    /// An enum was registered again under another name.
    #[error("Can not rename enum from: {from} to: {to}")]
    RenameEnum { from: String, to: String },

    /// A descriptor object without a usable kind.
    #[error("Internal metadata error: {0}")]
    MalformedDescriptor(std::string::String),

    /// Commit with a kind outside the struct family.
    #[error("Not a struct type: {0}")]
    NotStruct(Kind),

    /// Empty or whitespace-only registry key.
    #[error("{bucket} registration failed: The name '{name}' is invalid (empty or whitespace-only names are not allowed).")]
    InvalidName { name: String, bucket: Kind },

    /// A deferred reference that names nothing in the registry.
    #[error("Unresolved type reference: {0}")]
    Unresolved(String),
}

impl From<serde_json::Error> for MetadataError {
    fn from(error: serde_json::Error) -> Self {
        MetadataError::MalformedDescriptor(format!("{error}"))
    }
}
