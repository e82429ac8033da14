// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Exportable description of a persisted entity.
//!
//! An [`EntitySchema`] joins the committed entity struct with the storage
//! records an ORM reports for it (database, columns, primary columns and
//! relations). The records are carried as opaque JSON. The schema node can be
//! queried field by field, the way a GraphQL layer would, and it describes
//! itself as a `Metadata` struct through [`EntitySchema::declare`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::descriptor::TypeDescriptor;
use crate::error::MetadataError;
use crate::kind::Kind;
use crate::registry::Registry;
use crate::type_ref::{Marker, TypeRef};
use crate::Rc;

mod filter;

pub use filter::Filter;

/// Name the schema node is registered under.
pub const SCHEMA_NAME: &str = "EntityMetadataSchema";

/// Storage-side records of an entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityMetadata {
    #[serde(default)]
    pub database: Value,
    #[serde(default)]
    pub columns: Vec<Value>,
    #[serde(default)]
    pub primary_columns: Vec<Value>,
    #[serde(default)]
    pub relations: Vec<Value>,
}

#[derive(Debug, Clone)]
pub struct EntitySchema {
    entity: Rc<TypeDescriptor>,
    members: Vec<Value>,
    metadata: EntityMetadata,
}

impl EntitySchema {
    pub fn new(entity: Rc<TypeDescriptor>, metadata: EntityMetadata) -> Result<Self, MetadataError> {
        let members = entity
            .members()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(EntitySchema {
            entity,
            members,
            metadata,
        })
    }

    /// Schema of the entity registered as `name`.
    pub fn lookup(
        registry: &Registry,
        name: &str,
        metadata: EntityMetadata,
    ) -> Result<Self, MetadataError> {
        let entity = registry
            .entities()
            .get(name)
            .ok_or_else(|| MetadataError::Unresolved(name.into()))?;
        Self::new(Rc::clone(entity), metadata)
    }

    pub fn kind(&self) -> Kind {
        self.entity.kind().unwrap_or(Kind::Entity)
    }

    /// Human-readable label of the owning type.
    pub fn target(&self) -> &str {
        self.entity.target()
    }

    pub fn name(&self) -> &str {
        self.entity.name()
    }

    pub fn database(&self) -> &Value {
        &self.metadata.database
    }

    pub fn entity(&self) -> &Rc<TypeDescriptor> {
        &self.entity
    }

    pub fn members(&self, filter: &Filter) -> Vec<Value> {
        filter.select(&self.members)
    }

    pub fn columns(&self, filter: &Filter) -> Vec<Value> {
        filter.select(&self.metadata.columns)
    }

    pub fn primary_columns(&self, filter: &Filter) -> Vec<Value> {
        filter.select(&self.metadata.primary_columns)
    }

    pub fn relations(&self, filter: &Filter) -> Vec<Value> {
        filter.select(&self.metadata.relations)
    }

    /// Resolve one exported field. `args` filters the sequence fields and is
    /// ignored by the others. Unknown fields resolve to `null`.
    pub fn resolve(&self, field: &str, args: &Value) -> Value {
        let filter = Filter::from(args);
        match field {
            "kind" => Value::String(self.kind().to_string()),
            "target" => Value::String(self.target().to_string()),
            "name" => Value::String(self.name().to_string()),
            "database" => self.metadata.database.clone(),
            "members" => Value::Array(self.members(&filter)),
            "columns" => Value::Array(self.columns(&filter)),
            "primaryColumns" => Value::Array(self.primary_columns(&filter)),
            "relations" => Value::Array(self.relations(&filter)),
            _ => {
                debug!(entity = self.name(), field, "unknown schema field");
                Value::Null
            }
        }
    }

    /// The whole node with every sequence unfiltered.
    pub fn to_value(&self) -> Value {
        let map: Map<String, Value> = FIELDS
            .iter()
            .map(|field| (field.to_string(), self.resolve(field, &Value::Null)))
            .collect();
        Value::Object(map)
    }

    /// Register the schema node as a `Metadata` struct.
    ///
    /// Returns the existing struct when it was declared before.
    pub fn declare(registry: &mut Registry) -> Result<Rc<TypeDescriptor>, MetadataError> {
        if let Some(existing) = registry.metadata().get(SCHEMA_NAME) {
            return Ok(Rc::clone(existing));
        }

        let list_of = |name: &str| Some(TypeRef::list(TypeRef::named(name)));
        registry.declare_design_type(SCHEMA_NAME, "name", Marker::String.into());

        let fields: [(&str, Option<TypeRef>); 8] = [
            ("kind", Some(Marker::String.into())),
            ("target", Some(Marker::String.into())),
            ("name", None),
            ("database", Some(TypeRef::named("DatabaseMetadataSchema"))),
            ("members", list_of("FieldMetadataSchema")),
            ("columns", list_of("ColumnMetadataSchema")),
            ("primaryColumns", list_of("ColumnMetadataSchema")),
            ("relations", list_of("RelationMetadataSchema")),
        ];
        for (property, type_ref) in fields {
            registry.register_field(SCHEMA_NAME, property, type_ref, false)?;
        }
        registry.commit_struct(SCHEMA_NAME, Kind::Metadata, None)
    }
}

const FIELDS: [&str; 8] = [
    "kind",
    "target",
    "name",
    "database",
    "members",
    "columns",
    "primaryColumns",
    "relations",
];
