// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::HashMap;

use crate::type_ref::TypeRef;
use crate::Rc;

/// Design-time types of declared properties, keyed by owner and property.
///
/// This is what a reflection layer would report for a field declared without
/// an explicit type.
#[derive(Debug, Clone, Default)]
pub struct DesignTable {
    types: HashMap<Rc<str>, HashMap<Rc<str>, TypeRef>>,
}

impl DesignTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the design type of `owner.property`, replacing any earlier one.
    pub fn declare(&mut self, owner: &str, property: &str, design: TypeRef) {
        self.types
            .entry(owner.into())
            .or_default()
            .insert(property.into(), design);
    }

    pub fn get(&self, owner: &str, property: &str) -> Option<&TypeRef> {
        self.types.get(owner)?.get(property)
    }

    pub fn len(&self) -> usize {
        self.types.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
