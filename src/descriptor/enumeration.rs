// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use indexmap::IndexMap;
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use crate::error::MetadataError;
use crate::kind::Kind;
use crate::Rc;

/// The object an enum is declared from: option names mapped to their values,
/// in declaration order.
///
/// Some enum encodings mirror every entry as `value -> name`; those numeric
/// keys are not options.
pub type EnumObject = IndexMap<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDescriptor {
    name: Rc<str>,
    options: Vec<Rc<str>>,
    backing: Rc<EnumObject>,
}

impl EnumDescriptor {
    pub fn new(backing: Rc<EnumObject>, name: Option<&str>) -> Result<Self, MetadataError> {
        let name = match name {
            Some(name) if !name.trim().is_empty() => Rc::from(name),
            _ => return Err(MetadataError::UnnamedEnum),
        };
        let options = backing
            .keys()
            .filter(|key| !is_integer_key(key))
            .map(|key| Rc::from(key.as_str()))
            .collect();
        Ok(EnumDescriptor {
            name,
            options,
            backing,
        })
    }

    pub fn kind(&self) -> Kind {
        Kind::Enum
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn name_rc(&self) -> Rc<str> {
        Rc::clone(&self.name)
    }

    pub fn options(&self) -> &[Rc<str>] {
        &self.options
    }

    /// The object this enum was declared from.
    pub fn backing(&self) -> &Rc<EnumObject> {
        &self.backing
    }

    pub fn value(&self, option: &str) -> Option<&serde_json::Value> {
        self.backing.get(option)
    }
}

/// Same rule as a numeric conversion of the key followed by an integer test:
/// blank keys count as `0` and `0x`/`0o`/`0b` literals are integers.
/// `inf`/`nan` spellings parse but fail the finiteness check.
fn is_integer_key(key: &str) -> bool {
    let key = key.trim();
    if key.is_empty() {
        return true;
    }
    let radix = match key.get(..2) {
        Some("0x" | "0X") => 16,
        Some("0o" | "0O") => 8,
        Some("0b" | "0B") => 2,
        _ => {
            return key
                .parse::<f64>()
                .map(|n| n.is_finite() && n.fract() == 0.0)
                .unwrap_or(false)
        }
    };
    let digits = &key[2..];
    !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix))
}

impl Serialize for EnumDescriptor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("EnumDescriptor", 3)?;
        s.serialize_field("kind", &Kind::Enum)?;
        s.serialize_field("name", &self.name)?;
        s.serialize_field("options", &self.options)?;
        s.end()
    }
}
