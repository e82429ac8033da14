// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use core::fmt;

use serde_json::Value;

/// Selects records returned by the entity schema resolvers.
#[derive(Default)]
pub enum Filter {
    /// Every record.
    #[default]
    All,
    /// Records containing the given properties. Objects match partially and
    /// recursively, arrays match when each wanted element is found.
    Matches(Value),
    Predicate(Box<dyn Fn(&Value) -> bool>),
}

impl Filter {
    pub fn predicate(f: impl Fn(&Value) -> bool + 'static) -> Self {
        Filter::Predicate(Box::new(f))
    }

    pub fn accepts(&self, record: &Value) -> bool {
        match self {
            Filter::All => true,
            // Resolver arguments that are not an object do not constrain. A
            // string is not read as a property-name shorthand.
            Filter::Matches(wanted @ Value::Object(_)) => is_match(record, wanted),
            Filter::Matches(_) => true,
            Filter::Predicate(f) => f(record),
        }
    }

    /// Matching records, cloned, in their original order.
    pub fn select<'a>(&self, records: impl IntoIterator<Item = &'a Value>) -> Vec<Value> {
        records
            .into_iter()
            .filter(|r| self.accepts(r))
            .cloned()
            .collect()
    }
}

/// Resolver arguments as received from a query: `null` selects everything.
impl From<Value> for Filter {
    fn from(args: Value) -> Self {
        match args {
            Value::Null => Filter::All,
            args => Filter::Matches(args),
        }
    }
}

impl From<&Value> for Filter {
    fn from(args: &Value) -> Self {
        Filter::from(args.clone())
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str("All"),
            Filter::Matches(v) => f.debug_tuple("Matches").field(v).finish(),
            Filter::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

fn is_match(record: &Value, wanted: &Value) -> bool {
    match (record, wanted) {
        (Value::Object(record), Value::Object(wanted)) => wanted
            .iter()
            .all(|(k, w)| record.get(k).is_some_and(|r| is_match(r, w))),
        (Value::Array(record), Value::Array(wanted)) => wanted
            .iter()
            .all(|w| record.iter().any(|r| is_match(r, w))),
        (Value::Number(r), Value::Number(w)) => r.as_f64() == w.as_f64(),
        (record, wanted) => record == wanted,
    }
}
