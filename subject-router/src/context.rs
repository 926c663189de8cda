/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Per-invocation key/value context threaded through one handler chain.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reserved context key holding the most recent non-object continuation data.
pub const LAST_VALUE_KEY: &str = "last_value";

/// Mutable state owned by exactly one `handle` call.
///
/// Created fresh per dispatch (or seeded by the caller), mutated in place as
/// handlers run, and returned when the chain completes. Never shared across
/// invocations.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct InvocationContext {
    entries: Map<String, Value>,
}

impl InvocationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// The most recent non-object continuation data, if any handler passed
    /// one.
    pub fn last_value(&self) -> Option<&Value> {
        self.get(LAST_VALUE_KEY)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.entries
    }

    /// Applies continuation data: objects shallow-merge key-by-key, `Null`
    /// leaves the context untouched, anything else lands under
    /// [`LAST_VALUE_KEY`].
    pub fn merge(&mut self, data: Value) {
        match data {
            Value::Null => {}
            Value::Object(object) => {
                for (key, value) in object {
                    self.entries.insert(key, value);
                }
            }
            other => {
                self.entries.insert(LAST_VALUE_KEY.to_string(), other);
            }
        }
    }
}

impl From<Map<String, Value>> for InvocationContext {
    fn from(entries: Map<String, Value>) -> Self {
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::{InvocationContext, LAST_VALUE_KEY};
    use serde_json::json;

    #[test]
    fn object_data_shallow_merges_key_by_key() {
        let mut context = InvocationContext::new();
        context.insert("kept", "yes");
        context.insert("replaced", "old");

        context.merge(json!({"replaced": "new", "added": 1}));

        assert_eq!(context.get("kept").and_then(|v| v.as_str()), Some("yes"));
        assert_eq!(context.get("replaced").and_then(|v| v.as_str()), Some("new"));
        assert_eq!(context.get("added").and_then(|v| v.as_i64()), Some(1));
        assert_eq!(context.len(), 3);
    }

    #[test]
    fn non_object_data_lands_under_the_reserved_key() {
        let mut context = InvocationContext::new();

        context.merge(json!("x"));
        assert_eq!(context.last_value().and_then(|v| v.as_str()), Some("x"));

        context.merge(json!(42));
        assert_eq!(context.last_value().and_then(|v| v.as_i64()), Some(42));

        context.merge(json!([1, 2]));
        assert_eq!(context.last_value(), Some(&json!([1, 2])));
        assert_eq!(context.len(), 1);
    }

    #[test]
    fn null_data_leaves_the_context_unchanged() {
        let mut context = InvocationContext::new();
        context.insert(LAST_VALUE_KEY, "kept");

        context.merge(json!(null));

        assert_eq!(context.last_value().and_then(|v| v.as_str()), Some("kept"));
        assert_eq!(context.len(), 1);
    }
}
