//! Minimizes JSON-LD node objects into plain JSON.
//!
//! `@type` entries are dropped, value wrappers (`{"@value": ..}`) and reference wrappers
//! (`{"@id": ..}`) inside arrays are replaced by their bare scalar, nested objects are
//! minimized recursively, and keys starting with the configured prefix lose that prefix.
//! Wrappers around arrays or objects are left alone, so flattening twice changes nothing.

use crate::consts::{ID, TYPE_KEY, VALUE};
use crate::document::Document;
use regex::Regex;
use serde_json::Value;

#[derive(Debug, Clone, Default)]
pub struct Flattener {
    prefix: Option<Regex>,
}

impl Flattener {
    pub fn new(prefix: Option<Regex>) -> Self {
        Self { prefix }
    }

    /// Returns the minimized form of `document`.
    ///
    /// When stripping the prefix yields a key that is already present, the entry that was
    /// moved under the stripped key wins; among several stripped keys the last one in key
    /// order wins.
    pub fn flatten(&self, document: Document) -> Document {
        let mut flat = Document::new();
        for (key, value) in document {
            if key == TYPE_KEY {
                continue;
            }
            let value = match value {
                Value::Array(values) => Value::Array(values.into_iter().map(unwrap).collect()),
                Value::Object(nested) => Value::Object(self.flatten(nested)),
                scalar => scalar,
            };
            match self.strip_prefix(&key) {
                // a stripped key never reintroduces the type marker
                Some(stripped) if stripped == TYPE_KEY => {}
                Some(stripped) => {
                    flat.insert(stripped, value);
                }
                None => {
                    flat.entry(key).or_insert(value);
                }
            }
        }
        flat
    }

    fn strip_prefix(&self, key: &str) -> Option<String> {
        let prefix = self.prefix.as_ref()?;
        let matched = prefix.find(key)?;
        Some(key[matched.end()..].to_string())
    }
}

// only direct wrappers around a scalar are collapsed; other array elements are kept as they are
fn unwrap(value: Value) -> Value {
    match value {
        Value::Object(mut wrapper) => {
            let key = if wrapper.contains_key(VALUE) { VALUE } else { ID };
            match wrapper.remove(key) {
                Some(inner) if !inner.is_object() && !inner.is_array() => inner,
                Some(inner) => {
                    wrapper.insert(key.to_string(), inner);
                    Value::Object(wrapper)
                }
                None => Value::Object(wrapper),
            }
        }
        other => other,
    }
}
