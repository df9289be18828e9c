use std::fmt;

use serde::{Deserialize, Serialize};

use crate::KeyValue;

/// Ordered set of label lines produced for one publication.
///
/// Unlike a map, insertion order is the output order: the published file
/// lists labels exactly as they were pushed.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelSet(Vec<KeyValue>);

impl LabelSet {
    /// Create an empty label set.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no labels are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append a label.
    ///
    /// Returns `self` for chaining.
    pub fn push<K, V>(&mut self, key: K, val: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.0.push(KeyValue::new(key, val));
        self
    }

    /// Get the value of the first label with the given key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|kv| kv.key() == key).map(|kv| kv.value())
    }

    /// Iterate through all labels in order.
    pub fn iter(&self) -> impl Iterator<Item = &KeyValue> {
        self.0.iter()
    }

    /// Rendered `key=value` lines, without terminators.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.0.iter().map(KeyValue::to_string)
    }
}

/// Writes every label followed by `\n`.
impl fmt::Display for LabelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for kv in &self.0 {
            writeln!(f, "{kv}")?;
        }
        Ok(())
    }
}
