use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One resource instance from the state snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    /// `<type>.<display name>`, unique within a `Resources` table.
    pub id: String,
    pub resource_type: String,
    pub name: String,
    pub attributes: Map<String, Value>,
}

/// Index by synthesized id. Ordered so every later stage is deterministic.
pub type Resources = BTreeMap<String, Resource>;

impl Resource {
    pub fn new(resource_type: &str, name: &str, attributes: Map<String, Value>) -> Self {
        Self {
            id: format!("{}.{}", resource_type, name),
            resource_type: resource_type.to_string(),
            name: name.to_string(),
            attributes,
        }
    }

    /// Top-level string attribute.
    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    /// Top-level string attribute, or the first string found under `key` one
    /// level down in a nested block list (e.g. `network_interface[0].subnetwork`).
    pub fn reference(&self, key: &str) -> Option<&str> {
        if let Some(v) = self.attr_str(key) {
            return Some(v);
        }
        self.attributes
            .values()
            .filter_map(Value::as_array)
            .flatten()
            .filter_map(Value::as_object)
            .find_map(|block| block.get(key).and_then(Value::as_str))
    }

    /// Iterate over every top-level string attribute.
    pub fn string_attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k.as_str(), s)))
    }
}

/// Short name from a self-link: `.../global/networks/default` => `default`.
pub fn last_segment(s: &str) -> &str {
    s.rsplit('/').next().unwrap_or(s)
}
