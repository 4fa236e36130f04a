use crate::state::resource::{Resource, Resources};
use anyhow::Context;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;

/// Top-level shape of a state snapshot. Only the fields we read are modelled.
#[derive(Debug, Clone, Deserialize)]
pub struct StateFile {
    #[serde(default)]
    pub version: Option<u64>,

    #[serde(default)]
    pub terraform_version: Option<String>,

    pub resources: Vec<RawResource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawResource {
    #[serde(rename = "type")]
    pub resource_type: String,

    pub name: String,

    /// `managed` or `data`.
    #[serde(default)]
    pub mode: Option<String>,

    #[serde(default)]
    pub module: Option<String>,

    #[serde(default)]
    pub instances: Vec<RawInstance>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawInstance {
    #[serde(default)]
    pub attributes: Map<String, Value>,

    #[serde(default)]
    pub index_key: Option<Value>,
}

impl RawResource {
    pub fn is_data_source(&self) -> bool {
        self.mode.as_deref() == Some("data")
    }
}

impl StateFile {
    /// One type per instance, the unit that ends up in the resource table.
    pub fn instance_types(&self) -> impl Iterator<Item = &str> {
        self.resources
            .iter()
            .flat_map(|b| b.instances.iter().map(move |_| b.resource_type.as_str()))
    }
}

/// How an instance's display name is picked from its attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameStrategy {
    /// `attributes.name`, else the block name.
    Name,
    /// `attributes.display_name`, then `attributes.name`, else the block name.
    DisplayName,
}

impl NameStrategy {
    fn candidates(self) -> &'static [&'static str] {
        match self {
            NameStrategy::Name => &["name"],
            NameStrategy::DisplayName => &["display_name", "name"],
        }
    }

    pub fn resolve<'a>(self, attributes: &'a Map<String, Value>, block_name: &'a str) -> &'a str {
        self.candidates()
            .iter()
            .filter_map(|k| attributes.get(*k).and_then(Value::as_str))
            .find(|s| !s.is_empty())
            .unwrap_or(block_name)
    }
}

/// Read and parse a state file. Names are resolved later by `build_resources`,
/// once the provider is known.
pub fn parse_state_file(path: &str) -> anyhow::Result<StateFile> {
    let text = fs::read_to_string(path).with_context(|| format!("read state file {}", path))?;
    parse_state_json(&text).with_context(|| format!("parse state file {}", path))
}

pub fn parse_state_json(text: &str) -> anyhow::Result<StateFile> {
    let state: StateFile = serde_json::from_str(text)?;
    tracing::debug!(
        version = ?state.version,
        terraform_version = ?state.terraform_version,
        blocks = state.resources.len(),
        data_sources = state.resources.iter().filter(|b| b.is_data_source()).count(),
        "loaded state"
    );
    Ok(state)
}

/// Parse state JSON straight into the flat resource table.
pub fn parse_state_str(text: &str, naming: NameStrategy) -> anyhow::Result<Resources> {
    Ok(build_resources(parse_state_json(text)?, naming))
}

/// Flatten resource blocks into one entry per instance.
///
/// Ids that collide keep the last instance seen.
pub fn build_resources(state: StateFile, naming: NameStrategy) -> Resources {
    let mut out = Resources::new();
    for block in state.resources {
        for instance in block.instances {
            let name = naming.resolve(&instance.attributes, &block.name).to_string();
            let resource = Resource::new(&block.resource_type, &name, instance.attributes);
            if out.contains_key(&resource.id) {
                tracing::warn!(
                    id = %resource.id,
                    module = block.module.as_deref().unwrap_or("root"),
                    index_key = ?instance.index_key,
                    "duplicate resource id, keeping the later instance"
                );
            }
            out.insert(resource.id.clone(), resource);
        }
    }
    out
}
