//! Relationship heuristics as data.
//!
//! Each provider ships a static table of `LinkRule`s. A rule says: for every
//! resource of the source type(s) and every other resource of the target type,
//! link the pair if `key` matches, in the given direction.

use crate::state::{Resource, Resources, last_segment};
use std::collections::{BTreeMap, BTreeSet};

/// Outgoing links per resource id. Every id in the table is present, possibly
/// with an empty set.
pub type Connections = BTreeMap<String, BTreeSet<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeMatch {
    Exact(&'static str),
    AnyOf(&'static [&'static str]),
    Any,
}

impl TypeMatch {
    pub fn matches(&self, resource_type: &str) -> bool {
        match self {
            TypeMatch::Exact(t) => *t == resource_type,
            TypeMatch::AnyOf(ts) => ts.contains(&resource_type),
            TypeMatch::Any => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKey {
    /// Last path segment of the source attribute equals the target's name.
    NameRef(&'static str),
    /// Source attribute contains the target's name.
    NameContains(&'static str),
    /// Source attribute equals the target's `id` attribute.
    IdRef(&'static str),
    /// Every source/target pair.
    Always,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkDirection {
    Forward,
    Reverse,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkRule {
    pub source: TypeMatch,
    pub target: &'static str,
    pub key: LinkKey,
    pub direction: LinkDirection,
}

impl LinkRule {
    pub fn links(&self, source: &Resource, target: &Resource) -> bool {
        match self.key {
            LinkKey::NameRef(attr) => {
                !target.name.is_empty()
                    && source
                        .reference(attr)
                        .map(last_segment)
                        .is_some_and(|r| r == target.name)
            }
            LinkKey::NameContains(attr) => {
                !target.name.is_empty()
                    && source
                        .reference(attr)
                        .is_some_and(|r| r.contains(target.name.as_str()))
            }
            LinkKey::IdRef(attr) => match (source.reference(attr), target.attr_str("id")) {
                (Some(r), Some(id)) => !r.is_empty() && r == id,
                _ => false,
            },
            LinkKey::Always => true,
        }
    }
}

fn connect(connections: &mut Connections, from: &str, to: &str) {
    connections
        .entry(from.to_string())
        .or_default()
        .insert(to.to_string());
}

/// Link a resource to every other resource whose name appears inside one of
/// its top-level string attributes.
pub fn link_by_name_substring(resources: &Resources, connections: &mut Connections) {
    for resource in resources.values() {
        for (attr, value) in resource.string_attrs() {
            for other in resources.values() {
                if other.id == resource.id || other.name.is_empty() {
                    continue;
                }
                if value.contains(other.name.as_str()) {
                    tracing::trace!(from = %resource.id, to = %other.id, attr, "name reference");
                    connect(connections, &resource.id, &other.id);
                }
            }
        }
    }
}

/// Apply `rules` (and optionally the name-substring pass) to every pair of
/// resources.
pub fn infer_connections(
    resources: &Resources,
    rules: &[LinkRule],
    substring_refs: bool,
) -> Connections {
    let mut connections: Connections = resources
        .keys()
        .map(|id| (id.clone(), BTreeSet::new()))
        .collect();

    if substring_refs {
        link_by_name_substring(resources, &mut connections);
    }

    for rule in rules {
        let sources = resources
            .values()
            .filter(|r| rule.source.matches(&r.resource_type));
        for source in sources {
            let targets = resources
                .values()
                .filter(|r| r.resource_type == rule.target && r.id != source.id);
            for target in targets {
                if !rule.links(source, target) {
                    continue;
                }
                tracing::debug!(from = %source.id, to = %target.id, key = ?rule.key, "rule matched");
                match rule.direction {
                    LinkDirection::Forward => connect(&mut connections, &source.id, &target.id),
                    LinkDirection::Reverse => connect(&mut connections, &target.id, &source.id),
                    LinkDirection::Both => {
                        connect(&mut connections, &source.id, &target.id);
                        connect(&mut connections, &target.id, &source.id);
                    }
                }
            }
        }
    }

    connections
}
