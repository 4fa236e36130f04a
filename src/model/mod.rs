//! Diagram model: resources + inferred connections, ready for a renderer.

use crate::icon::Icon;
use crate::provider::{Connections, Provider};
use crate::state::Resources;
use clap::ValueEnum;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Layout direction, as Graphviz `rankdir`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ValueEnum)]
pub enum Direction {
    #[default]
    #[value(name = "TB")]
    TopBottom,
    #[value(name = "BT")]
    BottomTop,
    #[value(name = "LR")]
    LeftRight,
    #[value(name = "RL")]
    RightLeft,
}

impl Direction {
    pub fn rankdir(self) -> &'static str {
        match self {
            Direction::TopBottom => "TB",
            Direction::BottomTop => "BT",
            Direction::LeftRight => "LR",
            Direction::RightLeft => "RL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramNode {
    pub id: String,
    pub label: String,
    pub resource_type: String,
    pub icon: Icon,
    pub icon_class: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagramEdge {
    pub from: String,
    pub to: String,
    /// Both `from -> to` and `to -> from` were inferred.
    pub bidirectional: bool,
}

/// Static graph/node/edge attribute dictionaries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramAttrs {
    pub graph: BTreeMap<&'static str, String>,
    pub node: BTreeMap<&'static str, String>,
    pub edge: BTreeMap<&'static str, String>,
}

impl DiagramAttrs {
    pub fn for_provider(provider: Provider) -> Self {
        Self {
            graph: BTreeMap::from([
                ("fontsize", "45".to_string()),
                ("bgcolor", provider.background().to_string()),
            ]),
            node: BTreeMap::from([("fontsize", "14".to_string())]),
            edge: BTreeMap::from([
                ("color", "#00A86B".to_string()),
                ("penwidth", "2".to_string()),
            ]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagram {
    pub title: String,
    pub provider: Provider,
    pub direction: Direction,
    pub attrs: DiagramAttrs,
    pub nodes: Vec<DiagramNode>,
    pub edges: Vec<DiagramEdge>,
}

#[derive(Debug, Clone, Default)]
pub struct DiagramOptions {
    pub title: Option<String>,
    pub direction: Direction,
}

/// Build the diagram: one node per resource, edges from the provider's rules.
pub fn build_diagram(
    resources: &Resources,
    provider: Provider,
    options: &DiagramOptions,
) -> Diagram {
    let nodes: Vec<DiagramNode> = resources
        .values()
        .map(|r| {
            let icon = provider.icon_for(&r.resource_type);
            DiagramNode {
                id: r.id.clone(),
                label: r.name.clone(),
                resource_type: r.resource_type.clone(),
                icon,
                icon_class: icon.class_path(),
            }
        })
        .collect();

    let connections = provider.infer_connections(resources);
    let edges = collapse_edges(&connections);
    tracing::info!(
        provider = %provider,
        nodes = nodes.len(),
        edges = edges.len(),
        "built diagram"
    );

    Diagram {
        title: options
            .title
            .clone()
            .unwrap_or_else(|| provider.title().to_string()),
        provider,
        direction: options.direction,
        attrs: DiagramAttrs::for_provider(provider),
        nodes,
        edges,
    }
}

/// Turn the connection table into drawable edges.
///
/// Self links and links to ids outside the table are dropped; a mutual pair
/// becomes one bidirectional edge keyed on the smaller id.
pub fn collapse_edges(connections: &Connections) -> Vec<DiagramEdge> {
    let mut seen: BTreeSet<(&str, &str)> = BTreeSet::new();
    let mut edges = Vec::new();

    for (from, targets) in connections {
        for to in targets {
            if from == to || !connections.contains_key(to) {
                continue;
            }
            let reverse = connections.get(to).is_some_and(|t| t.contains(from));
            let key = if reverse && to < from {
                (to.as_str(), from.as_str())
            } else {
                (from.as_str(), to.as_str())
            };
            if !seen.insert(key) {
                continue;
            }
            edges.push(DiagramEdge {
                from: key.0.to_string(),
                to: key.1.to_string(),
                bidirectional: reverse,
            });
        }
    }

    edges.sort_by(|a, b| (&a.from, &a.to).cmp(&(&b.from, &b.to)));
    edges
}
