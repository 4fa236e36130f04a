use crate::model::Diagram;
use std::collections::BTreeMap;
use std::fmt::Write;

// Base look, overridden key by key by the diagram's own attrs.
const GRAPH_DEFAULTS: &[(&str, &str)] = &[
    ("pad", "2.0"),
    ("splines", "ortho"),
    ("nodesep", "0.60"),
    ("ranksep", "0.75"),
    ("fontname", "Sans-Serif"),
    ("fontsize", "32"),
    ("fontcolor", "#2D3436"),
    ("labelloc", "t"),
];

const NODE_DEFAULTS: &[(&str, &str)] = &[
    ("style", "filled,rounded"),
    ("fontname", "Sans-Serif"),
    ("fontsize", "13"),
    ("fontcolor", "#2D3436"),
    ("margin", "0.2,0.1"),
];

const EDGE_DEFAULTS: &[(&str, &str)] = &[("color", "#7B8894")];

/// Quote a DOT identifier or string value.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn attr_list<'a>(attrs: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    attrs
        .into_iter()
        .map(|(k, v)| format!("{}={}", k, quote(v)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn merged<'a>(
    defaults: &'a [(&'a str, &'a str)],
    overrides: &'a BTreeMap<&'static str, String>,
) -> BTreeMap<&'a str, &'a str> {
    let mut out: BTreeMap<&str, &str> = defaults.iter().copied().collect();
    for (k, v) in overrides {
        out.insert(*k, v.as_str());
    }
    out
}

/// Render the diagram as Graphviz DOT source.
pub fn to_dot(diagram: &Diagram) -> String {
    let mut graph = merged(GRAPH_DEFAULTS, &diagram.attrs.graph);
    graph.insert("label", diagram.title.as_str());
    graph.insert("rankdir", diagram.direction.rankdir());
    let node = merged(NODE_DEFAULTS, &diagram.attrs.node);
    let edge = merged(EDGE_DEFAULTS, &diagram.attrs.edge);

    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "digraph {} {{", quote(&diagram.title));
    let _ = writeln!(out, "    graph [{}];", attr_list(graph));
    let _ = writeln!(out, "    node [{}];", attr_list(node));
    let _ = writeln!(out, "    edge [{}];", attr_list(edge));

    if !diagram.nodes.is_empty() {
        out.push('\n');
    }
    for n in &diagram.nodes {
        let style = n.icon.style();
        let label = format!("{}\n{}", n.label, n.icon.class_name());
        let _ = writeln!(
            out,
            "    {} [{}];",
            quote(&n.id),
            attr_list([
                ("label", label.as_str()),
                ("shape", style.shape),
                ("fillcolor", style.fillcolor),
                ("tooltip", n.resource_type.as_str()),
            ])
        );
    }

    if !diagram.edges.is_empty() {
        out.push('\n');
    }
    for e in &diagram.edges {
        if e.bidirectional {
            let _ = writeln!(out, "    {} -> {} [dir=\"both\"];", quote(&e.from), quote(&e.to));
        } else {
            let _ = writeln!(out, "    {} -> {};", quote(&e.from), quote(&e.to));
        }
    }

    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DiagramOptions, build_diagram};
    use crate::provider::Provider;
    use crate::state::parse_state_str;
    use pretty_assertions::assert_eq;

    const OCI: &str = include_str!("../../tests/fixtures/oci.tfstate.json");

    #[test]
    fn quote_escapes() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("a\"b"), "\"a\\\"b\"");
        assert_eq!(quote("c:\\d"), "\"c:\\\\d\"");
        assert_eq!(quote("x\ny"), "\"x\\ny\"");
    }

    #[test]
    fn empty_diagram() {
        let d = build_diagram(&Default::default(), Provider::Gcp, &DiagramOptions::default());
        let dot = to_dot(&d);
        assert!(dot.starts_with("digraph \"GCP Infrastructure\" {\n"));
        assert!(dot.ends_with("}\n"));
        assert!(dot.contains("bgcolor=\"transparent\""));
        // provider attrs override the base look
        assert!(dot.contains("fontsize=\"45\""));
        assert!(!dot.contains("fontsize=\"32\""));
        assert!(dot.contains("edge [color=\"#00A86B\", penwidth=\"2\"];"));
        assert!(!dot.contains("->"));
    }

    #[test]
    fn oci_nodes_and_edges() {
        let resources = parse_state_str(OCI, Provider::Oci.naming()).unwrap();
        let d = build_diagram(&resources, Provider::Oci, &DiagramOptions::default());
        let dot = to_dot(&d);

        assert!(dot.contains("rankdir=\"TB\""));
        assert!(dot.contains(
            "    \"oci_core_instance.app-vm\" [label=\"app-vm\\nVM\", shape=\"box3d\", \
             fillcolor=\"#AECBFA\", tooltip=\"oci_core_instance\"];"
        ));
        assert!(dot.contains(
            "    \"oci_core_instance.app-vm\" -> \"oci_core_subnet.app-subnet\" [dir=\"both\"];"
        ));
        let edges = dot.lines().filter(|l| l.contains("->")).count();
        assert_eq!(edges, d.edges.len());
        // every OCI link in the fixture is mutual
        assert!(d.edges.iter().all(|e| e.bidirectional));
    }
}
