use crate::icon::Icon;
use crate::provider::rules::{LinkDirection, LinkKey, LinkRule, TypeMatch};

const INSTANCE: &str = "google_compute_instance";
const NETWORK: &str = "google_compute_network";
const SUBNETWORK: &str = "google_compute_subnetwork";
const FIREWALL: &str = "google_compute_firewall";
const ROUTER: &str = "google_compute_router";
const ROUTER_NAT: &str = "google_compute_router_nat";

const ICONS: &[(&str, Icon)] = &[
    (INSTANCE, Icon::ComputeEngine),
    (NETWORK, Icon::VirtualPrivateCloud),
    (SUBNETWORK, Icon::Subnet),
    (FIREWALL, Icon::FirewallRules),
    (ROUTER, Icon::Router),
    (ROUTER_NAT, Icon::Nat),
    ("google_storage_bucket", Icon::Storage),
    ("google_sql_database_instance", Icon::Sql),
    ("google_bigquery_dataset", Icon::Bigquery),
    ("google_iam_policy", Icon::Iam),
    ("google_compute_route", Icon::Routes),
    ("google_project", Icon::ResourceManager),
];

/// Substring fallbacks for unmapped types, first match wins.
const FALLBACKS: &[(&[&str], Icon)] = &[
    (&["compute"], Icon::Rack),
    (&["network"], Icon::Switch),
    (&["storage"], Icon::GenericStorage),
    (&["database"], Icon::GenericSql),
    (&["security", "iam"], Icon::Iam),
    (&["project", "resource_manager"], Icon::ResourceManager),
];

pub fn icon_for(resource_type: &str) -> Icon {
    if let Some((_, icon)) = ICONS.iter().find(|(t, _)| *t == resource_type) {
        return *icon;
    }
    FALLBACKS
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| resource_type.contains(n)))
        .map(|(_, icon)| *icon)
        .unwrap_or(Icon::Datacenter)
}

pub const RULES: &[LinkRule] = &[
    LinkRule {
        source: TypeMatch::Exact(INSTANCE),
        target: SUBNETWORK,
        key: LinkKey::NameRef("subnetwork"),
        direction: LinkDirection::Both,
    },
    LinkRule {
        source: TypeMatch::Exact(INSTANCE),
        target: NETWORK,
        key: LinkKey::NameRef("network"),
        direction: LinkDirection::Forward,
    },
    LinkRule {
        source: TypeMatch::Exact(SUBNETWORK),
        target: NETWORK,
        key: LinkKey::NameRef("network"),
        direction: LinkDirection::Forward,
    },
    // subnet -> instance when the instance's subnetwork mentions the subnet
    LinkRule {
        source: TypeMatch::Exact(INSTANCE),
        target: SUBNETWORK,
        key: LinkKey::NameContains("subnetwork"),
        direction: LinkDirection::Reverse,
    },
    LinkRule {
        source: TypeMatch::Exact(FIREWALL),
        target: NETWORK,
        key: LinkKey::NameRef("network"),
        direction: LinkDirection::Forward,
    },
    LinkRule {
        source: TypeMatch::Exact(FIREWALL),
        target: INSTANCE,
        key: LinkKey::Always,
        direction: LinkDirection::Forward,
    },
    LinkRule {
        source: TypeMatch::Exact(ROUTER),
        target: NETWORK,
        key: LinkKey::NameRef("network"),
        direction: LinkDirection::Forward,
    },
    LinkRule {
        source: TypeMatch::Exact(ROUTER_NAT),
        target: ROUTER,
        key: LinkKey::NameRef("router"),
        direction: LinkDirection::Forward,
    },
];
