//! Icon classes a resource can be drawn as.
//!
//! Graphviz has no icon set of its own, so each class carries a static node
//! style (shape + fill) that stands in for the picture, plus the
//! `provider/category/Class` path used in reports.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Icon {
    // gcp
    ComputeEngine,
    VirtualPrivateCloud,
    FirewallRules,
    Router,
    Nat,
    Storage,
    Sql,
    Bigquery,
    Iam,
    Routes,
    ResourceManager,
    // oci
    Vm,
    Vcn,
    BlockStorage,
    ObjectStorage,
    DatabaseService,
    // generic
    Subnet,
    Rack,
    Switch,
    Firewall,
    GenericRouter,
    GenericStorage,
    GenericSql,
    Datacenter,
}

/// Static Graphviz node style for an icon class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeStyle {
    pub shape: &'static str,
    pub fillcolor: &'static str,
}

impl Icon {
    pub fn class_path(self) -> &'static str {
        match self {
            Icon::ComputeEngine => "gcp/compute/ComputeEngine",
            Icon::VirtualPrivateCloud => "gcp/network/VirtualPrivateCloud",
            Icon::FirewallRules => "gcp/network/FirewallRules",
            Icon::Router => "gcp/network/Router",
            Icon::Nat => "gcp/network/NAT",
            Icon::Storage => "gcp/storage/Storage",
            Icon::Sql => "gcp/database/SQL",
            Icon::Bigquery => "gcp/analytics/Bigquery",
            Icon::Iam => "gcp/security/Iam",
            Icon::Routes => "gcp/network/Routes",
            Icon::ResourceManager => "gcp/security/ResourceManager",
            Icon::Vm => "oci/compute/VM",
            Icon::Vcn => "oci/network/Vcn",
            Icon::BlockStorage => "oci/storage/BlockStorage",
            Icon::ObjectStorage => "oci/storage/ObjectStorage",
            Icon::DatabaseService => "oci/database/DatabaseService",
            Icon::Subnet => "generic/network/Subnet",
            Icon::Rack => "generic/compute/Rack",
            Icon::Switch => "generic/network/Switch",
            Icon::Firewall => "generic/network/Firewall",
            Icon::GenericRouter => "generic/network/Router",
            Icon::GenericStorage => "generic/storage/Storage",
            Icon::GenericSql => "generic/database/SQL",
            Icon::Datacenter => "generic/place/Datacenter",
        }
    }

    /// Short class name, the last component of `class_path`.
    pub fn class_name(self) -> &'static str {
        let path = self.class_path();
        path.rsplit('/').next().unwrap_or(path)
    }

    pub fn style(self) -> NodeStyle {
        let (shape, fillcolor) = match self {
            Icon::ComputeEngine | Icon::Vm | Icon::Rack => ("box3d", "#AECBFA"),
            Icon::VirtualPrivateCloud | Icon::Vcn => ("tab", "#CEEAD6"),
            Icon::Subnet | Icon::Switch => ("component", "#E6F4EA"),
            Icon::FirewallRules | Icon::Firewall => ("octagon", "#FAD2CF"),
            Icon::Router | Icon::GenericRouter | Icon::Routes => ("diamond", "#FEEFC3"),
            Icon::Nat => ("invtrapezium", "#FEEFC3"),
            Icon::Storage | Icon::BlockStorage | Icon::ObjectStorage | Icon::GenericStorage => {
                ("folder", "#E8EAED")
            }
            Icon::Sql | Icon::DatabaseService | Icon::GenericSql => ("cylinder", "#D2E3FC"),
            Icon::Bigquery => ("cylinder", "#C6DAFC"),
            Icon::Iam => ("hexagon", "#F8D8E8"),
            Icon::ResourceManager => ("note", "#F1F3F4"),
            Icon::Datacenter => ("house", "#FFFFFF"),
        };
        NodeStyle { shape, fillcolor }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_name_is_last_path_component() {
        assert_eq!(Icon::Nat.class_name(), "NAT");
        assert_eq!(Icon::GenericRouter.class_name(), "Router");
        assert_eq!(Icon::Datacenter.class_path(), "generic/place/Datacenter");
    }

    #[test]
    fn storage_icons_share_a_shape() {
        assert_eq!(Icon::Storage.style(), Icon::ObjectStorage.style());
        assert_ne!(Icon::Storage.style(), Icon::Sql.style());
    }
}
