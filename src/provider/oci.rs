use crate::icon::Icon;
use crate::provider::rules::{LinkDirection, LinkKey, LinkRule, TypeMatch};

const INSTANCE: &str = "oci_core_instance";
const VCN: &str = "oci_core_vcn";
const SUBNET: &str = "oci_core_subnet";
const NSG: &str = "oci_core_network_security_group";
const NSG_RULE: &str = "oci_core_network_security_group_security_rule";
const COMPARTMENT: &str = "oci_identity_compartment";

const ICONS: &[(&str, Icon)] = &[
    (INSTANCE, Icon::Vm),
    (VCN, Icon::Vcn),
    (SUBNET, Icon::Switch),
    ("oci_core_security_list", Icon::Firewall),
    ("oci_core_route_table", Icon::GenericRouter),
    ("oci_core_nat_gateway", Icon::GenericRouter),
    ("oci_core_internet_gateway", Icon::GenericRouter),
    ("oci_core_service_gateway", Icon::GenericRouter),
    ("oci_core_volume", Icon::BlockStorage),
    ("oci_objectstorage_bucket", Icon::ObjectStorage),
    ("oci_database_db_system", Icon::DatabaseService),
    (NSG, Icon::Firewall),
    (NSG_RULE, Icon::Firewall),
];

pub fn icon_for(resource_type: &str) -> Icon {
    ICONS
        .iter()
        .find(|(t, _)| *t == resource_type)
        .map(|(_, icon)| *icon)
        .unwrap_or(Icon::Datacenter)
}

/// Resources that hang off a VCN through `vcn_id`, besides subnets.
const VCN_ATTACHED: &[&str] = &[
    "oci_core_security_list",
    "oci_core_route_table",
    "oci_core_nat_gateway",
    "oci_core_internet_gateway",
    "oci_core_service_gateway",
    NSG,
];

pub const RULES: &[LinkRule] = &[
    LinkRule {
        source: TypeMatch::Exact(INSTANCE),
        target: SUBNET,
        key: LinkKey::IdRef("subnet_id"),
        direction: LinkDirection::Both,
    },
    LinkRule {
        source: TypeMatch::Exact(INSTANCE),
        target: NSG,
        key: LinkKey::Always,
        direction: LinkDirection::Both,
    },
    LinkRule {
        source: TypeMatch::Exact(SUBNET),
        target: VCN,
        key: LinkKey::IdRef("vcn_id"),
        direction: LinkDirection::Both,
    },
    LinkRule {
        source: TypeMatch::AnyOf(VCN_ATTACHED),
        target: VCN,
        key: LinkKey::IdRef("vcn_id"),
        direction: LinkDirection::Both,
    },
    LinkRule {
        source: TypeMatch::Exact(NSG_RULE),
        target: NSG,
        key: LinkKey::IdRef("network_security_group_id"),
        direction: LinkDirection::Both,
    },
    LinkRule {
        source: TypeMatch::Any,
        target: COMPARTMENT,
        key: LinkKey::IdRef("compartment_id"),
        direction: LinkDirection::Both,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapped_types_and_fallback() {
        assert_eq!(icon_for("oci_core_instance"), Icon::Vm);
        assert_eq!(icon_for("oci_core_subnet"), Icon::Switch);
        assert_eq!(icon_for("oci_core_service_gateway"), Icon::GenericRouter);
        assert_eq!(icon_for("oci_core_network_security_group_security_rule"), Icon::Firewall);
        // no substring fallbacks on this side
        assert_eq!(icon_for("oci_core_volume_attachment"), Icon::Datacenter);
        assert_eq!(icon_for("oci_identity_compartment"), Icon::Datacenter);
    }
}
