//! Per-provider lookup tables: naming, icons, relationship rules and the
//! static diagram attributes that differ between clouds.

pub mod gcp;
pub mod oci;
pub mod rules;

use crate::icon::Icon;
use crate::state::{NameStrategy, Resources, StateFile};
use anyhow::bail;
use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

pub use rules::{Connections, LinkRule, infer_connections};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Google Cloud Platform (`google_*` resources).
    Gcp,
    /// Oracle Cloud Infrastructure (`oci_*` resources).
    Oci,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Provider::Gcp => "gcp",
            Provider::Oci => "oci",
        })
    }
}

impl Provider {
    fn type_prefix(self) -> &'static str {
        match self {
            Provider::Gcp => "google_",
            Provider::Oci => "oci_",
        }
    }

    /// Pick the provider from instance type prefixes (`google_` / `oci_`).
    ///
    /// A state with neither prefix (empty, or only `random_id`-style
    /// resources) falls back to GCP and still renders. Only a tie between
    /// non-zero counts is an error.
    pub fn detect(state: &StateFile) -> anyhow::Result<Provider> {
        let count = |p: Provider| {
            state
                .instance_types()
                .filter(|t| t.starts_with(p.type_prefix()))
                .count()
        };
        let (gcp, oci) = (count(Provider::Gcp), count(Provider::Oci));
        tracing::debug!(gcp, oci, "provider detection");
        match gcp.cmp(&oci) {
            std::cmp::Ordering::Greater => Ok(Provider::Gcp),
            std::cmp::Ordering::Less => Ok(Provider::Oci),
            std::cmp::Ordering::Equal if gcp == 0 => {
                tracing::warn!("no google_* or oci_* resources found, defaulting to gcp");
                Ok(Provider::Gcp)
            }
            std::cmp::Ordering::Equal => {
                bail!(
                    "state mixes {} google_* and {} oci_* resources; pass --provider explicitly",
                    gcp,
                    oci
                )
            }
        }
    }

    pub fn naming(self) -> NameStrategy {
        match self {
            Provider::Gcp => NameStrategy::Name,
            Provider::Oci => NameStrategy::DisplayName,
        }
    }

    pub fn icon_for(self, resource_type: &str) -> Icon {
        match self {
            Provider::Gcp => gcp::icon_for(resource_type),
            Provider::Oci => oci::icon_for(resource_type),
        }
    }

    pub fn link_rules(self) -> &'static [LinkRule] {
        match self {
            Provider::Gcp => gcp::RULES,
            Provider::Oci => oci::RULES,
        }
    }

    /// Whether any string attribute mentioning another resource's name links them.
    pub fn links_by_name_substring(self) -> bool {
        matches!(self, Provider::Gcp)
    }

    pub fn infer_connections(self, resources: &Resources) -> Connections {
        infer_connections(resources, self.link_rules(), self.links_by_name_substring())
    }

    pub fn title(self) -> &'static str {
        match self {
            Provider::Gcp => "GCP Infrastructure",
            Provider::Oci => "OCI Infrastructure",
        }
    }

    pub fn default_output(self) -> &'static str {
        match self {
            Provider::Gcp => "infrastructure_diagram",
            Provider::Oci => "oci_infrastructure_diagram",
        }
    }

    pub fn background(self) -> &'static str {
        match self {
            Provider::Gcp => "transparent",
            Provider::Oci => "white",
        }
    }
}
