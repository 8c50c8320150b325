//! Network interface descriptors

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::vm::CustomProperty;

source_enum! {
    /// Emulated NIC model
    NicInterface {
        E1000 => "e1000",
        PciPassthrough => "pci_passthrough",
        Rtl8139 => "rtl8139",
        Rtl8139Virtio => "rtl8139_virtio",
        SpaprVlan => "spapr_vlan",
        Virtio => "virtio",
    }
}

/// Reference to a named source-side object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NamedRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl NamedRef {
    /// Name for messages, falling back to the ID
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or("<unnamed>")
    }
}

/// Network interface of the source VM
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Nic {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Emulated model
    #[serde(default)]
    pub interface: Option<NicInterface>,
    #[serde(default)]
    pub on_boot: Option<bool>,
    #[serde(default)]
    pub plugged: Option<bool>,
    #[serde(default)]
    pub mac: Option<String>,
    /// Profile connecting the NIC to a source network; `None` means the NIC is
    /// not connected to any network
    #[serde(default)]
    pub vnic_profile: Option<VnicProfile>,
}

impl Nic {
    /// Name for messages, falling back to the ID
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// vNIC profile: the network a NIC is attached to plus per-profile features
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VnicProfile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub network: Option<NamedRef>,
    #[serde(default)]
    pub port_mirroring: Option<bool>,
    #[serde(default)]
    pub custom_properties: Vec<CustomProperty>,
    #[serde(default)]
    pub network_filter: Option<NamedRef>,
    #[serde(default)]
    pub qos: Option<NamedRef>,
}

impl VnicProfile {
    /// Name used to match network mappings by name: `<network>/<profile>`
    pub fn mapping_name(&self) -> Option<String> {
        let network = self.network.as_ref()?.name.as_deref()?;
        let profile = self.name.as_deref()?;
        Some(format!("{}/{}", network, profile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_name_requires_network_and_profile_names() {
        let mut profile = VnicProfile {
            id: Some("p-1".to_string()),
            name: Some("ovirtmgmt".to_string()),
            network: Some(NamedRef {
                id: Some("n-1".to_string()),
                name: Some("ovirtmgmt".to_string()),
            }),
            ..Default::default()
        };
        assert_eq!(profile.mapping_name().as_deref(), Some("ovirtmgmt/ovirtmgmt"));

        profile.network = None;
        assert_eq!(profile.mapping_name(), None);
    }

    #[test]
    fn test_named_ref_label_prefers_name() {
        let named = NamedRef {
            id: Some("id-1".to_string()),
            name: Some("filter".to_string()),
        };
        assert_eq!(named.label(), "filter");
        assert_eq!(NamedRef::default().label(), "<unnamed>");
    }
}
