//! Per-NIC rules

use vmimport_types::{CheckId, Nic, NicInterface, ValidationFailure};

use crate::join_labels;

/// Interface models the target platform can emulate
const SUPPORTED_INTERFACES: &[NicInterface] =
    &[NicInterface::E1000, NicInterface::Rtl8139, NicInterface::Virtio];

/// Check each NIC in order; failures of one NIC are contiguous
pub fn validate_nics(nics: &[Nic]) -> Vec<ValidationFailure> {
    nics.iter().flat_map(validate_nic).collect()
}

fn validate_nic(nic: &Nic) -> Vec<ValidationFailure> {
    let name = nic.display_name();
    let mut failures = Vec::new();

    if let Some(interface) = &nic.interface {
        if !SUPPORTED_INTERFACES.contains(interface) {
            failures.push(ValidationFailure::new(
                CheckId::NicInterface,
                format!("NIC {} uses unsupported interface model {}", name, interface),
            ));
        }
    }

    if nic.on_boot == Some(false) {
        failures.push(ValidationFailure::new(
            CheckId::NicOnBoot,
            format!("NIC {} is not activated on boot", name),
        ));
    }

    if nic.plugged == Some(false) {
        failures.push(ValidationFailure::new(
            CheckId::NicPlugged,
            format!("NIC {} is unplugged and will be imported as plugged", name),
        ));
    }

    let Some(profile) = &nic.vnic_profile else {
        return failures;
    };

    if profile.port_mirroring == Some(true) {
        failures.push(ValidationFailure::new(
            CheckId::NicVnicPortMirroring,
            format!("NIC {} has port mirroring enabled", name),
        ));
    }

    if !profile.custom_properties.is_empty() {
        failures.push(ValidationFailure::new(
            CheckId::NicVnicCustomProperties,
            format!(
                "NIC {} has vNIC profile custom properties: {}",
                name,
                join_labels(profile.custom_properties.iter().map(|p| p.name.as_str()))
            ),
        ));
    }

    if let Some(filter) = &profile.network_filter {
        failures.push(ValidationFailure::new(
            CheckId::NicVnicNetworkFilter,
            format!("NIC {} uses network filter {}", name, filter.label()),
        ));
    }

    if let Some(qos) = &profile.qos {
        failures.push(ValidationFailure::new(
            CheckId::NicVnicQos,
            format!("NIC {} has QoS {} which will be ignored", name, qos.label()),
        ));
    }

    failures
}
