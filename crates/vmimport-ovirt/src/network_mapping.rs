//! Network mapping completeness
//!
//! Every NIC attached to a vNIC profile needs a mapping. The profile is looked
//! up by ID first, then by its `<network>/<profile>` name.

use std::collections::HashSet;

use tracing::debug;
use vmimport_types::mapping::{duplicate_sources, find_mapping_index};
use vmimport_types::{
    CheckId, NetworkTargetType, Nic, RequestRef, ResourceMappingItem, TargetCatalog,
    ValidationFailure,
};

use crate::join_labels;

pub fn validate_network_mappings(
    nics: &[Nic],
    mappings: &[ResourceMappingItem],
    request: &RequestRef,
    targets: &dyn TargetCatalog,
) -> Vec<ValidationFailure> {
    let mut failures = validate_config(mappings);

    let mut checked = HashSet::new();
    let mut unmapped: Vec<String> = Vec::new();
    let mut pod_nics: Vec<&str> = Vec::new();

    for nic in nics {
        let Some(profile) = &nic.vnic_profile else {
            continue;
        };
        let mapping_name = profile.mapping_name();

        let found = find_mapping_index(mappings, profile.id.as_deref(), mapping_name.as_deref());
        let Some(index) = found else {
            let label = mapping_name
                .or_else(|| profile.id.clone())
                .unwrap_or_else(|| nic.display_name().to_string());
            if !unmapped.contains(&label) {
                unmapped.push(label);
            }
            continue;
        };

        let mapping = &mappings[index];
        debug!(
            request = %request,
            nic = nic.display_name(),
            target = %mapping.target.name,
            "Resolved network mapping"
        );

        match mapping.network_type() {
            NetworkTargetType::Pod => pod_nics.push(nic.display_name()),
            NetworkTargetType::Multus => {
                if checked.insert(index) {
                    let namespace = mapping
                        .target
                        .namespace
                        .as_deref()
                        .unwrap_or(&request.namespace);
                    if !targets.network_exists(namespace, &mapping.target.name) {
                        failures.push(ValidationFailure::new(
                            CheckId::NetworkTarget,
                            format!(
                                "Target network {}/{} does not exist",
                                namespace, mapping.target.name
                            ),
                        ));
                    }
                }
            }
            NetworkTargetType::Other(kind) => {
                if checked.insert(index) {
                    failures.push(ValidationFailure::new(
                        CheckId::NetworkType,
                        format!(
                            "Network mapping for {} uses unsupported target type {}",
                            mapping.source.label(),
                            kind
                        ),
                    ));
                }
            }
        }
    }

    if !unmapped.is_empty() {
        failures.push(ValidationFailure::new(
            CheckId::NetworkMapping,
            format!(
                "Required source networks are not mapped: {}",
                join_labels(unmapped.iter().map(String::as_str))
            ),
        ));
    }

    if pod_nics.len() > 1 {
        failures.push(ValidationFailure::new(
            CheckId::NetworkMultiplePodTargets,
            format!(
                "Multiple NICs are mapped to the pod network: {}",
                join_labels(pod_nics.iter().copied())
            ),
        ));
    }

    failures
}

fn validate_config(mappings: &[ResourceMappingItem]) -> Vec<ValidationFailure> {
    let mut failures = Vec::new();

    for (position, mapping) in mappings.iter().enumerate() {
        if mapping.source.is_empty() {
            failures.push(ValidationFailure::new(
                CheckId::NetworkConfig,
                format!("Network mapping #{} has neither a source ID nor a name", position + 1),
            ));
        }
    }

    for source in duplicate_sources(mappings) {
        failures.push(ValidationFailure::new(
            CheckId::NetworkConfig,
            format!("Network mapping source {} is listed more than once", source),
        ));
    }

    failures
}
