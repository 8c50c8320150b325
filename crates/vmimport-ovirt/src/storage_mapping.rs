//! Storage mapping resolution
//!
//! The effective storage class of a disk comes from the first of:
//! a disk mapping (disk ID, then alias), a storage mapping (storage domain
//! ID, then name), or the target platform's default storage class.

use serde::Serialize;
use vmimport_types::mapping::{duplicate_sources, find_mapping};
use vmimport_types::{
    CheckId, DiskAttachment, ResourceMappingItem, TargetCatalog, ValidationFailure,
};

/// Where a disk's storage class came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageTargetOrigin {
    DiskMapping,
    StorageMapping,
    /// No mapping; the default storage class applies
    Default,
}

/// Effective storage target of one disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedStorageTarget {
    pub attachment_id: String,
    pub disk_id: String,
    pub disk_name: String,
    /// `None` when the default storage class applies
    pub storage_class: Option<String>,
    pub origin: StorageTargetOrigin,
}

/// Resolve the storage class of every attached disk, in attachment order.
///
/// Attachments without a backing disk are skipped.
pub fn resolve_storage_targets(
    attachments: &[DiskAttachment],
    storage_mappings: &[ResourceMappingItem],
    disk_mappings: &[ResourceMappingItem],
) -> Vec<ResolvedStorageTarget> {
    attachments
        .iter()
        .filter_map(|attachment| {
            let disk = attachment.disk.as_ref()?;

            let disk_mapping =
                find_mapping(disk_mappings, Some(disk.id.as_str()), disk.alias.as_deref());
            let domain_mapping = disk.storage_domain.as_ref().and_then(|domain| {
                find_mapping(storage_mappings, domain.id.as_deref(), domain.name.as_deref())
            });

            let (storage_class, origin) = match (disk_mapping, domain_mapping) {
                (Some(item), _) => (
                    Some(item.target.name.clone()),
                    StorageTargetOrigin::DiskMapping,
                ),
                (None, Some(item)) => (
                    Some(item.target.name.clone()),
                    StorageTargetOrigin::StorageMapping,
                ),
                (None, None) => (None, StorageTargetOrigin::Default),
            };

            Some(ResolvedStorageTarget {
                attachment_id: attachment.id.clone(),
                disk_id: disk.id.clone(),
                disk_name: disk.display_name().to_string(),
                storage_class,
                origin,
            })
        })
        .collect()
}

pub fn validate_storage_mappings(
    attachments: &[DiskAttachment],
    storage_mappings: &[ResourceMappingItem],
    disk_mappings: &[ResourceMappingItem],
    targets: &dyn TargetCatalog,
) -> Vec<ValidationFailure> {
    let mut failures = Vec::new();
    validate_config("Storage", storage_mappings, &mut failures);
    validate_config("Disk", disk_mappings, &mut failures);

    for resolved in resolve_storage_targets(attachments, storage_mappings, disk_mappings) {
        match (&resolved.storage_class, resolved.origin) {
            (Some(class), StorageTargetOrigin::DiskMapping) => {
                if !targets.storage_class_exists(class) {
                    failures.push(ValidationFailure::new(
                        CheckId::DiskTarget,
                        format!(
                            "Disk {} is mapped to storage class {} which does not exist",
                            resolved.disk_name, class
                        ),
                    ));
                }
            }
            (Some(class), StorageTargetOrigin::StorageMapping) => {
                if !targets.storage_class_exists(class) {
                    failures.push(ValidationFailure::new(
                        CheckId::StorageTarget,
                        format!(
                            "Storage domain of disk {} is mapped to storage class {} which does not exist",
                            resolved.disk_name, class
                        ),
                    ));
                }
            }
            _ => failures.push(ValidationFailure::new(
                CheckId::StorageTargetDefaultClass,
                format!(
                    "Disk {} has no storage mapping; the default storage class will be used",
                    resolved.disk_name
                ),
            )),
        }
    }

    failures
}

fn validate_config(
    kind: &str,
    mappings: &[ResourceMappingItem],
    failures: &mut Vec<ValidationFailure>,
) {
    for (position, mapping) in mappings.iter().enumerate() {
        if mapping.source.is_empty() {
            failures.push(ValidationFailure::new(
                CheckId::StorageConfig,
                format!(
                    "{} mapping #{} has neither a source ID nor a name",
                    kind,
                    position + 1
                ),
            ));
        }
        if mapping.target.name.is_empty() {
            failures.push(ValidationFailure::new(
                CheckId::StorageConfig,
                format!(
                    "{} mapping for {} has no target storage class",
                    kind,
                    mapping.source.label()
                ),
            ));
        }
    }

    for source in duplicate_sources(mappings) {
        failures.push(ValidationFailure::new(
            CheckId::StorageConfig,
            format!("{} mapping source {} is listed more than once", kind, source),
        ));
    }
}
