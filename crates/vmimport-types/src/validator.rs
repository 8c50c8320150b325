//! Validator traits
//!
//! Each trait covers one subject. Implementations are stateless with respect
//! to a single call: they inspect their inputs and return every failure they
//! find, in a deterministic order. They never decide severity.

use crate::check::ValidationFailure;
use crate::disk::DiskAttachment;
use crate::mapping::{RequestRef, ResourceMappingItem};
use crate::nic::Nic;
use crate::vm::VirtualMachine;

/// VM-level structural rules
pub trait VmValidator {
    fn validate_vm(&self, vm: &VirtualMachine) -> Vec<ValidationFailure>;
}

/// Per-NIC structural rules
pub trait NicValidator {
    fn validate_nics(&self, nics: &[Nic]) -> Vec<ValidationFailure>;
}

/// Per-attachment and per-disk structural rules
pub trait DiskAttachmentValidator {
    fn validate_disk_attachments(&self, attachments: &[DiskAttachment])
        -> Vec<ValidationFailure>;

    /// Whether the attachment's disk exists and is ready for copying.
    ///
    /// An attachment without a disk is never ready.
    fn is_disk_ready(&self, attachment: &DiskAttachment) -> bool;
}

/// Completeness and consistency of network mappings
pub trait NetworkMappingValidator {
    /// `request` supplies the default namespace for network targets
    fn validate_network_mappings(
        &self,
        nics: &[Nic],
        mappings: &[ResourceMappingItem],
        request: &RequestRef,
    ) -> Vec<ValidationFailure>;
}

/// Completeness and consistency of storage mappings
pub trait StorageMappingValidator {
    fn validate_storage_mappings(
        &self,
        attachments: &[DiskAttachment],
        storage_mappings: &[ResourceMappingItem],
        disk_mappings: &[ResourceMappingItem],
    ) -> Vec<ValidationFailure>;
}

/// Target-side resource lookups used by the mapping validators
pub trait TargetCatalog: Send + Sync {
    fn network_exists(&self, namespace: &str, name: &str) -> bool;
    fn storage_class_exists(&self, name: &str) -> bool;
}

/// Catalog that treats every target as present
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissiveTargets;

impl TargetCatalog for PermissiveTargets {
    fn network_exists(&self, _namespace: &str, _name: &str) -> bool {
        true
    }

    fn storage_class_exists(&self, _name: &str) -> bool {
        true
    }
}
