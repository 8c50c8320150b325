//! oVirt implementation of the validator traits

use vmimport_types::{
    DiskAttachment, DiskAttachmentValidator, NetworkMappingValidator, Nic, NicValidator,
    PermissiveTargets, RequestRef, ResourceMappingItem, StorageMappingValidator, TargetCatalog,
    ValidationFailure, VirtualMachine, VmValidator,
};

use crate::{disk, network_mapping, nic, storage_mapping, vm};

/// Validates VMs exported from oVirt.
///
/// `T` answers target-side lookups for the mapping rules.
#[derive(Debug, Clone, Default)]
pub struct OvirtValidator<T: TargetCatalog = PermissiveTargets> {
    targets: T,
}

impl<T: TargetCatalog> OvirtValidator<T> {
    pub fn new(targets: T) -> Self {
        Self { targets }
    }

    pub fn targets(&self) -> &T {
        &self.targets
    }
}

impl<T: TargetCatalog> VmValidator for OvirtValidator<T> {
    fn validate_vm(&self, vm: &VirtualMachine) -> Vec<ValidationFailure> {
        vm::validate_vm(vm)
    }
}

impl<T: TargetCatalog> NicValidator for OvirtValidator<T> {
    fn validate_nics(&self, nics: &[Nic]) -> Vec<ValidationFailure> {
        nic::validate_nics(nics)
    }
}

impl<T: TargetCatalog> DiskAttachmentValidator for OvirtValidator<T> {
    fn validate_disk_attachments(
        &self,
        attachments: &[DiskAttachment],
    ) -> Vec<ValidationFailure> {
        disk::validate_disk_attachments(attachments)
    }

    fn is_disk_ready(&self, attachment: &DiskAttachment) -> bool {
        disk::is_disk_ready(attachment)
    }
}

impl<T: TargetCatalog> NetworkMappingValidator for OvirtValidator<T> {
    fn validate_network_mappings(
        &self,
        nics: &[Nic],
        mappings: &[ResourceMappingItem],
        request: &RequestRef,
    ) -> Vec<ValidationFailure> {
        network_mapping::validate_network_mappings(nics, mappings, request, &self.targets)
    }
}

impl<T: TargetCatalog> StorageMappingValidator for OvirtValidator<T> {
    fn validate_storage_mappings(
        &self,
        attachments: &[DiskAttachment],
        storage_mappings: &[ResourceMappingItem],
        disk_mappings: &[ResourceMappingItem],
    ) -> Vec<ValidationFailure> {
        storage_mapping::validate_storage_mappings(
            attachments,
            storage_mappings,
            disk_mappings,
            &self.targets,
        )
    }
}
