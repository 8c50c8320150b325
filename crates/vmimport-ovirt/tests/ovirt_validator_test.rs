//! Integration tests for the oVirt validators
//!
//! These drive `OvirtValidator` through the trait seams with descriptors
//! written the way an exported VM looks on disk.

use vmimport_ovirt::{resolve_storage_targets, OvirtValidator, StorageTargetOrigin};
use vmimport_types::{
    CheckId, DiskAttachmentValidator, NetworkMappingValidator, NicValidator, RequestRef,
    ResourceMappings, StorageMappingValidator, TargetCatalog, VirtualMachine, VmValidator,
};

const VM_YAML: &str = r#"
id: 2ac0bfb4-1d61-4a8b-b7a7-3b2b7c3e3c01
name: billing-db
status: down
bios:
  type: q35_ovmf
cpu:
  architecture: x86_64
nics:
  - id: nic-1
    name: eth0
    interface: virtio
    onBoot: true
    plugged: true
    vnicProfile:
      id: profile-mgmt
      name: ovirtmgmt
      network: { name: ovirtmgmt }
  - id: nic-2
    name: eth1
    interface: e1000
    onBoot: true
    plugged: true
    vnicProfile:
      id: profile-storage
      name: storage
      network: { name: storage }
diskAttachments:
  - id: att-1
    interface: virtio_scsi
    bootable: true
    disk:
      id: disk-1
      alias: billing-db_Disk1
      status: ok
      storageType: image
      storageDomain: { id: sd-1, name: data-fast }
  - id: att-2
    interface: virtio
    disk:
      id: disk-2
      alias: billing-db_Disk2
      status: locked
      storageType: image
      storageDomain: { id: sd-2, name: data-slow }
"#;

const MAPPINGS_YAML: &str = r#"
networkMappings:
  - source: { name: ovirtmgmt/ovirtmgmt }
    target: { name: pod }
    type: pod
  - source: { id: profile-storage }
    target: { name: storage-net, namespace: infra }
    type: multus
storageMappings:
  - source: { id: sd-1 }
    target: { name: gold }
  - source: { name: data-slow }
    target: { name: bronze }
diskMappings:
  - source: { name: billing-db_Disk1 }
    target: { name: silver }
"#;

struct Cluster;

impl TargetCatalog for Cluster {
    fn network_exists(&self, namespace: &str, name: &str) -> bool {
        namespace == "infra" && name == "storage-net"
    }

    fn storage_class_exists(&self, name: &str) -> bool {
        matches!(name, "gold" | "silver")
    }
}

fn load() -> (VirtualMachine, ResourceMappings) {
    let vm = VirtualMachine::from_yaml(VM_YAML).expect("VM descriptor should parse");
    let mappings = ResourceMappings::from_yaml(MAPPINGS_YAML).expect("mappings should parse");
    (vm, mappings)
}

#[test]
fn test_exported_vm_structural_checks() {
    // Arrange
    let (vm, _) = load();
    let validator = OvirtValidator::new(Cluster);

    // Act
    let vm_failures = validator.validate_vm(&vm);
    let nic_failures = validator.validate_nics(&vm.nics);
    let disk_failures = validator.validate_disk_attachments(&vm.disk_attachments);

    // Assert
    assert!(vm_failures.is_empty(), "{:?}", vm_failures);
    assert!(nic_failures.is_empty(), "{:?}", nic_failures);
    assert_eq!(disk_failures.len(), 1);
    assert_eq!(disk_failures[0].id, CheckId::DiskStatus);
    assert!(validator.is_disk_ready(&vm.disk_attachments[0]));
    assert!(!validator.is_disk_ready(&vm.disk_attachments[1]));
}

#[test]
fn test_exported_vm_mapping_checks() {
    // Arrange
    let (vm, mappings) = load();
    let validator = OvirtValidator::new(Cluster);
    let request = RequestRef::new("imports", "billing-db-import");

    // Act
    let network_failures =
        validator.validate_network_mappings(&vm.nics, &mappings.network_mappings, &request);
    let storage_failures = validator.validate_storage_mappings(
        &vm.disk_attachments,
        &mappings.storage_mappings,
        &mappings.disk_mappings,
    );

    // Assert
    assert!(network_failures.is_empty(), "{:?}", network_failures);
    assert_eq!(storage_failures.len(), 1);
    assert_eq!(storage_failures[0].id, CheckId::StorageTarget);
    assert!(storage_failures[0].message.contains("bronze"));
}

#[test]
fn test_resolved_storage_targets() {
    let (vm, mappings) = load();

    let resolved = resolve_storage_targets(
        &vm.disk_attachments,
        &mappings.storage_mappings,
        &mappings.disk_mappings,
    );

    let summary: Vec<(&str, Option<&str>, StorageTargetOrigin)> = resolved
        .iter()
        .map(|r| (r.disk_id.as_str(), r.storage_class.as_deref(), r.origin))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("disk-1", Some("silver"), StorageTargetOrigin::DiskMapping),
            ("disk-2", Some("bronze"), StorageTargetOrigin::StorageMapping),
        ]
    );
}
