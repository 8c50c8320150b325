//! Import validation orchestrator
//!
//! Runs every validator over one import request and turns the results into
//! the two status conditions published for it.

use std::sync::Arc;

use tracing::{debug, info};
use vmimport_types::{
    DiskAttachment, DiskAttachmentValidator, NetworkMappingValidator, NicValidator, RequestRef,
    ResourceMappings, StatusCondition, StorageMappingValidator, VirtualMachine, VmValidator,
};

use crate::catalog::RuleCatalog;
use crate::classifier::classify;
use crate::conditions::{mapping_condition, rules_condition};

/// Validates import requests against one validator set and one rule catalog.
///
/// Holds no per-request state; a single instance can serve concurrent
/// requests.
#[derive(Debug, Clone)]
pub struct ImportValidator<V> {
    validator: V,
    catalog: Arc<RuleCatalog>,
}

impl<V> ImportValidator<V>
where
    V: VmValidator
        + NicValidator
        + DiskAttachmentValidator
        + NetworkMappingValidator
        + StorageMappingValidator,
{
    pub fn new(validator: V, catalog: Arc<RuleCatalog>) -> Self {
        Self { validator, catalog }
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Validate a VM and its mappings.
    ///
    /// Always returns two conditions: the mapping condition (`Valid`) first
    /// and the rule condition (`MappingRulesVerified`) second.
    pub fn validate(
        &self,
        vm: &VirtualMachine,
        mappings: &ResourceMappings,
        request: &RequestRef,
    ) -> Vec<StatusCondition> {
        info!(request = %request, vm = vm.display_name(), "Validating import request");

        let mut rule_failures = self.validator.validate_vm(vm);
        rule_failures.extend(self.validator.validate_nics(&vm.nics));
        rule_failures.extend(self.validator.validate_disk_attachments(&vm.disk_attachments));

        let mut mapping_failures = self.validator.validate_network_mappings(
            &vm.nics,
            &mappings.network_mappings,
            request,
        );
        mapping_failures.extend(self.validator.validate_storage_mappings(
            &vm.disk_attachments,
            &mappings.storage_mappings,
            &mappings.disk_mappings,
        ));

        debug!(
            request = %request,
            rule_failures = rule_failures.len(),
            mapping_failures = mapping_failures.len(),
            "Validators finished"
        );

        let rules = classify(&self.catalog, rule_failures, request);
        let mapping = classify(&self.catalog, mapping_failures, request);

        vec![mapping_condition(&mapping), rules_condition(&rules)]
    }

    /// Whether the attachment's disk can be copied now
    pub fn is_disk_ready(&self, attachment: &DiskAttachment) -> bool {
        self.validator.is_disk_ready(attachment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vmimport_ovirt::OvirtValidator;
    use vmimport_types::{
        CheckId, ConditionReason, ConditionStatus, ConditionType, Nic, PermissiveTargets,
        ResourceMappingItem, Severity, ValidationFailure,
    };

    /// Validator returning canned failures
    #[derive(Default)]
    struct CannedValidator {
        vm: Vec<ValidationFailure>,
        nics: Vec<ValidationFailure>,
        disks: Vec<ValidationFailure>,
        networks: Vec<ValidationFailure>,
        storage: Vec<ValidationFailure>,
    }

    impl VmValidator for CannedValidator {
        fn validate_vm(&self, _vm: &VirtualMachine) -> Vec<ValidationFailure> {
            self.vm.clone()
        }
    }

    impl NicValidator for CannedValidator {
        fn validate_nics(&self, _nics: &[Nic]) -> Vec<ValidationFailure> {
            self.nics.clone()
        }
    }

    impl DiskAttachmentValidator for CannedValidator {
        fn validate_disk_attachments(
            &self,
            _attachments: &[DiskAttachment],
        ) -> Vec<ValidationFailure> {
            self.disks.clone()
        }

        fn is_disk_ready(&self, _attachment: &DiskAttachment) -> bool {
            false
        }
    }

    impl NetworkMappingValidator for CannedValidator {
        fn validate_network_mappings(
            &self,
            _nics: &[Nic],
            _mappings: &[ResourceMappingItem],
            _request: &RequestRef,
        ) -> Vec<ValidationFailure> {
            self.networks.clone()
        }
    }

    impl StorageMappingValidator for CannedValidator {
        fn validate_storage_mappings(
            &self,
            _attachments: &[DiskAttachment],
            _storage_mappings: &[ResourceMappingItem],
            _disk_mappings: &[ResourceMappingItem],
        ) -> Vec<ValidationFailure> {
            self.storage.clone()
        }
    }

    fn request() -> RequestRef {
        RequestRef::new("default", "import-1")
    }

    fn vm() -> VirtualMachine {
        VirtualMachine {
            id: "vm-1".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_vm_passes_both_conditions() {
        // Arrange
        let validator = ImportValidator::new(
            OvirtValidator::new(PermissiveTargets),
            Arc::new(RuleCatalog::default()),
        );

        // Act
        let conditions = validator.validate(&vm(), &ResourceMappings::default(), &request());

        // Assert
        assert_eq!(conditions.len(), 2);
        assert_eq!(conditions[0].condition_type, ConditionType::Valid);
        assert_eq!(conditions[0].status, ConditionStatus::True);
        assert_eq!(conditions[0].reason, ConditionReason::ValidationCompleted);
        assert_eq!(conditions[1].condition_type, ConditionType::MappingRulesVerified);
        assert_eq!(conditions[1].status, ConditionStatus::True);
        assert_eq!(
            conditions[1].reason,
            ConditionReason::MappingRulesVerificationCompleted
        );
    }

    #[test]
    fn test_rule_messages_follow_vm_nic_disk_order() {
        // Arrange
        let canned = CannedValidator {
            vm: vec![ValidationFailure::new(CheckId::VmUsb, "vm")],
            nics: vec![ValidationFailure::new(CheckId::NicInterface, "nic")],
            disks: vec![ValidationFailure::new(CheckId::DiskStatus, "disk")],
            ..Default::default()
        };
        let validator = ImportValidator::new(canned, Arc::new(RuleCatalog::default()));

        // Act
        let conditions = validator.validate(&vm(), &ResourceMappings::default(), &request());

        // Assert
        assert_eq!(conditions[0].status, ConditionStatus::True);
        assert_eq!(conditions[1].status, ConditionStatus::False);
        assert_eq!(conditions[1].message, "vm, nic, disk");
    }

    #[test]
    fn test_mapping_and_rule_failures_stay_on_their_condition() {
        // Arrange
        let canned = CannedValidator {
            networks: vec![ValidationFailure::new(CheckId::NetworkMapping, "network")],
            storage: vec![ValidationFailure::new(
                CheckId::StorageTargetDefaultClass,
                "default class",
            )],
            vm: vec![ValidationFailure::new(CheckId::VmNumaTuneMode, "numa")],
            ..Default::default()
        };
        let validator = ImportValidator::new(canned, Arc::new(RuleCatalog::default()));

        // Act
        let conditions = validator.validate(&vm(), &ResourceMappings::default(), &request());

        // Assert
        assert_eq!(conditions[0].status, ConditionStatus::False);
        assert_eq!(conditions[0].reason, ConditionReason::IncompleteMappingRules);
        assert_eq!(conditions[0].message, "network");
        assert_eq!(conditions[1].status, ConditionStatus::True);
        assert_eq!(
            conditions[1].reason,
            ConditionReason::MappingRulesVerificationReportedWarnings
        );
        assert_eq!(conditions[1].message, "numa");
    }

    #[test]
    fn test_injected_catalog_decides_severity() {
        // Arrange
        let canned = CannedValidator {
            vm: vec![ValidationFailure::new(CheckId::VmUsb, "usb")],
            ..Default::default()
        };
        let catalog = RuleCatalog::default().with_overrides([(CheckId::VmUsb, Severity::Warn)]);
        let validator = ImportValidator::new(canned, Arc::new(catalog));

        // Act
        let conditions = validator.validate(&vm(), &ResourceMappings::default(), &request());

        // Assert
        assert_eq!(conditions[1].status, ConditionStatus::True);
        assert_eq!(conditions[1].message, "usb");
    }

    #[test]
    fn test_is_disk_ready_delegates_to_validator() {
        let validator =
            ImportValidator::new(CannedValidator::default(), Arc::new(RuleCatalog::default()));
        let attachment = DiskAttachment {
            id: "att-1".to_string(),
            interface: None,
            logical_name: None,
            pass_discard: None,
            uses_scsi_reservation: None,
            bootable: None,
            disk: None,
        };

        assert!(!validator.is_disk_ready(&attachment));
    }
}
