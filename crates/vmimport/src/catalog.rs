//! Rule catalog
//!
//! Maps every `CheckId` to a `Severity`. A catalog is built once, before any
//! request is validated, and is read-only afterwards. Lookups are total: a
//! catalog that does not cover every check cannot be constructed.

use std::collections::HashMap;

use thiserror::Error;
use tracing::warn;
use vmimport_types::{CheckId, Severity};

/// Catalog construction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Rule catalog has no severity for: {}", format_ids(.missing))]
    Incomplete { missing: Vec<CheckId> },
}

fn format_ids(ids: &[CheckId]) -> String {
    ids.iter()
        .map(CheckId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Severity assignment for every known check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleCatalog {
    severities: [Severity; CheckId::COUNT],
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl RuleCatalog {
    /// Catalog with the built-in severity of every check
    pub fn with_defaults() -> Self {
        let mut severities = [Severity::Log; CheckId::COUNT];
        for id in CheckId::ALL {
            severities[id.index()] = default_severity(*id);
        }
        Self { severities }
    }

    /// Build a catalog from explicit entries.
    ///
    /// Fails when any check has no entry.
    pub fn from_entries(entries: &HashMap<CheckId, Severity>) -> Result<Self, CatalogError> {
        let missing: Vec<CheckId> = CheckId::ALL
            .iter()
            .copied()
            .filter(|id| !entries.contains_key(id))
            .collect();
        if !missing.is_empty() {
            return Err(CatalogError::Incomplete { missing });
        }

        let mut severities = [Severity::Log; CheckId::COUNT];
        for (id, severity) in entries {
            severities[id.index()] = *severity;
        }
        Ok(Self { severities })
    }

    /// Replace the severity of individual checks
    pub fn with_overrides(
        mut self,
        overrides: impl IntoIterator<Item = (CheckId, Severity)>,
    ) -> Self {
        for (id, severity) in overrides {
            let previous = self.severities[id.index()];
            if previous != severity {
                warn!(
                    check = %id,
                    default = %previous,
                    severity = %severity,
                    "Severity override changes check tier"
                );
            }
            self.severities[id.index()] = severity;
        }
        self
    }

    pub fn severity_of(&self, id: CheckId) -> Severity {
        self.severities[id.index()]
    }

    /// Every check with its severity, in `CheckId::ALL` order
    pub fn entries(&self) -> impl Iterator<Item = (CheckId, Severity)> + '_ {
        CheckId::ALL.iter().map(|id| (*id, self.severity_of(*id)))
    }
}

/// Built-in severity table
fn default_severity(id: CheckId) -> Severity {
    use CheckId::*;
    use Severity::*;

    match id {
        NicInterface => Block,
        NicOnBoot => Log,
        NicPlugged => Warn,
        NicVnicPortMirroring => Warn,
        NicVnicCustomProperties => Warn,
        NicVnicNetworkFilter => Warn,
        NicVnicQos => Log,

        DiskAttachmentsExist => Block,
        DiskAttachmentInterface => Block,
        DiskAttachmentLogicalName => Log,
        DiskAttachmentPassDiscard => Log,
        DiskAttachmentUsesScsiReservation => Block,

        DiskInterface => Block,
        DiskLogicalName => Log,
        DiskUsesScsiReservation => Block,
        DiskBackup => Warn,
        DiskLunStorage => Block,
        DiskPropagateErrors => Log,
        DiskWipeAfterDelete => Log,
        DiskStatus => Block,
        DiskStorageType => Block,
        DiskSgio => Block,

        VmBiosBootMenu => Log,
        VmStatus => Block,
        VmBiosType => Block,
        VmBiosTypeQ35SecureBoot => Warn,
        VmCpuArchitecture => Block,
        VmCpuTune => Warn,
        VmCpuShares => Log,
        VmCustomEmulatedMachine => Log,
        VmCustomProperties => Warn,
        VmDisplayType => Log,
        VmHasIllegalImages => Block,
        VmHighAvailabilityPriority => Log,
        VmIoThreads => Warn,
        VmMemoryPolicyBallooning => Log,
        VmMemoryPolicyOvercommitPercent => Log,
        VmMemoryPolicyGuaranteed => Log,
        VmMemoryTemplateLimit => Block,
        VmMigration => Log,
        VmMigrationDowntime => Log,
        VmNumaTuneMode => Warn,
        VmOrigin => Block,
        VmPlacementPolicyAffinity => Block,
        VmRngDeviceSource => Log,
        VmSoundcardEnabled => Warn,
        VmStartPaused => Log,
        VmStorageErrorResumeBehaviour => Log,
        VmTunnelMigration => Warn,
        VmUsb => Block,
        VmGraphicConsoles => Log,
        VmHostDevices => Log,
        VmReportedDevices => Log,
        VmQuota => Log,
        VmWatchdogs => Block,
        VmCdroms => Log,
        VmFloppies => Log,
        VmTimezone => Block,

        NetworkConfig => Block,
        NetworkTarget => Block,
        NetworkMapping => Block,
        NetworkMultiplePodTargets => Block,
        NetworkType => Block,

        StorageConfig => Block,
        StorageTarget => Block,
        DiskTarget => Block,
        StorageTargetDefaultClass => Warn,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tiers() {
        let catalog = RuleCatalog::with_defaults();

        assert_eq!(catalog.severity_of(CheckId::NicInterface), Severity::Block);
        assert_eq!(catalog.severity_of(CheckId::NicPlugged), Severity::Warn);
        assert_eq!(catalog.severity_of(CheckId::NicOnBoot), Severity::Log);
        assert_eq!(
            catalog.severity_of(CheckId::DiskAttachmentUsesScsiReservation),
            Severity::Block
        );
        assert_eq!(
            catalog.severity_of(CheckId::StorageTargetDefaultClass),
            Severity::Warn
        );
        assert_eq!(
            catalog.severity_of(CheckId::NetworkMultiplePodTargets),
            Severity::Block
        );
    }

    #[test]
    fn test_from_entries_requires_every_check() {
        let mut entries: HashMap<CheckId, Severity> =
            RuleCatalog::with_defaults().entries().collect();
        entries.remove(&CheckId::VmUsb);

        let err = RuleCatalog::from_entries(&entries).unwrap_err();
        assert_eq!(
            err,
            CatalogError::Incomplete {
                missing: vec![CheckId::VmUsb]
            }
        );
        assert_eq!(
            err.to_string(),
            "Rule catalog has no severity for: vm.usb.enabled"
        );
    }

    #[test]
    fn test_from_entries_complete() {
        let entries: HashMap<CheckId, Severity> =
            CheckId::ALL.iter().map(|id| (*id, Severity::Warn)).collect();

        let catalog = RuleCatalog::from_entries(&entries).unwrap();
        assert!(catalog.entries().all(|(_, severity)| severity == Severity::Warn));
        assert_eq!(catalog.entries().count(), CheckId::COUNT);
    }

    #[test]
    fn test_overrides_replace_single_entries() {
        let catalog =
            RuleCatalog::with_defaults().with_overrides([(CheckId::VmUsb, Severity::Warn)]);

        assert_eq!(catalog.severity_of(CheckId::VmUsb), Severity::Warn);
        assert_eq!(catalog.severity_of(CheckId::VmWatchdogs), Severity::Block);
        assert_ne!(catalog, RuleCatalog::with_defaults());
    }
}
