//! Check identifiers, severity tiers and validation failures

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

use crate::error::ImportError;

macro_rules! check_ids {
    ($($(#[$doc:meta])* $variant:ident => $id:literal,)+) => {
        /// Stable identifier of one structural validation rule.
        ///
        /// Identifiers are never reused for a different rule. The dotted string
        /// form is what appears in policy files and log records.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
            ToSchema,
        )]
        pub enum CheckId {
            $(
                $(#[$doc])*
                #[serde(rename = $id)]
                $variant,
            )+
        }

        impl CheckId {
            /// Every check, in declaration order
            pub const ALL: &'static [CheckId] = &[$(CheckId::$variant,)+];

            /// Dotted string identifier
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(CheckId::$variant => $id,)+
                }
            }
        }
    };
}

check_ids! {
    // NIC rules
    /// NIC uses an interface model the target cannot emulate
    NicInterface => "nic.interface.model",
    NicOnBoot => "nic.on_boot",
    NicPlugged => "nic.plugged",
    NicVnicPortMirroring => "nic.vnic_profile.port_mirroring",
    NicVnicCustomProperties => "nic.vnic_profile.custom_properties",
    NicVnicNetworkFilter => "nic.vnic_profile.network_filter",
    NicVnicQos => "nic.vnic_profile.qos",
    // Disk attachment rules
    /// Attachment has no backing disk
    DiskAttachmentsExist => "disk_attachment.disk",
    DiskAttachmentInterface => "disk_attachment.interface",
    DiskAttachmentLogicalName => "disk_attachment.logical_name",
    DiskAttachmentPassDiscard => "disk_attachment.pass_discard",
    DiskAttachmentUsesScsiReservation => "disk_attachment.uses_scsi_reservation",
    // Disk rules
    DiskInterface => "disk.interface",
    DiskLogicalName => "disk.logical_name",
    DiskUsesScsiReservation => "disk.uses_scsi_reservation",
    DiskBackup => "disk.backup",
    DiskLunStorage => "disk.lun_storage",
    DiskPropagateErrors => "disk.propagate_errors",
    DiskWipeAfterDelete => "disk.wipe_after_delete",
    DiskStatus => "disk.status",
    DiskStorageType => "disk.storage_type",
    DiskSgio => "disk.sgio",
    // VM rules
    VmBiosBootMenu => "vm.bios.boot_menu.enabled",
    VmStatus => "vm.status",
    VmBiosType => "vm.bios.type",
    VmBiosTypeQ35SecureBoot => "vm.bios.type.q35_secure_boot",
    VmCpuArchitecture => "vm.cpu.architecture",
    VmCpuTune => "vm.cpu.cpu_tune",
    VmCpuShares => "vm.cpu_shares",
    VmCustomEmulatedMachine => "vm.custom_emulated_machine",
    VmCustomProperties => "vm.custom_properties",
    VmDisplayType => "vm.display.type",
    VmHasIllegalImages => "vm.has_illegal_images",
    VmHighAvailabilityPriority => "vm.high_availability.priority",
    VmIoThreads => "vm.io.threads",
    VmMemoryPolicyBallooning => "vm.memory_policy.ballooning",
    VmMemoryPolicyOvercommitPercent => "vm.memory_policy.over_commit.percent",
    VmMemoryPolicyGuaranteed => "vm.memory_policy.guaranteed",
    /// Memory exceeds the configured maximum
    VmMemoryTemplateLimit => "vm.memory.limit",
    VmMigration => "vm.migration",
    VmMigrationDowntime => "vm.migration_downtime",
    VmNumaTuneMode => "vm.numa_tune_mode",
    VmOrigin => "vm.origin",
    VmPlacementPolicyAffinity => "vm.placement_policy.affinity",
    VmRngDeviceSource => "vm.rng_device.source",
    VmSoundcardEnabled => "vm.soundcard_enabled",
    VmStartPaused => "vm.start_paused",
    VmStorageErrorResumeBehaviour => "vm.storage_error_resume_behaviour",
    VmTunnelMigration => "vm.tunnel_migration",
    VmUsb => "vm.usb.enabled",
    VmGraphicConsoles => "vm.graphic_consoles",
    VmHostDevices => "vm.host_devices",
    VmReportedDevices => "vm.reported_devices",
    VmQuota => "vm.quota",
    VmWatchdogs => "vm.watchdogs",
    VmCdroms => "vm.cdroms",
    VmFloppies => "vm.floppies",
    VmTimezone => "vm.timezone",
    // Network mapping validation
    /// Network mapping list is malformed (missing or duplicated sources)
    NetworkConfig => "network.mapping.config",
    NetworkTarget => "network.mapping.target",
    /// Source network required by a NIC has no mapping
    NetworkMapping => "network.mapping.missing",
    NetworkMultiplePodTargets => "network.mapping.multiple_pod_targets",
    NetworkType => "network.mapping.type",
    // Storage mapping validation
    /// Storage or disk mapping list is malformed (missing or duplicated sources)
    StorageConfig => "storage.mapping.config",
    StorageTarget => "storage.mapping.target",
    DiskTarget => "disk.mapping.target",
    StorageTargetDefaultClass => "storage.mapping.default_class",
}

impl CheckId {
    /// Number of known checks
    pub const COUNT: usize = Self::ALL.len();

    /// Position of this check in `CheckId::ALL`
    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for CheckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CheckId {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CheckId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ImportError::UnknownCheck(s.to_string()))
    }
}

/// Severity tier of a check.
///
/// Ordered by strictness: `Block` > `Warn` > `Log`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Recorded in logs only
    Log,
    /// Reported, does not block the import
    Warn,
    /// Blocks the import
    Block,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Log => "log",
            Severity::Warn => "warn",
            Severity::Block => "block",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single detected rule violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationFailure {
    /// Rule that was violated
    pub id: CheckId,
    /// Human-readable description
    pub message: String,
}

impl ValidationFailure {
    pub fn new(id: CheckId, message: impl Into<String>) -> Self {
        Self {
            id,
            message: message.into(),
        }
    }
}
