//! Source virtual machine descriptor
//!
//! Mirrors the VM-level attributes exposed by the source platform. Every
//! attribute the platform may omit is optional; absent collections are empty.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::disk::DiskAttachment;
use crate::error::ImportResult;
use crate::nic::{NamedRef, Nic};

/// Complete description of a VM on the source platform
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachine {
    /// Unique ID in source system
    pub id: String,
    /// VM name
    #[serde(default)]
    pub name: Option<String>,
    /// Current run state
    #[serde(default)]
    pub status: Option<VmStatus>,
    /// Platform that created the VM (e.g. `ovirt`, `kubevirt`)
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub bios: Option<Bios>,
    #[serde(default)]
    pub cpu: Option<Cpu>,
    /// Relative CPU weight
    #[serde(default)]
    pub cpu_shares: Option<i64>,
    #[serde(default)]
    pub custom_emulated_machine: Option<String>,
    #[serde(default)]
    pub custom_properties: Vec<CustomProperty>,
    #[serde(default)]
    pub display: Option<Display>,
    /// Whether any of the VM images is in an illegal state
    #[serde(default)]
    pub has_illegal_images: Option<bool>,
    #[serde(default)]
    pub high_availability: Option<HighAvailability>,
    #[serde(default)]
    pub io: Option<Io>,
    /// Memory size (bytes)
    #[serde(default)]
    pub memory: Option<i64>,
    #[serde(default)]
    pub memory_policy: Option<MemoryPolicy>,
    #[serde(default)]
    pub migration: Option<MigrationOptions>,
    /// Maximum allowed migration downtime (milliseconds)
    #[serde(default)]
    pub migration_downtime: Option<i64>,
    #[serde(default)]
    pub numa_tune_mode: Option<NumaTuneMode>,
    #[serde(default)]
    pub placement_policy: Option<PlacementPolicy>,
    #[serde(default)]
    pub rng_device: Option<RngDevice>,
    #[serde(default)]
    pub soundcard_enabled: Option<bool>,
    #[serde(default)]
    pub start_paused: Option<bool>,
    #[serde(default)]
    pub storage_error_resume_behaviour: Option<String>,
    #[serde(default)]
    pub tunnel_migration: Option<bool>,
    #[serde(default)]
    pub usb: Option<Usb>,
    #[serde(default)]
    pub graphics_consoles: Vec<GraphicsConsole>,
    #[serde(default)]
    pub host_devices: Vec<NamedRef>,
    /// Devices reported by the guest agent
    #[serde(default)]
    pub reported_devices: Vec<NamedRef>,
    #[serde(default)]
    pub quota: Option<NamedRef>,
    #[serde(default)]
    pub watchdogs: Vec<Watchdog>,
    #[serde(default)]
    pub cdroms: Vec<RemovableMedia>,
    #[serde(default)]
    pub floppies: Vec<RemovableMedia>,
    #[serde(default)]
    pub time_zone: Option<TimeZone>,
    /// Network interfaces
    #[serde(default)]
    pub nics: Vec<Nic>,
    /// Disk attachments
    #[serde(default)]
    pub disk_attachments: Vec<DiskAttachment>,
}

impl VirtualMachine {
    /// Parse a descriptor from YAML
    pub fn from_yaml(yaml: &str) -> ImportResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse a descriptor from JSON
    pub fn from_json(json: &str) -> ImportResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Name for messages, falling back to the ID
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

source_enum! {
    /// VM run state
    VmStatus {
        Down => "down",
        Up => "up",
        ImageLocked => "image_locked",
        Migrating => "migrating",
        NotResponding => "not_responding",
        Paused => "paused",
        PoweringDown => "powering_down",
        PoweringUp => "powering_up",
        RebootInProgress => "reboot_in_progress",
        RestoringState => "restoring_state",
        SavingState => "saving_state",
        Suspended => "suspended",
        Unassigned => "unassigned",
        Unknown => "unknown",
        WaitForLaunch => "wait_for_launch",
    }
}

source_enum! {
    /// Chipset/firmware combination
    BiosType {
        ClusterDefault => "cluster_default",
        I440fxSeaBios => "i440fx_sea_bios",
        Q35Ovmf => "q35_ovmf",
        Q35SeaBios => "q35_sea_bios",
        Q35SecureBoot => "q35_secure_boot",
    }
}

source_enum! {
    Architecture {
        Undefined => "undefined",
        X86_64 => "x86_64",
        Aarch64 => "aarch64",
        Ppc64 => "ppc64",
        S390x => "s390x",
    }
}

source_enum! {
    DisplayType {
        Spice => "spice",
        Vnc => "vnc",
    }
}

source_enum! {
    GraphicsType {
        Spice => "spice",
        Vnc => "vnc",
    }
}

source_enum! {
    NumaTuneMode {
        Interleave => "interleave",
        Preferred => "preferred",
        Strict => "strict",
    }
}

source_enum! {
    /// Migration affinity of the placement policy
    VmAffinity {
        Migratable => "migratable",
        Pinned => "pinned",
        UserMigratable => "user_migratable",
    }
}

source_enum! {
    RngSource {
        Hwrng => "hwrng",
        Random => "random",
        Urandom => "urandom",
    }
}

source_enum! {
    WatchdogModel {
        Diag288 => "diag288",
        I6300esb => "i6300esb",
    }
}

source_enum! {
    /// Tri-state flag that may defer to the cluster setting
    InheritableBoolean {
        True => "true",
        False => "false",
        Inherit => "inherit",
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bios {
    #[serde(default)]
    pub boot_menu_enabled: Option<bool>,
    #[serde(default, rename = "type")]
    pub bios_type: Option<BiosType>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cpu {
    #[serde(default)]
    pub architecture: Option<Architecture>,
    /// Virtual CPU to host CPU pinning
    #[serde(default)]
    pub cpu_tune: Option<CpuTune>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CpuTune {
    #[serde(default)]
    pub vcpu_pins: Vec<VcpuPin>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VcpuPin {
    pub vcpu: i64,
    pub cpu_set: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CustomProperty {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Display {
    #[serde(default, rename = "type")]
    pub display_type: Option<DisplayType>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HighAvailability {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub priority: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct Io {
    #[serde(default)]
    pub threads: Option<i64>,
}

/// Memory management settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemoryPolicy {
    #[serde(default)]
    pub ballooning: Option<bool>,
    /// Overcommit percentage
    #[serde(default)]
    pub over_commit_percent: Option<i64>,
    /// Guaranteed memory (bytes)
    #[serde(default)]
    pub guaranteed: Option<i64>,
    /// Maximum memory the VM may grow to (bytes)
    #[serde(default)]
    pub max: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MigrationOptions {
    #[serde(default)]
    pub auto_converge: Option<InheritableBoolean>,
    #[serde(default)]
    pub compressed: Option<InheritableBoolean>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PlacementPolicy {
    #[serde(default)]
    pub affinity: Option<VmAffinity>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct RngDevice {
    #[serde(default)]
    pub source: Option<RngSource>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Usb {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default, rename = "type")]
    pub usb_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GraphicsConsole {
    #[serde(default)]
    pub protocol: Option<GraphicsType>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct Watchdog {
    #[serde(default)]
    pub model: Option<WatchdogModel>,
    #[serde(default)]
    pub action: Option<String>,
}

/// CD-ROM or floppy device, with the inserted image if any
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct RemovableMedia {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub file: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeZone {
    #[serde(default)]
    pub name: Option<String>,
    /// Offset from UTC in `+HH:MM` form
    #[serde(default)]
    pub utc_offset: Option<String>,
}
