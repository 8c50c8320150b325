//! VM-level rules

use vmimport_types::{
    Architecture, BiosType, CheckId, DisplayType, GraphicsType, InheritableBoolean, NumaTuneMode,
    RngSource, ValidationFailure, VirtualMachine, VmAffinity, VmStatus, WatchdogModel,
};

use crate::join_labels;

/// Origin value of VMs that were created by the target platform itself
const KUBEVIRT_ORIGIN: &str = "kubevirt";

/// Check every VM-level attribute, in a fixed order
pub fn validate_vm(vm: &VirtualMachine) -> Vec<ValidationFailure> {
    let name = vm.display_name();
    let mut failures = Vec::new();
    let mut fail =
        |id: CheckId, message: String| failures.push(ValidationFailure::new(id, message));

    if let Some(bios) = &vm.bios {
        if bios.boot_menu_enabled == Some(true) {
            fail(
                CheckId::VmBiosBootMenu,
                format!("VM {} has the BIOS boot menu enabled", name),
            );
        }
        match &bios.bios_type {
            Some(bios_type @ (BiosType::I440fxSeaBios | BiosType::Other(_))) => fail(
                CheckId::VmBiosType,
                format!("VM {} uses unsupported BIOS type {}", name, bios_type),
            ),
            Some(BiosType::Q35SecureBoot) => fail(
                CheckId::VmBiosTypeQ35SecureBoot,
                format!("VM {} uses Q35 with secure boot; secure boot will not be enforced", name),
            ),
            _ => {}
        }
    }

    if let Some(status) = &vm.status {
        if !matches!(status, VmStatus::Up | VmStatus::Down) {
            fail(
                CheckId::VmStatus,
                format!("VM {} is in status {}; it must be up or down", name, status),
            );
        }
    }

    if let Some(cpu) = &vm.cpu {
        if let Some(architecture) = &cpu.architecture {
            if matches!(
                architecture,
                Architecture::S390x | Architecture::Ppc64 | Architecture::Other(_)
            ) {
                fail(
                    CheckId::VmCpuArchitecture,
                    format!("VM {} has unsupported CPU architecture {}", name, architecture),
                );
            }
        }
        if let Some(tune) = &cpu.cpu_tune {
            if !tune.vcpu_pins.is_empty() {
                fail(
                    CheckId::VmCpuTune,
                    format!(
                        "VM {} pins {} virtual CPUs to host CPUs; pinning will not be preserved",
                        name,
                        tune.vcpu_pins.len()
                    ),
                );
            }
        }
    }

    if let Some(shares) = vm.cpu_shares.filter(|shares| *shares > 0) {
        fail(
            CheckId::VmCpuShares,
            format!("VM {} has CPU shares set to {}", name, shares),
        );
    }

    if let Some(machine) = vm
        .custom_emulated_machine
        .as_deref()
        .filter(|machine| !machine.is_empty())
    {
        fail(
            CheckId::VmCustomEmulatedMachine,
            format!("VM {} uses custom emulated machine {}", name, machine),
        );
    }

    if !vm.custom_properties.is_empty() {
        fail(
            CheckId::VmCustomProperties,
            format!(
                "VM {} has custom properties: {}",
                name,
                join_labels(vm.custom_properties.iter().map(|p| p.name.as_str()))
            ),
        );
    }

    if let Some(DisplayType::Spice) = vm.display.as_ref().and_then(|d| d.display_type.as_ref()) {
        fail(
            CheckId::VmDisplayType,
            format!("VM {} uses a SPICE display; VNC will be used instead", name),
        );
    }

    if vm.has_illegal_images == Some(true) {
        fail(
            CheckId::VmHasIllegalImages,
            format!("VM {} has illegal images", name),
        );
    }

    if let Some(ha) = &vm.high_availability {
        if ha.enabled == Some(true) {
            if let Some(priority) = ha.priority {
                fail(
                    CheckId::VmHighAvailabilityPriority,
                    format!("VM {} has high availability priority {}", name, priority),
                );
            }
        }
    }

    if let Some(threads) = vm.io.as_ref().and_then(|io| io.threads).filter(|t| *t > 0) {
        fail(
            CheckId::VmIoThreads,
            format!("VM {} uses {} IO threads", name, threads),
        );
    }

    if let Some(policy) = &vm.memory_policy {
        if policy.ballooning == Some(true) {
            fail(
                CheckId::VmMemoryPolicyBallooning,
                format!("VM {} has memory ballooning enabled", name),
            );
        }
        if let Some(percent) = policy.over_commit_percent.filter(|p| *p != 100) {
            fail(
                CheckId::VmMemoryPolicyOvercommitPercent,
                format!("VM {} has memory overcommit set to {}%", name, percent),
            );
        }
        if let Some(guaranteed) = policy.guaranteed {
            if Some(guaranteed) != vm.memory {
                fail(
                    CheckId::VmMemoryPolicyGuaranteed,
                    format!("VM {} has guaranteed memory of {} bytes", name, guaranteed),
                );
            }
        }
        if let (Some(memory), Some(max)) = (vm.memory, policy.max) {
            if memory > max {
                fail(
                    CheckId::VmMemoryTemplateLimit,
                    format!(
                        "VM {} memory of {} bytes exceeds its maximum of {} bytes",
                        name, memory, max
                    ),
                );
            }
        }
    }

    if let Some(migration) = &vm.migration {
        let custom = |value: &Option<InheritableBoolean>| {
            value
                .as_ref()
                .is_some_and(|v| *v != InheritableBoolean::Inherit)
        };
        if custom(&migration.auto_converge) || custom(&migration.compressed) {
            fail(
                CheckId::VmMigration,
                format!("VM {} overrides the cluster migration options", name),
            );
        }
    }

    // -1 means the cluster default
    if let Some(downtime) = vm.migration_downtime.filter(|d| *d >= 0) {
        fail(
            CheckId::VmMigrationDowntime,
            format!("VM {} has migration downtime set to {} ms", name, downtime),
        );
    }

    if let Some(mode) = &vm.numa_tune_mode {
        if matches!(mode, NumaTuneMode::Preferred | NumaTuneMode::Interleave) {
            fail(
                CheckId::VmNumaTuneMode,
                format!("VM {} uses NUMA tune mode {}; strict will be used", name, mode),
            );
        }
    }

    if vm.origin.as_deref() == Some(KUBEVIRT_ORIGIN) {
        fail(
            CheckId::VmOrigin,
            format!("VM {} was created by KubeVirt and cannot be imported back", name),
        );
    }

    if let Some(VmAffinity::UserMigratable) = vm
        .placement_policy
        .as_ref()
        .and_then(|p| p.affinity.as_ref())
    {
        fail(
            CheckId::VmPlacementPolicyAffinity,
            format!("VM {} has user migratable placement affinity", name),
        );
    }

    if let Some(source) = vm.rng_device.as_ref().and_then(|rng| rng.source.as_ref()) {
        if *source != RngSource::Urandom {
            fail(
                CheckId::VmRngDeviceSource,
                format!("VM {} uses RNG source {}; urandom will be used", name, source),
            );
        }
    }

    if vm.soundcard_enabled == Some(true) {
        fail(
            CheckId::VmSoundcardEnabled,
            format!("VM {} has a sound card", name),
        );
    }

    if vm.start_paused == Some(true) {
        fail(
            CheckId::VmStartPaused,
            format!("VM {} is configured to start paused", name),
        );
    }

    if let Some(behaviour) = vm
        .storage_error_resume_behaviour
        .as_deref()
        .filter(|b| *b != "auto_resume")
    {
        fail(
            CheckId::VmStorageErrorResumeBehaviour,
            format!("VM {} has storage error resume behaviour {}", name, behaviour),
        );
    }

    if vm.tunnel_migration == Some(true) {
        fail(
            CheckId::VmTunnelMigration,
            format!("VM {} has tunnel migration enabled", name),
        );
    }

    if vm.usb.as_ref().and_then(|usb| usb.enabled) == Some(true) {
        fail(
            CheckId::VmUsb,
            format!("VM {} has USB support enabled", name),
        );
    }

    if vm
        .graphics_consoles
        .iter()
        .any(|console| console.protocol == Some(GraphicsType::Spice))
    {
        fail(
            CheckId::VmGraphicConsoles,
            format!("VM {} has a SPICE graphic console; VNC will be used instead", name),
        );
    }

    if !vm.host_devices.is_empty() {
        fail(
            CheckId::VmHostDevices,
            format!(
                "VM {} has host devices attached: {}",
                name,
                join_labels(vm.host_devices.iter().map(|d| d.label()))
            ),
        );
    }

    if !vm.reported_devices.is_empty() {
        fail(
            CheckId::VmReportedDevices,
            format!(
                "VM {} has reported devices: {}",
                name,
                join_labels(vm.reported_devices.iter().map(|d| d.label()))
            ),
        );
    }

    if let Some(quota) = &vm.quota {
        fail(
            CheckId::VmQuota,
            format!("VM {} is assigned to quota {}", name, quota.label()),
        );
    }

    for watchdog in &vm.watchdogs {
        if let Some(model) = &watchdog.model {
            if *model != WatchdogModel::I6300esb {
                fail(
                    CheckId::VmWatchdogs,
                    format!("VM {} has unsupported watchdog model {}", name, model),
                );
            }
        }
    }

    if vm.cdroms.iter().any(|cdrom| cdrom.file.is_some()) {
        fail(
            CheckId::VmCdroms,
            format!("VM {} has a CD-ROM with an inserted image", name),
        );
    }

    if vm.floppies.iter().any(|floppy| floppy.file.is_some()) {
        fail(
            CheckId::VmFloppies,
            format!("VM {} has a floppy with an inserted image", name),
        );
    }

    if let Some(time_zone) = &vm.time_zone {
        match time_zone.utc_offset.as_deref() {
            Some(offset) if is_utc_offset(offset) => {}
            Some(offset) => fail(
                CheckId::VmTimezone,
                format!("VM {} has invalid UTC offset {}", name, offset),
            ),
            None => fail(
                CheckId::VmTimezone,
                format!(
                    "VM {} has time zone {} without a UTC offset",
                    name,
                    time_zone.name.as_deref().unwrap_or("<unnamed>")
                ),
            ),
        }
    }

    failures
}

/// Offset range of real time zones, in minutes east and west of UTC
const MAX_OFFSET_EAST: u16 = 14 * 60;
const MAX_OFFSET_WEST: u16 = 12 * 60;

/// Whether `offset` is a `+HH:MM` / `-HH:MM` offset within -12:00..=+14:00
fn is_utc_offset(offset: &str) -> bool {
    let bytes = offset.as_bytes();
    if bytes.len() != 6 || bytes[3] != b':' {
        return false;
    }
    let limit = match bytes[0] {
        b'+' => MAX_OFFSET_EAST,
        b'-' => MAX_OFFSET_WEST,
        _ => return false,
    };
    let digits = [bytes[1], bytes[2], bytes[4], bytes[5]];
    if !digits.iter().all(u8::is_ascii_digit) {
        return false;
    }
    let [h1, h2, m1, m2] = digits.map(|d| u16::from(d - b'0'));
    let minutes = m1 * 10 + m2;
    minutes < 60 && (h1 * 10 + h2) * 60 + minutes <= limit
}
