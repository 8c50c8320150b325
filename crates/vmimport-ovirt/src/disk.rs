//! Disk attachment and disk rules

use vmimport_types::{
    CheckId, Disk, DiskAttachment, DiskBackup, DiskInterface, DiskStatus, DiskStorageType,
    ScsiGenericIo, ValidationFailure,
};

/// Bus types the target platform can attach disks to
const SUPPORTED_INTERFACES: &[DiskInterface] = &[
    DiskInterface::Sata,
    DiskInterface::Virtio,
    DiskInterface::VirtioScsi,
];

/// Check each attachment and its backing disk, attachment by attachment
pub fn validate_disk_attachments(attachments: &[DiskAttachment]) -> Vec<ValidationFailure> {
    attachments.iter().flat_map(validate_attachment).collect()
}

/// Whether the backing disk exists and is in a stable state for copying
pub fn is_disk_ready(attachment: &DiskAttachment) -> bool {
    attachment
        .disk
        .as_ref()
        .is_some_and(|disk| disk.status == Some(DiskStatus::Ok))
}

fn validate_attachment(attachment: &DiskAttachment) -> Vec<ValidationFailure> {
    let mut failures = Vec::new();
    let id = &attachment.id;

    if attachment.disk.is_none() {
        failures.push(ValidationFailure::new(
            CheckId::DiskAttachmentsExist,
            format!("Disk attachment {} has no disk", id),
        ));
    }

    if let Some(interface) = &attachment.interface {
        if !SUPPORTED_INTERFACES.contains(interface) {
            failures.push(ValidationFailure::new(
                CheckId::DiskAttachmentInterface,
                format!(
                    "Disk attachment {} uses unsupported interface {}",
                    id, interface
                ),
            ));
        }
    }

    if let Some(logical_name) = attachment.logical_name.as_deref().filter(|n| !n.is_empty()) {
        failures.push(ValidationFailure::new(
            CheckId::DiskAttachmentLogicalName,
            format!(
                "Disk attachment {} has logical name {} which will not be preserved",
                id, logical_name
            ),
        ));
    }

    if attachment.pass_discard == Some(true) {
        failures.push(ValidationFailure::new(
            CheckId::DiskAttachmentPassDiscard,
            format!("Disk attachment {} passes discard requests", id),
        ));
    }

    if attachment.uses_scsi_reservation == Some(true) {
        failures.push(ValidationFailure::new(
            CheckId::DiskAttachmentUsesScsiReservation,
            format!("Disk attachment {} uses SCSI reservation", id),
        ));
    }

    if let Some(disk) = &attachment.disk {
        failures.extend(validate_disk(disk));
    }

    failures
}

fn validate_disk(disk: &Disk) -> Vec<ValidationFailure> {
    let name = disk.display_name();
    let mut failures = Vec::new();

    if let Some(interface) = &disk.interface {
        if !SUPPORTED_INTERFACES.contains(interface) {
            failures.push(ValidationFailure::new(
                CheckId::DiskInterface,
                format!("Disk {} uses unsupported interface {}", name, interface),
            ));
        }
    }

    if let Some(logical_name) = disk.logical_name.as_deref().filter(|n| !n.is_empty()) {
        failures.push(ValidationFailure::new(
            CheckId::DiskLogicalName,
            format!("Disk {} has logical name {}", name, logical_name),
        ));
    }

    if disk.uses_scsi_reservation == Some(true) {
        failures.push(ValidationFailure::new(
            CheckId::DiskUsesScsiReservation,
            format!("Disk {} uses SCSI reservation", name),
        ));
    }

    if disk.backup == Some(DiskBackup::Incremental) {
        failures.push(ValidationFailure::new(
            CheckId::DiskBackup,
            format!("Disk {} has incremental backup enabled", name),
        ));
    }

    if let Some(lun) = &disk.lun_storage {
        failures.push(ValidationFailure::new(
            CheckId::DiskLunStorage,
            format!(
                "Disk {} is backed by LUN {}",
                name,
                lun.id.as_deref().unwrap_or("<unknown>")
            ),
        ));
    }

    if disk.propagate_errors == Some(true) {
        failures.push(ValidationFailure::new(
            CheckId::DiskPropagateErrors,
            format!("Disk {} propagates errors to the guest", name),
        ));
    }

    if disk.wipe_after_delete == Some(true) {
        failures.push(ValidationFailure::new(
            CheckId::DiskWipeAfterDelete,
            format!("Disk {} has wipe after delete enabled", name),
        ));
    }

    if let Some(status) = &disk.status {
        if *status != DiskStatus::Ok {
            failures.push(ValidationFailure::new(
                CheckId::DiskStatus,
                format!("Disk {} is in status {}; it must be ok", name, status),
            ));
        }
    }

    if let Some(storage_type) = &disk.storage_type {
        if *storage_type != DiskStorageType::Image {
            failures.push(ValidationFailure::new(
                CheckId::DiskStorageType,
                format!("Disk {} has unsupported storage type {}", name, storage_type),
            ));
        }
    }

    if let Some(sgio) = &disk.sgio {
        if *sgio != ScsiGenericIo::Disabled {
            failures.push(ValidationFailure::new(
                CheckId::DiskSgio,
                format!("Disk {} uses SCSI generic IO mode {}", name, sgio),
            ));
        }
    }

    failures
}
