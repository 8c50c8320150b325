//! Disk attachment descriptors

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

source_enum! {
    /// Bus a disk is attached through
    DiskInterface {
        Ide => "ide",
        Sata => "sata",
        SpaprVscsi => "spapr_vscsi",
        Virtio => "virtio",
        VirtioScsi => "virtio_scsi",
    }
}

source_enum! {
    DiskStatus {
        Illegal => "illegal",
        Locked => "locked",
        Ok => "ok",
    }
}

source_enum! {
    DiskStorageType {
        Cinder => "cinder",
        Image => "image",
        Lun => "lun",
        ManagedBlockStorage => "managed_block_storage",
    }
}

source_enum! {
    /// SCSI generic I/O pass-through mode
    ScsiGenericIo {
        Disabled => "disabled",
        Filtered => "filtered",
        Unfiltered => "unfiltered",
    }
}

source_enum! {
    DiskBackup {
        Incremental => "incremental",
        None => "none",
    }
}

/// Attachment of a disk to the source VM
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiskAttachment {
    pub id: String,
    #[serde(default)]
    pub interface: Option<DiskInterface>,
    #[serde(default)]
    pub logical_name: Option<String>,
    #[serde(default)]
    pub pass_discard: Option<bool>,
    #[serde(default)]
    pub uses_scsi_reservation: Option<bool>,
    #[serde(default)]
    pub bootable: Option<bool>,
    /// Backing disk; absent when the platform could not resolve it
    #[serde(default)]
    pub disk: Option<Disk>,
}

/// Disk backing an attachment
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Disk {
    pub id: String,
    #[serde(default)]
    pub alias: Option<String>,
    /// Legacy per-disk interface
    #[serde(default)]
    pub interface: Option<DiskInterface>,
    #[serde(default)]
    pub logical_name: Option<String>,
    #[serde(default)]
    pub uses_scsi_reservation: Option<bool>,
    #[serde(default)]
    pub backup: Option<DiskBackup>,
    /// Direct LUN backing, if any
    #[serde(default)]
    pub lun_storage: Option<HostStorage>,
    #[serde(default)]
    pub propagate_errors: Option<bool>,
    #[serde(default)]
    pub wipe_after_delete: Option<bool>,
    #[serde(default)]
    pub status: Option<DiskStatus>,
    #[serde(default)]
    pub storage_type: Option<DiskStorageType>,
    #[serde(default)]
    pub sgio: Option<ScsiGenericIo>,
    #[serde(default)]
    pub storage_domain: Option<StorageDomainRef>,
    /// Provisioned size (bytes)
    #[serde(default)]
    pub provisioned_size: Option<i64>,
}

impl Disk {
    /// Name for messages, falling back to the ID
    pub fn display_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HostStorage {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "type")]
    pub storage_type: Option<String>,
}

/// Storage domain a disk lives on
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StorageDomainRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}
