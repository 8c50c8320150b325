//! Core types and traits for the VM import validation engine
//!
//! This crate provides the foundational abstractions for deciding whether a
//! virtual machine from a source virtualization platform can be imported
//! into the target platform.
//!
//! # Architecture
//!
//! - **Descriptors**: `VirtualMachine`, `Nic`, `DiskAttachment` describe the source VM
//! - **Mappings**: `ResourceMappings` associate source networks/storage/disks with targets
//! - **Checks**: `CheckId`, `Severity` and `ValidationFailure` describe detected problems
//! - **Conditions**: `StatusCondition` is the externally visible verdict
//! - **Traits**: one narrow validator trait per subject (VM, NIC, disk, network and
//!   storage mappings) plus `TargetCatalog` for target-side lookups
//! - **Errors**: Unified error handling across the workspace
//! - **Schema**: `schema::document()` is the OpenAPI description of the documents above
//!
//! # Usage
//!
//! Validator implementations (e.g., `vmimport-ovirt`) depend on this crate and
//! implement the validator traits.

#[macro_use]
mod macros;

pub mod check;
pub mod condition;
pub mod disk;
pub mod document;
pub mod error;
pub mod mapping;
pub mod nic;
pub mod schema;
pub mod validator;
pub mod vm;

pub use check::{CheckId, Severity, ValidationFailure};
pub use condition::{ConditionReason, ConditionStatus, ConditionType, StatusCondition};
pub use disk::{
    Disk, DiskAttachment, DiskBackup, DiskInterface, DiskStatus, DiskStorageType, HostStorage,
    ScsiGenericIo, StorageDomainRef,
};
pub use document::DocumentFormat;
pub use error::{ImportError, ImportResult};
pub use mapping::{
    MappingSource, NetworkTargetType, ObjectIdentifier, RequestRef, ResourceMappingItem,
    ResourceMappings,
};
pub use nic::{NamedRef, Nic, NicInterface, VnicProfile};
pub use validator::{
    DiskAttachmentValidator, NetworkMappingValidator, NicValidator, PermissiveTargets,
    StorageMappingValidator, TargetCatalog, VmValidator,
};
pub use vm::{
    Architecture, Bios, BiosType, Cpu, CpuTune, CustomProperty, DisplayType, GraphicsConsole,
    GraphicsType, HighAvailability, InheritableBoolean, Io, MemoryPolicy, MigrationOptions,
    NumaTuneMode, PlacementPolicy, RemovableMedia, RngDevice, RngSource, TimeZone, Usb, VcpuPin,
    VirtualMachine, VmAffinity, VmStatus, Watchdog, WatchdogModel,
};
