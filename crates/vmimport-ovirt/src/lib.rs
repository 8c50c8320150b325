//! oVirt source validators
//!
//! Implements the validator traits from `vmimport-types` for virtual machines
//! exported from oVirt / RHV. Rules live in one module per subject; the
//! `OvirtValidator` type wires them to the trait seams.

pub mod disk;
pub mod network_mapping;
pub mod nic;
pub mod storage_mapping;
pub mod validator;
pub mod vm;

/// Separator for names listed inside a single failure message
///
/// Never `", "`: that separator is reserved for joining whole failures into a
/// condition message.
pub const LIST_SEPARATOR: &str = "; ";

pub(crate) fn join_labels<'a>(labels: impl IntoIterator<Item = &'a str>) -> String {
    labels.into_iter().collect::<Vec<_>>().join(LIST_SEPARATOR)
}

pub use storage_mapping::{resolve_storage_targets, ResolvedStorageTarget, StorageTargetOrigin};
pub use validator::OvirtValidator;
