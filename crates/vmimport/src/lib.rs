//! VM import validation engine
//!
//! Decides whether a source VM can be imported, and with which caveats.
//!
//! # Architecture
//!
//! - **Catalog**: `RuleCatalog` assigns a severity to every check
//! - **Classifier**: splits validator failures into log, warn and block buckets
//! - **Conditions**: folds the buckets into `StatusCondition`s
//! - **Services**: `ImportValidator` runs the validators for one request
//! - **Config**: YAML policy with severity overrides and known targets
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use vmimport::{ImportValidator, RuleCatalog};
//! use vmimport_ovirt::OvirtValidator;
//! use vmimport_types::{PermissiveTargets, RequestRef, ResourceMappings, VirtualMachine};
//!
//! let validator = ImportValidator::new(
//!     OvirtValidator::new(PermissiveTargets),
//!     Arc::new(RuleCatalog::with_defaults()),
//! );
//! let vm = VirtualMachine::from_yaml("id: vm-1").unwrap();
//! let conditions = validator.validate(
//!     &vm,
//!     &ResourceMappings::default(),
//!     &RequestRef::new("default", "import-vm-1"),
//! );
//! ```

pub mod catalog;
pub mod classifier;
pub mod conditions;
pub mod config;
pub mod services;

pub use catalog::{CatalogError, RuleCatalog};
pub use classifier::{classify, Classification};
pub use conditions::{aggregate, mapping_condition, rules_condition, MessageBuilder};
pub use config::{ConfiguredTargets, KnownTargets, TargetsConfig, ValidationConfig};
pub use services::{ImportValidator, ValidationServiceError, ValidationServiceResult};
