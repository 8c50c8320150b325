pub mod catalog;
pub mod disk_ready;
pub mod schema;
pub mod validate;

pub use catalog::CatalogCommand;
pub use disk_ready::DiskReadyCommand;
pub use schema::SchemaCommand;
pub use validate::ValidateCommand;

use anyhow::Context;
use clap::ValueEnum;
use serde::de::DeserializeOwned;
use std::path::Path;
use vmimport::ValidationConfig;

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Read a JSON or YAML document, chosen by extension
pub fn load_document<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    vmimport_types::document::load(path)
        .with_context(|| format!("Failed to load {}", path.display()))
}

/// Load the policy file, or the built-in policy when none is given
pub fn load_policy(path: Option<&Path>) -> anyhow::Result<ValidationConfig> {
    match path {
        Some(path) => ValidationConfig::from_file(path)
            .with_context(|| format!("Invalid policy file {}", path.display())),
        None => Ok(ValidationConfig::default()),
    }
}
