use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use vmimport::{ImportValidator, RuleCatalog};
use vmimport_ovirt::{resolve_storage_targets, OvirtValidator};
use vmimport_types::{PermissiveTargets, ResourceMappings, VirtualMachine};

use super::{load_document, OutputFormat};

/// Exit code when any disk is not ready
const EXIT_NOT_READY: i32 = 3;

#[derive(Args)]
pub struct DiskReadyCommand {
    /// VM descriptor (JSON or YAML)
    #[arg(long)]
    pub vm: PathBuf,

    /// Resource mappings; adds the resolved storage class of each disk
    #[arg(long)]
    pub mappings: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    pub output: OutputFormat,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskReadiness {
    pub attachment_id: String,
    pub disk_id: Option<String>,
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,
}

impl DiskReadyCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        let report = self.run()?;

        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Human => {
                for disk in &report {
                    let state = if disk.ready {
                        "ready".bright_green()
                    } else {
                        "not ready".bright_red()
                    };
                    println!(
                        "{:<38} {:<38} {:<10} {}",
                        disk.attachment_id,
                        disk.disk_id.as_deref().unwrap_or("-"),
                        state,
                        disk.storage_class.as_deref().unwrap_or("")
                    );
                }
            }
        }

        if report.iter().any(|disk| !disk.ready) {
            std::process::exit(EXIT_NOT_READY);
        }
        Ok(())
    }

    pub fn run(&self) -> anyhow::Result<Vec<DiskReadiness>> {
        let vm: VirtualMachine = load_document(&self.vm)?;
        let mappings: Option<ResourceMappings> = match &self.mappings {
            Some(path) => Some(load_document(path)?),
            None => None,
        };

        let validator = ImportValidator::new(
            OvirtValidator::new(PermissiveTargets),
            Arc::new(RuleCatalog::with_defaults()),
        );
        let resolved = mappings
            .map(|m| {
                resolve_storage_targets(&vm.disk_attachments, &m.storage_mappings, &m.disk_mappings)
            })
            .unwrap_or_default();

        Ok(vm
            .disk_attachments
            .iter()
            .map(|attachment| DiskReadiness {
                attachment_id: attachment.id.clone(),
                disk_id: attachment.disk.as_ref().map(|disk| disk.id.clone()),
                ready: validator.is_disk_ready(attachment),
                storage_class: resolved
                    .iter()
                    .find(|target| target.attachment_id == attachment.id)
                    .and_then(|target| target.storage_class.clone()),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readiness_per_attachment() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let vm = dir.path().join("vm.yaml");
        std::fs::write(
            &vm,
            r#"
id: vm-1
diskAttachments:
  - id: a1
    disk: { id: d1, status: ok, storageDomain: { id: sd-1 } }
  - id: a2
    disk: { id: d2, status: locked }
  - id: a3
"#,
        )
        .unwrap();
        let mappings = dir.path().join("mappings.yaml");
        std::fs::write(
            &mappings,
            "storageMappings:\n  - source: { id: sd-1 }\n    target: { name: gold }\n",
        )
        .unwrap();
        let cmd = DiskReadyCommand {
            vm,
            mappings: Some(mappings),
            output: OutputFormat::Json,
        };

        // Act
        let report = cmd.run().unwrap();

        // Assert
        let ready: Vec<bool> = report.iter().map(|d| d.ready).collect();
        assert_eq!(ready, vec![true, false, false]);
        assert_eq!(report[0].storage_class.as_deref(), Some("gold"));
        assert_eq!(report[2].disk_id, None);
    }
}
