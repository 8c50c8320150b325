use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;
use vmimport::RuleCatalog;
use vmimport_types::{CheckId, Severity};

use super::{load_policy, OutputFormat};

#[derive(Args)]
pub struct CatalogCommand {
    /// Validation policy file
    #[arg(long, env = "VMIMPORT_POLICY")]
    pub policy: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    pub output: OutputFormat,
}

#[derive(Debug, Serialize)]
pub struct CatalogEntry {
    pub check: CheckId,
    pub severity: Severity,
    /// Whether the policy changed the built-in severity
    pub overridden: bool,
}

impl CatalogCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        let entries = self.run()?;

        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
            OutputFormat::Human => {
                for entry in &entries {
                    let severity = match entry.severity {
                        Severity::Block => entry.severity.as_str().bright_red(),
                        Severity::Warn => entry.severity.as_str().bright_yellow(),
                        Severity::Log => entry.severity.as_str().normal(),
                    };
                    let marker = if entry.overridden { " *" } else { "" };
                    println!("{:<45} {}{}", entry.check.as_str(), severity, marker);
                }
            }
        }
        Ok(())
    }

    pub fn run(&self) -> anyhow::Result<Vec<CatalogEntry>> {
        let catalog = load_policy(self.policy.as_deref())?.catalog()?;
        let defaults = RuleCatalog::with_defaults();

        Ok(catalog
            .entries()
            .map(|(check, severity)| CatalogEntry {
                check,
                severity,
                overridden: defaults.severity_of(check) != severity,
            })
            .collect())
    }
}
