use anyhow::Context;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use tracing::{debug, info};
use uuid::Uuid;
use vmimport_types::{RequestRef, ResourceMappings, StatusCondition, VirtualMachine};

use super::{load_document, load_policy, OutputFormat};

/// Exit code when a condition is False
const EXIT_BLOCKED: i32 = 2;

#[derive(Args)]
pub struct ValidateCommand {
    /// VM descriptor (JSON or YAML)
    #[arg(long)]
    pub vm: PathBuf,

    /// Resource mappings (JSON or YAML); no mappings when omitted
    #[arg(long)]
    pub mappings: Option<PathBuf>,

    /// Validation policy file
    #[arg(long, env = "VMIMPORT_POLICY")]
    pub policy: Option<PathBuf>,

    /// Namespace of the import request; default namespace for network targets
    #[arg(long, default_value = "default")]
    pub namespace: String,

    /// Name of the import request; generated when omitted
    #[arg(long)]
    pub name: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    pub output: OutputFormat,
}

impl ValidateCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        let conditions = self.run()?;

        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&conditions)?),
            OutputFormat::Human => print_conditions(&conditions),
        }

        if conditions.iter().any(StatusCondition::is_blocking) {
            std::process::exit(EXIT_BLOCKED);
        }
        Ok(())
    }

    /// Validate without printing
    pub fn run(&self) -> anyhow::Result<Vec<StatusCondition>> {
        let config = load_policy(self.policy.as_deref())?;
        let validator = config
            .build_validator()
            .context("Failed to set up validation")?;

        let vm: VirtualMachine = load_document(&self.vm)?;
        let mappings: ResourceMappings = match &self.mappings {
            Some(path) => load_document(path)?,
            None => ResourceMappings::default(),
        };

        let request = RequestRef::new(self.namespace.clone(), self.request_name());
        debug!(request = %request, vm = %self.vm.display(), "Loaded import request");

        let conditions = validator.validate(&vm, &mappings, &request);
        info!(
            request = %request,
            blocked = conditions.iter().filter(|c| c.is_blocking()).count(),
            "Validation finished"
        );
        Ok(conditions)
    }

    fn request_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("import-{}", Uuid::new_v4()))
    }
}

fn print_conditions(conditions: &[StatusCondition]) {
    println!();
    for condition in conditions {
        println!("{}", render_condition(condition));
        println!();
    }
}

/// Header line plus the condition message, kept whole
fn render_condition(condition: &StatusCondition) -> String {
    let status = if condition.status.is_true() {
        "True".bright_green()
    } else {
        "False".bright_red()
    };
    format!(
        "{} {} ({:?})\n   {}",
        format!("{:?}", condition.condition_type).bright_white().bold(),
        status,
        condition.reason,
        condition.message
    )
}
