//! Validation policy file
//!
//! A YAML document that tunes the engine for one deployment:
//!
//! ```yaml
//! severities:
//!   vm.usb.enabled: warn
//! targets:
//!   storageClasses: [gold, silver]
//!   networks: [default/ovn-net]
//! ```
//!
//! Without `targets`, every mapping target is assumed to exist.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;
use vmimport_ovirt::OvirtValidator;
use vmimport_types::{CheckId, ImportError, PermissiveTargets, Severity, TargetCatalog};

use crate::catalog::RuleCatalog;
use crate::services::{ImportValidator, ValidationServiceResult};

/// Complete structure of a policy file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationConfig {
    /// Start from the built-in severities. When false, `severities` must
    /// list every check.
    #[serde(default = "default_inherit_defaults")]
    pub inherit_defaults: bool,

    /// Per-check severity
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub severities: BTreeMap<CheckId, Severity>,

    /// Target-side resources known to exist
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<TargetsConfig>,
}

fn default_inherit_defaults() -> bool {
    true
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            inherit_defaults: true,
            severities: BTreeMap::new(),
            targets: None,
        }
    }
}

/// Target platform inventory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetsConfig {
    #[serde(default)]
    pub storage_classes: Vec<String>,
    /// Network attachments as `namespace/name`
    #[serde(default)]
    pub networks: Vec<String>,
}

impl ValidationConfig {
    /// Parse a policy from YAML
    pub fn from_yaml(yaml: &str) -> ValidationServiceResult<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(ImportError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a policy file
    pub fn from_file(path: &Path) -> ValidationServiceResult<Self> {
        let content = std::fs::read_to_string(path).map_err(ImportError::from)?;
        debug!(path = %path.display(), "Loaded validation policy");
        Self::from_yaml(&content)
    }

    /// Serialize the policy back to YAML
    pub fn to_yaml(&self) -> ValidationServiceResult<String> {
        Ok(serde_yaml::to_string(self).map_err(ImportError::from)?)
    }

    fn validate(&self) -> ValidationServiceResult<()> {
        if let Some(targets) = &self.targets {
            for network in &targets.networks {
                parse_network(network)?;
            }
        }
        Ok(())
    }

    /// The rule catalog this policy describes
    pub fn catalog(&self) -> ValidationServiceResult<RuleCatalog> {
        if self.inherit_defaults {
            return Ok(RuleCatalog::with_defaults()
                .with_overrides(self.severities.iter().map(|(id, sev)| (*id, *sev))));
        }

        let entries: HashMap<CheckId, Severity> =
            self.severities.iter().map(|(id, sev)| (*id, *sev)).collect();
        Ok(RuleCatalog::from_entries(&entries)?)
    }

    /// Target lookups for the mapping validators
    pub fn target_catalog(&self) -> ValidationServiceResult<ConfiguredTargets> {
        match &self.targets {
            None => Ok(ConfiguredTargets::Permissive(PermissiveTargets)),
            Some(targets) => Ok(ConfiguredTargets::Known(KnownTargets::from_config(targets)?)),
        }
    }

    /// Build an oVirt validator wired to this policy
    pub fn build_validator(
        &self,
    ) -> ValidationServiceResult<ImportValidator<OvirtValidator<ConfiguredTargets>>> {
        let catalog = Arc::new(self.catalog()?);
        let targets = self.target_catalog()?;
        Ok(ImportValidator::new(OvirtValidator::new(targets), catalog))
    }
}

fn parse_network(entry: &str) -> ValidationServiceResult<(String, String)> {
    match entry.split_once('/') {
        Some((namespace, name)) if !namespace.is_empty() && !name.is_empty() => {
            Ok((namespace.to_string(), name.to_string()))
        }
        _ => Err(ImportError::InvalidConfiguration(format!(
            "network target '{}' must have the form namespace/name",
            entry
        ))
        .into()),
    }
}

/// Fixed inventory of target resources
#[derive(Debug, Clone, Default)]
pub struct KnownTargets {
    storage_classes: HashSet<String>,
    networks: HashSet<(String, String)>,
}

impl KnownTargets {
    pub fn from_config(config: &TargetsConfig) -> ValidationServiceResult<Self> {
        let networks = config
            .networks
            .iter()
            .map(|entry| parse_network(entry))
            .collect::<ValidationServiceResult<HashSet<_>>>()?;
        Ok(Self {
            storage_classes: config.storage_classes.iter().cloned().collect(),
            networks,
        })
    }
}

impl TargetCatalog for KnownTargets {
    fn network_exists(&self, namespace: &str, name: &str) -> bool {
        self.networks
            .contains(&(namespace.to_string(), name.to_string()))
    }

    fn storage_class_exists(&self, name: &str) -> bool {
        self.storage_classes.contains(name)
    }
}

/// Target lookups selected by a policy file
#[derive(Debug, Clone)]
pub enum ConfiguredTargets {
    Permissive(PermissiveTargets),
    Known(KnownTargets),
}

impl TargetCatalog for ConfiguredTargets {
    fn network_exists(&self, namespace: &str, name: &str) -> bool {
        match self {
            ConfiguredTargets::Permissive(targets) => targets.network_exists(namespace, name),
            ConfiguredTargets::Known(targets) => targets.network_exists(namespace, name),
        }
    }

    fn storage_class_exists(&self, name: &str) -> bool {
        match self {
            ConfiguredTargets::Permissive(targets) => targets.storage_class_exists(name),
            ConfiguredTargets::Known(targets) => targets.storage_class_exists(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogError;
    use crate::services::ValidationServiceError;

    #[test]
    fn test_empty_policy_uses_defaults() {
        let config = ValidationConfig::from_yaml("{}").unwrap();

        assert!(config.inherit_defaults);
        assert_eq!(config.catalog().unwrap(), RuleCatalog::with_defaults());
        assert!(matches!(
            config.target_catalog().unwrap(),
            ConfiguredTargets::Permissive(_)
        ));
    }

    #[test]
    fn test_severity_overrides() {
        let yaml = r#"
severities:
  vm.usb.enabled: warn
  nic.on_boot: block
"#;
        let catalog = ValidationConfig::from_yaml(yaml).unwrap().catalog().unwrap();

        assert_eq!(catalog.severity_of(CheckId::VmUsb), Severity::Warn);
        assert_eq!(catalog.severity_of(CheckId::NicOnBoot), Severity::Block);
        assert_eq!(catalog.severity_of(CheckId::VmWatchdogs), Severity::Block);
    }

    #[test]
    fn test_unknown_check_is_rejected() {
        let yaml = "severities:\n  vm.teleport: warn\n";

        let result = ValidationConfig::from_yaml(yaml);
        assert!(matches!(result, Err(ValidationServiceError::Import(_))));
    }

    #[test]
    fn test_standalone_catalog_must_be_complete() {
        let yaml = "inheritDefaults: false\nseverities:\n  vm.usb.enabled: warn\n";
        let config = ValidationConfig::from_yaml(yaml).unwrap();

        match config.catalog() {
            Err(ValidationServiceError::Catalog(CatalogError::Incomplete { missing })) => {
                assert_eq!(missing.len(), CheckId::COUNT - 1);
                assert!(!missing.contains(&CheckId::VmUsb));
            }
            other => panic!("expected incomplete catalog, got {:?}", other),
        }
    }

    #[test]
    fn test_known_targets() {
        let yaml = r#"
targets:
  storageClasses: [gold, silver]
  networks: [default/ovn-net]
"#;
        let targets = ValidationConfig::from_yaml(yaml)
            .unwrap()
            .target_catalog()
            .unwrap();

        assert!(targets.storage_class_exists("gold"));
        assert!(!targets.storage_class_exists("bronze"));
        assert!(targets.network_exists("default", "ovn-net"));
        assert!(!targets.network_exists("other", "ovn-net"));
    }

    #[test]
    fn test_malformed_network_target() {
        let yaml = "targets:\n  networks: [ovn-net]\n";

        let err = ValidationConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("namespace/name"));
    }

    #[test]
    fn test_round_trip_through_yaml() {
        let mut config = ValidationConfig::default();
        config.severities.insert(CheckId::VmUsb, Severity::Log);

        let yaml = config.to_yaml().unwrap();
        let parsed = ValidationConfig::from_yaml(&yaml).unwrap();

        assert_eq!(parsed.severities, config.severities);
        assert!(parsed.inherit_defaults);
    }
}
