//! Resource mapping configuration
//!
//! Associates source-side resources (networks, storage domains, disks) with
//! target-side resources. Lookup always tries the source ID first and falls
//! back to the source name; the first matching entry wins.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;

use crate::error::ImportResult;

/// Identifier of a source-side resource, by ID and/or by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MappingSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl MappingSource {
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: None,
        }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }

    /// Whether the source carries neither an ID nor a name
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.name.is_none()
    }

    /// Name for messages
    pub fn label(&self) -> String {
        match (&self.id, &self.name) {
            (Some(id), Some(name)) => format!("{} ({})", name, id),
            (Some(id), None) => id.clone(),
            (None, Some(name)) => name.clone(),
            (None, None) => "<empty>".to_string(),
        }
    }
}

/// Namespaced identifier of a target-side object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ObjectIdentifier {
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
}

impl ObjectIdentifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
        }
    }
}

source_enum! {
    /// Kind of target network
    NetworkTargetType {
        /// Cluster pod network
        Pod => "pod",
        /// Secondary network attachment
        Multus => "multus",
    }
}

/// One source to target association
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ResourceMappingItem {
    pub source: MappingSource,
    pub target: ObjectIdentifier,
    /// Target network type; only meaningful for network mappings and
    /// defaults to `pod` when absent
    #[serde(default, rename = "type")]
    pub target_type: Option<NetworkTargetType>,
}

impl ResourceMappingItem {
    pub fn new(source: MappingSource, target: ObjectIdentifier) -> Self {
        Self {
            source,
            target,
            target_type: None,
        }
    }

    pub fn with_type(mut self, target_type: NetworkTargetType) -> Self {
        self.target_type = Some(target_type);
        self
    }

    /// Effective network target type
    pub fn network_type(&self) -> NetworkTargetType {
        self.target_type.clone().unwrap_or(NetworkTargetType::Pod)
    }
}

/// Mapping configuration for one import request
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMappings {
    #[serde(default)]
    pub network_mappings: Vec<ResourceMappingItem>,
    /// Storage domain to storage class
    #[serde(default)]
    pub storage_mappings: Vec<ResourceMappingItem>,
    /// Per-disk overrides; take precedence over `storage_mappings`
    #[serde(default)]
    pub disk_mappings: Vec<ResourceMappingItem>,
}

impl ResourceMappings {
    /// Parse mappings from YAML
    pub fn from_yaml(yaml: &str) -> ImportResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse mappings from JSON
    pub fn from_json(json: &str) -> ImportResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Find the mapping for a source resource.
///
/// An exact ID match anywhere in the list takes precedence over a name match.
pub fn find_mapping<'a>(
    items: &'a [ResourceMappingItem],
    id: Option<&str>,
    name: Option<&str>,
) -> Option<&'a ResourceMappingItem> {
    find_mapping_index(items, id, name).map(|index| &items[index])
}

/// Position of the mapping `find_mapping` would return
pub fn find_mapping_index(
    items: &[ResourceMappingItem],
    id: Option<&str>,
    name: Option<&str>,
) -> Option<usize> {
    let by_id = id.and_then(|id| {
        items
            .iter()
            .position(|item| item.source.id.as_deref() == Some(id))
    });
    by_id.or_else(|| {
        name.and_then(|name| {
            items
                .iter()
                .position(|item| item.source.name.as_deref() == Some(name))
        })
    })
}

/// Source IDs and names that appear more than once, in first-repeat order
pub fn duplicate_sources(items: &[ResourceMappingItem]) -> Vec<String> {
    let mut seen_ids = HashSet::new();
    let mut seen_names = HashSet::new();
    let mut duplicates = Vec::new();

    for item in items {
        if let Some(id) = item.source.id.as_deref() {
            if !seen_ids.insert(id) && !duplicates.iter().any(|d: &String| d == id) {
                duplicates.push(id.to_string());
            }
        }
        if let Some(name) = item.source.name.as_deref() {
            if !seen_names.insert(name) && !duplicates.iter().any(|d: &String| d == name) {
                duplicates.push(name.to_string());
            }
        }
    }

    duplicates
}

/// Namespaced name of the import request a validation run belongs to.
///
/// Used to correlate log records; the namespace is also the default
/// namespace for network targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct RequestRef {
    pub namespace: String,
    pub name: String,
}

impl RequestRef {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for RequestRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(source: MappingSource, target: &str) -> ResourceMappingItem {
        ResourceMappingItem::new(source, ObjectIdentifier::new(target))
    }

    #[test]
    fn test_find_mapping_prefers_id_over_name() {
        let items = vec![
            item(MappingSource::by_name("red/red"), "by-name"),
            item(MappingSource::by_id("profile-1"), "by-id"),
        ];

        let found = find_mapping(&items, Some("profile-1"), Some("red/red")).unwrap();
        assert_eq!(found.target.name, "by-id");
    }

    #[test]
    fn test_find_mapping_falls_back_to_name() {
        let items = vec![item(MappingSource::by_name("red/red"), "by-name")];

        let found = find_mapping(&items, Some("profile-1"), Some("red/red")).unwrap();
        assert_eq!(found.target.name, "by-name");
        assert!(find_mapping(&items, Some("profile-1"), None).is_none());
    }

    #[test]
    fn test_find_mapping_first_match_wins() {
        let items = vec![
            item(MappingSource::by_id("sd-1"), "first"),
            item(MappingSource::by_id("sd-1"), "second"),
        ];

        let found = find_mapping(&items, Some("sd-1"), None).unwrap();
        assert_eq!(found.target.name, "first");
    }

    #[test]
    fn test_duplicate_sources_reported_once() {
        let items = vec![
            item(MappingSource::by_id("a"), "x"),
            item(MappingSource::by_id("a"), "y"),
            item(MappingSource::by_id("a"), "z"),
            item(MappingSource::by_name("b"), "x"),
        ];

        assert_eq!(duplicate_sources(&items), vec!["a".to_string()]);
    }

    #[test]
    fn test_network_type_defaults_to_pod() {
        let plain = item(MappingSource::by_id("a"), "x");
        assert_eq!(plain.network_type(), NetworkTargetType::Pod);

        let multus = plain.with_type(NetworkTargetType::Multus);
        assert_eq!(multus.network_type(), NetworkTargetType::Multus);
    }

    #[test]
    fn test_parse_mappings_yaml() {
        let yaml = r#"
networkMappings:
  - source: { name: red/red }
    target: { name: pod }
    type: pod
storageMappings:
  - source: { id: sd-1 }
    target: { name: gold }
diskMappings:
  - source: { id: disk-1 }
    target: { name: silver }
"#;
        let mappings = ResourceMappings::from_yaml(yaml).unwrap();

        assert_eq!(mappings.network_mappings.len(), 1);
        assert_eq!(
            mappings.network_mappings[0].target_type,
            Some(NetworkTargetType::Pod)
        );
        assert_eq!(mappings.storage_mappings[0].target.name, "gold");
        assert_eq!(mappings.disk_mappings[0].source.id.as_deref(), Some("disk-1"));
    }
}
