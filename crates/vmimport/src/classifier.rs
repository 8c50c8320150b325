//! Failure classification
//!
//! Routes every failure to exactly one severity bucket. Log-tier failures are
//! written to the log here, tagged with the request they belong to, and go no
//! further.

use tracing::{debug, info};
use vmimport_types::{RequestRef, Severity, ValidationFailure};

use crate::catalog::RuleCatalog;

/// Failures of one validation run, split by severity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub logged: Vec<ValidationFailure>,
    pub warned: Vec<ValidationFailure>,
    pub blocked: Vec<ValidationFailure>,
}

impl Classification {
    pub fn is_blocked(&self) -> bool {
        !self.blocked.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warned.is_empty()
    }

    pub fn total(&self) -> usize {
        self.logged.len() + self.warned.len() + self.blocked.len()
    }
}

/// Classify failures, preserving their production order within each bucket
pub fn classify(
    catalog: &RuleCatalog,
    failures: impl IntoIterator<Item = ValidationFailure>,
    request: &RequestRef,
) -> Classification {
    let mut classification = Classification::default();

    for failure in failures {
        match catalog.severity_of(failure.id) {
            Severity::Log => {
                info!(request = %request, check = %failure.id, "{}", failure.message);
                classification.logged.push(failure);
            }
            Severity::Warn => classification.warned.push(failure),
            Severity::Block => classification.blocked.push(failure),
        }
    }

    debug!(
        request = %request,
        logged = classification.logged.len(),
        warned = classification.warned.len(),
        blocked = classification.blocked.len(),
        "Classified validation failures"
    );

    classification
}

#[cfg(test)]
mod tests {
    use super::*;
    use vmimport_types::CheckId;

    fn failure(id: CheckId, message: &str) -> ValidationFailure {
        ValidationFailure::new(id, message)
    }

    #[test]
    fn test_every_failure_lands_in_its_catalog_bucket() {
        let catalog = RuleCatalog::with_defaults();
        let request = RequestRef::new("default", "import");
        let failures: Vec<ValidationFailure> = CheckId::ALL
            .iter()
            .map(|id| failure(*id, id.as_str()))
            .collect();

        let classification = classify(&catalog, failures.clone(), &request);

        assert_eq!(classification.total(), failures.len());
        for (bucket, severity) in [
            (&classification.logged, Severity::Log),
            (&classification.warned, Severity::Warn),
            (&classification.blocked, Severity::Block),
        ] {
            assert!(bucket.iter().all(|f| catalog.severity_of(f.id) == severity));
        }
    }

    #[test]
    fn test_order_is_preserved_within_buckets() {
        let catalog = RuleCatalog::with_defaults();
        let request = RequestRef::new("default", "import");

        let classification = classify(
            &catalog,
            vec![
                failure(CheckId::VmUsb, "usb"),
                failure(CheckId::NicPlugged, "plugged"),
                failure(CheckId::NicInterface, "interface"),
                failure(CheckId::NicOnBoot, "on boot"),
                failure(CheckId::DiskBackup, "backup"),
            ],
            &request,
        );

        let messages = |bucket: &[ValidationFailure]| -> Vec<String> {
            bucket.iter().map(|f| f.message.clone()).collect()
        };
        assert_eq!(messages(&classification.blocked), vec!["usb", "interface"]);
        assert_eq!(messages(&classification.warned), vec!["plugged", "backup"]);
        assert_eq!(messages(&classification.logged), vec!["on boot"]);
        assert!(classification.is_blocked());
    }

    #[test]
    fn test_overridden_catalog_changes_routing() {
        let catalog =
            RuleCatalog::with_defaults().with_overrides([(CheckId::VmUsb, Severity::Log)]);
        let request = RequestRef::new("default", "import");

        let classification = classify(&catalog, vec![failure(CheckId::VmUsb, "usb")], &request);

        assert!(!classification.is_blocked());
        assert_eq!(classification.logged.len(), 1);
    }
}
