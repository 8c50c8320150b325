//! Condition aggregation
//!
//! Turns a classification into a `StatusCondition`. Blocking failures win
//! outright: when any exist, warnings of the same run are left out of the
//! message.

use vmimport_types::{
    ConditionReason, ConditionStatus, ConditionType, StatusCondition, ValidationFailure,
};

use crate::classifier::Classification;

/// Separator between failure messages
pub const MESSAGE_SEPARATOR: &str = ", ";

/// Ordered message concatenation.
///
/// The zero value is the empty string; the separator only ever goes between
/// two appended messages.
#[derive(Debug, Clone, Default)]
pub struct MessageBuilder {
    message: String,
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, text: &str) -> &mut Self {
        if !self.message.is_empty() {
            self.message.push_str(MESSAGE_SEPARATOR);
        }
        self.message.push_str(text);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.message.is_empty()
    }

    pub fn build(self) -> String {
        self.message
    }
}

impl<'a> FromIterator<&'a ValidationFailure> for MessageBuilder {
    fn from_iter<I: IntoIterator<Item = &'a ValidationFailure>>(iter: I) -> Self {
        let mut builder = MessageBuilder::new();
        for failure in iter {
            builder.append(&failure.message);
        }
        builder
    }
}

/// Concatenated messages of the warn and block buckets, as
/// `(warn_message, error_message)`
pub fn aggregate(blocked: &[ValidationFailure], warned: &[ValidationFailure]) -> (String, String) {
    let warn_message = warned.iter().collect::<MessageBuilder>().build();
    let error_message = blocked.iter().collect::<MessageBuilder>().build();
    (warn_message, error_message)
}

/// Reasons and success text of one condition type
struct ConditionReasons {
    condition_type: ConditionType,
    failed: ConditionReason,
    warned: ConditionReason,
    completed: ConditionReason,
    success_message: &'static str,
}

const MAPPING_REASONS: ConditionReasons = ConditionReasons {
    condition_type: ConditionType::Valid,
    failed: ConditionReason::IncompleteMappingRules,
    warned: ConditionReason::ValidationReportedWarnings,
    completed: ConditionReason::ValidationCompleted,
    success_message: "Validation completed successfully",
};

const RULES_REASONS: ConditionReasons = ConditionReasons {
    condition_type: ConditionType::MappingRulesVerified,
    failed: ConditionReason::MappingRulesVerificationFailed,
    warned: ConditionReason::MappingRulesVerificationReportedWarnings,
    completed: ConditionReason::MappingRulesVerificationCompleted,
    success_message: "All mapping rules checks passed",
};

/// `Valid` condition from the mapping validators' failures
pub fn mapping_condition(classification: &Classification) -> StatusCondition {
    build_condition(&MAPPING_REASONS, classification)
}

/// `MappingRulesVerified` condition from the VM, NIC and disk failures
pub fn rules_condition(classification: &Classification) -> StatusCondition {
    build_condition(&RULES_REASONS, classification)
}

fn build_condition(reasons: &ConditionReasons, classification: &Classification) -> StatusCondition {
    let (warn_message, error_message) =
        aggregate(&classification.blocked, &classification.warned);

    if classification.is_blocked() {
        StatusCondition::new(
            reasons.condition_type,
            ConditionStatus::False,
            reasons.failed,
            error_message,
        )
    } else if classification.has_warnings() {
        StatusCondition::new(
            reasons.condition_type,
            ConditionStatus::True,
            reasons.warned,
            warn_message,
        )
    } else {
        StatusCondition::new(
            reasons.condition_type,
            ConditionStatus::True,
            reasons.completed,
            reasons.success_message,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vmimport_types::CheckId;

    fn failure(id: CheckId, message: &str) -> ValidationFailure {
        ValidationFailure::new(id, message)
    }

    #[test]
    fn test_message_builder_separator() {
        assert_eq!(MessageBuilder::new().build(), "");

        let mut builder = MessageBuilder::new();
        builder.append("first");
        assert_eq!(builder.clone().build(), "first");

        builder.append("second").append("third");
        assert_eq!(builder.build(), "first, second, third");
    }

    #[test]
    fn test_aggregate_keeps_buckets_apart() {
        let blocked = vec![failure(CheckId::VmUsb, "usb"), failure(CheckId::VmOrigin, "origin")];
        let warned = vec![failure(CheckId::NicPlugged, "plugged")];

        let (warn_message, error_message) = aggregate(&blocked, &warned);

        assert_eq!(warn_message, "plugged");
        assert_eq!(error_message, "usb, origin");
        assert_eq!(aggregate(&[], &[]), (String::new(), String::new()));
    }

    #[test]
    fn test_block_suppresses_warnings() {
        let classification = Classification {
            logged: vec![failure(CheckId::NicOnBoot, "on boot")],
            warned: vec![failure(CheckId::NicPlugged, "plugged")],
            blocked: vec![failure(CheckId::NicInterface, "interface")],
        };

        let condition = rules_condition(&classification);

        assert_eq!(condition.condition_type, ConditionType::MappingRulesVerified);
        assert_eq!(condition.status, ConditionStatus::False);
        assert_eq!(condition.reason, ConditionReason::MappingRulesVerificationFailed);
        assert_eq!(condition.message, "interface");
    }

    #[test]
    fn test_warnings_keep_condition_true() {
        let classification = Classification {
            warned: vec![
                failure(CheckId::StorageTargetDefaultClass, "disk a"),
                failure(CheckId::StorageTargetDefaultClass, "disk b"),
            ],
            ..Default::default()
        };

        let condition = mapping_condition(&classification);

        assert_eq!(condition.condition_type, ConditionType::Valid);
        assert_eq!(condition.status, ConditionStatus::True);
        assert_eq!(condition.reason, ConditionReason::ValidationReportedWarnings);
        assert_eq!(condition.message, "disk a, disk b");
    }

    #[test]
    fn test_logged_failures_do_not_affect_success() {
        let classification = Classification {
            logged: vec![failure(CheckId::VmCdroms, "cdrom")],
            ..Default::default()
        };

        let mapping = mapping_condition(&classification);
        let rules = rules_condition(&classification);

        assert_eq!(mapping.reason, ConditionReason::ValidationCompleted);
        assert_eq!(mapping.message, "Validation completed successfully");
        assert_eq!(rules.reason, ConditionReason::MappingRulesVerificationCompleted);
        assert_eq!(rules.message, "All mapping rules checks passed");
        assert!(rules.status.is_true());
    }
}
