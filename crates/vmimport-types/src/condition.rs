//! Status conditions published for an import request

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Which aspect of the request a condition describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ConditionType {
    /// Resource mappings are complete and consistent
    Valid,
    /// VM, NIC and disk structural checks passed
    MappingRulesVerified,
}

/// Machine-readable cause of a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ConditionReason {
    IncompleteMappingRules,
    ValidationReportedWarnings,
    ValidationCompleted,
    MappingRulesVerificationFailed,
    MappingRulesVerificationReportedWarnings,
    MappingRulesVerificationCompleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ConditionStatus {
    True,
    False,
}

impl ConditionStatus {
    pub fn is_true(&self) -> bool {
        matches!(self, ConditionStatus::True)
    }
}

/// Externally visible verdict for one condition type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusCondition {
    #[serde(rename = "type")]
    pub condition_type: ConditionType,
    pub status: ConditionStatus,
    pub reason: ConditionReason,
    pub message: String,
}

impl StatusCondition {
    pub fn new(
        condition_type: ConditionType,
        status: ConditionStatus,
        reason: ConditionReason,
        message: impl Into<String>,
    ) -> Self {
        Self {
            condition_type,
            status,
            reason,
            message: message.into(),
        }
    }

    /// Whether this condition stops the import
    pub fn is_blocking(&self) -> bool {
        !self.status.is_true()
    }
}
