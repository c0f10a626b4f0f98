//! Validation issue type shared between the validator and the orchestrator.

use std::fmt;

use blockforge_core::InstanceId;
use serde::{Deserialize, Serialize};

/// How bad an issue is. The orchestrator routes `Error` into
/// `GenerationResult.errors` and `Warning` into `.warnings`.
///
/// No current rule emits `Error` — every data-quality problem is recoverable
/// by design — but the channel exists so the routing does not change when a
/// genuinely fatal rule appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// One finding from the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub message: String,
    /// The instance the issue points at, when there is a single one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_instance_id: Option<InstanceId>,
}

impl ValidationIssue {
    pub fn warning(message: impl Into<String>) -> Self {
        ValidationIssue {
            severity: Severity::Warning,
            message: message.into(),
            related_instance_id: None,
        }
    }

    pub fn warning_for(message: impl Into<String>, instance: InstanceId) -> Self {
        ValidationIssue {
            severity: Severity::Warning,
            message: message.into(),
            related_instance_id: Some(instance),
        }
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        match &self.related_instance_id {
            Some(id) => write!(f, "{}: {} [{}]", tag, self.message, id),
            None => write!(f, "{}: {}", tag, self.message),
        }
    }
}
