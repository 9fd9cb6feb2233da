//! Validation issues - single report entries attributed to a content node.

use serde::{Deserialize, Serialize};

use content_model::NodeId;

/// How serious an issue is. Only errors fail a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The validator pass that produced an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueCategory {
    Reference,
    Orphan,
    DeadEnd,
    Reachability,
}

impl IssueCategory {
    /// All categories in report order.
    pub const ALL: [IssueCategory; 4] = [
        IssueCategory::Reference,
        IssueCategory::Orphan,
        IssueCategory::DeadEnd,
        IssueCategory::Reachability,
    ];

    /// Section heading used in reports.
    pub fn title(&self) -> &'static str {
        match self {
            IssueCategory::Reference => "Reference Validation",
            IssueCategory::Orphan => "Orphan Detection",
            IssueCategory::DeadEnd => "Dead End Detection",
            IssueCategory::Reachability => "Reachability Analysis",
        }
    }
}

/// A single finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub severity: Severity,
    pub message: String,
    /// Node the issue is attributed to.
    pub node_id: NodeId,
}

impl Issue {
    pub fn new(severity: Severity, message: impl Into<String>, node_id: impl Into<NodeId>) -> Self {
        Self {
            severity,
            message: message.into(),
            node_id: node_id.into(),
        }
    }

    pub fn error(message: impl Into<String>, node_id: impl Into<NodeId>) -> Self {
        Self::new(Severity::Error, message, node_id)
    }

    pub fn warning(message: impl Into<String>, node_id: impl Into<NodeId>) -> Self {
        Self::new(Severity::Warning, message, node_id)
    }

    pub fn info(message: impl Into<String>, node_id: impl Into<NodeId>) -> Self {
        Self::new(Severity::Info, message, node_id)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
