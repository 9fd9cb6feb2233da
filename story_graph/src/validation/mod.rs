//! Validators - independent, read-only passes over a content registry.
//!
//! Each pass is a full traversal with no shared state:
//! - **references**: choice actions that name no node
//! - **orphans**: nodes nothing links to
//! - **dead_ends**: choiceless nodes that don't look like endings
//! - **reachability**: nodes with no path from an entry point
//!
//! Nothing here fails. Every finding becomes an [`Issue`] so one run yields a
//! complete report.

mod dead_ends;
mod issue;
mod orphans;
mod reachability;
mod references;

pub use dead_ends::*;
pub use issue::*;
pub use orphans::*;
pub use reachability::*;
pub use references::*;

use serde::{Deserialize, Serialize};

use content_model::{ContentRegistry, GraphConfig};

/// A single validation pass.
pub trait ValidationPass {
    /// The report section this pass fills.
    fn category(&self) -> IssueCategory;

    /// Run the pass. Must not depend on any other pass.
    fn run(&self, registry: &ContentRegistry, config: &GraphConfig) -> Vec<Issue>;
}

/// Issues from all four passes, grouped by category.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub reference_validation: Vec<Issue>,
    pub orphan_detection: Vec<Issue>,
    pub dead_end_detection: Vec<Issue>,
    pub reachability_analysis: Vec<Issue>,
}

impl ValidationReport {
    /// Issues recorded for a category.
    pub fn issues(&self, category: IssueCategory) -> &[Issue] {
        match category {
            IssueCategory::Reference => &self.reference_validation,
            IssueCategory::Orphan => &self.orphan_detection,
            IssueCategory::DeadEnd => &self.dead_end_detection,
            IssueCategory::Reachability => &self.reachability_analysis,
        }
    }

    fn issues_mut(&mut self, category: IssueCategory) -> &mut Vec<Issue> {
        match category {
            IssueCategory::Reference => &mut self.reference_validation,
            IssueCategory::Orphan => &mut self.orphan_detection,
            IssueCategory::DeadEnd => &mut self.dead_end_detection,
            IssueCategory::Reachability => &mut self.reachability_analysis,
        }
    }

    /// Iterate over every issue in report order.
    pub fn all_issues(&self) -> impl Iterator<Item = &Issue> {
        IssueCategory::ALL
            .into_iter()
            .flat_map(move |category| self.issues(category).iter())
    }

    /// Count issues of a given severity across all categories.
    pub fn count(&self, severity: Severity) -> usize {
        self.all_issues().filter(|i| i.severity == severity).count()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn info_count(&self) -> usize {
        self.count(Severity::Info)
    }

    pub fn has_errors(&self) -> bool {
        self.all_issues().any(Issue::is_error)
    }

    /// Process exit status for this report: 1 if any error exists, else 0.
    pub fn exit_code(&self) -> u8 {
        if self.has_errors() {
            1
        } else {
            0
        }
    }
}

/// Runs the validation passes over a registry.
pub struct Validator<'a> {
    config: &'a GraphConfig,
    passes: Vec<Box<dyn ValidationPass>>,
}

impl<'a> Validator<'a> {
    /// Create a validator running all four standard passes.
    pub fn new(config: &'a GraphConfig) -> Self {
        Self {
            config,
            passes: vec![
                Box::new(ReferenceValidator),
                Box::new(OrphanDetector),
                Box::new(DeadEndDetector),
                Box::new(ReachabilityAnalyzer),
            ],
        }
    }

    /// Run every pass and collect the report.
    pub fn validate(&self, registry: &ContentRegistry) -> ValidationReport {
        let mut report = ValidationReport::default();

        for pass in &self.passes {
            let issues = pass.run(registry, self.config);
            tracing::debug!(
                category = pass.category().title(),
                issues = issues.len(),
                "validation pass complete"
            );
            report.issues_mut(pass.category()).extend(issues);
        }

        report
    }
}

/// Validate a registry with all four standard passes.
pub fn validate(registry: &ContentRegistry, config: &GraphConfig) -> ValidationReport {
    Validator::new(config).validate(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use content_model::StoryContent;

    /// welcome → a → b, plus an unlinked orphan.
    fn scenario_a() -> ContentRegistry {
        ContentRegistry::new()
            .with_node("welcome", StoryContent::new("Welcome", "").with_choice("a", "a"))
            .unwrap()
            .with_node("a", StoryContent::new("A", "").with_choice("b", "b"))
            .unwrap()
            .with_node("b", StoryContent::new("B", ""))
            .unwrap()
            .with_node("orphan", StoryContent::new("Orphan", ""))
            .unwrap()
    }

    fn ids(issues: &[Issue]) -> Vec<&str> {
        issues.iter().map(|i| i.node_id.as_str()).collect()
    }

    #[test]
    fn test_scenario_a() {
        let report = validate(&scenario_a(), &GraphConfig::default());

        assert!(report.reference_validation.is_empty());
        assert_eq!(ids(&report.orphan_detection), vec!["orphan"]);
        assert_eq!(ids(&report.reachability_analysis), vec!["orphan"]);
        assert_eq!(ids(&report.dead_end_detection), vec!["b", "orphan"]);
        assert!(!report.has_errors());
        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.warning_count(), 4);
    }

    #[test]
    fn test_scenario_a_ending_exemption() {
        let registry = ContentRegistry::new()
            .with_node("welcome", StoryContent::new("Welcome", "").with_choice("a", "a"))
            .unwrap()
            .with_node("a", StoryContent::new("A", "").with_choice("end", "b_ending"))
            .unwrap()
            .with_node("b_ending", StoryContent::new("B", ""))
            .unwrap();

        let report = validate(&registry, &GraphConfig::default());
        assert!(report.dead_end_detection.is_empty());
    }

    #[test]
    fn test_scenario_c_error_sets_exit_code() {
        let registry = ContentRegistry::new()
            .with_node("welcome", StoryContent::new("Welcome", "").with_choice("boo", "ghost"))
            .unwrap();

        let report = validate(&registry, &GraphConfig::default());
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.reference_validation[0].node_id.as_str(), "welcome");
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_self_reference_does_not_block_other_passes() {
        let registry = ContentRegistry::new()
            .with_node("welcome", StoryContent::new("W", "").with_choice("again", "welcome"))
            .unwrap()
            .with_node("loop", StoryContent::new("L", "").with_choice("again", "loop"))
            .unwrap();

        let report = validate(&registry, &GraphConfig::default());
        assert!(report.orphan_detection.is_empty());
        assert_eq!(ids(&report.reachability_analysis), vec!["loop"]);
    }

    #[test]
    fn test_all_issues_in_category_order() {
        let report = validate(&scenario_a(), &GraphConfig::default());
        let first = report.all_issues().next().unwrap();
        assert_eq!(first.message, "Orphaned content 'orphan' - nothing links to this node");
        assert_eq!(report.issues(IssueCategory::DeadEnd).len(), 2);
    }

    #[test]
    fn test_sample_manifest_is_clean() {
        let manifest =
            content_model::StoryManifest::from_toml_str(include_str!("../../../content/primer.toml"))
                .unwrap();
        let report = validate(&manifest.registry, &manifest.config);

        assert_eq!(report.error_count(), 0);
        assert_eq!(report.warning_count(), 0);
        assert_eq!(report.info_count(), 3);
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_authored_entry_is_never_orphaned() {
        let source = r#"
[nodes.welcome]
title = "Welcome"
content = "Hi"
choices = [{ text = "Go", action = "a" }]

[nodes.a]
title = "A"
content = "Middle"
choices = [{ text = "Home", action = "welcome" }]

[nodes.intro]
title = "Intro"
content = "Another way in"
kind = "entry"
choices = [{ text = "Go", action = "a" }]
"#;
        let manifest = content_model::StoryManifest::from_toml_str(source).unwrap();
        let report = validate(&manifest.registry, &manifest.config);

        assert!(report.orphan_detection.is_empty());
        assert!(report.reachability_analysis.is_empty());
        assert_eq!(report.exit_code(), 0);

        let metrics = crate::analytics::calculate_metrics(&manifest.registry, &manifest.config);
        assert_eq!(metrics.entry_nodes, 2);
    }
}
