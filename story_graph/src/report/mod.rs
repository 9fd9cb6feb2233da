//! Reporter - terminal rendering of validation reports and metrics.

use colored::{Color, Colorize};
use serde::Serialize;
use std::fmt::Write;

use crate::analytics::GraphMetrics;
use crate::model::NodeType;
use crate::validation::{Issue, IssueCategory, Severity, ValidationReport};

/// Severity totals across a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
}

impl Summary {
    pub fn of(report: &ValidationReport) -> Self {
        Self {
            errors: report.error_count(),
            warnings: report.warning_count(),
            info: report.info_count(),
        }
    }
}

/// Machine-readable validation output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReport<'a> {
    pub report: &'a ValidationReport,
    pub summary: Summary,
    pub exit_code: u8,
}

impl<'a> JsonReport<'a> {
    pub fn new(report: &'a ValidationReport) -> Self {
        Self {
            report,
            summary: Summary::of(report),
            exit_code: report.exit_code(),
        }
    }
}

/// Renders reports as text, optionally with ANSI colors.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// A reporter that never emits escape codes.
    pub fn plain() -> Self {
        Self::new(false)
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn severity_style(severity: Severity) -> (&'static str, Color) {
        match severity {
            Severity::Error => ("✗", Color::Red),
            Severity::Warning => ("⚠", Color::Yellow),
            Severity::Info => ("ℹ", Color::Cyan),
        }
    }

    /// One issue line: icon, message, and the node it belongs to.
    pub fn format_issue(&self, issue: &Issue) -> String {
        let (icon, color) = Self::severity_style(issue.severity);
        format!(
            "  {} {} {}",
            self.paint(icon, color),
            issue.message,
            self.paint(&format!("({})", issue.node_id), Color::BrightBlack)
        )
    }

    fn render_section(&self, out: &mut String, category: IssueCategory, issues: &[Issue]) {
        let errors = issues.iter().filter(|i| i.severity == Severity::Error).count();
        let warnings = issues.iter().filter(|i| i.severity == Severity::Warning).count();
        let info = issues.iter().filter(|i| i.severity == Severity::Info).count();

        if errors > 0 {
            let _ = writeln!(
                out,
                "{} {}: {}",
                self.paint("✗", Color::Red),
                category.title(),
                self.paint(&format!("{} ERRORS", errors), Color::Red)
            );
        } else if warnings > 0 {
            let _ = writeln!(
                out,
                "{} {}: {}",
                self.paint("⚠", Color::Yellow),
                category.title(),
                self.paint(&format!("{} WARNINGS", warnings), Color::Yellow)
            );
        } else {
            let _ = writeln!(out, "{} {}: PASSED", self.paint("✓", Color::Green), category.title());
        }

        for issue in issues.iter().filter(|i| i.severity != Severity::Info) {
            let _ = writeln!(out, "{}", self.format_issue(issue));
        }

        if info > 0 {
            let _ = writeln!(
                out,
                "{}",
                self.paint(&format!("  {} known placeholder(s)", info), Color::BrightBlack)
            );
        }
        out.push('\n');
    }

    /// Render the full validation report.
    pub fn render(&self, report: &ValidationReport) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "\n{}", self.bold("Story Graph Validation Report"));
        let _ = writeln!(out, "==============================\n");

        for category in IssueCategory::ALL {
            self.render_section(&mut out, category, report.issues(category));
        }

        let summary = Summary::of(report);
        let color = if summary.errors > 0 {
            Color::Red
        } else if summary.warnings > 0 {
            Color::Yellow
        } else {
            Color::Green
        };
        let _ = writeln!(
            out,
            "{}{}",
            self.bold("Summary: "),
            self.paint(
                &format!("{} errors, {} warnings", summary.errors, summary.warnings),
                color
            )
        );

        out
    }

    /// Render graph metrics and the node type distribution.
    pub fn render_metrics(
        &self,
        metrics: &GraphMetrics,
        distribution: &[(NodeType, usize)],
    ) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "{}", self.bold("Graph Metrics"));
        let _ = writeln!(out, "  Total Nodes: {}", metrics.total_nodes);
        let _ = writeln!(out, "  Total Choices: {}", metrics.total_choices);
        let _ = writeln!(out, "  Avg Choices per Node: {:.2}", metrics.avg_choices_per_node);
        let _ = writeln!(out, "  Ending Nodes: {}", metrics.ending_nodes);
        let _ = writeln!(out, "  Entry Nodes: {}", metrics.entry_nodes);
        let _ = writeln!(out, "  Convergence Points: {}", metrics.convergence_point_count);
        for (idx, id) in metrics.convergence_points.iter().enumerate() {
            let _ = writeln!(out, "    {}. {}", idx + 1, self.paint(id.as_str(), Color::Cyan));
        }

        if !distribution.is_empty() {
            let _ = writeln!(out, "\n{}", self.bold("Node Types"));
            for (node_type, count) in distribution {
                let _ = writeln!(out, "  {:<12} {}", node_type.as_str(), count);
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate;
    use content_model::{ContentRegistry, GraphConfig, NodeId, StoryContent};

    fn report() -> ValidationReport {
        let registry = ContentRegistry::new()
            .with_node(
                "welcome",
                StoryContent::new("W", "")
                    .with_choice("a", "a")
                    .with_choice("boo", "ghost")
                    .with_choice("later", "reflection"),
            )
            .unwrap()
            .with_node("a", StoryContent::new("A", "").with_choice("home", "welcome"))
            .unwrap();
        validate(&registry, &GraphConfig::default())
    }

    #[test]
    fn test_plain_render() {
        let text = Reporter::plain().render(&report());

        assert!(text.contains("Story Graph Validation Report"));
        assert!(text.contains("✗ Reference Validation: 1 ERRORS"));
        assert!(text.contains("  ✗ Invalid reference 'ghost' - no matching content node (welcome)"));
        assert!(text.contains("  1 known placeholder(s)"));
        assert!(text.contains("✓ Orphan Detection: PASSED"));
        assert!(text.contains("✓ Reachability Analysis: PASSED"));
        assert!(text.contains("Summary: 1 errors, 0 warnings"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn test_warning_section() {
        let registry = ContentRegistry::new()
            .with_node("welcome", StoryContent::new("W", "").with_choice("a", "a"))
            .unwrap()
            .with_node("a", StoryContent::new("A", ""))
            .unwrap();
        let text = Reporter::plain().render(&validate(&registry, &GraphConfig::default()));

        assert!(text.contains("⚠ Dead End Detection: 1 WARNINGS"));
        assert!(text.contains("  ⚠ Potential dead end 'a'"));
        assert!(text.contains("Summary: 0 errors, 1 warnings"));
    }

    #[test]
    fn test_json_report() {
        let report = report();
        let json = serde_json::to_value(JsonReport::new(&report)).unwrap();

        assert_eq!(json["exitCode"], 1);
        assert!(json.get("exit_code").is_none());
        assert_eq!(json["summary"]["errors"], 1);
        assert_eq!(json["summary"]["info"], 1);
        assert_eq!(json["report"]["referenceValidation"][0]["severity"], "error");
    }

    #[test]
    fn test_render_metrics() {
        let metrics = GraphMetrics {
            total_nodes: 4,
            total_choices: 6,
            avg_choices_per_node: 1.5,
            ending_nodes: 1,
            entry_nodes: 1,
            convergence_point_count: 1,
            convergence_points: vec![NodeId::new("hub")],
        };
        let text = Reporter::plain().render_metrics(&metrics, &[(NodeType::Default, 2)]);

        assert!(text.contains("Avg Choices per Node: 1.50"));
        assert!(text.contains("    1. hub"));
        assert!(text.contains("  default      2"));
    }
}
