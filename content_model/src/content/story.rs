//! Story content definitions.

use serde::{Deserialize, Serialize};

use super::{ContentBody, NodeId, NodeKind, ReaderContext};

/// A reader-facing option that navigates to another node or triggers a control action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Display text shown to the reader.
    pub text: String,
    /// Target node id or special action.
    pub action: NodeId,
}

impl Choice {
    /// Create a new choice.
    pub fn new(text: impl Into<String>, action: impl Into<NodeId>) -> Self {
        Self {
            text: text.into(),
            action: action.into(),
        }
    }
}

/// A single addressable unit of narrative or educational content.
#[derive(Debug, Clone, Default)]
pub struct StoryContent {
    pub title: String,
    pub body: ContentBody,
    /// Ordered choices; empty for endings.
    pub choices: Vec<Choice>,
    /// Authored category, if any.
    pub kind: Option<NodeKind>,
}

impl StoryContent {
    /// Create content with the given title and body.
    pub fn new(title: impl Into<String>, body: impl Into<ContentBody>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            choices: Vec::new(),
            kind: None,
        }
    }

    /// Append a choice.
    pub fn with_choice(mut self, text: impl Into<String>, action: impl Into<NodeId>) -> Self {
        self.choices.push(Choice::new(text, action));
        self
    }

    /// Set the authored category.
    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Number of choices on this node.
    pub fn choice_count(&self) -> usize {
        self.choices.len()
    }

    /// Check if this node offers the reader nowhere to go.
    pub fn has_no_choices(&self) -> bool {
        self.choices.is_empty()
    }

    /// Iterate over choice actions in authored order.
    pub fn actions(&self) -> impl Iterator<Item = &NodeId> {
        self.choices.iter().map(|c| &c.action)
    }

    /// Render the body for a reader.
    pub fn render(&self, ctx: &ReaderContext) -> String {
        self.body.render(ctx)
    }
}
