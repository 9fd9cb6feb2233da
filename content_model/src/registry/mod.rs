//! Content registry - the central structure holding every authored node.

mod manifest;

pub use manifest::*;

use std::collections::BTreeMap;

use crate::config::GraphConfig;
use crate::content::{NodeId, NodeKind, StoryContent};

/// The complete, immutable-after-build mapping of node id to content.
///
/// Iteration is ordered by id so every analysis over a registry is reproducible.
#[derive(Debug, Clone, Default)]
pub struct ContentRegistry {
    nodes: BTreeMap<NodeId, StoryContent>,
}

impl ContentRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Ids must be unique within a registry.
    pub fn insert(
        &mut self,
        id: impl Into<NodeId>,
        content: StoryContent,
    ) -> Result<(), RegistryError> {
        let id = id.into();
        if self.nodes.contains_key(&id) {
            return Err(RegistryError::DuplicateNode(id));
        }
        self.nodes.insert(id, content);
        Ok(())
    }

    /// Builder-style insert.
    pub fn with_node(
        mut self,
        id: impl Into<NodeId>,
        content: StoryContent,
    ) -> Result<Self, RegistryError> {
        self.insert(id, content)?;
        Ok(self)
    }

    /// Merge another content collection into this one.
    ///
    /// Fails on the first id both collections define; `self` is left untouched in that case.
    pub fn merge(&mut self, other: ContentRegistry) -> Result<(), RegistryError> {
        if let Some(id) = other.nodes.keys().find(|id| self.nodes.contains_key(*id)) {
            return Err(RegistryError::DuplicateNode(id.clone()));
        }
        self.nodes.extend(other.nodes);
        Ok(())
    }

    /// Get content by id.
    pub fn get(&self, id: &str) -> Option<&StoryContent> {
        self.nodes.get(id)
    }

    /// Check if a node exists.
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Iterate over all nodes in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &StoryContent)> {
        self.nodes.iter()
    }

    /// Iterate over all ids in order.
    pub fn ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.keys()
    }

    /// Ids whose content declares itself an entry node, in id order.
    pub fn authored_entry_points(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes
            .iter()
            .filter(|(_, content)| content.kind == Some(NodeKind::Entry))
            .map(|(id, _)| id)
    }

    /// Get the total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Sum of choices across all nodes.
    pub fn total_choices(&self) -> usize {
        self.nodes.values().map(StoryContent::choice_count).sum()
    }

    /// A copy of this registry without the configured special pages.
    pub fn without_special_pages(&self, config: &GraphConfig) -> ContentRegistry {
        let nodes = self
            .nodes
            .iter()
            .filter(|(id, _)| !config.is_special_page(id.as_str()))
            .map(|(id, content)| (id.clone(), content.clone()))
            .collect();
        ContentRegistry { nodes }
    }
}

impl FromIterator<(NodeId, StoryContent)> for ContentRegistry {
    /// Collect nodes; a later duplicate id replaces an earlier one.
    fn from_iter<T: IntoIterator<Item = (NodeId, StoryContent)>>(iter: T) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}
