//! Story manifests - authored TOML/JSON files holding a registry and its graph configuration.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::ContentRegistry;
use crate::config::GraphConfig;
use crate::content::{Choice, ContentBody, NodeId, NodeKind, StoryContent, Template};

/// Errors raised while loading content. Analysis itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("duplicate content node '{0}'")]
    DuplicateNode(NodeId),

    #[error("node '{id}': {reason}")]
    InvalidBody { id: NodeId, reason: &'static str },

    #[error("failed to read manifest {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML manifest: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported manifest extension for {0} (expected .toml or .json)")]
    UnsupportedFormat(PathBuf),
}

/// A node as written in a manifest file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NodeSpec {
    title: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    template: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    kind: Option<NodeKind>,
}

impl NodeSpec {
    fn into_content(self, id: &str) -> Result<StoryContent, RegistryError> {
        let body = match (self.content, self.template) {
            (Some(text), None) => ContentBody::Static(text),
            (None, Some(pattern)) => ContentBody::Templated(Template::from_pattern(pattern)),
            (Some(_), Some(_)) => {
                return Err(RegistryError::InvalidBody {
                    id: NodeId::new(id),
                    reason: "declares both `content` and `template`",
                })
            }
            (None, None) => {
                return Err(RegistryError::InvalidBody {
                    id: NodeId::new(id),
                    reason: "declares neither `content` nor `template`",
                })
            }
        };

        Ok(StoryContent {
            title: self.title,
            body,
            choices: self.choices,
            kind: self.kind,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestSpec {
    #[serde(default)]
    graph: GraphConfig,
    #[serde(default)]
    nodes: BTreeMap<String, NodeSpec>,
}

/// A loaded registry together with the configuration declared beside it.
#[derive(Debug, Clone, Default)]
pub struct StoryManifest {
    pub config: GraphConfig,
    pub registry: ContentRegistry,
}

impl StoryManifest {
    /// Parse a TOML manifest.
    pub fn from_toml_str(source: &str) -> Result<Self, RegistryError> {
        let spec: ManifestSpec = toml::from_str(source)?;
        Self::from_spec(spec)
    }

    /// Parse a JSON manifest.
    pub fn from_json_str(source: &str) -> Result<Self, RegistryError> {
        let spec: ManifestSpec = serde_json::from_str(source)?;
        Self::from_spec(spec)
    }

    /// Load a manifest from disk, choosing the format by file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let manifest = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&source)?,
            Some("json") => Self::from_json_str(&source)?,
            _ => return Err(RegistryError::UnsupportedFormat(path.to_path_buf())),
        };

        tracing::debug!(
            path = %path.display(),
            nodes = manifest.registry.len(),
            entry_points = manifest.config.entry_points.len(),
            "loaded story manifest"
        );
        Ok(manifest)
    }

    fn from_spec(spec: ManifestSpec) -> Result<Self, RegistryError> {
        let mut registry = ContentRegistry::new();
        for (id, node) in spec.nodes {
            let content = node.into_content(&id)?;
            registry.insert(id, content)?;
        }

        let mut config = spec.graph;
        for id in registry.authored_entry_points() {
            if !config.is_entry_point(id.as_str()) {
                config.entry_points.push(id.clone());
            }
        }

        Ok(Self { config, registry })
    }
}
