//! Content bodies - the text a reader sees, either fixed or personalized.

use std::fmt;
use std::sync::Arc;

/// Default reader name used when no personalization is available.
pub const DEFAULT_READER_NAME: &str = "Aria";

/// Reader-specific values available to templated content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderContext {
    pub reader_name: String,
}

impl ReaderContext {
    /// Create a context for the named reader.
    pub fn new(reader_name: impl Into<String>) -> Self {
        Self {
            reader_name: reader_name.into(),
        }
    }
}

impl Default for ReaderContext {
    fn default() -> Self {
        Self::new(DEFAULT_READER_NAME)
    }
}

type RenderFn = dyn Fn(&ReaderContext) -> String + Send + Sync;

/// A function of reader context producing text.
#[derive(Clone)]
pub struct Template {
    render: Arc<RenderFn>,
    /// Pattern text, when the template was built from one.
    pattern: Option<String>,
}

impl Template {
    /// Create a template from a closure.
    pub fn new<F>(render: F) -> Self
    where
        F: Fn(&ReaderContext) -> String + Send + Sync + 'static,
    {
        Self {
            render: Arc::new(render),
            pattern: None,
        }
    }

    /// Create a template from a pattern string.
    ///
    /// Every `{reader_name}` in the pattern is replaced at render time.
    pub fn from_pattern(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let source = pattern.clone();
        Self {
            render: Arc::new(move |ctx: &ReaderContext| {
                source.replace("{reader_name}", &ctx.reader_name)
            }),
            pattern: Some(pattern),
        }
    }

    /// Render the template for a reader.
    pub fn render(&self, ctx: &ReaderContext) -> String {
        (self.render)(ctx)
    }

    /// The pattern this template was built from, if any.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.pattern {
            Some(pattern) => f.debug_tuple("Template").field(pattern).finish(),
            None => f.write_str("Template(<fn>)"),
        }
    }
}

/// The body of a content node.
#[derive(Debug, Clone)]
pub enum ContentBody {
    /// Literal text, identical for every reader.
    Static(String),
    /// Text produced from the reader context.
    Templated(Template),
}

impl ContentBody {
    /// Create a static body.
    pub fn text(text: impl Into<String>) -> Self {
        ContentBody::Static(text.into())
    }

    /// Create a templated body from a closure.
    pub fn templated<F>(render: F) -> Self
    where
        F: Fn(&ReaderContext) -> String + Send + Sync + 'static,
    {
        ContentBody::Templated(Template::new(render))
    }

    /// Produce the text shown to a reader.
    pub fn render(&self, ctx: &ReaderContext) -> String {
        match self {
            ContentBody::Static(text) => text.clone(),
            ContentBody::Templated(template) => template.render(ctx),
        }
    }

    /// Static text, if the body does not depend on the reader.
    pub fn as_static(&self) -> Option<&str> {
        match self {
            ContentBody::Static(text) => Some(text),
            ContentBody::Templated(_) => None,
        }
    }

    /// Check if the body is personalized.
    pub fn is_templated(&self) -> bool {
        matches!(self, ContentBody::Templated(_))
    }
}

impl Default for ContentBody {
    fn default() -> Self {
        ContentBody::Static(String::new())
    }
}

impl From<&str> for ContentBody {
    fn from(text: &str) -> Self {
        ContentBody::text(text)
    }
}

impl From<String> for ContentBody {
    fn from(text: String) -> Self {
        ContentBody::Static(text)
    }
}
