//! # Content Model
//!
//! The content registry crate - every story node, choice, and declared
//! navigation set the Primer knows about. This crate is the single source of
//! truth for authored content and contains no graph analysis.
//!
//! ## Core Components
//!
//! - **content**: Node identifiers, story content, choices, and the static/templated body union
//! - **registry**: The ordered content registry and the manifest loader
//! - **config**: Externally declared entry points, special actions, special pages, and placeholders

pub mod config;
pub mod content;
pub mod registry;

pub use config::*;
pub use content::*;
pub use registry::*;
