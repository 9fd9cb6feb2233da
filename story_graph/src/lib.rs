//! # Story Graph
//!
//! The content graph integrity and analysis engine. This crate treats a
//! `content_model` registry as a directed graph of choices, checks it for
//! structural soundness, and computes a renderable layout.
//!
//! ## Core Components
//!
//! - **model**: Flow graph construction and node classification
//! - **validation**: Reference, orphan, dead-end, and reachability passes
//! - **analytics**: Convergence points and aggregate metrics
//! - **layout**: Cycle-tolerant hierarchical layout
//! - **report**: Terminal and JSON rendering of results
//!
//! ## Design Philosophy
//!
//! - **Read-Only**: No component mutates the registry or a predecessor's output
//! - **Complete Reports**: Malformed content becomes report entries, never failures
//! - **Explicit Configuration**: Entry points and other declared sets are passed in, never ambient

pub mod analytics;
pub mod layout;
pub mod model;
pub mod report;
pub mod validation;

pub use analytics::*;
pub use layout::*;
pub use model::*;
pub use report::*;
pub use validation::*;
