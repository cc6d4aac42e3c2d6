//! Filesystem tree representation with repository awareness.
//!
//! This module provides the [`Filesystem`] capability the walk reads through,
//! the [`Node`] tree it produces, and the [`TreeBuilder`] that ties the two
//! together with git classification.

mod node;
mod provider;
mod tree;

pub use node::{Node, NodeKind};
pub use provider::{DirEntryInfo, EntryType, Filesystem, LocalFilesystem};
pub use tree::{TraversalPolicy, TreeBuilder, TreeError};
