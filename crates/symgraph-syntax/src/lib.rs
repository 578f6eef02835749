//! Access-expression syntax for the symgraph resolution engine.
//!
//! - [`AccessArena`]: node storage for access chains, or implement
//!   [`AccessSyntax`] over a host tree
//! - [`PathWalker`]: pooled canonicalization of a chain into its member path
pub mod node;
pub mod path_walker;

pub use node::{AccessArena, AccessNode, AccessSyntax, NodeIndex};
pub use path_walker::{
    AccessPath, PathWalker, PooledPathWalker, WalkError, member_path_eq, walk_path,
};

#[cfg(test)]
#[path = "../tests/reader.rs"]
pub(crate) mod reader;
