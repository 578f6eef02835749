//! Contract violations.
//!
//! Domain misses (a member that does not exist, an incompatible type) are
//! ordinary return values. The errors here mean the caller broke a
//! precondition.

use thiserror::Error;

use crate::types::{GraphId, TypeId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("type {0:?} is not part of the symbol graph")]
    UnknownType(TypeId),

    #[error("member lookup requires a non-empty name")]
    EmptyMemberName,

    #[error("'{0}' is not a valid qualified type name")]
    InvalidQualifiedName(String),

    #[error("configured universal root '{configured}' but the graph's root is '{actual}'")]
    UniversalRootMismatch { configured: String, actual: String },

    #[error("compilation was built for graph {expected:?}, queried on graph {actual:?}")]
    CompilationGraphMismatch { expected: GraphId, actual: GraphId },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    #[error("cache scope for {cache} ended without a matching begin")]
    UnbalancedEnd { cache: &'static str },
}

pub type ResolveResult<T> = Result<T, ResolveError>;
