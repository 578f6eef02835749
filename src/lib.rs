//! Symbol-graph resolution engine.
//!
//! - [`solver`]: nominal compatibility, member and constructor lookup,
//!   scoped result caching
//! - [`syntax`]: access-expression arena and the pooled access-path walker
//! - [`common`]: limits and engine options
//!
//! Hosts usually open an [`AnalysisSession`] per compilation and call
//! [`tracing_config::init_tracing`] once at startup.

pub use symgraph_common as common;
pub use symgraph_solver as solver;
pub use symgraph_syntax as syntax;

pub mod session;
pub use session::{AnalysisSession, SessionError};

pub mod tracing_config;

pub use symgraph_common::{ConfigError, ConversionRule, EngineOptions, numeric_conversions};
pub use symgraph_solver::{
    CacheError, CompatChecker, Compilation, ConstructorSearch, MemberFlags, MemberId, MemberKind,
    MemberLookup, MemberQuery, MemberResolver, QualifiedName, ResolveError, ResolveResult,
    ScopedCache, SymbolGraph, SymbolTable, TypeId, TypeKind, find_default_constructor, is_type,
};
pub use symgraph_syntax::{
    AccessArena, AccessNode, AccessPath, AccessSyntax, NodeIndex, PathWalker, WalkError,
    member_path_eq, walk_path,
};
