//! Resolution queries over a nominal symbol graph.
//!
//! The graph (types, members, modules) is produced elsewhere and exposed
//! through [`SymbolGraph`]; [`SymbolTable`] is the in-memory implementation.
//! On top of it this crate answers:
//!
//! - **Compatibility**: `is(a, b)` along base chains, interface closures and
//!   generic constructions ([`CompatChecker`])
//! - **Member lookup**: single/first match along the base chain
//!   ([`MemberResolver`])
//! - **Default constructors** ([`find_default_constructor`])
//! - **Scoped caching** of query results ([`ScopedCache`])
//!
//! All queries are synchronous reads and safe to run from many threads.
pub mod cache;
pub mod compat;
mod compilation;
pub mod constructors;
pub mod error;
mod graph;
pub mod hierarchy;
pub mod members;
pub mod memo;
mod qualified;
mod query_trace;
pub mod recursion;
mod table;
pub mod types;

pub use cache::{CacheScope, ScopedCache};
pub use compat::{CompatChecker, is_type};
pub use compilation::Compilation;
pub use constructors::{ConstructorSearch, find_default_constructor};
pub use error::{CacheError, ResolveError, ResolveResult};
pub use graph::SymbolGraph;
pub use members::{MemberLookup, MemberQuery, MemberResolver};
pub use memo::{QueryScopes, open_scopes};
pub use qualified::QualifiedName;
pub use table::SymbolTable;
pub use types::{
    GraphId, INDEXER_NAME, Member, MemberFlags, MemberId, MemberKind, ModuleId, TypeId, TypeKind,
};

#[cfg(test)]
#[path = "../tests/fixtures.rs"]
pub(crate) mod fixtures;
