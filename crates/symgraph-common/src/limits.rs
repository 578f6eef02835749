//! Centralized limits and thresholds for the resolution engine.
//!
//! Every walk over the symbol graph or over an access expression is bounded,
//! even when the supplied graph claims to be acyclic. The values here are
//! the single place to tune those bounds.
//!
//! # Categories
//!
//! - **Graph walks**: base-type chains and interface closures
//! - **Relation recursion**: nested generic-argument comparisons
//! - **Expression walks**: access-path canonicalization
//! - **Pooling**: walker instances retained per thread

// =============================================================================
// Graph Walk Limits
// =============================================================================

/// Maximum number of levels followed along a base-type chain.
///
/// Real hierarchies rarely exceed a few dozen levels. A chain longer than
/// this is treated as malformed and the walk stops, yielding whatever was
/// found so far.
///
/// ```text
/// C : B : A : ... (1024 levels) ... : Object
///                 ^^^ walk stops here
/// ```
pub const MAX_BASE_CHAIN_DEPTH: u32 = 1_024;

/// Maximum number of distinct supertypes visited when computing the
/// base/interface closure of one type.
///
/// Interface graphs fan out (`IList<T>` implies `ICollection<T>`,
/// `IEnumerable<T>`, `IEnumerable`, ...), so this is larger than the chain
/// depth. Exceeding it ends the closure walk early.
pub const MAX_SUPERTYPE_VISITS: u32 = 10_000;

// =============================================================================
// Relation Recursion Limits
// =============================================================================

/// Maximum nesting depth when comparing generic type arguments.
///
/// `IEnumerable<IEnumerable<IEnumerable<...>>>` recurses once per level.
/// Deeper comparisons answer "not compatible".
pub const MAX_RELATION_DEPTH: u32 = 64;

/// Maximum total relation checks performed by a single top-level query.
pub const MAX_RELATION_ITERATIONS: u32 = 100_000;

/// Maximum nesting of generic constructions started while substituting the
/// supertypes of another construction.
///
/// ```text
/// class Grow<T> : IGrow<Grow<Grow<T>>>
/// Grow<int> -> Grow<Grow<int>> -> Grow<Grow<Grow<int>>> -> ...
/// ```
///
/// Constructions past this depth keep their definition's name and
/// arguments but get no base type or interfaces.
pub const MAX_GENERIC_EXPANSION_DEPTH: u32 = 16;

// =============================================================================
// Expression Walk Limits
// =============================================================================

/// Maximum number of nodes visited while walking one access expression.
///
/// ```text
/// a.b.c.d.e.f.g.h ... (4096 segments)
/// ```
///
/// Longer chains are cut off and the walk reports an aborted path.
pub const MAX_ACCESS_PATH_NODES: u32 = 4_096;

// =============================================================================
// Pooling
// =============================================================================

/// Default number of released path walkers kept per thread for reuse.
pub const DEFAULT_WALKER_POOL_CAPACITY: usize = 16;
