//! Memoized variants of the solver queries.
//!
//! Answers are stored in the process-wide [`ScopedCache`] for their key
//! type, so they are only remembered while the host keeps a scope open on
//! that cache (see [`open_scopes`]). Keys carry the graph identity, which
//! keeps answers from different graphs apart.

use std::sync::Arc;

use crate::cache::{CacheScope, ScopedCache};
use crate::compat::CompatChecker;
use crate::error::ResolveResult;
use crate::graph::SymbolGraph;
use crate::members::{MemberLookup, MemberQuery, MemberResolver};
use crate::query_trace;
use crate::types::{GraphId, MemberKind, TypeId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CompatKey {
    graph: GraphId,
    options: u64,
    source: TypeId,
    target: TypeId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LookupMode {
    Single,
    First,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MemberKey {
    graph: GraphId,
    ty: TypeId,
    kind: MemberKind,
    name: Arc<str>,
    mode: LookupMode,
}

pub type CompatCache = ScopedCache<CompatKey, ResolveResult<bool>>;
pub type MemberCache = ScopedCache<MemberKey, ResolveResult<MemberLookup>>;

/// Scopes on both shared query caches, closed together on drop.
pub struct QueryScopes {
    _compat: CacheScope<'static, CompatKey, ResolveResult<bool>>,
    _members: CacheScope<'static, MemberKey, ResolveResult<MemberLookup>>,
}

/// Open a scope on every shared query cache for one analysis unit.
pub fn open_scopes() -> QueryScopes {
    QueryScopes {
        _compat: CompatCache::shared().scope(),
        _members: MemberCache::shared().scope(),
    }
}

impl<G: SymbolGraph + ?Sized> CompatChecker<'_, G> {
    /// [`is`](Self::is), answered from the shared cache when possible.
    pub fn is_memoized(&self, source: TypeId, target: TypeId) -> ResolveResult<bool> {
        let key = CompatKey {
            graph: self.graph().graph_id(),
            options: self.fingerprint(),
            source,
            target,
        };
        let mut computed = false;
        let result = CompatCache::shared().get_or_add(key, |_| {
            computed = true;
            self.is(source, target)
        });

        if query_trace::enabled() {
            let query_id = query_trace::next_query_id();
            query_trace::relation_start(query_id, "is_memoized", source, target);
            query_trace::relation_end(
                query_id,
                "is_memoized",
                matches!(result, Ok(true)),
                !computed,
            );
        }
        result
    }
}

impl<G: SymbolGraph + ?Sized> MemberResolver<'_, G> {
    /// [`find_single`](Self::find_single) by kind and name, answered from
    /// the shared cache when possible.
    pub fn find_single_memoized(
        &self,
        ty: TypeId,
        kind: MemberKind,
        name: &str,
    ) -> ResolveResult<MemberLookup> {
        self.memoized(ty, kind, name, LookupMode::Single)
    }

    pub fn find_first_memoized(
        &self,
        ty: TypeId,
        kind: MemberKind,
        name: &str,
    ) -> ResolveResult<MemberLookup> {
        self.memoized(ty, kind, name, LookupMode::First)
    }

    fn memoized(
        &self,
        ty: TypeId,
        kind: MemberKind,
        name: &str,
        mode: LookupMode,
    ) -> ResolveResult<MemberLookup> {
        let key = MemberKey {
            graph: self.graph().graph_id(),
            ty,
            kind,
            name: Arc::from(name),
            mode,
        };
        MemberCache::shared().get_or_add(key, |_| {
            let query = MemberQuery::named(kind, name);
            match mode {
                LookupMode::Single => self.find_single(ty, &query),
                LookupMode::First => self.find_first(ty, &query),
            }
        })
    }
}

#[cfg(test)]
#[path = "../tests/memo_tests.rs"]
mod tests;
