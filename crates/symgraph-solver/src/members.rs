//! Member lookup along the base chain.
//!
//! Both lookups walk from the queried type towards the universal root and
//! stop before it: members declared on the root (`ToString`, `Equals`, ...)
//! are never returned.
//!
//! - [`MemberResolver::find_single`] collects matches from every level and
//!   reports [`MemberLookup::Ambiguous`] when there is more than one. A
//!   member redeclared on a derived type is therefore ambiguous.
//! - [`MemberResolver::find_first`] stops at the nearest level with a match.

use std::fmt;

use tracing::debug;

use crate::error::{ResolveError, ResolveResult};
use crate::graph::SymbolGraph;
use crate::hierarchy::{ChainEnd, base_chain};
use crate::query_trace;
use crate::types::{INDEXER_NAME, Member, MemberId, MemberKind, TypeId};

/// Outcome of a member lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberLookup {
    Found(MemberId),
    /// More than one member matched.
    Ambiguous,
    NotFound,
}

impl MemberLookup {
    #[inline]
    pub fn found(self) -> Option<MemberId> {
        match self {
            Self::Found(id) => Some(id),
            Self::Ambiguous | Self::NotFound => None,
        }
    }

    #[inline]
    pub fn is_found(self) -> bool {
        matches!(self, Self::Found(_))
    }

    fn outcome(self) -> &'static str {
        match self {
            Self::Found(_) => "found",
            Self::Ambiguous => "ambiguous",
            Self::NotFound => "not_found",
        }
    }
}

/// What to look for: a member kind, narrowed by name and/or a predicate.
#[derive(Clone, Copy)]
pub struct MemberQuery<'q> {
    kind: MemberKind,
    name: Option<&'q str>,
    predicate: Option<&'q (dyn Fn(&Member) -> bool + 'q)>,
}

impl<'q> MemberQuery<'q> {
    /// Members of `kind` called `name`.
    pub fn named(kind: MemberKind, name: &'q str) -> Self {
        Self {
            kind,
            name: Some(name),
            predicate: None,
        }
    }

    /// Members of `kind` accepted by `predicate`, regardless of name.
    pub fn matching(kind: MemberKind, predicate: &'q (dyn Fn(&Member) -> bool + 'q)) -> Self {
        Self {
            kind,
            name: None,
            predicate: Some(predicate),
        }
    }

    /// Further narrow a query by `predicate`.
    pub fn filter(mut self, predicate: &'q (dyn Fn(&Member) -> bool + 'q)) -> Self {
        self.predicate = Some(predicate);
        self
    }

    #[inline]
    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    #[inline]
    pub fn name(&self) -> Option<&'q str> {
        self.name
    }

    fn validate(&self) -> ResolveResult<()> {
        match self.name {
            Some(name) if name.is_empty() => Err(ResolveError::EmptyMemberName),
            _ => Ok(()),
        }
    }

    fn accepts(&self, member: &Member) -> bool {
        member.kind == self.kind
            && self.name.is_none_or(|name| &*member.name == name)
            && self.predicate.is_none_or(|predicate| predicate(member))
    }
}

impl fmt::Debug for MemberQuery<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberQuery")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("predicate", &self.predicate.is_some())
            .finish()
    }
}

fn is_indexer(member: &Member) -> bool {
    member.is_indexer()
}

/// Member lookups over one symbol graph.
pub struct MemberResolver<'g, G: SymbolGraph + ?Sized> {
    graph: &'g G,
}

impl<'g, G: SymbolGraph + ?Sized> MemberResolver<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self { graph }
    }

    #[inline]
    pub fn graph(&self) -> &'g G {
        self.graph
    }

    /// The only member matching `query` on `ty` and its bases.
    pub fn find_single(&self, ty: TypeId, query: &MemberQuery<'_>) -> ResolveResult<MemberLookup> {
        self.lookup("find_single", ty, query, |levels| {
            let mut found = None;
            for id in levels {
                if found.is_some() {
                    return MemberLookup::Ambiguous;
                }
                found = Some(id);
            }
            found.map_or(MemberLookup::NotFound, MemberLookup::Found)
        })
    }

    /// A member matching `query` from the nearest level that has one.
    ///
    /// Which of several matches on that level is returned is unspecified;
    /// callers that care must narrow the query.
    pub fn find_first(&self, ty: TypeId, query: &MemberQuery<'_>) -> ResolveResult<MemberLookup> {
        self.lookup("find_first", ty, query, |levels| {
            levels
                .next()
                .map_or(MemberLookup::NotFound, MemberLookup::Found)
        })
    }

    pub fn find_field(&self, ty: TypeId, name: &str) -> ResolveResult<MemberLookup> {
        self.find_single(ty, &MemberQuery::named(MemberKind::Field, name))
    }

    pub fn find_event(&self, ty: TypeId, name: &str) -> ResolveResult<MemberLookup> {
        self.find_single(ty, &MemberQuery::named(MemberKind::Event, name))
    }

    /// Property lookup. `"Item[]"` selects the indexer.
    pub fn find_property(&self, ty: TypeId, name: &str) -> ResolveResult<MemberLookup> {
        if name == INDEXER_NAME {
            return self.find_single(ty, &MemberQuery::matching(MemberKind::Property, &is_indexer));
        }
        self.find_single(ty, &MemberQuery::named(MemberKind::Property, name))
    }

    pub fn find_single_method(&self, ty: TypeId, name: &str) -> ResolveResult<MemberLookup> {
        self.find_single(ty, &MemberQuery::named(MemberKind::Method, name))
    }

    pub fn find_first_method(&self, ty: TypeId, name: &str) -> ResolveResult<MemberLookup> {
        self.find_first(ty, &MemberQuery::named(MemberKind::Method, name))
    }

    fn lookup(
        &self,
        op: &'static str,
        ty: TypeId,
        query: &MemberQuery<'_>,
        select: impl FnOnce(&mut dyn Iterator<Item = MemberId>) -> MemberLookup,
    ) -> ResolveResult<MemberLookup> {
        if !self.graph.contains_type(ty) {
            return Err(ResolveError::UnknownType(ty));
        }
        query.validate()?;

        let trace_query_id = query_trace::enabled().then(|| {
            let query_id = query_trace::next_query_id();
            query_trace::named_start(query_id, op, ty, query.name.unwrap_or("<predicate>"));
            query_id
        });

        let graph = self.graph;
        let mut matches = base_chain(graph, ty, ChainEnd::ExcludeRoot).flat_map(move |level| {
            graph
                .members(level)
                .iter()
                .copied()
                .filter(move |&id| query.accepts(graph.member(id)))
        });
        let result = select(&mut matches);

        if result == MemberLookup::Ambiguous {
            debug!(ty = ty.0, ?query, op, "ambiguous member lookup");
        }
        if let Some(query_id) = trace_query_id {
            query_trace::lookup_end(query_id, op, result.outcome());
        }
        Ok(result)
    }
}

#[cfg(test)]
#[path = "../tests/members_tests.rs"]
mod tests;
