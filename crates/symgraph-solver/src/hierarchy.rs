//! Bounded traversal of the inheritance graph.
//!
//! All walks are iterative. A base chain is expected to be finite and to end
//! at the universal root, but the walkers here do not rely on it: they keep
//! a visited set and stop at [`MAX_BASE_CHAIN_DEPTH`] /
//! [`MAX_SUPERTYPE_VISITS`] regardless of what the graph claims.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use symgraph_common::limits::{MAX_BASE_CHAIN_DEPTH, MAX_SUPERTYPE_VISITS};
use tracing::debug;

use crate::graph::SymbolGraph;
use crate::types::TypeId;

/// Where a base-chain walk ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChainEnd {
    /// Yield the universal root as the last element.
    IncludeRoot,
    /// Stop before the universal root.
    ExcludeRoot,
}

/// Iterator over `ty` followed by its base types, nearest first.
pub struct BaseChain<'g, G: SymbolGraph + ?Sized> {
    graph: &'g G,
    next: Option<TypeId>,
    end: ChainEnd,
    seen: FxHashSet<TypeId>,
}

impl<'g, G: SymbolGraph + ?Sized> BaseChain<'g, G> {
    pub fn new(graph: &'g G, ty: TypeId, end: ChainEnd) -> Self {
        Self {
            graph,
            next: Some(ty),
            end,
            seen: FxHashSet::default(),
        }
    }
}

impl<G: SymbolGraph + ?Sized> Iterator for BaseChain<'_, G> {
    type Item = TypeId;

    fn next(&mut self) -> Option<TypeId> {
        let current = self.next.take()?;
        if self.end == ChainEnd::ExcludeRoot && self.graph.is_universal_root(current) {
            return None;
        }
        if self.seen.len() as u32 >= MAX_BASE_CHAIN_DEPTH {
            debug!(ty = current.0, "base chain exceeded depth limit");
            return None;
        }
        if !self.seen.insert(current) {
            debug!(ty = current.0, "base chain revisits a type");
            return None;
        }
        self.next = self.graph.base_type(current);
        Some(current)
    }
}

pub fn base_chain<G: SymbolGraph + ?Sized>(graph: &G, ty: TypeId, end: ChainEnd) -> BaseChain<'_, G> {
    BaseChain::new(graph, ty, end)
}

/// `ty`, its base chain (root included), then every interface reachable from
/// any of those, breadth first. Each type appears once.
pub fn supertype_closure<G: SymbolGraph + ?Sized>(graph: &G, ty: TypeId) -> SmallVec<[TypeId; 16]> {
    let mut visited = FxHashSet::default();
    let mut closure: SmallVec<[TypeId; 16]> = SmallVec::new();

    for t in base_chain(graph, ty, ChainEnd::IncludeRoot) {
        if visited.insert(t) {
            closure.push(t);
        }
    }

    let mut cursor = 0;
    while cursor < closure.len() {
        for &interface in graph.interfaces(closure[cursor]) {
            if closure.len() as u32 >= MAX_SUPERTYPE_VISITS {
                debug!(ty = ty.0, "supertype closure exceeded visit budget");
                return closure;
            }
            if visited.insert(interface) {
                closure.push(interface);
            }
        }
        cursor += 1;
    }

    closure
}

#[cfg(test)]
#[path = "../tests/hierarchy_tests.rs"]
mod tests;
