//! Parameterless constructor lookup.

use tracing::trace;

use crate::error::{ResolveError, ResolveResult};
use crate::graph::SymbolGraph;
use crate::hierarchy::{ChainEnd, base_chain};
use crate::types::{MemberId, TypeId};

/// How far [`find_default_constructor`] looks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ConstructorSearch {
    /// Only constructors declared on the type itself.
    #[default]
    Direct,
    /// The type, then each base up to (not including) the universal root.
    /// Levels without a parameterless constructor are passed over.
    AncestorInclusive,
}

/// The parameterless instance constructor of `ty` (or, with
/// [`ConstructorSearch::AncestorInclusive`], of its nearest base that has
/// one). Static constructors never match.
pub fn find_default_constructor<G: SymbolGraph + ?Sized>(
    graph: &G,
    ty: TypeId,
    search: ConstructorSearch,
) -> ResolveResult<Option<MemberId>> {
    if !graph.contains_type(ty) {
        return Err(ResolveError::UnknownType(ty));
    }

    let own_default = |level: TypeId| {
        graph
            .members(level)
            .iter()
            .copied()
            .find(|&id| graph.member(id).is_default_constructor())
    };

    let found = match search {
        ConstructorSearch::Direct => own_default(ty),
        ConstructorSearch::AncestorInclusive => {
            base_chain(graph, ty, ChainEnd::ExcludeRoot).find_map(own_default)
        }
    };
    trace!(ty = ty.0, ?search, found = ?found, "default constructor lookup");
    Ok(found)
}

#[cfg(test)]
#[path = "../tests/constructors_tests.rs"]
mod tests;
