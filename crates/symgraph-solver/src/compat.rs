//! Nominal type compatibility.
//!
//! `is(source, target)` answers "can a value of `source` be used where
//! `target` is expected", judged purely on the declared graph:
//!
//! 1. Same symbol.
//! 2. `target` is the universal root and `source` is a reference type.
//! 3. `target` is on `source`'s base chain.
//! 4. `target` is in the interface closure of `source` or its bases.
//! 5. A supertype of `source` and `target` are constructed from the same
//!    generic definition with pairwise compatible arguments (identical for
//!    class and struct definitions). An open `target` definition accepts
//!    any construction of it.
//! 6. Arrays of equal rank with compatible element types (reference
//!    elements only; value elements must be identical).
//! 7. `target` is the nullable wrapper over the value type `source`.
//!
//! The relation is reflexive and transitive, not symmetric.

use rustc_hash::FxBuildHasher;
use std::hash::BuildHasher;
use symgraph_common::EngineOptions;
use tracing::debug;

use crate::error::{ResolveError, ResolveResult};
use crate::graph::SymbolGraph;
use crate::hierarchy::supertype_closure;
use crate::qualified::QualifiedName;
use crate::query_trace;
use crate::recursion::{RecursionGuard, RecursionProfile, RecursionResult};
use crate::types::{TypeId, TypeKind};

type RelationGuard = RecursionGuard<(TypeId, TypeId)>;

/// Compatibility queries over one symbol graph.
pub struct CompatChecker<'g, G: SymbolGraph + ?Sized> {
    graph: &'g G,
    nullable_wrapper: Option<QualifiedName>,
    /// Hash of the settings above; memoized answers are keyed on it.
    fingerprint: u64,
}

impl<'g, G: SymbolGraph + ?Sized> CompatChecker<'g, G> {
    /// Checker with the default options.
    pub fn new(graph: &'g G) -> Self {
        Self::from_parts(graph, QualifiedName::parse("System.Nullable`1").ok())
    }

    pub fn with_options(graph: &'g G, options: &EngineOptions) -> ResolveResult<Self> {
        let nullable_wrapper = match options.nullable_wrapper.as_deref() {
            Some(name) => Some(QualifiedName::parse(name)?),
            None => None,
        };
        Ok(Self::from_parts(graph, nullable_wrapper))
    }

    fn from_parts(graph: &'g G, nullable_wrapper: Option<QualifiedName>) -> Self {
        Self {
            graph,
            fingerprint: FxBuildHasher.hash_one(&nullable_wrapper),
            nullable_wrapper,
        }
    }

    #[inline]
    pub fn graph(&self) -> &'g G {
        self.graph
    }

    /// Whether `source` is compatible with `target`.
    pub fn is(&self, source: TypeId, target: TypeId) -> ResolveResult<bool> {
        self.ensure_known(source)?;
        self.ensure_known(target)?;

        let trace_enabled = query_trace::enabled();
        let trace_query_id = trace_enabled.then(|| {
            let query_id = query_trace::next_query_id();
            query_trace::relation_start(query_id, "is", source, target);
            query_id
        });

        let mut guard = RelationGuard::with_profile(RecursionProfile::TypeRelation);
        let result = self.relate(source, target, &mut guard);

        if let Some(query_id) = trace_query_id {
            query_trace::relation_end(query_id, "is", result, false);
        }
        Ok(result)
    }

    /// Whether `source`, or any type on its base/interface closure, has the
    /// given qualified name (name + arity). Used when no live symbol for the
    /// target exists.
    pub fn is_qualified(&self, source: TypeId, target: &QualifiedName) -> ResolveResult<bool> {
        self.ensure_known(source)?;

        let trace_query_id = query_trace::enabled().then(|| {
            let query_id = query_trace::next_query_id();
            query_trace::named_start(query_id, "is_qualified", source, &target.to_string());
            query_id
        });

        let result = self.relate_by_name(source, target);

        if let Some(query_id) = trace_query_id {
            query_trace::relation_end(query_id, "is_qualified", result, false);
        }
        Ok(result)
    }

    /// [`is_qualified`](Self::is_qualified) taking the metadata name as text.
    pub fn is_named(&self, source: TypeId, target: &str) -> ResolveResult<bool> {
        let target = QualifiedName::parse(target)?;
        self.is_qualified(source, &target)
    }

    #[inline]
    pub(crate) fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    pub(crate) fn ensure_known(&self, ty: TypeId) -> ResolveResult<()> {
        if self.graph.contains_type(ty) {
            Ok(())
        } else {
            Err(ResolveError::UnknownType(ty))
        }
    }

    fn relate(&self, source: TypeId, target: TypeId, guard: &mut RelationGuard) -> bool {
        let graph = self.graph;
        if graph.same_symbol(source, target) {
            return true;
        }
        if graph.is_universal_root(target) && graph.is_reference_type(source) {
            return true;
        }

        match guard.enter((source, target)) {
            RecursionResult::Entered => {}
            RecursionResult::Cycle => return false,
            denied => {
                debug!(
                    source = source.0,
                    target = target.0,
                    ?denied,
                    "relation check exceeded recursion limits"
                );
                return false;
            }
        }
        let result = self.relate_through_graph(source, target, guard);
        guard.leave((source, target));
        result
    }

    fn relate_through_graph(
        &self,
        source: TypeId,
        target: TypeId,
        guard: &mut RelationGuard,
    ) -> bool {
        let graph = self.graph;

        if self.is_nullable_lift(source, target) {
            return true;
        }

        if let (TypeKind::Array { rank: source_rank }, TypeKind::Array { rank: target_rank }) =
            (graph.type_kind(source), graph.type_kind(target))
        {
            if source_rank == target_rank && self.relate_elements(source, target, guard) {
                return true;
            }
        }

        for candidate in supertype_closure(graph, source) {
            if graph.same_symbol(candidate, target) {
                return true;
            }
            if self.relate_constructed(candidate, target, guard) {
                return true;
            }
        }
        false
    }

    fn relate_elements(&self, source: TypeId, target: TypeId, guard: &mut RelationGuard) -> bool {
        let graph = self.graph;
        let (Some(&source_element), Some(&target_element)) = (
            graph.type_arguments(source).first(),
            graph.type_arguments(target).first(),
        ) else {
            return false;
        };
        graph.same_symbol(source_element, target_element)
            || (graph.is_reference_type(source_element)
                && self.relate(source_element, target_element, guard))
    }

    /// Rule 5: both constructed from the same definition.
    fn relate_constructed(
        &self,
        candidate: TypeId,
        target: TypeId,
        guard: &mut RelationGuard,
    ) -> bool {
        let graph = self.graph;
        let candidate_args = graph.type_arguments(candidate);
        let target_args = graph.type_arguments(target);
        if candidate_args.is_empty() || candidate_args.len() != target_args.len() {
            return false;
        }
        if matches!(graph.type_kind(candidate), TypeKind::Array { .. }) {
            return false;
        }

        let definition = graph.original_definition(target);
        if !graph.same_symbol(graph.original_definition(candidate), definition) {
            return false;
        }
        if graph.is_open_definition(target) {
            return true;
        }
        if graph.is_open_definition(candidate) {
            return false;
        }

        // Only reference-typed arguments of interface/delegate definitions
        // may vary.
        let variant = graph.type_kind(definition).allows_variant_arguments();
        candidate_args.iter().zip(target_args).all(|(&from, &to)| {
            graph.same_symbol(from, to)
                || (variant && graph.is_reference_type(from) && self.relate(from, to, guard))
        })
    }

    /// Rule 7: `T` is `Nullable<T>` for a value type `T`.
    fn is_nullable_lift(&self, source: TypeId, target: TypeId) -> bool {
        let Some(wrapper) = &self.nullable_wrapper else {
            return false;
        };
        let graph = self.graph;
        if !graph.type_kind(source).is_value() {
            return false;
        }
        let definition = graph.original_definition(target);
        if definition == target || !graph.qualified_name(definition).matches(wrapper) {
            return false;
        }
        matches!(graph.type_arguments(target), [inner] if graph.same_symbol(*inner, source))
    }

    fn relate_by_name(&self, source: TypeId, target: &QualifiedName) -> bool {
        let graph = self.graph;
        if let Some(root) = graph.universal_root() {
            if graph.qualified_name(root).matches(target) && graph.is_reference_type(source) {
                return true;
            }
        }
        supertype_closure(graph, source).into_iter().any(|candidate| {
            graph.qualified_name(candidate).matches(target)
                || graph
                    .qualified_name(graph.original_definition(candidate))
                    .matches(target)
        })
    }
}

/// Shorthand for `CompatChecker::new(graph).is(source, target)`.
pub fn is_type<G: SymbolGraph + ?Sized>(
    graph: &G,
    source: TypeId,
    target: TypeId,
) -> ResolveResult<bool> {
    CompatChecker::new(graph).is(source, target)
}

#[cfg(test)]
#[path = "../tests/compat_tests.rs"]
mod tests;
