//! Compilation context for compatibility checks.
//!
//! A [`Compilation`] resolves the language-level facts carried by
//! [`EngineOptions`] (keyword aliases, implicit conversions) against one
//! symbol graph, once. Names that the graph does not declare are skipped,
//! except the universal root, which must name the graph's own root.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use symgraph_common::EngineOptions;
use tracing::debug;

use crate::compat::CompatChecker;
use crate::error::{ResolveError, ResolveResult};
use crate::graph::SymbolGraph;
use crate::qualified::QualifiedName;
use crate::query_trace;
use crate::types::{GraphId, TypeId};

#[derive(Debug, Clone)]
pub struct Compilation {
    graph: GraphId,
    aliases: FxHashMap<TypeId, TypeId>,
    conversions: FxHashMap<TypeId, SmallVec<[TypeId; 4]>>,
}

impl Compilation {
    pub fn new<G: SymbolGraph + ?Sized>(graph: &G, options: &EngineOptions) -> ResolveResult<Self> {
        let resolve = |name: &str| -> ResolveResult<Option<TypeId>> {
            let name = QualifiedName::parse(name)?;
            Ok(graph.lookup_type(&name))
        };
        // Conversion endpoints may be spelled as aliases.
        let resolve_endpoint = |name: &str| -> ResolveResult<Option<TypeId>> {
            match resolve(name)? {
                Some(ty) => Ok(Some(ty)),
                None => options.canonical_name(name).map_or(Ok(None), resolve),
            }
        };

        let configured_root = QualifiedName::parse(&options.universal_root)?;
        if let Some(root) = graph.universal_root() {
            let actual = graph.qualified_name(root);
            if !actual.matches(&configured_root) {
                return Err(ResolveError::UniversalRootMismatch {
                    configured: configured_root.to_string(),
                    actual: actual.to_string(),
                });
            }
        }

        let mut aliases = FxHashMap::default();
        for (alias, canonical) in &options.aliases {
            match (resolve(alias)?, resolve(canonical)?) {
                (Some(alias_ty), Some(canonical_ty)) => {
                    aliases.insert(alias_ty, canonical_ty);
                }
                _ => debug!(
                    alias = alias.as_str(),
                    canonical = canonical.as_str(),
                    "alias not declared in graph, skipped"
                ),
            }
        }

        let mut conversions: FxHashMap<TypeId, SmallVec<[TypeId; 4]>> = FxHashMap::default();
        for rule in &options.implicit_conversions {
            match (resolve_endpoint(&rule.from)?, resolve_endpoint(&rule.to)?) {
                (Some(from), Some(to)) => {
                    let from = aliases.get(&from).copied().unwrap_or(from);
                    let to = aliases.get(&to).copied().unwrap_or(to);
                    let targets = conversions.entry(from).or_default();
                    if !targets.contains(&to) {
                        targets.push(to);
                    }
                }
                _ => debug!(
                    from = rule.from.as_str(),
                    to = rule.to.as_str(),
                    "implicit conversion not declared in graph, skipped"
                ),
            }
        }

        Ok(Self {
            graph: graph.graph_id(),
            aliases,
            conversions,
        })
    }

    /// Graph the names were resolved against.
    #[inline]
    pub fn graph_id(&self) -> GraphId {
        self.graph
    }

    /// The canonical type for an alias type, or `ty` itself.
    #[inline]
    pub fn canonical(&self, ty: TypeId) -> TypeId {
        self.aliases.get(&ty).copied().unwrap_or(ty)
    }

    pub fn implicit_targets(&self, ty: TypeId) -> &[TypeId] {
        self.conversions
            .get(&self.canonical(ty))
            .map(|targets| targets.as_slice())
            .unwrap_or_default()
    }
}

impl<G: SymbolGraph + ?Sized> CompatChecker<'_, G> {
    /// Compatibility with language aliases and implicit conversions taken
    /// into account: `int` is `System.Int32`, and `System.Int32` is
    /// `System.Double` when that conversion is configured.
    pub fn is_in_compilation(
        &self,
        source: TypeId,
        target: TypeId,
        compilation: &Compilation,
    ) -> ResolveResult<bool> {
        self.ensure_known(source)?;
        self.ensure_known(target)?;
        if compilation.graph_id() != self.graph().graph_id() {
            return Err(ResolveError::CompilationGraphMismatch {
                expected: compilation.graph_id(),
                actual: self.graph().graph_id(),
            });
        }

        let trace_query_id = query_trace::enabled().then(|| {
            let query_id = query_trace::next_query_id();
            query_trace::relation_start(query_id, "is_in_compilation", source, target);
            query_id
        });

        let graph = self.graph();
        let (source, target) = (compilation.canonical(source), compilation.canonical(target));
        let mut result = graph.same_symbol(source, target);
        for &via in compilation.implicit_targets(source) {
            if result {
                break;
            }
            result = graph.same_symbol(via, target) || self.is(via, target)?;
        }
        if !result {
            result = self.is(source, target)?;
        }

        if let Some(query_id) = trace_query_id {
            query_trace::relation_end(query_id, "is_in_compilation", result, false);
        }
        Ok(result)
    }
}

#[cfg(test)]
#[path = "../tests/compilation_tests.rs"]
mod tests;
