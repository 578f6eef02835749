//! One analysis unit over a symbol graph.
//!
//! An [`AnalysisSession`] is what a host opens when it starts analysing a
//! compilation and drops when the compilation ends. While it is alive the
//! shared query caches are scoped open, so repeated `is` and member queries
//! are answered once; dropping the last session on the process clears them.

use symgraph_common::{ConfigError, EngineOptions};
use symgraph_solver::{
    CompatChecker, Compilation, ConstructorSearch, MemberId, MemberKind, MemberLookup,
    MemberResolver, QueryScopes, ResolveError, SymbolGraph, TypeId, find_default_constructor,
    open_scopes,
};
use symgraph_syntax::PathWalker;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

pub struct AnalysisSession<'g, G: SymbolGraph + ?Sized> {
    checker: CompatChecker<'g, G>,
    members: MemberResolver<'g, G>,
    compilation: Compilation,
    _scopes: QueryScopes,
}

impl<'g, G: SymbolGraph + ?Sized> AnalysisSession<'g, G> {
    /// Validate `options`, resolve them against `graph` and open the cache
    /// scopes. The walker pool capacity becomes the process default; threads
    /// that set their own capacity keep it.
    pub fn open(graph: &'g G, options: &EngineOptions) -> Result<Self, SessionError> {
        options.validate()?;
        let checker = CompatChecker::with_options(graph, options)?;
        let compilation = Compilation::new(graph, options)?;
        PathWalker::set_default_pool_capacity(options.walker_pool_capacity);

        debug!(
            graph = graph.graph_id().0,
            aliases = options.aliases.len(),
            conversions = options.implicit_conversions.len(),
            "analysis session opened"
        );

        Ok(Self {
            checker,
            members: MemberResolver::new(graph),
            compilation,
            _scopes: open_scopes(),
        })
    }

    pub fn graph(&self) -> &'g G {
        self.checker.graph()
    }

    pub fn checker(&self) -> &CompatChecker<'g, G> {
        &self.checker
    }

    pub fn members(&self) -> &MemberResolver<'g, G> {
        &self.members
    }

    pub fn compilation(&self) -> &Compilation {
        &self.compilation
    }

    /// Memoized nominal compatibility.
    pub fn is(&self, source: TypeId, target: TypeId) -> Result<bool, ResolveError> {
        self.checker.is_memoized(source, target)
    }

    /// Compatibility with this session's aliases and implicit conversions.
    pub fn is_in_compilation(&self, source: TypeId, target: TypeId) -> Result<bool, ResolveError> {
        self.checker.is_in_compilation(source, target, &self.compilation)
    }

    pub fn find_single_member(
        &self,
        ty: TypeId,
        kind: MemberKind,
        name: &str,
    ) -> Result<MemberLookup, ResolveError> {
        self.members.find_single_memoized(ty, kind, name)
    }

    pub fn find_first_member(
        &self,
        ty: TypeId,
        kind: MemberKind,
        name: &str,
    ) -> Result<MemberLookup, ResolveError> {
        self.members.find_first_memoized(ty, kind, name)
    }

    pub fn default_constructor(
        &self,
        ty: TypeId,
        search: ConstructorSearch,
    ) -> Result<Option<MemberId>, ResolveError> {
        find_default_constructor(self.graph(), ty, search)
    }
}

impl<G: SymbolGraph + ?Sized> Drop for AnalysisSession<'_, G> {
    fn drop(&mut self) {
        debug!(graph = self.graph().graph_id().0, "analysis session closed");
    }
}
