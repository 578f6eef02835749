//! Scoped result cache.
//!
//! A [`ScopedCache`] only remembers values while at least one scope is
//! open. Scopes are reference counted: the host opens one when an analysis
//! unit starts and closes it when the unit ends; nested units share the
//! store. When the last scope closes, every entry is dropped. Outside any
//! scope `get_or_add` degrades to calling the factory.
//!
//! Factories run without any lock held, so they may query the cache
//! (including the same cache) recursively. Two threads missing the same key
//! may both run the factory; the first value stored is the one every caller
//! sees afterwards.

use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use std::any::Any;
use std::hash::Hash;
use std::sync::{OnceLock, PoisonError, RwLock};
use tracing::{debug, trace};

use crate::error::CacheError;

type SharedRegistry = DashMap<std::any::TypeId, &'static (dyn Any + Send + Sync), FxBuildHasher>;

pub struct ScopedCache<K, V> {
    entries: DashMap<K, V, FxBuildHasher>,
    scopes: RwLock<ScopeState>,
}

#[derive(Clone, Copy, Debug, Default)]
struct ScopeState {
    depth: usize,
    /// Bumped every time the last scope closes; one value per analysis unit.
    generation: u64,
}

impl<K, V> Default for ScopedCache<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self {
            entries: DashMap::with_hasher(FxBuildHasher),
            scopes: RwLock::new(ScopeState::default()),
        }
    }
}

impl<K, V> ScopedCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached value for `key`, or the factory's result (stored when a
    /// scope is open).
    pub fn get_or_add(&self, key: K, factory: impl FnOnce(&K) -> V) -> V {
        let started = self.state();
        if started.depth == 0 {
            return factory(&key);
        }
        if let Some(hit) = self.entries.get(&key) {
            return hit.value().clone();
        }

        let value = factory(&key);

        // Holding the read side keeps a concurrent `end()` from clearing
        // between the check and the insert. A value computed for a unit that
        // has since ended is not stored, even if another unit has begun.
        let scopes = self.scopes.read().unwrap_or_else(PoisonError::into_inner);
        if scopes.depth == 0 || scopes.generation != started.generation {
            trace!(cache = Self::name(), "value outlived its scope, not stored");
            return value;
        }
        self.entries.entry(key).or_insert(value).value().clone()
    }

    /// Cached value without running anything.
    pub fn get(&self, key: &K) -> Option<V> {
        self.entries.get(key).map(|hit| hit.value().clone())
    }

    /// Open a scope.
    pub fn begin(&self) {
        let mut scopes = self.scopes.write().unwrap_or_else(PoisonError::into_inner);
        scopes.depth += 1;
        debug!(cache = Self::name(), depth = scopes.depth, "cache scope begin");
    }

    /// Close a scope; the last one to close clears the store.
    pub fn end(&self) -> Result<(), CacheError> {
        let mut scopes = self.scopes.write().unwrap_or_else(PoisonError::into_inner);
        if scopes.depth == 0 {
            return Err(CacheError::UnbalancedEnd { cache: Self::name() });
        }
        scopes.depth -= 1;
        if scopes.depth == 0 {
            scopes.generation = scopes.generation.wrapping_add(1);
            let dropped = self.entries.len();
            self.entries.clear();
            debug!(cache = Self::name(), dropped, "cache scope end, store cleared");
        } else {
            trace!(cache = Self::name(), depth = scopes.depth, "cache scope end");
        }
        Ok(())
    }

    /// Open a scope that closes when the returned guard drops.
    pub fn scope(&self) -> CacheScope<'_, K, V> {
        self.begin();
        CacheScope { cache: self }
    }

    pub fn is_active(&self) -> bool {
        self.scope_depth() > 0
    }

    pub fn scope_depth(&self) -> usize {
        self.state().depth
    }

    fn state(&self) -> ScopeState {
        *self.scopes.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<K, V> ScopedCache<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Process-wide instance for this `(K, V)` pair.
    pub fn shared() -> &'static Self {
        static REGISTRY: OnceLock<SharedRegistry> = OnceLock::new();

        let registry = REGISTRY.get_or_init(|| DashMap::with_hasher(FxBuildHasher));
        let instance: &'static (dyn Any + Send + Sync) = *registry
            .entry(std::any::TypeId::of::<Self>())
            .or_insert_with(|| -> &'static (dyn Any + Send + Sync) {
                Box::leak(Box::new(Self::new()))
            });
        instance
            .downcast_ref::<Self>()
            .expect("registry entries are keyed by their own type")
    }
}

/// Guard returned by [`ScopedCache::scope`].
#[must_use = "the scope closes as soon as the guard is dropped"]
pub struct CacheScope<'c, K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    cache: &'c ScopedCache<K, V>,
}

impl<K, V> Drop for CacheScope<'_, K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn drop(&mut self) {
        // Balanced by construction; only a stray manual `end()` can trip this.
        if let Err(err) = self.cache.end() {
            debug!(%err, "cache scope guard found no open scope");
        }
    }
}

/// [`ScopedCache::get_or_add`] on the shared instance for `(K, V)`.
pub fn get_or_add<K, V>(key: K, factory: impl FnOnce(&K) -> V) -> V
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    ScopedCache::<K, V>::shared().get_or_add(key, factory)
}

#[cfg(test)]
#[path = "../tests/cache_tests.rs"]
mod tests;
