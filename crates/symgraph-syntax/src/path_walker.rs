//! Access-path canonicalization.
//!
//! A walk turns a left-associative access chain into the member names it
//! reads, outermost last:
//!
//! | expression                     | path              |
//! |--------------------------------|-------------------|
//! | `this.foo.Inner`               | `foo.Inner`       |
//! | `this.foo?.Inner?.foo?.Inner`  | `foo.Inner.foo.Inner` |
//! | `(meh as Foo)?.Inner`          | `meh.Inner`       |
//! | `((Foo)this.meh).Get<int>(1)`  | `meh`             |
//! | `foo.Get().Inner`              | `foo.Get.Inner`   |
//!
//! Casts, type tests and parentheses are transparent, `?.` reads like `.`,
//! and a leading `this` is dropped. An invocation contributes its member
//! name only when its result is accessed further; arguments and type
//! arguments are never walked.
//!
//! Every node visited during one walk is remembered. Reaching a node a
//! second time (a property whose accessor reads the property itself) ends
//! the walk with the names collected so far and marks the path aborted.
//!
//! Walkers are pooled per thread. [`PathWalker::borrow`] hands out a guard
//! that resets the walker and returns it to the pool when dropped. Each
//! pool is bounded by its thread's capacity, or by the process default
//! when the thread never set one.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use symgraph_common::limits::{DEFAULT_WALKER_POOL_CAPACITY, MAX_ACCESS_PATH_NODES};
use thiserror::Error;
use tracing::debug;

use crate::node::{AccessNode, AccessSyntax, NodeIndex};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalkError {
    #[error("node {0:?} does not exist in the syntax tree")]
    UnknownNode(NodeIndex),
}

/// The member names along one access chain.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct AccessPath {
    segments: SmallVec<[Arc<str>; 4]>,
    aborted: bool,
}

impl AccessPath {
    pub fn segments(&self) -> &[Arc<str>] {
        &self.segments
    }

    /// Whether the walk stopped early on a revisited node or the node limit.
    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Same names in the same order; the aborted flag is ignored.
    pub fn same_members(&self, other: &AccessPath) -> bool {
        self.segments == other.segments
    }
}

impl fmt::Display for AccessPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

/// Reusable walk state. Obtain one through [`PathWalker::borrow`] or
/// [`PathWalker::acquire`] to reuse buffers across walks.
#[derive(Debug, Default)]
pub struct PathWalker {
    visited: FxHashSet<NodeIndex>,
    /// Collected outermost-first; reversed when the walk completes.
    segments: Vec<Arc<str>>,
    aborted: bool,
}

static DEFAULT_POOL_CAPACITY: AtomicUsize = AtomicUsize::new(DEFAULT_WALKER_POOL_CAPACITY);

thread_local! {
    static POOL: RefCell<Vec<PathWalker>> = const { RefCell::new(Vec::new()) };
    /// `None` follows [`DEFAULT_POOL_CAPACITY`].
    static POOL_CAPACITY: Cell<Option<usize>> = const { Cell::new(None) };
}

fn pool_capacity() -> usize {
    POOL_CAPACITY
        .try_with(Cell::get)
        .ok()
        .flatten()
        .unwrap_or_else(|| DEFAULT_POOL_CAPACITY.load(Ordering::Relaxed))
}

fn trim_pool() {
    let capacity = pool_capacity();
    let _ = POOL.try_with(|pool| pool.borrow_mut().truncate(capacity));
}

impl PathWalker {
    /// Take a walker from this thread's pool (or a fresh one).
    pub fn acquire() -> PooledPathWalker {
        let walker = POOL
            .try_with(|pool| pool.borrow_mut().pop())
            .ok()
            .flatten()
            .unwrap_or_default();
        PooledPathWalker { walker }
    }

    /// Acquire a walker and walk `expr` with it. The guard exposes the
    /// result until it is dropped.
    pub fn borrow<S: AccessSyntax + ?Sized>(
        syntax: &S,
        expr: NodeIndex,
    ) -> Result<PooledPathWalker, WalkError> {
        let mut guard = Self::acquire();
        guard.walk(syntax, expr)?;
        Ok(guard)
    }

    /// Set how many idle walkers this thread keeps, overriding the process
    /// default.
    pub fn set_pool_capacity(capacity: usize) {
        let _ = POOL_CAPACITY.try_with(|cell| cell.set(Some(capacity)));
        trim_pool();
    }

    /// Set how many idle walkers every thread without its own capacity
    /// keeps. Other threads trim their pools on their next release.
    pub fn set_default_pool_capacity(capacity: usize) {
        DEFAULT_POOL_CAPACITY.store(capacity, Ordering::Relaxed);
        trim_pool();
    }

    /// Capacity in effect on this thread.
    pub fn pool_capacity() -> usize {
        pool_capacity()
    }

    /// Idle walkers currently pooled on this thread.
    pub fn pooled() -> usize {
        POOL.try_with(|pool| pool.borrow().len()).unwrap_or(0)
    }

    /// Walk `expr`, replacing whatever this walker held before.
    pub fn walk<S: AccessSyntax + ?Sized>(
        &mut self,
        syntax: &S,
        expr: NodeIndex,
    ) -> Result<(), WalkError> {
        self.reset();

        let mut current = Some(expr);
        // The walked expression itself, seen through any wrappers.
        let mut outermost = true;

        while let Some(index) = current {
            if !self.visited.insert(index) || self.visited.len() > MAX_ACCESS_PATH_NODES as usize {
                debug!(
                    node = index.0,
                    collected = self.segments.len(),
                    "access path walk aborted"
                );
                self.aborted = true;
                break;
            }

            let node = syntax.node(index).ok_or(WalkError::UnknownNode(index))?;
            if let Some(operand) = node.unwrapped_operand() {
                current = Some(operand);
                continue;
            }

            // The call being walked is not itself read through.
            let result_unread = outermost && matches!(node, AccessNode::Invocation { .. });
            if let Some(name) = node.member_name().filter(|_| !result_unread) {
                self.segments.push(name.clone());
            }
            current = match node {
                AccessNode::MemberAccess { receiver, .. }
                | AccessNode::ConditionalAccess { receiver, .. } => Some(*receiver),
                AccessNode::Invocation { target, .. } => *target,
                _ => None,
            };
            outermost = false;
        }

        self.segments.reverse();
        Ok(())
    }

    /// Names from the last walk, innermost first.
    pub fn segments(&self) -> &[Arc<str>] {
        &self.segments
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// Copy of the last walk's result.
    pub fn to_path(&self) -> AccessPath {
        AccessPath {
            segments: self.segments.iter().cloned().collect(),
            aborted: self.aborted,
        }
    }

    /// Clear all state; buffers keep their capacity.
    pub fn reset(&mut self) {
        self.visited.clear();
        self.segments.clear();
        self.aborted = false;
    }
}

/// A walker on loan from the thread-local pool.
pub struct PooledPathWalker {
    walker: PathWalker,
}

impl Deref for PooledPathWalker {
    type Target = PathWalker;

    fn deref(&self) -> &PathWalker {
        &self.walker
    }
}

impl DerefMut for PooledPathWalker {
    fn deref_mut(&mut self) -> &mut PathWalker {
        &mut self.walker
    }
}

impl Drop for PooledPathWalker {
    fn drop(&mut self) {
        let mut walker = std::mem::take(&mut self.walker);
        walker.reset();
        let capacity = pool_capacity();
        // The pool may already be gone during thread teardown.
        let _ = POOL.try_with(|pool| {
            let mut pool = pool.borrow_mut();
            pool.truncate(capacity);
            if pool.len() < capacity {
                pool.push(walker);
            }
        });
    }
}

/// Walk `expr` with a pooled walker.
pub fn walk_path<S: AccessSyntax + ?Sized>(
    syntax: &S,
    expr: NodeIndex,
) -> Result<AccessPath, WalkError> {
    PathWalker::borrow(syntax, expr).map(|walker| walker.to_path())
}

/// Whether `a` and `b` read the same member path (`this.foo.Bar` and
/// `(foo as IFoo)?.Bar` do).
pub fn member_path_eq<S: AccessSyntax + ?Sized>(
    syntax: &S,
    a: NodeIndex,
    b: NodeIndex,
) -> Result<bool, WalkError> {
    let left = PathWalker::borrow(syntax, a)?;
    let right = PathWalker::borrow(syntax, b)?;
    Ok(left.segments() == right.segments())
}

#[cfg(test)]
#[path = "../tests/path_walker_tests.rs"]
mod tests;
