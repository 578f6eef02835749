//! Structured query tracing for solver entry points.
//!
//! Events use target `symgraph::query_json` and are intended to be consumed
//! with: `SYMGRAPH_LOG=symgraph::query_json=trace SYMGRAPH_LOG_FORMAT=json`.
//!
//! Environment:
//! - `SYMGRAPH_QUERY_RUN_ID`: optional run identifier attached to every event.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{Level, trace};

use crate::types::TypeId;

static NEXT_QUERY_ID: AtomicU64 = AtomicU64::new(1);
static QUERY_RUN_ID: OnceLock<String> = OnceLock::new();

#[inline]
pub(crate) fn enabled() -> bool {
    tracing::enabled!(target: "symgraph::query_json", Level::TRACE)
}

#[inline]
pub(crate) fn next_query_id() -> u64 {
    NEXT_QUERY_ID.fetch_add(1, Ordering::Relaxed)
}

#[inline]
fn run_id() -> &'static str {
    QUERY_RUN_ID
        .get_or_init(|| {
            std::env::var("SYMGRAPH_QUERY_RUN_ID").unwrap_or_else(|_| "default".to_string())
        })
        .as_str()
}

#[inline]
pub(crate) fn relation_start(query_id: u64, op: &'static str, source: TypeId, target: TypeId) {
    trace!(
        target: "symgraph::query_json",
        event = "query",
        phase = "start",
        run_id = run_id(),
        query_id,
        op,
        source_type_id = source.0,
        target_type_id = target.0
    );
}

#[inline]
pub(crate) fn named_start(query_id: u64, op: &'static str, source: TypeId, name: &str) {
    trace!(
        target: "symgraph::query_json",
        event = "query",
        phase = "start",
        run_id = run_id(),
        query_id,
        op,
        source_type_id = source.0,
        name
    );
}

#[inline]
pub(crate) fn relation_end(query_id: u64, op: &'static str, result: bool, cache_hit: bool) {
    trace!(
        target: "symgraph::query_json",
        event = "query",
        phase = "end",
        run_id = run_id(),
        query_id,
        op,
        result,
        cache_hit
    );
}

#[inline]
pub(crate) fn lookup_end(query_id: u64, op: &'static str, outcome: &'static str) {
    trace!(
        target: "symgraph::query_json",
        event = "query",
        phase = "end",
        run_id = run_id(),
        query_id,
        op,
        outcome
    );
}
