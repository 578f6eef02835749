//! Tracing subscriber setup for hosts and test runs.
//!
//! Output format is chosen by `SYMGRAPH_LOG_FORMAT`:
//!
//! - `text` (default): flat `tracing-subscriber` lines
//! - `tree`: indented spans via `tracing-tree`
//! - `json`: one JSON object per event
//!
//! ```bash
//! SYMGRAPH_LOG=debug SYMGRAPH_LOG_FORMAT=tree cargo test -p symgraph
//!
//! # Structured query records only
//! SYMGRAPH_LOG="symgraph::query_json=trace" SYMGRAPH_LOG_FORMAT=json host-binary
//!
//! # Cache scopes and walker aborts
//! SYMGRAPH_LOG="symgraph_solver::cache=debug,symgraph_syntax=debug" host-binary
//! ```
//!
//! Nothing is installed unless `SYMGRAPH_LOG` or `RUST_LOG` is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Parse a `SYMGRAPH_LOG_FORMAT` value; unknown values mean [`LogFormat::Text`].
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("SYMGRAPH_LOG_FORMAT").unwrap_or_default())
    }
}

/// `SYMGRAPH_LOG` takes precedence over `RUST_LOG`.
fn build_filter() -> EnvFilter {
    match std::env::var("SYMGRAPH_LOG") {
        Ok(directives) => EnvFilter::builder().parse_lossy(directives),
        Err(_) => EnvFilter::from_default_env(),
    }
}

/// Install the global subscriber, writing to stderr.
///
/// Returns `false` when logging was not requested or another subscriber is
/// already installed.
pub fn init_tracing() -> bool {
    if std::env::var_os("SYMGRAPH_LOG").is_none() && std::env::var_os("RUST_LOG").is_none() {
        return false;
    }

    let filter = build_filter();
    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_writer(std::io::stderr)
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_targets(true);
            Registry::default().with(filter).with(tree_layer).try_init().is_ok()
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).try_init().is_ok()
        }
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok(),
    }
}
