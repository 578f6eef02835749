//! Common types and utilities for the symgraph resolution engine.
//!
//! This crate provides foundational pieces shared by the solver and the
//! syntax crates:
//! - Centralized limits for graph and expression walks
//! - Engine options (universal root, aliases, conversions) and their loading

// Centralized limits and thresholds
pub mod limits;

// Engine configuration
pub mod options;
pub use options::{ConfigError, ConversionRule, EngineOptions, numeric_conversions};
