//! Engine options.
//!
//! Options are plain data: the solver resolves the names they contain
//! against a concrete symbol graph when a compilation is set up. They can be
//! built in code or loaded from JSON:
//!
//! ```json
//! {
//!   "universalRoot": "System.Object",
//!   "nullableWrapper": "System.Nullable`1",
//!   "aliases": { "int": "System.Int32" },
//!   "implicitConversions": [{ "from": "System.Int32", "to": "System.Double" }]
//! }
//! ```
//!
//! Every field is optional; missing fields take the defaults below.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::limits::DEFAULT_WALKER_POOL_CAPACITY;

/// Errors produced while loading or validating [`EngineOptions`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid engine options: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("alias '{alias}' maps to an empty qualified name")]
    EmptyAlias { alias: String },

    #[error("implicit conversion has an empty endpoint ({from:?} -> {to:?})")]
    EmptyConversion { from: String, to: String },
}

/// A directed implicit conversion between two qualified type names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRule {
    pub from: String,
    pub to: String,
}

impl ConversionRule {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Tunables for the resolution engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineOptions {
    /// Metadata name of the type every reference type descends from. Must
    /// name the graph's own root when the graph declares one.
    pub universal_root: String,
    /// Metadata name of the generic value wrapper that lifts `T` to `T?`.
    /// `None` disables nullable lifting.
    pub nullable_wrapper: Option<String>,
    /// Language alias -> canonical metadata name (`int` -> `System.Int32`).
    pub aliases: FxHashMap<String, String>,
    /// Conversions that compilation-aware checks accept in addition to
    /// nominal compatibility. Defaults to the numeric widenings; a list
    /// given in JSON replaces them.
    pub implicit_conversions: Vec<ConversionRule>,
    /// Released path walkers kept per thread. A session applies it to every
    /// thread that has not set its own capacity.
    pub walker_pool_capacity: usize,
}

const PRIMITIVE_ALIASES: &[(&str, &str)] = &[
    ("bool", "System.Boolean"),
    ("byte", "System.Byte"),
    ("sbyte", "System.SByte"),
    ("char", "System.Char"),
    ("short", "System.Int16"),
    ("ushort", "System.UInt16"),
    ("int", "System.Int32"),
    ("uint", "System.UInt32"),
    ("long", "System.Int64"),
    ("ulong", "System.UInt64"),
    ("float", "System.Single"),
    ("double", "System.Double"),
    ("decimal", "System.Decimal"),
    ("string", "System.String"),
    ("object", "System.Object"),
];

/// Implicit numeric conversions of the C# language.
const NUMERIC_CONVERSIONS: &[(&str, &[&str])] = &[
    ("System.SByte", &["System.Int16", "System.Int32", "System.Int64", "System.Single", "System.Double", "System.Decimal"]),
    ("System.Byte", &["System.Int16", "System.UInt16", "System.Int32", "System.UInt32", "System.Int64", "System.UInt64", "System.Single", "System.Double", "System.Decimal"]),
    ("System.Int16", &["System.Int32", "System.Int64", "System.Single", "System.Double", "System.Decimal"]),
    ("System.UInt16", &["System.Int32", "System.UInt32", "System.Int64", "System.UInt64", "System.Single", "System.Double", "System.Decimal"]),
    ("System.Int32", &["System.Int64", "System.Single", "System.Double", "System.Decimal"]),
    ("System.UInt32", &["System.Int64", "System.UInt64", "System.Single", "System.Double", "System.Decimal"]),
    ("System.Int64", &["System.Single", "System.Double", "System.Decimal"]),
    ("System.UInt64", &["System.Single", "System.Double", "System.Decimal"]),
    ("System.Char", &["System.UInt16", "System.Int32", "System.UInt32", "System.Int64", "System.UInt64", "System.Single", "System.Double", "System.Decimal"]),
    ("System.Single", &["System.Double"]),
];

/// [`NUMERIC_CONVERSIONS`] flattened into rules.
pub fn numeric_conversions() -> Vec<ConversionRule> {
    NUMERIC_CONVERSIONS
        .iter()
        .flat_map(|(from, targets)| targets.iter().map(move |to| ConversionRule::new(*from, *to)))
        .collect()
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            universal_root: "System.Object".to_string(),
            nullable_wrapper: Some("System.Nullable`1".to_string()),
            aliases: PRIMITIVE_ALIASES
                .iter()
                .map(|(alias, canonical)| (alias.to_string(), canonical.to_string()))
                .collect(),
            implicit_conversions: numeric_conversions(),
            walker_pool_capacity: DEFAULT_WALKER_POOL_CAPACITY,
        }
    }
}

impl EngineOptions {
    /// Parse options from JSON and validate them.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let options: EngineOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Reject entries that can never resolve to a type.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some((alias, _)) = self
            .aliases
            .iter()
            .find(|(_, canonical)| canonical.trim().is_empty())
        {
            return Err(ConfigError::EmptyAlias {
                alias: alias.clone(),
            });
        }
        if let Some(rule) = self
            .implicit_conversions
            .iter()
            .find(|rule| rule.from.trim().is_empty() || rule.to.trim().is_empty())
        {
            return Err(ConfigError::EmptyConversion {
                from: rule.from.clone(),
                to: rule.to.clone(),
            });
        }
        Ok(())
    }

    /// Canonical metadata name for `alias`, if it is a known alias.
    pub fn canonical_name(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    pub fn with_implicit_conversion(mut self, from: &str, to: &str) -> Self {
        self.implicit_conversions.push(ConversionRule::new(from, to));
        self
    }

    pub fn with_alias(mut self, alias: &str, canonical: &str) -> Self {
        self.aliases.insert(alias.to_string(), canonical.to_string());
        self
    }
}

#[cfg(test)]
#[path = "../tests/options_tests.rs"]
mod tests;
