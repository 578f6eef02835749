//! Name-only type references.
//!
//! A [`QualifiedName`] describes a type by its dotted metadata name and
//! generic arity (`System.Collections.Generic.IEnumerable`1`). It is used
//! where no live symbol exists, for example when comparing against a type
//! from another module. Two names are equal iff their segments and arity
//! are equal; graph identity plays no part.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::ResolveError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualifiedName {
    segments: Vec<Arc<str>>,
    arity: u32,
}

impl QualifiedName {
    /// Build a name from namespace segments, a simple name and an arity.
    pub fn new<I, S>(namespace: I, name: &str, arity: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut segments: Vec<Arc<str>> = namespace
            .into_iter()
            .map(|segment| Arc::from(segment.as_ref()))
            .collect();
        segments.push(Arc::from(name));
        Self { segments, arity }
    }

    /// Parse metadata form: dot separated segments, optional `` `N `` arity
    /// suffix on the last segment.
    pub fn parse(text: &str) -> Result<Self, ResolveError> {
        let invalid = || ResolveError::InvalidQualifiedName(text.to_string());
        let text = text.trim();
        if text.is_empty() {
            return Err(invalid());
        }

        let (path, arity) = match text.rsplit_once('`') {
            Some((path, digits)) => {
                let arity = digits.parse::<u32>().map_err(|_| invalid())?;
                (path, arity)
            }
            None => (text, 0),
        };

        let mut segments = Vec::new();
        for segment in path.split('.') {
            if segment.is_empty() || segment.contains(['<', '>', ',', ' ']) {
                return Err(invalid());
            }
            segments.push(Arc::from(segment));
        }

        Ok(Self { segments, arity })
    }

    /// The simple (last) name without arity.
    pub fn name(&self) -> &str {
        self.segments.last().map(|s| s.as_ref()).unwrap_or("")
    }

    /// Namespace segments, excluding the simple name.
    pub fn namespace(&self) -> impl Iterator<Item = &str> {
        let len = self.segments.len().saturating_sub(1);
        self.segments[..len].iter().map(|s| s.as_ref())
    }

    pub fn arity(&self) -> u32 {
        self.arity
    }

    /// Name+arity match.
    #[inline]
    pub fn matches(&self, other: &QualifiedName) -> bool {
        self == other
    }
}

impl FromStr for QualifiedName {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment)?;
        }
        if self.arity > 0 {
            write!(f, "`{}", self.arity)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/qualified_tests.rs"]
mod tests;
