//! Strong type definitions for exploration rights.
//!
//! Identifiers and version tokens are newtypes so they cannot be swapped
//! for arbitrary strings or integers at call sites.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an exploration (the document whose rights are managed).
///
/// Serialized as a bare string, e.g. `"expl_42"`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExplorationId(String);

impl ExplorationId {
    /// Create a new ExplorationId.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the raw identifier.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for ExplorationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExplorationId({})", self.0)
    }
}

impl fmt::Display for ExplorationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ExplorationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ExplorationId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ExplorationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for ExplorationId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ExplorationId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Optimistic-concurrency version token of an exploration.
///
/// The authority rejects writes carrying a version that no longer matches
/// the document it holds.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(pub u64);

impl Version {
    /// The first version of a freshly created exploration.
    pub const INITIAL: Self = Self(1);

    /// Get the raw version number.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The version following this one.
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Debug for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Version({})", self.0)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Version {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
