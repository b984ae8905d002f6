//! Domain identifier types
//!
//! The store owns persisted identity. [`PlantId`] wraps whatever opaque id the
//! store hands back (a UUID for PostgreSQL and PostgREST, a counter for the
//! in-memory store) so ids cannot be confused with other strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Store-assigned plant identifier
///
/// # Examples
///
/// ```
/// use domekeeper::domain::ids::PlantId;
/// use std::str::FromStr;
///
/// let id = PlantId::from_str("5b0f7c1e-8d1a-4c53-9a43-2f6f0a6b8f11").unwrap();
/// assert_eq!(id.as_str(), "5b0f7c1e-8d1a-4c53-9a43-2f6f0a6b8f11");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlantId(String);

impl PlantId {
    /// Creates a new PlantId, rejecting blank ids
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Plant ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PlantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlantId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<u64> for PlantId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for PlantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
