//! The hunter identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a hunter profile.
///
/// The backend may send it as a string or as a number,
/// either way it is kept as a string on the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawHunterId")]
pub struct HunterId(String);

impl HunterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Picks the canonical id out of the `id` and `_id` fields of a backend object.
    /// Empty ids count as missing.
    pub fn canonical(id: Option<Self>, object_id: Option<Self>) -> Option<Self> {
        id.filter(|id| !id.is_empty())
            .or_else(|| object_id.filter(|id| !id.is_empty()))
    }
}

impl fmt::Display for HunterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HunterId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for HunterId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawHunterId {
    Text(String),
    Integer(i64),
}

impl From<RawHunterId> for HunterId {
    fn from(value: RawHunterId) -> Self {
        match value {
            RawHunterId::Text(text) => Self(text),
            RawHunterId::Integer(number) => Self(number.to_string()),
        }
    }
}
