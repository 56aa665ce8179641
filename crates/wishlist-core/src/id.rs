//! Stable identifier for wishes.
//!
//! [`WishId`] is a newtype over a UUID v4 so that a wish id cannot be confused
//! with any other string the surfaces pass around.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// Opaque, globally unique wish identifier.
///
/// Serializes as the hyphenated UUID string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WishId(pub Uuid);

impl WishId {
    /// Generates a fresh random id. Never repeats within a process lifetime.
    pub fn new() -> Self {
        WishId(Uuid::new_v4())
    }
}

impl Default for WishId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WishId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WishId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(WishId)
            .map_err(|err| CoreError::InvalidWishId {
                input: s.to_string(),
                reason: err.to_string(),
            })
    }
}

impl From<Uuid> for WishId {
    fn from(uuid: Uuid) -> Self {
        WishId(uuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_distinct() {
        let a = WishId::new();
        let b = WishId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn display_then_parse() {
        let id = WishId::new();
        let parsed: WishId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = "not-a-uuid".parse::<WishId>().unwrap_err();
        assert!(
            matches!(err, CoreError::InvalidWishId { ref input, .. } if input == "not-a-uuid"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = WishId::new();
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json, serde_json::Value::String(id.to_string()));
    }
}
