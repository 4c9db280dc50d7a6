//! Backend record identifier.

use serde::{Deserialize, Serialize};

use crate::domain::serde_utils::string_to_u64;

/// Internal identifier assigned to a record by the backend.
///
/// Only used to address updates and deletes; records reference each other
/// through their business `kode`, never through this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(#[serde(with = "string_to_u64")] pub u64);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_from_string() {
        let id: EntityId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(id, EntityId(42));
        assert_eq!(id.to_string(), "42");
    }
}
