//! Customer (pelanggan) entity.

use serde::{Deserialize, Serialize};

use super::EntityId;
use crate::domain::serde_utils::{null_as_default, null_as_empty};

/// Customer gender, one of two enumerated values on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// Male (`PRIA`).
    #[default]
    #[serde(rename = "PRIA")]
    Pria,
    /// Female (`WANITA`).
    #[serde(rename = "WANITA")]
    Wanita,
}

impl Gender {
    /// All values in picker order.
    pub const ALL: [Self; 2] = [Self::Pria, Self::Wanita];

    /// Returns the wire value.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Pria => "PRIA",
            Self::Wanita => "WANITA",
        }
    }

    /// Returns the picker label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pria => "Pria",
            Self::Wanita => "Wanita",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Customer record as returned by the backend.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: EntityId,
    #[serde(rename = "kode", default, deserialize_with = "null_as_empty")]
    pub code: String,
    #[serde(rename = "nama", default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(rename = "domisili", default, deserialize_with = "null_as_empty")]
    pub residence: String,
    #[serde(rename = "jenis_kelamin", default, deserialize_with = "null_as_default")]
    pub gender: Gender,
}

impl Customer {
    /// Creates a customer record.
    #[must_use]
    pub fn new(
        id: impl Into<EntityId>,
        code: impl Into<String>,
        name: impl Into<String>,
        residence: impl Into<String>,
        gender: Gender,
    ) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: name.into(),
            residence: residence.into(),
            gender,
        }
    }
}
