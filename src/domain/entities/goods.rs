//! Goods (barang) entity.

use serde::{Deserialize, Serialize};

use super::EntityId;
use crate::domain::serde_utils::{lenient_number, null_as_empty};

/// Goods record as returned by the backend.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goods {
    pub id: EntityId,
    #[serde(rename = "kode", default, deserialize_with = "null_as_empty")]
    pub code: String,
    #[serde(rename = "nama", default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(rename = "kategori", default, deserialize_with = "null_as_empty")]
    pub category: String,
    #[serde(rename = "harga", with = "lenient_number", default)]
    pub price: f64,
}

impl Goods {
    /// Creates a goods record.
    #[must_use]
    pub fn new(
        id: impl Into<EntityId>,
        code: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: name.into(),
            category: category.into(),
            price,
        }
    }

    /// Returns the label used by goods pickers: `nama (kode)`.
    #[must_use]
    pub fn picker_label(&self) -> String {
        format!("{} ({})", self.name, self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_price_from_decimal_string() {
        let goods: Goods = serde_json::from_value(json!({
            "id": 2,
            "kode": "B1",
            "nama": "Pen",
            "kategori": "ATK",
            "harga": "5000.00"
        }))
        .unwrap();

        assert!((goods.price - 5000.0).abs() < f64::EPSILON);
        assert_eq!(goods.picker_label(), "Pen (B1)");
    }
}
