//! Sales order (penjualan) entity.

use serde::{Deserialize, Serialize};

use super::{Customer, EntityId, Goods};
use crate::domain::serde_utils::{lenient_number, null_as_empty};

/// One enriched line of an order read from the backend.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Referenced goods, `None` when the backend could not resolve it.
    #[serde(rename = "barang", default)]
    pub goods: Option<Goods>,
    #[serde(with = "lenient_number", default)]
    pub qty: f64,
    /// Line total computed by the backend.
    #[serde(with = "lenient_number", default)]
    pub total: f64,
}

/// Sales order as returned by the backend.
///
/// The backend resolves the customer and every line's goods, and computes
/// the line totals and the subtotal. The client never recomputes them.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: EntityId,
    #[serde(rename = "nota", default, deserialize_with = "null_as_empty")]
    pub number: String,
    #[serde(rename = "tgl", default, deserialize_with = "null_as_empty")]
    pub date: String,
    #[serde(rename = "pelanggan", default)]
    pub customer: Option<Customer>,
    #[serde(default)]
    pub items: Vec<OrderLine>,
    #[serde(with = "lenient_number", default)]
    pub subtotal: f64,
}

impl OrderLine {
    /// Returns the business code of the referenced goods, empty if unresolved.
    #[must_use]
    pub fn goods_code(&self) -> &str {
        self.goods.as_ref().map_or("", |g| g.code.as_str())
    }
}

impl Order {
    /// Returns the business code of the referenced customer, if resolved.
    #[must_use]
    pub fn customer_code(&self) -> Option<&str> {
        self.customer.as_ref().map(|c| c.code.as_str())
    }

    /// Returns the name of the referenced customer, empty if unresolved.
    #[must_use]
    pub fn customer_name(&self) -> &str {
        self.customer.as_ref().map_or("", |c| c.name.as_str())
    }
}
