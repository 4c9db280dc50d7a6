//! Form records and request payloads.
//!
//! Each form serializes directly into the POST/PUT body its collection
//! expects, so what the user typed is what the backend receives.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Customer, Gender, Goods, Order};
use crate::domain::serde_utils::lenient_number;

/// Editable customer fields (every customer field except the id).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerForm {
    /// Business code.
    #[serde(rename = "kode")]
    pub code: String,
    /// Customer name.
    #[serde(rename = "nama")]
    pub name: String,
    /// Residence.
    #[serde(rename = "domisili")]
    pub residence: String,
    /// Gender, `PRIA` by default.
    #[serde(rename = "jenis_kelamin")]
    pub gender: Gender,
}

impl From<&Customer> for CustomerForm {
    fn from(customer: &Customer) -> Self {
        Self {
            code: customer.code.clone(),
            name: customer.name.clone(),
            residence: customer.residence.clone(),
            gender: customer.gender,
        }
    }
}

/// Editable goods fields (every goods field except the id).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoodsForm {
    /// Business code.
    #[serde(rename = "kode")]
    pub code: String,
    /// Goods name.
    #[serde(rename = "nama")]
    pub name: String,
    /// Category.
    #[serde(rename = "kategori")]
    pub category: String,
    /// Unit price as coerced from text input; may be `NaN`.
    #[serde(rename = "harga", with = "lenient_number")]
    pub price: f64,
}

impl From<&Goods> for GoodsForm {
    fn from(goods: &Goods) -> Self {
        Self {
            code: goods.code.clone(),
            name: goods.name.clone(),
            category: goods.category.clone(),
            price: goods.price,
        }
    }
}

/// One editable order line: a goods reference by code and a quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemDraft {
    /// Referenced goods code, empty until picked.
    #[serde(rename = "kode_barang")]
    pub goods_code: String,
    /// Quantity as coerced from text input; may be `NaN`.
    #[serde(with = "lenient_number")]
    pub qty: f64,
}

impl OrderItemDraft {
    /// Creates a line for the given goods code.
    #[must_use]
    pub fn new(goods_code: impl Into<String>, qty: f64) -> Self {
        Self {
            goods_code: goods_code.into(),
            qty,
        }
    }
}

impl Default for OrderItemDraft {
    fn default() -> Self {
        Self::new("", 1.0)
    }
}

/// Draft order: header fields plus raw line items.
///
/// Serializes to `{ nota, tgl, kode_pelanggan, items: [{kode_barang, qty}] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    /// Order number.
    #[serde(rename = "nota")]
    pub number: String,
    /// Order date as typed.
    #[serde(rename = "tgl")]
    pub date: String,
    /// Referenced customer code, empty until picked.
    #[serde(rename = "kode_pelanggan")]
    pub customer_code: String,
    /// Line items.
    pub items: Vec<OrderItemDraft>,
}

impl Default for OrderDraft {
    fn default() -> Self {
        Self {
            number: String::new(),
            date: String::new(),
            customer_code: String::new(),
            items: vec![OrderItemDraft::default()],
        }
    }
}

impl From<&Order> for OrderDraft {
    fn from(order: &Order) -> Self {
        Self {
            number: order.number.clone(),
            date: order.date.clone(),
            customer_code: order.customer_code().unwrap_or_default().to_string(),
            items: order
                .items
                .iter()
                .map(|line| OrderItemDraft::new(line.goods_code(), line.qty))
                .collect(),
        }
    }
}

/// Entry of a picker input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOption {
    /// Text shown to the user.
    pub label: String,
    /// Value stored in the form.
    pub value: String,
}

impl PickerOption {
    /// Creates a picker option.
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Creates the leading "nothing selected" option.
    #[must_use]
    pub fn placeholder(label: impl Into<String>) -> Self {
        Self::new(label, "")
    }
}
