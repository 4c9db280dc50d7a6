//! Field and column layouts of the list-and-form screens.

use ratatui::layout::Constraint;

use crate::application::dto::{CustomerForm, GoodsForm, PickerOption};
use crate::application::use_cases::{CustomerResource, GoodsResource, Resource};
use crate::domain::Route;
use crate::domain::coercion::format_number;
use crate::domain::entities::{Customer, Gender, Goods};

/// How a form field is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text.
    Text,
    /// Text coerced to a number on every keystroke.
    Number,
    /// Fixed choices cycled with ←/→.
    Choice,
}

/// One labelled form field.
#[derive(Debug, Clone, Copy)]
pub struct FormField {
    pub label: &'static str,
    pub placeholder: &'static str,
    pub kind: FieldKind,
}

impl FormField {
    const fn new(label: &'static str, placeholder: &'static str, kind: FieldKind) -> Self {
        Self {
            label,
            placeholder,
            kind,
        }
    }
}

/// Presentation of a [`Resource`]: its form fields and table columns.
pub trait FormLayout: Resource {
    const ROUTE: Route;
    const FIELDS: &'static [FormField];
    const COLUMNS: &'static [&'static str];
    const WIDTHS: &'static [Constraint];

    /// Table cells of one record.
    fn row(entity: &Self::Entity) -> Vec<String>;

    /// Text field at `field`, if it is one.
    fn text_mut(form: &mut Self::Form, field: usize) -> Option<&mut String>;

    /// Current text of a text field.
    fn text(form: &Self::Form, field: usize) -> &str;

    /// Numeric field at `field`, if it is one.
    fn number_mut(_form: &mut Self::Form, _field: usize) -> Option<&mut f64> {
        None
    }

    /// Current value of a numeric field.
    fn number(_form: &Self::Form, _field: usize) -> f64 {
        0.0
    }

    /// Choices of a choice field.
    fn choices(_field: usize) -> Vec<PickerOption> {
        Vec::new()
    }

    /// Selected value of a choice field.
    fn choice(_form: &Self::Form, _field: usize) -> String {
        String::new()
    }

    /// Selects a value of a choice field.
    fn set_choice(_form: &mut Self::Form, _field: usize, _value: &str) {}
}

impl FormLayout for CustomerResource {
    const ROUTE: Route = Route::Pelanggan;
    const FIELDS: &'static [FormField] = &[
        FormField::new("Kode", "P001", FieldKind::Text),
        FormField::new("Nama", "Nama pelanggan", FieldKind::Text),
        FormField::new("Domisili", "Kota", FieldKind::Text),
        FormField::new("Jenis Kelamin", "", FieldKind::Choice),
    ];
    const COLUMNS: &'static [&'static str] = &["Kode", "Nama", "Domisili", "Jenis Kelamin"];
    const WIDTHS: &'static [Constraint] = &[
        Constraint::Length(10),
        Constraint::Fill(2),
        Constraint::Fill(1),
        Constraint::Length(14),
    ];

    fn row(customer: &Customer) -> Vec<String> {
        vec![
            customer.code.clone(),
            customer.name.clone(),
            customer.residence.clone(),
            customer.gender.label().to_string(),
        ]
    }

    fn text_mut(form: &mut CustomerForm, field: usize) -> Option<&mut String> {
        match field {
            0 => Some(&mut form.code),
            1 => Some(&mut form.name),
            2 => Some(&mut form.residence),
            _ => None,
        }
    }

    fn text(form: &CustomerForm, field: usize) -> &str {
        match field {
            0 => &form.code,
            1 => &form.name,
            2 => &form.residence,
            _ => "",
        }
    }

    fn choices(_field: usize) -> Vec<PickerOption> {
        Gender::ALL
            .iter()
            .map(|g| PickerOption::new(g.label(), g.code()))
            .collect()
    }

    fn choice(form: &CustomerForm, _field: usize) -> String {
        form.gender.code().to_string()
    }

    fn set_choice(form: &mut CustomerForm, _field: usize, value: &str) {
        if let Some(gender) = Gender::ALL.into_iter().find(|g| g.code() == value) {
            form.gender = gender;
        }
    }
}

impl FormLayout for GoodsResource {
    const ROUTE: Route = Route::Barang;
    const FIELDS: &'static [FormField] = &[
        FormField::new("Kode", "B001", FieldKind::Text),
        FormField::new("Nama", "Nama barang", FieldKind::Text),
        FormField::new("Kategori", "ATK", FieldKind::Text),
        FormField::new("Harga", "0", FieldKind::Number),
    ];
    const COLUMNS: &'static [&'static str] = &["Kode", "Nama", "Kategori", "Harga"];
    const WIDTHS: &'static [Constraint] = &[
        Constraint::Length(10),
        Constraint::Fill(2),
        Constraint::Fill(1),
        Constraint::Length(12),
    ];

    fn row(goods: &Goods) -> Vec<String> {
        vec![
            goods.code.clone(),
            goods.name.clone(),
            goods.category.clone(),
            format_number(goods.price),
        ]
    }

    fn text_mut(form: &mut GoodsForm, field: usize) -> Option<&mut String> {
        match field {
            0 => Some(&mut form.code),
            1 => Some(&mut form.name),
            2 => Some(&mut form.category),
            _ => None,
        }
    }

    fn text(form: &GoodsForm, field: usize) -> &str {
        match field {
            0 => &form.code,
            1 => &form.name,
            2 => &form.category,
            _ => "",
        }
    }

    fn number_mut(form: &mut GoodsForm, field: usize) -> Option<&mut f64> {
        (field == 3).then_some(&mut form.price)
    }

    fn number(form: &GoodsForm, _field: usize) -> f64 {
        form.price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_kinds_line_up_with_accessors() {
        let mut form = GoodsForm::default();
        for (i, field) in GoodsResource::FIELDS.iter().enumerate() {
            match field.kind {
                FieldKind::Text => assert!(GoodsResource::text_mut(&mut form, i).is_some()),
                FieldKind::Number => assert!(GoodsResource::number_mut(&mut form, i).is_some()),
                FieldKind::Choice => assert!(!GoodsResource::choices(i).is_empty()),
            }
        }
        assert_eq!(GoodsResource::COLUMNS.len(), GoodsResource::WIDTHS.len());
    }

    #[test]
    fn test_gender_choice_round_trip() {
        let mut form = CustomerForm::default();
        CustomerResource::set_choice(&mut form, 3, "WANITA");
        assert_eq!(form.gender, Gender::Wanita);

        CustomerResource::set_choice(&mut form, 3, "unknown");
        assert_eq!(CustomerResource::choice(&form, 3), "WANITA");
        assert_eq!(CustomerResource::choices(3).len(), 2);
    }

    #[test]
    fn test_goods_row_formats_price() {
        let goods = Goods::new(1_u64, "B1", "Pen", "ATK", 5000.0);
        assert_eq!(GoodsResource::row(&goods)[3], "5000");
    }
}
