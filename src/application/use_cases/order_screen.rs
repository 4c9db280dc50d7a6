//! Sales order screen state: three lists plus a header/lines draft.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, error, info};

use crate::application::dto::{OrderDraft, OrderItemDraft, PickerOption};
use crate::domain::entities::{Customer, EntityId, Goods, Order};
use crate::domain::errors::ApiError;
use crate::domain::ports::ApiPort;
use crate::domain::serde_utils::decode_collection;

const ORDERS_PATH: &str = "/penjualans";
const CUSTOMERS_PATH: &str = "/pelanggans";
const GOODS_PATH: &str = "/barangs";

const CUSTOMER_PLACEHOLDER: &str = "-- pilih pelanggan --";
const GOODS_PLACEHOLDER: &str = "-- pilih barang --";

/// State owned by the mounted order screen.
#[derive(Debug, Clone, Default)]
pub struct OrderState {
    /// Orders as enriched by the backend.
    pub orders: Vec<Order>,
    /// Customers offered by the customer picker.
    pub customers: Vec<Customer>,
    /// Goods offered by the line pickers.
    pub goods: Vec<Goods>,
    /// Header fields and raw line items being edited.
    pub draft: OrderDraft,
    /// Order being edited; `None` means the draft creates a new order.
    pub editing_id: Option<EntityId>,
}

/// Aggregate order screen.
///
/// Like [`super::EntityScreen`], clones share one state and the lock is
/// released before every request.
#[derive(Clone)]
pub struct OrderScreen {
    api: Arc<dyn ApiPort>,
    state: Arc<Mutex<OrderState>>,
}

impl OrderScreen {
    /// Creates an empty screen state.
    #[must_use]
    pub fn new(api: Arc<dyn ApiPort>) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(OrderState::default())),
        }
    }

    /// Reads the current state.
    pub fn read<T>(&self, f: impl FnOnce(&OrderState) -> T) -> T {
        f(&self.state.lock())
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> OrderState {
        self.state.lock().clone()
    }

    /// Returns a copy of the draft.
    #[must_use]
    pub fn draft(&self) -> OrderDraft {
        self.state.lock().draft.clone()
    }

    /// Returns the id of the order being edited.
    #[must_use]
    pub fn editing_id(&self) -> Option<EntityId> {
        self.state.lock().editing_id
    }

    /// Applies a change to the draft header or lines.
    pub fn update_draft(&self, f: impl FnOnce(&mut OrderDraft)) {
        f(&mut self.state.lock().draft);
    }

    /// Appends a blank line.
    pub fn add_item(&self) {
        self.state.lock().draft.items.push(OrderItemDraft::default());
    }

    /// Removes the line at `index`; out-of-range indexes are ignored.
    pub fn remove_item(&self, index: usize) {
        let mut state = self.state.lock();
        if index < state.draft.items.len() {
            state.draft.items.remove(index);
        }
    }

    /// Sets the goods code of one line, leaving the others untouched.
    pub fn set_item_goods(&self, index: usize, goods_code: impl Into<String>) {
        if let Some(item) = self.state.lock().draft.items.get_mut(index) {
            item.goods_code = goods_code.into();
        }
    }

    /// Sets the quantity of one line, leaving the others untouched.
    pub fn set_item_qty(&self, index: usize, qty: f64) {
        if let Some(item) = self.state.lock().draft.items.get_mut(index) {
            item.qty = qty;
        }
    }

    /// Loads an order into the draft and targets it for update.
    ///
    /// Lines are flattened back to `(goods code, qty)` pairs; an order without
    /// a resolved customer leaves the customer picker unselected.
    pub fn edit(&self, order: &Order) {
        let mut state = self.state.lock();
        state.draft = OrderDraft::from(order);
        state.editing_id = Some(order.id);
        debug!(id = %order.id, lines = state.draft.items.len(), "Editing order");
    }

    /// Leaves edit mode and resets the draft.
    pub fn cancel_edit(&self) {
        let mut state = self.state.lock();
        state.draft = OrderDraft::default();
        state.editing_id = None;
    }

    /// Customer picker entries, placeholder first.
    #[must_use]
    pub fn customer_options(&self) -> Vec<PickerOption> {
        let state = self.state.lock();
        std::iter::once(PickerOption::placeholder(CUSTOMER_PLACEHOLDER))
            .chain(
                state
                    .customers
                    .iter()
                    .map(|c| PickerOption::new(c.name.clone(), c.code.clone())),
            )
            .collect()
    }

    /// Goods picker entries, placeholder first.
    #[must_use]
    pub fn goods_options(&self) -> Vec<PickerOption> {
        let state = self.state.lock();
        std::iter::once(PickerOption::placeholder(GOODS_PLACEHOLDER))
            .chain(
                state
                    .goods
                    .iter()
                    .map(|g| PickerOption::new(g.picker_label(), g.code.clone())),
            )
            .collect()
    }

    /// Loads orders, customers and goods, in that order.
    ///
    /// Each list is replaced as soon as its response arrives. The first
    /// failure is logged and stops the remaining requests.
    pub async fn fetch(&self) {
        if let Err(e) = self.try_fetch().await {
            error!(resource = "penjualan", error = %e, "Fetch failed");
        }
    }

    /// Submits the draft as a create or update, then refetches all lists.
    pub async fn save(&self) {
        match self.try_save().await {
            Ok(()) => self.fetch().await,
            Err(e) => error!(resource = "penjualan", error = %e, "Save failed"),
        }
    }

    /// Deletes an order, then refetches all lists.
    pub async fn delete(&self, id: EntityId) {
        match self.api.delete(&format!("{ORDERS_PATH}/{id}")).await {
            Ok(_) => {
                info!(id = %id, "Order deleted");
                self.fetch().await;
            }
            Err(e) => error!(resource = "penjualan", id = %id, error = %e, "Delete failed"),
        }
    }

    async fn try_fetch(&self) -> Result<(), ApiError> {
        let orders: Vec<Order> = decode_collection(self.api.get(ORDERS_PATH).await?)?;
        self.state.lock().orders = orders;

        let customers: Vec<Customer> = decode_collection(self.api.get(CUSTOMERS_PATH).await?)?;
        self.state.lock().customers = customers;

        let goods: Vec<Goods> = decode_collection(self.api.get(GOODS_PATH).await?)?;
        self.state.lock().goods = goods;

        debug!("Fetched orders, customers and goods");
        Ok(())
    }

    async fn try_save(&self) -> Result<(), ApiError> {
        let (draft, editing_id) = {
            let state = self.state.lock();
            (state.draft.clone(), state.editing_id)
        };
        let body = serde_json::to_value(&draft)?;

        if let Some(id) = editing_id {
            self.api.put(&format!("{ORDERS_PATH}/{id}"), body).await?;
            self.state.lock().editing_id = None;
            info!(id = %id, nota = %draft.number, "Order updated");
        } else {
            self.api.post(ORDERS_PATH, body).await?;
            info!(nota = %draft.number, lines = draft.items.len(), "Order created");
        }

        self.state.lock().draft = OrderDraft::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::{InMemoryBackend, MockApiPort};
    use crate::test_support::ErrorCounter;
    use serde_json::json;

    fn seeded_backend() -> Arc<InMemoryBackend> {
        let backend = Arc::new(InMemoryBackend::new());
        backend.seed(
            "pelanggans",
            json!({"kode": "P1", "nama": "Budi", "domisili": "Bandung", "jenis_kelamin": "PRIA"}),
        );
        backend.seed(
            "barangs",
            json!({"kode": "B1", "nama": "Pen", "kategori": "ATK", "harga": 5000}),
        );
        backend
    }

    #[tokio::test]
    async fn test_create_order_subtotal_from_backend() {
        let backend = seeded_backend();
        let screen = OrderScreen::new(backend.clone());
        screen.fetch().await;

        screen.update_draft(|d| {
            d.number = "N-001".to_string();
            d.date = "2025-03-01".to_string();
            d.customer_code = "P1".to_string();
        });
        screen.set_item_goods(0, "B1");
        screen.set_item_qty(0, 3.0);
        screen.save().await;

        let state = screen.snapshot();
        assert_eq!(state.orders.len(), 1);
        assert!((state.orders[0].subtotal - 15000.0).abs() < f64::EPSILON);
        assert_eq!(state.orders[0].customer_name(), "Budi");
        assert_eq!(state.draft, OrderDraft::default());
        assert_eq!(backend.count("POST", "/penjualans"), 1);
    }

    #[tokio::test]
    async fn test_save_sends_raw_codes_and_quantities() {
        let mut api = MockApiPort::new();
        api.expect_post()
            .withf(|path, body| {
                path == "/penjualans"
                    && *body
                        == json!({
                            "nota": "N-2",
                            "tgl": "2025-03-02",
                            "kode_pelanggan": "P1",
                            "items": [{"kode_barang": "B1", "qty": 2}, {"kode_barang": "B2", "qty": 1}]
                        })
            })
            .times(1)
            .returning(|_, _| Ok(json!({"id": 1})));
        api.expect_get().returning(|_| Ok(json!({"data": []})));

        let screen = OrderScreen::new(Arc::new(api));
        screen.update_draft(|d| {
            d.number = "N-2".to_string();
            d.date = "2025-03-02".to_string();
            d.customer_code = "P1".to_string();
        });
        screen.set_item_goods(0, "B1");
        screen.set_item_qty(0, 2.0);
        screen.add_item();
        screen.set_item_goods(1, "B2");
        screen.save().await;
    }

    #[tokio::test]
    async fn test_edit_then_save_updates_edited_order() {
        let backend = seeded_backend();
        let screen = OrderScreen::new(backend.clone());
        screen.update_draft(|d| d.customer_code = "P1".to_string());
        screen.set_item_goods(0, "B1");
        screen.save().await;

        let order = screen.snapshot().orders[0].clone();
        screen.edit(&order);
        assert_eq!(screen.draft().customer_code, "P1");
        assert_eq!(screen.draft().items, vec![OrderItemDraft::new("B1", 1.0)]);

        screen.set_item_qty(0, 4.0);
        screen.save().await;

        assert_eq!(backend.count("PUT", &format!("/penjualans/{}", order.id)), 1);
        assert_eq!(backend.count("POST", "/penjualans"), 1);
        let state = screen.snapshot();
        assert_eq!(state.editing_id, None);
        assert!((state.orders[0].subtotal - 20000.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_delete_then_refetch() {
        let backend = seeded_backend();
        let id = backend.seed(
            "penjualans",
            json!({"nota": "N-9", "tgl": "x", "kode_pelanggan": "P1", "items": []}),
        );
        let screen = OrderScreen::new(backend.clone());
        screen.fetch().await;
        assert_eq!(screen.snapshot().orders.len(), 1);

        screen.delete(EntityId(id)).await;

        assert!(screen.snapshot().orders.is_empty());
        assert_eq!(screen.snapshot().goods.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_failure_aborts_remaining_requests() {
        let mut api = MockApiPort::new();
        api.expect_get()
            .withf(|path| path == "/penjualans")
            .returning(|_| Ok(json!([{"id": 1, "nota": "N-1", "tgl": "x", "items": [], "subtotal": 0}])));
        api.expect_get()
            .withf(|path| path == "/pelanggans")
            .times(1)
            .returning(|_| Err(ApiError::network("connection reset")));
        api.expect_get().withf(|path| path == "/barangs").times(0);

        let screen = OrderScreen::new(Arc::new(api));
        let errors = ErrorCounter::install();
        screen.fetch().await;

        assert_eq!(errors.count(), 1);
        let state = screen.snapshot();
        assert_eq!(state.orders.len(), 1);
        assert!(state.customers.is_empty());
        assert!(state.goods.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_tolerates_irregular_records() {
        let mut api = MockApiPort::new();
        api.expect_get()
            .withf(|path| path == "/penjualans")
            .returning(|_| {
                Ok(json!([
                    {"id": 1, "nota": "N-1", "tgl": "x", "items": [{"barang": null, "qty": 2, "total": 0}], "subtotal": 0},
                    {"id": 2, "nota": "N-2", "tgl": "x", "items": [], "subtotal": 0}
                ]))
            });
        api.expect_get()
            .withf(|path| path == "/pelanggans")
            .returning(|_| {
                Ok(json!([
                    {"id": 1, "kode": "P1", "nama": "Budi", "domisili": "Bandung", "jenis_kelamin": null},
                    {"id": 2, "kode": "P2", "nama": "Sari", "domisili": "Bogor", "jenis_kelamin": "WANITA"}
                ]))
            });
        api.expect_get()
            .withf(|path| path == "/barangs")
            .returning(|_| Ok(json!([{"id": 1, "kode": "B1", "nama": "Pen", "kategori": "ATK", "harga": 5000}])));

        let screen = OrderScreen::new(Arc::new(api));
        let errors = ErrorCounter::install();
        screen.fetch().await;

        assert_eq!(errors.count(), 0);
        let state = screen.snapshot();
        assert_eq!(state.orders.len(), 2);
        assert_eq!(state.customers.len(), 2);
        assert_eq!(state.goods.len(), 1);

        screen.edit(&state.orders[0]);
        assert_eq!(screen.draft().items, vec![OrderItemDraft::new("", 2.0)]);
    }

    #[test]
    fn test_remove_item_preserves_order() {
        let screen = OrderScreen::new(Arc::new(InMemoryBackend::new()));
        screen.update_draft(|d| {
            d.items = vec![
                OrderItemDraft::new("A", 1.0),
                OrderItemDraft::new("B", 2.0),
                OrderItemDraft::new("C", 3.0),
            ];
        });

        screen.remove_item(1);
        assert_eq!(
            screen.draft().items,
            vec![OrderItemDraft::new("A", 1.0), OrderItemDraft::new("C", 3.0)]
        );

        screen.remove_item(5);
        assert_eq!(screen.draft().items.len(), 2);
    }

    #[test]
    fn test_line_edits_touch_one_entry() {
        let screen = OrderScreen::new(Arc::new(InMemoryBackend::new()));
        screen.add_item();
        screen.set_item_goods(1, "B2");
        screen.set_item_qty(1, 5.0);

        assert_eq!(
            screen.draft().items,
            vec![OrderItemDraft::default(), OrderItemDraft::new("B2", 5.0)]
        );
    }

    #[tokio::test]
    async fn test_picker_options() {
        let backend = seeded_backend();
        let screen = OrderScreen::new(backend);
        screen.fetch().await;

        assert_eq!(
            screen.customer_options(),
            vec![
                PickerOption::new("-- pilih pelanggan --", ""),
                PickerOption::new("Budi", "P1"),
            ]
        );
        assert_eq!(
            screen.goods_options(),
            vec![
                PickerOption::new("-- pilih barang --", ""),
                PickerOption::new("Pen (B1)", "B1"),
            ]
        );
    }
}
