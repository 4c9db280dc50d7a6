//! List-and-form screen state shared by the customer and goods screens.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use crate::application::dto::{CustomerForm, GoodsForm};
use crate::domain::entities::{Customer, EntityId, Goods};
use crate::domain::errors::ApiError;
use crate::domain::ports::ApiPort;
use crate::domain::serde_utils::decode_collection;

/// A backend collection edited through a list-and-form screen.
pub trait Resource: Send + Sync + 'static {
    /// Collection path, e.g. `/barangs`.
    const PATH: &'static str;
    /// Name used in log events.
    const NAME: &'static str;

    /// Record type returned by the collection.
    type Entity: DeserializeOwned + Clone + Send + 'static;
    /// Editable fields, serialized as the create/update body.
    type Form: Serialize + Default + Clone + Send + 'static;

    /// Returns the record's identifier.
    fn id(entity: &Self::Entity) -> EntityId;

    /// Copies a record's fields into a form.
    fn form_from(entity: &Self::Entity) -> Self::Form;

    /// Returns the path addressing one record.
    #[must_use]
    fn item_path(id: EntityId) -> String {
        format!("{}/{id}", Self::PATH)
    }
}

/// Customer collection (`/pelanggans`).
pub struct CustomerResource;

impl Resource for CustomerResource {
    const PATH: &'static str = "/pelanggans";
    const NAME: &'static str = "pelanggan";

    type Entity = Customer;
    type Form = CustomerForm;

    fn id(entity: &Customer) -> EntityId {
        entity.id
    }

    fn form_from(entity: &Customer) -> CustomerForm {
        CustomerForm::from(entity)
    }
}

/// Goods collection (`/barangs`).
pub struct GoodsResource;

impl Resource for GoodsResource {
    const PATH: &'static str = "/barangs";
    const NAME: &'static str = "barang";

    type Entity = Goods;
    type Form = GoodsForm;

    fn id(entity: &Goods) -> EntityId {
        entity.id
    }

    fn form_from(entity: &Goods) -> GoodsForm {
        GoodsForm::from(entity)
    }
}

/// State owned by one mounted list-and-form screen.
pub struct EntityState<R: Resource> {
    /// Records from the last successful fetch.
    pub items: Vec<R::Entity>,
    /// The single editable form record.
    pub form: R::Form,
    /// Record being edited; `None` means the form creates a new record.
    pub editing_id: Option<EntityId>,
}

impl<R: Resource> Default for EntityState<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            form: R::Form::default(),
            editing_id: None,
        }
    }
}

/// List-and-form screen backed by a REST collection.
///
/// Cloning yields another handle to the same state, which is how spawned
/// requests write their results back. The lock is never held across a
/// request, so a second operation may start while one is in flight.
pub struct EntityScreen<R: Resource> {
    api: Arc<dyn ApiPort>,
    state: Arc<Mutex<EntityState<R>>>,
}

impl<R: Resource> Clone for EntityScreen<R> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            state: Arc::clone(&self.state),
        }
    }
}

impl<R: Resource> EntityScreen<R> {
    /// Creates an empty screen state.
    #[must_use]
    pub fn new(api: Arc<dyn ApiPort>) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(EntityState::default())),
        }
    }

    /// Reads the current state.
    pub fn read<T>(&self, f: impl FnOnce(&EntityState<R>) -> T) -> T {
        f(&self.state.lock())
    }

    /// Returns a copy of the listed records.
    #[must_use]
    pub fn items(&self) -> Vec<R::Entity> {
        self.state.lock().items.clone()
    }

    /// Returns a copy of the form record.
    #[must_use]
    pub fn form(&self) -> R::Form {
        self.state.lock().form.clone()
    }

    /// Returns the id of the record being edited.
    #[must_use]
    pub fn editing_id(&self) -> Option<EntityId> {
        self.state.lock().editing_id
    }

    /// Applies a change to the form record.
    pub fn update_form(&self, f: impl FnOnce(&mut R::Form)) {
        f(&mut self.state.lock().form);
    }

    /// Loads a record into the form and targets it for update.
    pub fn edit(&self, entity: &R::Entity) {
        let mut state = self.state.lock();
        state.form = R::form_from(entity);
        state.editing_id = Some(R::id(entity));
        debug!(resource = R::NAME, id = %R::id(entity), "Editing record");
    }

    /// Leaves edit mode and clears the form.
    pub fn cancel_edit(&self) {
        let mut state = self.state.lock();
        state.form = R::Form::default();
        state.editing_id = None;
    }

    /// Replaces the list with the backend's current collection.
    ///
    /// Failures are logged; the previous list stays in place.
    pub async fn fetch(&self) {
        if let Err(e) = self.try_fetch().await {
            error!(resource = R::NAME, error = %e, "Fetch failed");
        }
    }

    /// Creates or updates the form record, then refetches.
    ///
    /// Updates go to the record targeted by [`Self::edit`]; otherwise a new
    /// record is created. Failures are logged and leave the form untouched.
    pub async fn save(&self) {
        match self.try_save().await {
            Ok(()) => self.fetch().await,
            Err(e) => error!(resource = R::NAME, error = %e, "Save failed"),
        }
    }

    /// Deletes a record, then refetches.
    pub async fn delete(&self, id: EntityId) {
        match self.api.delete(&R::item_path(id)).await {
            Ok(_) => {
                info!(resource = R::NAME, id = %id, "Record deleted");
                self.fetch().await;
            }
            Err(e) => error!(resource = R::NAME, id = %id, error = %e, "Delete failed"),
        }
    }

    async fn try_fetch(&self) -> Result<(), ApiError> {
        let body = self.api.get(R::PATH).await?;
        let items: Vec<R::Entity> = decode_collection(body)?;
        debug!(resource = R::NAME, count = items.len(), "Fetched records");
        self.state.lock().items = items;
        Ok(())
    }

    async fn try_save(&self) -> Result<(), ApiError> {
        let (form, editing_id) = {
            let state = self.state.lock();
            (state.form.clone(), state.editing_id)
        };
        let body = serde_json::to_value(&form)?;

        if let Some(id) = editing_id {
            self.api.put(&R::item_path(id), body).await?;
            self.state.lock().editing_id = None;
            info!(resource = R::NAME, id = %id, "Record updated");
        } else {
            self.api.post(R::PATH, body).await?;
            info!(resource = R::NAME, "Record created");
        }

        self.state.lock().form = R::Form::default();
        Ok(())
    }
}

/// Customer screen state.
pub type CustomerScreen = EntityScreen<CustomerResource>;
/// Goods screen state.
pub type GoodsScreen = EntityScreen<GoodsResource>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Gender;
    use crate::domain::ports::mocks::{InMemoryBackend, MockApiPort};
    use crate::test_support::ErrorCounter;
    use serde_json::json;

    fn goods_form(code: &str, price: f64) -> GoodsForm {
        GoodsForm {
            code: code.to_string(),
            name: "Pen".to_string(),
            category: "ATK".to_string(),
            price,
        }
    }

    #[tokio::test]
    async fn test_create_goods_appears_in_list() {
        let backend = Arc::new(InMemoryBackend::new());
        let screen = GoodsScreen::new(backend.clone());

        screen.update_form(|f| *f = goods_form("B1", 5000.0));
        screen.save().await;

        let items = screen.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].code, "B1");
        assert!((items[0].price - 5000.0).abs() < f64::EPSILON);
        assert_eq!(backend.count("POST", "/barangs"), 1);
        assert_eq!(screen.form(), GoodsForm::default());
    }

    #[tokio::test]
    async fn test_save_refetches_after_create() {
        let backend = Arc::new(InMemoryBackend::enveloped());
        let screen = CustomerScreen::new(backend.clone());

        screen.update_form(|f| {
            f.code = "P1".to_string();
            f.gender = Gender::Wanita;
        });
        screen.save().await;

        let methods: Vec<_> = backend.requests().into_iter().map(|r| r.method).collect();
        assert_eq!(methods, vec!["POST", "GET"]);
        assert_eq!(screen.items()[0].gender, Gender::Wanita);
    }

    #[tokio::test]
    async fn test_edit_then_save_updates_edited_id() {
        let mut api = MockApiPort::new();
        api.expect_put()
            .withf(|path, body| path == "/barangs/7" && body["harga"] == json!(7500))
            .times(1)
            .returning(|_, _| Ok(json!({"id": 7})));
        api.expect_post().times(0);
        api.expect_get()
            .returning(|_| Ok(json!([{"id": 7, "kode": "B7", "nama": "Buku", "kategori": "ATK", "harga": 7500}])));

        let screen = GoodsScreen::new(Arc::new(api));
        screen.edit(&Goods::new(7_u64, "B7", "Buku", "ATK", 6000.0));
        assert_eq!(screen.editing_id(), Some(EntityId(7)));

        screen.update_form(|f| f.price = 7500.0);
        screen.save().await;

        assert_eq!(screen.editing_id(), None);
        assert_eq!(screen.form(), GoodsForm::default());
        assert_eq!(screen.items().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_that_record() {
        let backend = Arc::new(InMemoryBackend::new());
        let keep = backend.seed("barangs", json!({"kode": "B1", "nama": "Pen", "kategori": "ATK", "harga": 5000}));
        let drop = backend.seed("barangs", json!({"kode": "B2", "nama": "Buku", "kategori": "ATK", "harga": 9000}));
        let screen = GoodsScreen::new(backend.clone());
        screen.fetch().await;
        assert_eq!(screen.items().len(), 2);

        screen.delete(EntityId(drop)).await;

        let ids: Vec<_> = screen.items().iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![EntityId(keep)]);
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_list_and_logs_once() {
        let backend = Arc::new(InMemoryBackend::new());
        backend.seed("pelanggans", json!({"kode": "P1", "nama": "Budi", "domisili": "Bandung", "jenis_kelamin": "PRIA"}));
        let screen = CustomerScreen::new(backend.clone());
        screen.fetch().await;

        backend.set_offline(true);
        let errors = ErrorCounter::install();
        screen.fetch().await;

        assert_eq!(errors.count(), 1);
        assert_eq!(screen.items().len(), 1);
        assert_eq!(screen.items()[0].code, "P1");
    }

    #[tokio::test]
    async fn test_failed_update_keeps_edit_target() {
        let backend = Arc::new(InMemoryBackend::new());
        let screen = GoodsScreen::new(backend.clone());
        screen.edit(&Goods::new(99_u64, "B9", "Hilang", "ATK", 1.0));

        screen.save().await;

        assert_eq!(backend.count("PUT", "/barangs/99"), 1);
        assert_eq!(screen.editing_id(), Some(EntityId(99)));
        assert_eq!(screen.form().code, "B9");
        assert_eq!(backend.count("GET", "/barangs"), 0);
    }

    #[tokio::test]
    async fn test_nan_price_is_sent_as_null() {
        let mut api = MockApiPort::new();
        api.expect_post()
            .withf(|path, body| path == "/barangs" && body["harga"].is_null())
            .times(1)
            .returning(|_, _| Ok(json!({})));
        api.expect_get().returning(|_| Ok(json!([])));

        let screen = GoodsScreen::new(Arc::new(api));
        screen.update_form(|f| f.price = f64::NAN);
        screen.save().await;
    }

    #[test]
    fn test_cancel_edit_resets_form() {
        let screen = CustomerScreen::new(Arc::new(InMemoryBackend::new()));
        screen.edit(&Customer::new(3_u64, "P3", "Sari", "Depok", Gender::Wanita));
        screen.cancel_edit();

        assert_eq!(screen.editing_id(), None);
        assert_eq!(screen.form(), CustomerForm::default());
    }
}
