use std::sync::Arc;

use httpmock::prelude::*;
use serde_json::json;

use tokoterm::application::{GoodsForm, GoodsScreen, OrderItemDraft, OrderScreen};
use tokoterm::domain::ApiPort;
use tokoterm::infrastructure::RestClient;

fn api(server: &MockServer) -> Arc<dyn ApiPort> {
    Arc::new(RestClient::new(&server.url("/api")).unwrap())
}

#[tokio::test]
async fn test_goods_create_then_refetch() {
    let server = MockServer::start_async().await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/barangs")
                .json_body(json!({"kode": "B1", "nama": "Pen", "kategori": "ATK", "harga": 5000}));
            then.status(201).json_body(json!({"id": 1}));
        })
        .await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/barangs");
            then.status(200).json_body(json!({"data": [
                {"id": 1, "kode": "B1", "nama": "Pen", "kategori": "ATK", "harga": "5000.00"}
            ]}));
        })
        .await;

    let screen = GoodsScreen::new(api(&server));
    screen.update_form(|form| {
        *form = GoodsForm {
            code: "B1".to_string(),
            name: "Pen".to_string(),
            category: "ATK".to_string(),
            price: 5000.0,
        };
    });
    screen.save().await;

    create.assert_async().await;
    list.assert_async().await;
    let items = screen.items();
    assert_eq!(items.len(), 1);
    assert!((items[0].price - 5000.0).abs() < f64::EPSILON);
    assert_eq!(screen.form(), GoodsForm::default());
}

#[tokio::test]
async fn test_order_subtotal_comes_from_backend() {
    let server = MockServer::start_async().await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/penjualans").json_body(json!({
                "nota": "N1",
                "tgl": "2024-01-01",
                "kode_pelanggan": "P1",
                "items": [{"kode_barang": "B1", "qty": 3}]
            }));
            then.status(201).json_body(json!({"id": 1}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/penjualans");
            then.status(200).json_body(json!([{
                "id": 1,
                "nota": "N1",
                "tgl": "2024-01-01",
                "pelanggan": {"id": 1, "kode": "P1", "nama": "Budi", "domisili": "Bandung", "jenis_kelamin": "PRIA"},
                "items": [{
                    "barang": {"id": 1, "kode": "B1", "nama": "Pen", "kategori": "ATK", "harga": 5000},
                    "qty": 3,
                    "total": 15000
                }],
                "subtotal": 15000
            }]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/pelanggans");
            then.status(200).json_body(json!([]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/barangs");
            then.status(200).json_body(json!([]));
        })
        .await;

    let screen = OrderScreen::new(api(&server));
    screen.update_draft(|draft| {
        draft.number = "N1".to_string();
        draft.date = "2024-01-01".to_string();
        draft.customer_code = "P1".to_string();
        draft.items = vec![OrderItemDraft::new("B1", 3.0)];
    });
    screen.save().await;

    create.assert_async().await;
    let state = screen.snapshot();
    assert_eq!(state.orders.len(), 1);
    assert!((state.orders[0].subtotal - 15000.0).abs() < f64::EPSILON);
    assert_eq!(state.orders[0].customer_name(), "Budi");
    assert_eq!(state.draft.items.len(), 1);
    assert!(state.draft.items[0].goods_code.is_empty());
}

#[tokio::test]
async fn test_fetch_failure_keeps_previous_list() {
    let server = MockServer::start_async().await;
    let mut list = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/barangs");
            then.status(200)
                .json_body(json!([{"id": 1, "kode": "B1", "nama": "Pen", "kategori": "ATK", "harga": 1}]));
        })
        .await;

    let screen = GoodsScreen::new(api(&server));
    screen.fetch().await;
    assert_eq!(screen.items().len(), 1);

    list.delete_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/barangs");
            then.status(503);
        })
        .await;
    screen.fetch().await;

    assert_eq!(screen.items().len(), 1);
    assert_eq!(screen.items()[0].code, "B1");
}

#[tokio::test]
async fn test_unreachable_backend_leaves_state_untouched() {
    let api: Arc<dyn ApiPort> = Arc::new(RestClient::new("http://127.0.0.1:9/api").unwrap());
    let screen = GoodsScreen::new(api);
    screen.update_form(|form| form.code = "B9".to_string());

    screen.save().await;

    assert!(screen.items().is_empty());
    assert_eq!(screen.form().code, "B9");
}
