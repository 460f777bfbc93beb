use mockito::Matcher;
use nexmedis_storefront::api::{ApiClient, Period};
use nexmedis_storefront::error::ClientError;
use nexmedis_storefront::storage::{MemoryStorage, SharedStorage};
use std::sync::Arc;
use url::Url;

fn client(server: &mockito::ServerGuard, storage: MemoryStorage) -> ApiClient {
    let storage: SharedStorage = Arc::new(storage);
    ApiClient::new(Url::parse(&server.url()).unwrap(), storage)
}

const PRODUCTS: &str = r#"[
    {"id":1,"id_produk":"PRD-001","nama_produk":"Paracetamol 500mg","harga":"15000","kategori_id":2,"status_id":1,"stok":10,"createdAt":"2025-02-01T08:00:00.000Z","updatedAt":"2025-02-01T08:00:00.000Z"}
]"#;

#[tokio::test]
async fn test_requests_carry_bearer_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/carts")
        .match_header("authorization", "Bearer tok-42")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"items":[],"total":0,"count":0}"#)
        .create_async()
        .await;

    let api = client(&server, MemoryStorage::with_token("tok-42"));
    let cart = api.get_cart().await.unwrap();

    assert!(cart.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_requests_without_token_omit_header() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/products")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body(PRODUCTS)
        .create_async()
        .await;

    let api = client(&server, MemoryStorage::new());
    let products = api.list_products(None).await.unwrap();

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Paracetamol 500mg");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_search_is_sent_as_query_parameter() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/products")
        .match_query(Matcher::UrlEncoded("search".into(), "para cetamol&co".into()))
        .with_status(200)
        .with_body(PRODUCTS)
        .create_async()
        .await;

    let api = client(&server, MemoryStorage::new());
    api.list_products(Some("para cetamol&co")).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_blank_search_requests_full_list() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/products")
        .match_query(Matcher::Exact(String::new()))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let api = client(&server, MemoryStorage::new());
    api.list_products(Some("   ")).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_response_keeps_server_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("PUT", "/api/carts/3")
        .match_body(Matcher::Json(serde_json::json!({"quantity": 9})))
        .with_status(400)
        .with_body(r#"{"message":"Stock is not enough"}"#)
        .create_async()
        .await;

    let api = client(&server, MemoryStorage::with_token("tok"));
    let err = api.update_cart_item(3, 9).await.unwrap_err();

    assert!(err.has_response());
    assert_eq!(err.status().map(|s| s.as_u16()), Some(400));
    assert_eq!(err.user_message("Failed to update item"), "Stock is not enough");
}

#[tokio::test]
async fn test_register_requires_created_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/register")
        .match_body(Matcher::Json(serde_json::json!({
            "username": "ayu",
            "email": "ayu@clinic.id",
            "password": "secret1"
        })))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let api = client(&server, MemoryStorage::new());
    let err = api
        .register("ayu", "ayu@clinic.id", "secret1")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Api { .. }));
}

#[tokio::test]
async fn test_register_created_is_success() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/register")
        .with_status(201)
        .with_body(r#"{"id":5,"email":"ayu@clinic.id"}"#)
        .create_async()
        .await;

    let api = client(&server, MemoryStorage::new());
    assert!(api.register("ayu", "ayu@clinic.id", "secret1").await.is_ok());
}

#[tokio::test]
async fn test_top_customers_sends_period() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/user/toptransactions")
        .match_query(Matcher::UrlEncoded("period".into(), "3 months".into()))
        .with_status(200)
        .with_body(
            r#"{"message":"ok","period":"3 months","customers":[
                {"customer_id":2,"username":"budi","email":"budi@clinic.id","order_count":7,"total_spent":"350000.00"},
                {"customer_id":1,"username":"ayu","email":"ayu@clinic.id","order_count":2,"total_spent":90000}
            ]}"#,
        )
        .create_async()
        .await;

    let api = client(&server, MemoryStorage::with_token("tok"));
    let response = api.top_customers(Period::ThreeMonths).await.unwrap();

    // Server order is the ranking.
    assert_eq!(response.customers[0].username, "budi");
    assert_eq!(response.customers[0].total_spent.value(), 350000.0);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/transactions")
        .with_status(200)
        .with_body(r#"{"not":"a list"}"#)
        .create_async()
        .await;

    let api = client(&server, MemoryStorage::with_token("tok"));
    let err = api.list_transactions().await.unwrap_err();

    assert!(matches!(err, ClientError::Decode(_)));
    assert_eq!(err.user_message("fallback"), "fallback");
}
