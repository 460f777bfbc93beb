use mockito::Matcher;
use nexmedis_storefront::api::ApiClient;
use nexmedis_storefront::notify::ToastLevel;
use nexmedis_storefront::pages::{LoginPage, RegisterPage};
use nexmedis_storefront::routes::{resolve, Navigation, Route};
use nexmedis_storefront::session::Session;
use nexmedis_storefront::storage::{FileStorage, SharedStorage, Storage, ACCESS_TOKEN_KEY};
use std::sync::Arc;
use tempfile::tempdir;
use url::Url;

fn client(server: &mockito::ServerGuard, storage: SharedStorage) -> ApiClient {
    ApiClient::new(Url::parse(&server.url()).unwrap(), storage)
}

#[tokio::test]
async fn test_login_persists_token_and_opens_guarded_routes() {
    let dir = tempdir().unwrap();
    let storage: SharedStorage = Arc::new(FileStorage::new(dir.path().join("storage.json")));
    let mut session = Session::new(storage.clone());

    let mut server = mockito::Server::new_async().await;
    let login = server
        .mock("POST", "/api/login")
        .match_body(Matcher::Json(serde_json::json!({
            "email": "ayu@clinic.id",
            "password": "secret1"
        })))
        .with_status(200)
        .with_body(r#"{"access_token":"jwt-123"}"#)
        .expect(1)
        .create_async()
        .await;

    assert_eq!(resolve("/products", &session), Navigation::Redirect("/login".into()));

    let mut page = LoginPage::new(client(&server, storage.clone()));
    page.form.email = "ayu@clinic.id".to_string();
    page.form.password = "secret1".to_string();
    let nav = page.submit(&mut session).await;

    login.assert_async().await;
    assert_eq!(nav, Some(Navigation::Redirect("/".into())));
    assert!(session.is_logged_in());
    assert_eq!(page.toasts.last().map(|t| t.level), Some(ToastLevel::Success));

    // A fresh handle on the same file sees the token.
    let reopened = FileStorage::new(dir.path().join("storage.json"));
    assert_eq!(
        reopened.get_item(ACCESS_TOKEN_KEY).unwrap().as_deref(),
        Some("jwt-123")
    );
    assert_eq!(resolve("/products", &session), Navigation::Render(Route::Products));
    assert_eq!(resolve("/login", &session), Navigation::Redirect("/".into()));
}

#[tokio::test]
async fn test_login_error_names_map_to_messages() {
    let cases = [
        ("unauthentication", 401, "Invalid email or password."),
        ("passwordrequired", 400, "Password is required."),
        ("somethingelse", 500, "Login failed. Please check your credentials."),
    ];

    for (name, status, expected) in cases {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/login")
            .with_status(status)
            .with_body(format!(r#"{{"name":"{}","message":"nope"}}"#, name))
            .create_async()
            .await;

        let storage: SharedStorage = Arc::new(nexmedis_storefront::storage::MemoryStorage::new());
        let mut session = Session::new(storage.clone());
        let mut page = LoginPage::new(client(&server, storage));
        page.form.email = "ayu@clinic.id".to_string();
        page.form.password = "wrong-pass".to_string();

        assert_eq!(page.submit(&mut session).await, None);
        assert!(!session.is_logged_in());
        assert_eq!(
            page.toasts.last().and_then(|t| t.description.as_deref()),
            Some(expected)
        );
    }
}

#[tokio::test]
async fn test_invalid_login_form_sends_nothing() {
    let mut server = mockito::Server::new_async().await;
    let login = server
        .mock("POST", "/api/login")
        .expect(0)
        .create_async()
        .await;

    let storage: SharedStorage = Arc::new(nexmedis_storefront::storage::MemoryStorage::new());
    let mut session = Session::new(storage.clone());
    let mut page = LoginPage::new(client(&server, storage));
    page.form.email = "not-an-email".to_string();

    assert_eq!(page.submit(&mut session).await, None);
    login.assert_async().await;
    assert_eq!(page.field_errors.len(), 2);
}

#[tokio::test]
async fn test_register_success_goes_to_login_without_confirmation_field() {
    let mut server = mockito::Server::new_async().await;
    let register = server
        .mock("POST", "/api/register")
        .match_body(Matcher::Json(serde_json::json!({
            "username": "ayu",
            "email": "ayu@clinic.id",
            "password": "secret1"
        })))
        .with_status(201)
        .with_body(r#"{"message":"User registered"}"#)
        .expect(1)
        .create_async()
        .await;

    let storage: SharedStorage = Arc::new(nexmedis_storefront::storage::MemoryStorage::new());
    let mut page = RegisterPage::new(client(&server, storage));
    page.form.username = "ayu".to_string();
    page.form.email = "ayu@clinic.id".to_string();
    page.form.password = "secret1".to_string();
    page.form.confirm_password = "secret1".to_string();

    assert_eq!(page.submit().await, Some(Navigation::Redirect("/login".into())));
    register.assert_async().await;
}

#[tokio::test]
async fn test_register_conflict_and_validation_messages() {
    let mut server = mockito::Server::new_async().await;
    let conflict = server
        .mock("POST", "/api/register")
        .with_status(409)
        .with_body(r#"{"message":"Email exists"}"#)
        .create_async()
        .await;

    let storage: SharedStorage = Arc::new(nexmedis_storefront::storage::MemoryStorage::new());
    let mut page = RegisterPage::new(client(&server, storage));
    page.form.username = "ayu".to_string();
    page.form.email = "ayu@clinic.id".to_string();
    page.form.password = "secret1".to_string();
    page.form.confirm_password = "secret1".to_string();

    assert_eq!(page.submit().await, None);
    assert_eq!(
        page.toasts.last().and_then(|t| t.description.as_deref()),
        Some("This email is already registered.")
    );

    conflict.remove_async().await;
    server
        .mock("POST", "/api/register")
        .with_status(400)
        .with_body(
            r#"{"message":"Validation failed","errors":{"username":"Username taken","email":"Email invalid"}}"#,
        )
        .create_async()
        .await;

    assert_eq!(page.submit().await, None);
    assert_eq!(
        page.toasts.last().and_then(|t| t.description.as_deref()),
        Some("Username taken, Email invalid")
    );
}
