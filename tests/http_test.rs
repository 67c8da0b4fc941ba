//! HTTP layer tests: routing, session gating, contact form, panel rendering
//! and the admin mutation endpoints.

use std::sync::Arc;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::Key;
use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use regex::Regex;
use serde_json::json;

use ongsite::auth::password;
use ongsite::auth::provider::{seed_admin, StoreAuthenticator};
use ongsite::auth::rate_limit::RateLimiter;
use ongsite::config::AppConfig;
use ongsite::handlers::{self, AppState};
use ongsite::models::{self, ContactMessage, Document, Donation};
use ongsite::store::memory::MemoryStore;
use ongsite::store::{DocumentStore, Fields, DONATIONS};

const ADMIN_EMAIL: &str = "admin@ong.org";
const ADMIN_PASS: &str = "senha-segura-123";

fn state(store: Arc<MemoryStore>) -> web::Data<AppState> {
    let store: Arc<dyn DocumentStore> = store;
    web::Data::new(AppState {
        authenticator: Arc::new(StoreAuthenticator::new(Arc::clone(&store))),
        store,
        config: AppConfig::default(),
    })
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                        .cookie_secure(false)
                        .build(),
                )
                .app_data($state)
                .app_data(web::Data::new(RateLimiter::new()))
                .configure(handlers::configure),
        )
        .await
    };
}

/// Sign in as the seeded admin; yields the session cookie and its CSRF token.
macro_rules! sign_in {
    ($app:expr) => {{
        let resp = test::call_service(&$app, test::TestRequest::get().uri("/admin/login").to_request()).await;
        let cookie = resp.response().cookies().next().expect("no session cookie").into_owned();
        let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        let token = csrf_token(&body);

        let req = test::TestRequest::post()
            .uri("/admin/login")
            .cookie(cookie)
            .set_form([("email", ADMIN_EMAIL), ("password", ADMIN_PASS), ("csrf_token", token.as_str())])
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        let cookie = resp.response().cookies().next().expect("no session cookie").into_owned();

        let resp = test::call_service(&$app, test::TestRequest::get().uri("/admin").cookie(cookie.clone()).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let cookie = resp.response().cookies().next().map(|c| c.into_owned()).unwrap_or(cookie);
        let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        (cookie, csrf_token(&body))
    }};
}

/// Follow a mutation's redirect to the shell and return the flashed page.
macro_rules! shell_after {
    ($app:expr, $resp:expr) => {{
        let resp = $resp;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        let cookie = resp.response().cookies().next().expect("flash not stored").into_owned();
        let resp = test::call_service(&$app, test::TestRequest::get().uri("/admin").cookie(cookie).to_request()).await;
        String::from_utf8(test::read_body(resp).await.to_vec()).unwrap()
    }};
}

async fn admin_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    let hash = password::hash_password(ADMIN_PASS).unwrap();
    seed_admin(store.as_ref(), ADMIN_EMAIL, &hash).await.unwrap();
    store
}

fn fields(value: serde_json::Value) -> Fields {
    value.as_object().cloned().expect("object")
}

fn csrf_token(body: &str) -> String {
    let re = Regex::new(r#"name="csrf_token" value="([0-9a-f]{64})""#).unwrap();
    re.captures(body).expect("no csrf token in page")[1].to_string()
}

#[actix_rt::test]
async fn test_unauthenticated_admin_redirects_to_login() {
    let app = app!(state(Arc::new(MemoryStore::new())));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/admin").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/admin/login");

    // The shell script fetches panels and handles 401 by itself
    let req = test::TestRequest::get().uri("/admin/painel/dashboard").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_home_page_renders() {
    let app = app!(state(Arc::new(MemoryStore::new())));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("id=\"transparencia\""));
    assert!(body.contains("id=\"contactForm\""));
}

#[actix_rt::test]
async fn test_contact_form_stores_message() {
    let store = Arc::new(MemoryStore::new());
    let app = app!(state(store.clone()));

    let req = test::TestRequest::post()
        .uri("/contato")
        .set_form([("name", "Ana"), ("email", "ana@exemplo.org"), ("message", "Quero ajudar")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let reply: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(reply["ok"], true);
    assert_eq!(reply["message"], "Mensagem enviada com sucesso!");

    let messages = models::find_all::<ContactMessage>(store.as_ref()).await.unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].submitted_at.is_some());
}

#[actix_rt::test]
async fn test_contact_form_with_blank_field_stores_nothing() {
    let store = Arc::new(MemoryStore::new());
    let app = app!(state(store.clone()));

    let req = test::TestRequest::post()
        .uri("/contato")
        .set_form([("name", "Ana"), ("email", "ana@exemplo.org"), ("message", "   ")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let reply: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(reply["ok"], false);
    assert!(models::find_all::<ContactMessage>(store.as_ref()).await.unwrap().is_empty());
}

#[actix_rt::test]
async fn test_login_then_panel_and_unknown_panel() {
    let store = Arc::new(MemoryStore::new());
    let hash = password::hash_password(ADMIN_PASS).unwrap();
    seed_admin(store.as_ref(), ADMIN_EMAIL, &hash).await.unwrap();
    let app = app!(state(store));

    // Login page sets the session cookie carrying the CSRF token
    let resp = test::call_service(&app, test::TestRequest::get().uri("/admin/login").to_request()).await;
    let cookie = resp.response().cookies().next().expect("no session cookie").into_owned();
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    let token = csrf_token(&body);

    // Wrong password renders the form again with an inline error
    let req = test::TestRequest::post()
        .uri("/admin/login")
        .cookie(cookie.clone())
        .set_form([("email", ADMIN_EMAIL), ("password", "errada"), ("csrf_token", token.as_str())])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("E-mail ou senha inválidos."));

    let req = test::TestRequest::post()
        .uri("/admin/login")
        .cookie(cookie)
        .set_form([("email", ADMIN_EMAIL), ("password", ADMIN_PASS), ("csrf_token", token.as_str())])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/admin");
    let cookie = resp.response().cookies().next().expect("no session cookie").into_owned();

    let req = test::TestRequest::get().uri("/admin/painel/doacoes").cookie(cookie.clone()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("id=\"panel-doacoes\""));
    assert!(body.contains("Nenhum registro encontrado."));

    let req = test::TestRequest::get().uri("/admin/painel/relatorios").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_login_with_bad_csrf_is_forbidden() {
    let app = app!(state(Arc::new(MemoryStore::new())));

    let req = test::TestRequest::post()
        .uri("/admin/login")
        .set_form([("email", ADMIN_EMAIL), ("password", ADMIN_PASS), ("csrf_token", "forjado")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn test_delete_requires_confirmation() {
    let store = admin_store().await;
    let id = store
        .create(DONATIONS, fields(json!({"donor": "Ana", "amount": 50.0, "date": "2025-08-01"})))
        .await
        .unwrap();
    let app = app!(state(store.clone()));
    let (cookie, token) = sign_in!(app);
    let uri = format!("/admin/doacoes/{id}/excluir");

    // Declined prompt: the script leaves `confirmado` empty
    let req = test::TestRequest::post()
        .uri(&uri)
        .cookie(cookie.clone())
        .set_form([("csrf_token", token.as_str()), ("confirmado", "")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/admin#doacoes");
    assert_eq!(models::find_all::<Donation>(store.as_ref()).await.unwrap().len(), 1);

    let req = test::TestRequest::post()
        .uri(&uri)
        .cookie(cookie)
        .set_form([("csrf_token", token.as_str()), ("confirmado", "sim")])
        .to_request();
    let body = shell_after!(app, test::call_service(&app, req).await);
    assert!(body.contains("Doação excluída com sucesso!"));
    assert!(models::find_all::<Donation>(store.as_ref()).await.unwrap().is_empty());
}

#[actix_rt::test]
async fn test_zero_donation_is_rejected_with_flash() {
    let store = admin_store().await;
    let app = app!(state(store.clone()));
    let (cookie, token) = sign_in!(app);

    let req = test::TestRequest::post()
        .uri("/admin/doacoes")
        .cookie(cookie)
        .set_form([("csrf_token", token.as_str()), ("donor", "Ana"), ("amount", "0"), ("date", "2025-08-01")])
        .to_request();
    let body = shell_after!(app, test::call_service(&app, req).await);

    assert!(body.contains("Informe um valor positivo para a doação."));
    assert!(body.contains("notice error"));
    assert!(models::find_all::<Donation>(store.as_ref()).await.unwrap().is_empty());
}

#[actix_rt::test]
async fn test_document_create_without_upload_is_rejected() {
    let store = admin_store().await;
    let app = app!(state(store.clone()));
    let (cookie, token) = sign_in!(app);

    let req = test::TestRequest::post()
        .uri("/admin/documentos")
        .cookie(cookie)
        .set_form([("csrf_token", token.as_str()), ("title", "Estatuto"), ("category", "Institucional")])
        .to_request();
    let body = shell_after!(app, test::call_service(&app, req).await);

    assert!(body.contains("Por favor, escolha e envie um arquivo primeiro."));
    assert!(models::find_all::<Document>(store.as_ref()).await.unwrap().is_empty());
}

#[actix_rt::test]
async fn test_document_create_with_upload_fields_is_stored() {
    let store = admin_store().await;
    let app = app!(state(store.clone()));
    let (cookie, token) = sign_in!(app);

    let req = test::TestRequest::post()
        .uri("/admin/documentos")
        .cookie(cookie)
        .set_form([
            ("csrf_token", token.as_str()),
            ("title", "Estatuto"),
            ("category", ""),
            ("file_name", "estatuto.pdf"),
            ("file_url", "https://ucarecdn.com/abc/"),
            ("file_uuid", "abc"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/admin#documentos");

    let documents = models::find_all::<Document>(store.as_ref()).await.unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].file_uuid, "abc");
    assert_eq!(documents[0].category, "");
}

#[actix_rt::test]
async fn test_mutation_with_bad_csrf_is_forbidden() {
    let store = admin_store().await;
    let id = store
        .create(DONATIONS, fields(json!({"donor": "Ana", "amount": 50.0, "date": "2025-08-01"})))
        .await
        .unwrap();
    let app = app!(state(store.clone()));
    let (cookie, _token) = sign_in!(app);

    let req = test::TestRequest::post()
        .uri(&format!("/admin/doacoes/{id}/excluir"))
        .cookie(cookie)
        .set_form([("csrf_token", "forjado"), ("confirmado", "sim")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(models::find_all::<Donation>(store.as_ref()).await.unwrap().len(), 1);
}
