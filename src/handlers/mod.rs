pub mod admin_handlers;
pub mod auth_handlers;
pub mod public_handlers;

use std::sync::Arc;

use actix_web::{middleware, web};

use crate::auth::provider::Authenticator;
use crate::auth::{self};
use crate::config::AppConfig;
use crate::store::DocumentStore;

/// Shared, per-process application state.
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub authenticator: Arc<dyn Authenticator>,
    pub config: AppConfig,
}

/// Register every route. Static files and the 404 fallback are wired in `main`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Public site
        .route("/", web::get().to(public_handlers::home))
        .route("/contato", web::post().to(public_handlers::contact_submit))
        // Admin sign-in
        .route("/admin/login", web::get().to(auth_handlers::login_page))
        .route("/admin/login", web::post().to(auth_handlers::login_submit))
        // Admin panel
        .service(
            web::scope("/admin")
                .wrap(middleware::from_fn(auth::middleware::require_auth))
                .route("", web::get().to(admin_handlers::shell))
                .route("/logout", web::post().to(auth_handlers::logout))
                .route("/painel/{token}", web::get().to(admin_handlers::panel))
                // /{id}/excluir BEFORE /{id}
                .route("/documentos", web::post().to(admin_handlers::document_create))
                .route("/documentos/{id}/excluir", web::post().to(admin_handlers::document_delete))
                .route("/documentos/{id}", web::post().to(admin_handlers::document_update))
                .route("/projetos", web::post().to(admin_handlers::project_create))
                .route("/projetos/{id}/excluir", web::post().to(admin_handlers::project_delete))
                .route("/projetos/{id}", web::post().to(admin_handlers::project_update))
                .route("/doacoes", web::post().to(admin_handlers::donation_create))
                .route("/doacoes/{id}/excluir", web::post().to(admin_handlers::donation_delete))
                .route("/mensagens/{id}/excluir", web::post().to(admin_handlers::message_delete))
                .route("/institucional", web::post().to(admin_handlers::institutional_save)),
        );
}
