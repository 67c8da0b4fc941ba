//! Admin endpoints. Each request runs the admin engine against a recording
//! surface, then renders or flashes what it recorded.

use std::sync::Arc;

use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::admin::panels::{self, AdminDeps, AdminPanels};
use crate::admin::recorder::{RecordingCharts, RecordingSurface};
use crate::admin::{Route, RouteError, Router};
use crate::auth::csrf;
use crate::auth::session::{get_admin_email, set_flash, take_flash};
use crate::errors::{render, AppError};
use crate::models::{DocumentForm, DonationForm, InstitutionalForm, ProjectForm};
use crate::templates_structs::{AdminShellTemplate, NavItem, PanelTemplate};
use crate::upload::{PickerConfig, SubmittedUpload};

use super::AppState;

/// Value the shell's script puts in `confirmado` once the admin accepts the prompt.
const CONFIRMED: &str = "sim";

struct Engine {
    router: Router,
    panels: AdminPanels,
    surface: Arc<RecordingSurface>,
    charts: Arc<RecordingCharts>,
}

impl Engine {
    fn new(state: &AppState, surface: RecordingSurface, upload: SubmittedUpload) -> Self {
        let surface = Arc::new(surface);
        let charts = Arc::new(RecordingCharts::new());
        let deps = AdminDeps::new(
            Arc::clone(&state.store),
            surface.clone(),
            charts.clone(),
            Arc::new(upload),
            PickerConfig::new(&state.config.uploadcare_public_key),
        );
        let (router, panels) = panels::build(deps);
        Engine { router, panels, surface, charts }
    }

    fn plain(state: &AppState) -> Self {
        Self::new(state, RecordingSurface::new(), SubmittedUpload::default())
    }

    /// Carry the last notice over the redirect back to the panel.
    fn finish(self, session: &Session, route: Route) -> HttpResponse {
        if let Some(notice) = self.surface.snapshot().last_notice() {
            set_flash(session, notice);
        }
        HttpResponse::SeeOther()
            .insert_header(("Location", format!("/admin#{}", route.token())))
            .finish()
    }
}

#[derive(Deserialize)]
pub struct DeleteForm {
    pub csrf_token: String,
    #[serde(default)]
    pub confirmado: String,
}

impl DeleteForm {
    fn surface(&self) -> RecordingSurface {
        RecordingSurface::with_confirmation(self.confirmado == CONFIRMED)
    }
}

#[derive(Deserialize)]
pub struct WithCsrf<F> {
    pub csrf_token: String,
    #[serde(flatten)]
    pub form: F,
}

/// Document form plus the fields the upload widget filled in.
#[derive(Deserialize)]
pub struct DocumentCreateForm {
    pub csrf_token: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub file_url: String,
    #[serde(default)]
    pub file_uuid: String,
}

pub async fn shell(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let admin_email = get_admin_email(&session)?;
    let tmpl = AdminShellTemplate {
        org_name: state.config.org_name.clone(),
        admin_email,
        csrf_token: csrf::get_or_create_token(&session),
        flash: take_flash(&session),
        nav: NavItem::all(),
        picker_key: state.config.uploadcare_public_key.clone(),
    };
    render(tmpl)
}

/// Activate one panel and return its rendered body.
pub async fn panel(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let token = path.into_inner();
    let mut engine = Engine::plain(&state);
    let route = match engine.router.go(&token).await {
        Ok(route) => route,
        Err(RouteError::Unknown(_) | RouteError::Unregistered(_)) => return Err(AppError::NotFound),
    };

    let tmpl = PanelTemplate::from_state(
        route,
        engine.surface.snapshot(),
        engine.charts.to_script_json(),
        csrf::get_or_create_token(&session),
        state.config.uploadcare_public_key.clone(),
    );
    render(tmpl)
}

pub async fn document_create(
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<DocumentCreateForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let form = form.into_inner();
    let upload = SubmittedUpload::from_fields(&form.file_name, &form.file_url, &form.file_uuid);
    let engine = Engine::new(&state, RecordingSurface::new(), upload);

    let documents = &engine.panels.documents;
    if documents.choose_file().await.is_ok() {
        let _ = documents
            .create(&DocumentForm { title: form.title, category: form.category })
            .await;
    }
    Ok(engine.finish(&session, Route::Documents))
}

pub async fn document_update(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<WithCsrf<DocumentForm>>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let engine = Engine::plain(&state);
    let _ = engine.panels.documents.update(&path, &form.form).await;
    Ok(engine.finish(&session, Route::Documents))
}

pub async fn document_delete(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<DeleteForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let engine = Engine::new(&state, form.surface(), SubmittedUpload::default());
    let _ = engine.panels.documents.delete(&path).await;
    Ok(engine.finish(&session, Route::Documents))
}

pub async fn project_create(
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<WithCsrf<ProjectForm>>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let engine = Engine::plain(&state);
    let _ = engine.panels.projects.create(&form.form).await;
    Ok(engine.finish(&session, Route::Projects))
}

pub async fn project_update(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<WithCsrf<ProjectForm>>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let engine = Engine::plain(&state);
    let _ = engine.panels.projects.update(&path, &form.form).await;
    Ok(engine.finish(&session, Route::Projects))
}

pub async fn project_delete(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<DeleteForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let engine = Engine::new(&state, form.surface(), SubmittedUpload::default());
    let _ = engine.panels.projects.delete(&path).await;
    Ok(engine.finish(&session, Route::Projects))
}

pub async fn donation_create(
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<WithCsrf<DonationForm>>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let engine = Engine::plain(&state);
    let _ = engine.panels.donations.create(&form.form).await;
    Ok(engine.finish(&session, Route::Donations))
}

pub async fn donation_delete(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<DeleteForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let engine = Engine::new(&state, form.surface(), SubmittedUpload::default());
    let _ = engine.panels.donations.delete(&path).await;
    Ok(engine.finish(&session, Route::Donations))
}

pub async fn message_delete(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<DeleteForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let engine = Engine::new(&state, form.surface(), SubmittedUpload::default());
    let _ = engine.panels.messages.delete(&path).await;
    Ok(engine.finish(&session, Route::Messages))
}

pub async fn institutional_save(
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<WithCsrf<InstitutionalForm>>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let engine = Engine::plain(&state);
    let _ = engine.panels.institutional.save(&form.form).await;
    Ok(engine.finish(&session, Route::Institutional))
}
