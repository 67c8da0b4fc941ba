use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::errors::{render, AppError};
use crate::models::{self, institutional, ContactForm, ContactMessage, Document, Entity, Project};
use crate::store::StoreError;
use crate::templates_structs::{site::group_documents, HomeTemplate};

use super::AppState;

const CONTACT_SENT: &str = "Mensagem enviada com sucesso!";
const CONTACT_FAILED: &str = "Ocorreu um erro. Tente novamente.";

/// Feedback for the contact form's script.
#[derive(Debug, Serialize)]
pub struct ContactReply {
    pub ok: bool,
    pub message: String,
}

/// Sections that fail to load render empty; the page notes the failure.
fn or_default<T: Default>(what: &str, result: Result<T, StoreError>, failed: &mut bool) -> T {
    result.unwrap_or_else(|e| {
        log::error!("Failed to load {what} for the public site: {e}");
        *failed = true;
        T::default()
    })
}

pub async fn home(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let store = state.store.as_ref();
    let (content, projects, documents) = tokio::join!(
        institutional::load(store),
        models::find_all::<Project>(store),
        models::find_all::<Document>(store),
    );

    let mut load_failed = false;
    let content = or_default("institutional content", content, &mut load_failed);
    let projects = or_default("projects", projects, &mut load_failed);
    let documents = or_default("documents", documents, &mut load_failed);

    let tmpl = HomeTemplate {
        org_name: state.config.org_name.clone(),
        pix_key: state.config.pix_key.clone(),
        content,
        projects,
        document_groups: group_documents(documents),
        load_failed,
    };
    render(tmpl)
}

/// Store a contact message; always answers with JSON feedback.
pub async fn contact_submit(
    state: web::Data<AppState>,
    form: web::Form<ContactForm>,
) -> HttpResponse {
    let fields = match ContactMessage::validate(&form) {
        Ok(fields) => fields,
        Err(errors) => {
            return HttpResponse::BadRequest().json(ContactReply { ok: false, message: errors.join(" ") });
        }
    };

    match models::insert::<ContactMessage>(state.store.as_ref(), fields).await {
        Ok(id) => {
            log::info!("Contact message {id} received");
            HttpResponse::Ok().json(ContactReply { ok: true, message: CONTACT_SENT.to_string() })
        }
        Err(e) => {
            log::error!("Failed to store contact message: {e}");
            HttpResponse::InternalServerError()
                .json(ContactReply { ok: false, message: CONTACT_FAILED.to_string() })
        }
    }
}
