use actix_session::Session;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::auth::provider::AuthError;
use crate::auth::session::ADMIN_EMAIL_KEY;
use crate::auth::{csrf, rate_limit::RateLimiter};
use crate::errors::{render, AppError};
use crate::templates_structs::LoginTemplate;

use super::AppState;

const INVALID_CREDENTIALS: &str = "E-mail ou senha inválidos.";
const TOO_MANY_ATTEMPTS: &str = "Muitas tentativas de login. Tente novamente mais tarde.";
const SIGN_IN_FAILED: &str = "Não foi possível entrar. Tente novamente.";

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

fn login_form(state: &AppState, session: &Session, error: Option<&str>) -> Result<HttpResponse, AppError> {
    let tmpl = LoginTemplate {
        error: error.map(str::to_string),
        org_name: state.config.org_name.clone(),
        csrf_token: csrf::get_or_create_token(session),
    };
    render(tmpl)
}

pub async fn login_page(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    // Already signed in
    if session.get::<String>(ADMIN_EMAIL_KEY).unwrap_or(None).is_some() {
        return Ok(HttpResponse::SeeOther()
            .insert_header(("Location", "/admin"))
            .finish());
    }
    login_form(&state, &session, None)
}

pub async fn login_submit(
    req: HttpRequest,
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<LoginForm>,
    limiter: web::Data<RateLimiter>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    // Rate-limit check BEFORE touching the store
    let ip = req.peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or_else(|| std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED));
    if limiter.is_blocked(ip) {
        return login_form(&state, &session, Some(TOO_MANY_ATTEMPTS));
    }

    match state.authenticator.sign_in(&form.email, &form.password).await {
        Ok(admin) => {
            limiter.clear(ip);
            session.renew();
            session
                .insert(ADMIN_EMAIL_KEY, &admin.email)
                .map_err(|e| AppError::Session(e.to_string()))?;
            log::info!("Admin {} signed in", admin.email);
            Ok(HttpResponse::SeeOther()
                .insert_header(("Location", "/admin"))
                .finish())
        }
        Err(AuthError::InvalidCredentials) => {
            limiter.record_failure(ip);
            login_form(&state, &session, Some(INVALID_CREDENTIALS))
        }
        Err(e) => {
            log::error!("Sign-in failed: {e}");
            login_form(&state, &session, Some(SIGN_IN_FAILED))
        }
    }
}

pub async fn logout(
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    session.purge();
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/admin/login"))
        .finish())
}
