use actix_session::SessionExt;
use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
};

use super::session::ADMIN_EMAIL_KEY;

/// Panel fragments are fetched by the shell's script, which handles 401 itself.
const PANEL_PREFIX: &str = "/admin/painel/";

/// Gate for every admin route: no admin in the session means the login page.
pub async fn require_auth(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let signed_in = req
        .get_session()
        .get::<String>(ADMIN_EMAIL_KEY)
        .unwrap_or(None)
        .is_some();
    if signed_in {
        return next.call(req).await.map(|res| res.map_into_left_body());
    }

    let response = if req.path().starts_with(PANEL_PREFIX) {
        HttpResponse::Unauthorized().finish()
    } else {
        log::debug!("Unauthenticated request to {}, redirecting to login", req.path());
        HttpResponse::SeeOther()
            .insert_header(("Location", "/admin/login"))
            .finish()
    };
    Ok(req.into_response(response).map_into_right_body())
}
