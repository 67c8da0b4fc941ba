use actix_session::Session;

use crate::admin::Notice;
use crate::errors::AppError;

pub const ADMIN_EMAIL_KEY: &str = "admin_email";
const FLASH_KEY: &str = "flash";

pub fn get_admin_email(session: &Session) -> Result<String, AppError> {
    match session.get::<String>(ADMIN_EMAIL_KEY) {
        Ok(Some(email)) => Ok(email),
        Ok(None) => Err(AppError::Session("No admin in session".to_string())),
        Err(e) => Err(AppError::Session(format!("Session error: {e}"))),
    }
}

pub fn set_flash(session: &Session, notice: &Notice) {
    let _ = session.insert(FLASH_KEY, notice);
}

pub fn take_flash(session: &Session) -> Option<Notice> {
    let flash = session.get::<Notice>(FLASH_KEY).unwrap_or(None);
    if flash.is_some() {
        session.remove(FLASH_KEY);
    }
    flash
}
