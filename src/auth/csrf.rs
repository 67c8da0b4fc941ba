use actix_session::Session;
use rand::Rng;

use crate::errors::AppError;

const CSRF_KEY: &str = "csrf_token";

/// Token embedded in every admin form, created on first use per session.
pub fn get_or_create_token(session: &Session) -> String {
    match session.get::<String>(CSRF_KEY) {
        Ok(Some(token)) => token,
        _ => {
            let token = random_token();
            let _ = session.insert(CSRF_KEY, &token);
            token
        }
    }
}

pub fn validate_csrf(session: &Session, submitted: &str) -> Result<(), AppError> {
    let expected = session.get::<String>(CSRF_KEY).unwrap_or(None).unwrap_or_default();
    if expected.is_empty() || !tokens_match(expected.as_bytes(), submitted.as_bytes()) {
        log::warn!("Rejected form with invalid CSRF token");
        return Err(AppError::Csrf);
    }
    Ok(())
}

/// 32 random bytes, hex encoded.
fn random_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    hex::encode(bytes)
}

/// Constant time in the token length.
fn tokens_match(expected: &[u8], submitted: &[u8]) -> bool {
    expected.len() == submitted.len()
        && expected.iter().zip(submitted).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_64_hex_chars() {
        let token = random_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn comparison_requires_equal_length_and_bytes() {
        assert!(tokens_match(b"abc", b"abc"));
        assert!(!tokens_match(b"abc", b"abd"));
        assert!(!tokens_match(b"abc", b"abcd"));
    }
}
