/// Validate an email: must contain '@' and '.', max 254 chars.
pub fn validate_email(email: &str) -> Option<String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Some("E-mail é obrigatório".to_string());
    }
    if trimmed.len() > 254 {
        return Some("E-mail deve ter no máximo 254 caracteres".to_string());
    }
    if !trimmed.contains('@') || !trimmed.contains('.') {
        return Some("Informe um e-mail válido".to_string());
    }
    None
}

/// Validate a password: min 8 chars.
pub fn validate_password(password: &str) -> Option<String> {
    if password.is_empty() {
        return Some("Senha é obrigatória".to_string());
    }
    if password.len() < 8 {
        return Some("A senha deve ter pelo menos 8 caracteres".to_string());
    }
    None
}

/// Validate a required text field with a max length.
pub fn validate_required(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} é obrigatório"));
    }
    if trimmed.chars().count() > max_len {
        return Some(format!("{field_name} deve ter no máximo {max_len} caracteres"));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_rules() {
        assert!(validate_email("contato@ong.org.br").is_none());
        assert!(validate_email("contato").is_some());
        assert!(validate_email("   ").is_some());
    }

    #[test]
    fn required_counts_characters_not_bytes() {
        assert!(validate_required("ação", "Nome", 4).is_none());
        assert!(validate_required("ações", "Nome", 4).is_some());
    }

    #[test]
    fn password_minimum_length() {
        assert!(validate_password("curta").is_some());
        assert!(validate_password("bem-longa-123").is_none());
    }
}
