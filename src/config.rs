//! Process configuration read from the environment (and `.env`, if present).

use std::env;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_ORG_NAME: &str = "Nossa ONG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: String,
    /// Unset means the process-local in-memory store.
    pub database_url: Option<String>,
    pub session_key: Option<String>,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    pub uploadcare_public_key: String,
    pub pix_key: String,
    pub org_name: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            log::debug!("No .env file loaded: {e}");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        Self {
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            database_url: get("DATABASE_URL"),
            session_key: get("SESSION_KEY"),
            admin_email: get("ADMIN_EMAIL"),
            admin_password: get("ADMIN_PASSWORD"),
            uploadcare_public_key: get("UPLOADCARE_PUBLIC_KEY").unwrap_or_default(),
            pix_key: get("PIX_KEY").unwrap_or_default(),
            org_name: get("ORG_NAME").unwrap_or_else(|| DEFAULT_ORG_NAME.to_string()),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let config = AppConfig::default();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.database_url, None);
        assert_eq!(config.org_name, DEFAULT_ORG_NAME);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("DATABASE_URL", "  "),
            ("PIX_KEY", "contato@ong.org"),
            ("BIND_ADDR", "0.0.0.0:9000"),
        ]);
        let config = AppConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.database_url, None);
        assert_eq!(config.pix_key, "contato@ong.org");
        assert_eq!(config.bind_addr, "0.0.0.0:9000");
    }
}
