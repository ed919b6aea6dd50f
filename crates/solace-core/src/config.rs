use std::path::Path;

use secrecy::Secret;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{Result, SolaceError};

/// Environment variable consulted for the admin bearer token.
pub const ADMIN_TOKEN_ENV: &str = "SOLACE_ADMIN_TOKEN";

/// Top-level configuration for the Solace client.
///
/// Loaded from `~/.solace/config.toml` by default. Each section corresponds
/// to one backend surface or cross-cutting concern.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct SolaceConfig {
    pub backend: BackendConfig,
    pub chat: ChatConfig,
    pub log: LogConfig,
}

impl SolaceConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SolaceConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Apply environment overrides on top of the file-sourced values.
    ///
    /// Currently `SOLACE_ADMIN_TOKEN` overrides `backend.admin_token`, so
    /// the credential never has to live in a file on disk.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(token) = std::env::var(ADMIN_TOKEN_ENV) {
            if !token.is_empty() {
                self.backend.admin_token = Some(Secret::new(token));
            }
        }
        self
    }
}

/// Backend endpoint configuration shared by both client surfaces.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Origin of the inference/knowledge backend.
    pub base_url: String,
    /// Bearer token for the admin upload and listing endpoints.
    ///
    /// Required for the admin surface, with no default value: a missing
    /// token is a configuration error at the point of use, never a
    /// silently substituted credential.
    pub admin_token: Option<Secret<String>>,
    /// Request timeout applied at the HTTP transport, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            admin_token: None,
            request_timeout_secs: 30,
        }
    }
}

impl BackendConfig {
    /// The admin bearer token, or a fail-fast configuration error when it
    /// has not been provided via the config file or `SOLACE_ADMIN_TOKEN`.
    pub fn require_admin_token(&self) -> Result<Secret<String>> {
        match &self.admin_token {
            Some(token) => Ok(token.clone()),
            None => Err(SolaceError::Config(format!(
                "backend.admin_token is not set; provide it in the config file or via {}",
                ADMIN_TOKEN_ENV
            ))),
        }
    }
}

/// Conversational session settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Caller identity tag sent with every chat query.
    pub user_id: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            user_id: "web_user".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level: trace, debug, info, warn, error.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_default_config() {
        let config = SolaceConfig::default();
        assert_eq!(config.backend.base_url, "http://localhost:8000");
        assert!(config.backend.admin_token.is_none());
        assert_eq!(config.backend.request_timeout_secs, 30);
        assert_eq!(config.chat.user_id, "web_user");
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [backend]
            base_url = "https://assistant.example.com"
            admin_token = "token-abc"
            request_timeout_secs = 5

            [chat]
            user_id = "clinic_kiosk"

            [log]
            level = "debug"
        "#;
        let config: SolaceConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.backend.base_url, "https://assistant.example.com");
        assert_eq!(
            config
                .backend
                .admin_token
                .as_ref()
                .unwrap()
                .expose_secret(),
            "token-abc"
        );
        assert_eq!(config.backend.request_timeout_secs, 5);
        assert_eq!(config.chat.user_id, "clinic_kiosk");
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let toml_str = r#"
            [backend]
            base_url = "http://127.0.0.1:9000"
        "#;
        let config: SolaceConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.backend.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.backend.request_timeout_secs, 30);
        assert_eq!(config.chat.user_id, "web_user");
    }

    #[test]
    fn test_load_missing_file_falls_back_to_default() {
        let config = SolaceConfig::load_or_default(Path::new("/nonexistent/config.toml"));
        assert_eq!(config.backend.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[chat]\nuser_id = \"test_user\"\n").unwrap();

        let config = SolaceConfig::load(&path).unwrap();
        assert_eq!(config.chat.user_id, "test_user");
    }

    #[test]
    fn test_load_invalid_toml_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "backend = [[[").unwrap();
        assert!(SolaceConfig::load(&path).is_err());
    }

    #[test]
    fn test_require_admin_token_missing_fails_fast() {
        let config = BackendConfig::default();
        let err = config.require_admin_token().unwrap_err();
        assert!(err.to_string().contains("admin_token"));
        assert!(err.to_string().contains(ADMIN_TOKEN_ENV));
    }

    #[test]
    fn test_require_admin_token_present() {
        let config = BackendConfig {
            admin_token: Some(Secret::new("secret-token".to_string())),
            ..BackendConfig::default()
        };
        let token = config.require_admin_token().unwrap();
        assert_eq!(token.expose_secret(), "secret-token");
    }

    #[test]
    fn test_admin_token_is_redacted_in_debug() {
        let config = BackendConfig {
            admin_token: Some(Secret::new("secret-token".to_string())),
            ..BackendConfig::default()
        };
        let dbg = format!("{:?}", config);
        assert!(!dbg.contains("secret-token"));
    }

    #[test]
    fn test_env_override_sets_token() {
        std::env::set_var(ADMIN_TOKEN_ENV, "from-env");
        let config = SolaceConfig::default().with_env_overrides();
        std::env::remove_var(ADMIN_TOKEN_ENV);
        assert_eq!(
            config
                .backend
                .admin_token
                .as_ref()
                .unwrap()
                .expose_secret(),
            "from-env"
        );
    }
}
