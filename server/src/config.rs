use anyhow::{Context, Result, anyhow};
use axum_extra::extract::cookie::Key;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use platform_db::DatabaseSettings;
use tracing::warn;

const MIN_COOKIE_SECRET_LEN: usize = 32;

#[derive(Clone)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub cookie_key: Key,
    pub cookie_secure: bool,
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Read the process environment once at startup.
    pub fn load() -> Result<Self> {
        let cookie_key = match std::env::var("COOKIE_SECRET_BASE64") {
            Ok(secret) => cookie_key_from_base64(&secret)?,
            Err(_) => {
                warn!("COOKIE_SECRET_BASE64 not set; flash cookies will not survive a restart");
                Key::generate()
            }
        };

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .filter_map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect::<Vec<_>>();

        Ok(Self {
            database: DatabaseSettings::from_env(),
            cookie_key,
            cookie_secure: env_bool("COOKIE_SECURE", false),
            cors_allowed_origins,
        })
    }

    /// Configuration with a throwaway cookie key, for tests and tooling.
    pub fn ephemeral(database: DatabaseSettings) -> Self {
        Self {
            database,
            cookie_key: Key::generate(),
            cookie_secure: false,
            cors_allowed_origins: Vec::new(),
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("database", &self.database)
            .field("cookie_key", &"<redacted>")
            .field("cookie_secure", &self.cookie_secure)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .finish()
    }
}

fn cookie_key_from_base64(secret: &str) -> Result<Key> {
    let secret_bytes = STANDARD
        .decode(secret.trim())
        .context("invalid COOKIE_SECRET_BASE64")?;
    if secret_bytes.len() < MIN_COOKIE_SECRET_LEN {
        return Err(anyhow!(
            "COOKIE_SECRET_BASE64 must decode to at least {MIN_COOKIE_SECRET_LEN} bytes"
        ));
    }
    Ok(Key::derive_from(&secret_bytes))
}

fn env_bool(var: &str, default: bool) -> bool {
    std::env::var(var)
        .ok()
        .map(|val| matches!(val.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(default)
}
