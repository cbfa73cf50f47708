use std::{env, path::PathBuf};

use anyhow::{Context, bail};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub auth: AuthSettings,
    pub cors_origins: Vec<String>,
    pub static_dir: PathBuf,
}

/// Bearer token settings shared by every protected route.
#[derive(Debug, Clone, Default)]
pub struct AuthSettings {
    pub jwt_secret: Option<String>,
    pub issuer: Option<String>,
    pub audience: Option<String>,
    /// Decode tokens for expiry only. Only honoured when `APP_ENV=development`.
    pub insecure_skip_signature: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL is not set")?;
        let host = lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("APP_PORT")
            .or_else(|| lookup("PORT"))
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8080);
        let environment = lookup("APP_ENV").unwrap_or_else(|| "production".to_string());

        let insecure_skip_signature = lookup("AUTH_INSECURE_SKIP_SIGNATURE")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        if insecure_skip_signature && environment != "development" {
            bail!("AUTH_INSECURE_SKIP_SIGNATURE is only allowed when APP_ENV=development");
        }

        let auth = AuthSettings {
            jwt_secret: lookup("JWT_SECRET").filter(|s| !s.is_empty()),
            issuer: lookup("JWT_ISSUER").filter(|s| !s.is_empty()),
            audience: lookup("JWT_AUDIENCE").filter(|s| !s.is_empty()),
            insecure_skip_signature,
        };

        let cors_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let static_dir = lookup("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("wwwroot"));

        Ok(Self {
            database_url,
            host,
            port,
            environment,
            auth,
            cors_origins,
            static_dir,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
