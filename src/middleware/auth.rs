use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::{config::AuthSettings, error::AppError, state::AppState};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Claims {
    pub exp: u64,
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Caller identity taken from a `Bearer` token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub subject: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

/// Build the validation rules for the configured mode.
///
/// In insecure mode only `exp` is checked (zero leeway); signature, issuer
/// and audience are skipped.
pub fn token_validation(settings: &AuthSettings) -> Validation {
    let mut validation = Validation::default();
    validation.leeway = 0;
    validation.validate_exp = true;

    if settings.insecure_skip_signature {
        validation.insecure_disable_signature_validation();
        validation.validate_aud = false;
        return validation;
    }

    match &settings.audience {
        Some(aud) => validation.set_audience(&[aud]),
        None => validation.validate_aud = false,
    }
    if let Some(iss) = &settings.issuer {
        validation.set_issuer(&[iss]);
    }
    validation
}

pub fn decode_token(token: &str, settings: &AuthSettings) -> Result<Claims, AppError> {
    let validation = token_validation(settings);
    let key = if settings.insecure_skip_signature {
        DecodingKey::from_secret(&[])
    } else {
        let secret = settings
            .jwt_secret
            .as_deref()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("JWT_SECRET is not set")))?;
        DecodingKey::from_secret(secret.as_bytes())
    };

    let decoded = decode::<Claims>(token, &key, &validation).map_err(|err| {
        tracing::debug!(error = %err, "bearer token rejected");
        AppError::Unauthorized("Invalid or expired token".into())
    })?;
    Ok(decoded.claims)
}

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;
    let auth_str = auth_header
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid Authorization header".into()))?;
    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid Authorization scheme".into()))?;
    Ok(token.trim())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = decode_token(token, &state.auth)?;
        Ok(AuthUser {
            subject: claims.sub,
            email: claims.email,
            role: claims.role,
        })
    }
}
