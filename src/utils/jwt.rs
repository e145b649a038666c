use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::{UserId, UserRole};

/// Claims carried by the backend-issued session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl SessionClaims {
    /// Explicit `userId` claim, falling back to a numeric subject.
    pub fn user_id(&self) -> Option<UserId> {
        self.user_id.or_else(|| self.sub.parse().ok())
    }

    pub fn role(&self) -> Option<UserRole> {
        let role = self.role.as_deref()?;
        role.trim_start_matches("ROLE_").parse().ok()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| Utc.timestamp_opt(exp, 0).single())
    }
}

/// Read the claims of a session token for display purposes.
///
/// The signature is NOT verified and expiry is NOT enforced: the client has
/// no key, and only backend responses decide whether a session is valid.
pub fn read_session_claims(token: &str) -> AppResult<SessionClaims> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let token_data = decode::<SessionClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(|e| AppError::Decode(format!("Unreadable session token: {}", e)))?;

    Ok(token_data.claims)
}
