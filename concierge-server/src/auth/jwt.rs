//! JWT issuance and validation
//!
//! Role claims come from the identity provider and are trusted verbatim.
//! Kiosk binding is deliberately NOT a claim: device principals are
//! resolved against the kiosk registry on every poll, so a stale or
//! forged binding claim cannot redirect another kiosk's queue.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::models::Role;

/// JWT claims for all principals (operators and kiosk devices)
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// Role name (see [`Role`])
    pub role: String,
    /// Project scope for managers; absent for fleet-wide roles and kiosks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated principal extracted from a validated token
#[derive(Debug, Clone)]
pub struct Principal {
    pub user_id: String,
    pub role: Role,
    pub project_id: Option<i64>,
}

const JWT_EXPIRY_HOURS: i64 = 24;

/// Create a token for a principal (the oracle-side half of the identity
/// contract; used by provisioning tooling and tests)
pub fn create_token(
    user_id: &str,
    role: Role,
    project_id: Option<i64>,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        role: role.as_str().to_string(),
        project_id,
        exp: (now + chrono::Duration::hours(JWT_EXPIRY_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Validate a token and extract the principal.
///
/// Returns `None` for expired/invalid tokens and for unknown role claims.
pub fn validate_token(token: &str, secret: &str) -> Option<Principal> {
    let validation = Validation::default();
    let token_data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .ok()?;

    let role: Role = token_data.claims.role.parse().ok()?;

    Some(Principal {
        user_id: token_data.claims.sub,
        role,
        project_id: token_data.claims.project_id,
    })
}
