//! Bearer-token authentication middleware
//!
//! Extracts and validates the JWT from the Authorization header and
//! injects a [`Principal`] into request extensions. Rejections happen
//! here, before any handler or query runs.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::error::AppError;

use super::jwt::validate_token;
use crate::state::AppState;

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::not_authenticated().into_response())?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::invalid_token("Invalid Authorization format").into_response())?;

    let principal = validate_token(token, &state.jwt_secret).ok_or_else(|| {
        tracing::debug!("JWT validation failed");
        AppError::invalid_token("Invalid or expired token").into_response()
    })?;

    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}
