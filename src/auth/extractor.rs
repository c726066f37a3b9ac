use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::UserType;
use crate::state::AppState;

/// Authenticated caller, resolved from the bearer token.
///
/// The token is read from `x-auth-token` first, then from
/// `Authorization: Bearer <token>`. Beyond signature and expiry checks, the
/// referenced farmer or driver record must still exist.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub user_type: UserType,
}

#[axum::async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("x-auth-token")
            .and_then(|value| value.to_str().ok())
            .or_else(|| {
                parts
                    .headers
                    .get(AUTHORIZATION)
                    .and_then(|value| value.to_str().ok())
                    .and_then(|value| value.strip_prefix("Bearer "))
            })
            .ok_or_else(|| AppError::Unauthorized("No token, authorization denied".to_string()))?;

        let claims = state.tokens.verify(token)?;

        let known = match claims.user_type {
            UserType::Farmer => state.farmers.contains_key(&claims.sub),
            UserType::Driver => state.drivers.contains_key(&claims.sub),
        };
        if !known {
            return Err(AppError::Unauthorized("Token is not valid".to_string()));
        }

        Ok(Self {
            id: claims.sub,
            user_type: claims.user_type,
        })
    }
}
