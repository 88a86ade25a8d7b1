use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, HeaderMap},
};
use tracing::warn;
use uuid::Uuid;

use super::services::{JwtKeys, TokenKind};
use crate::error::AppError;

/// Cookie set by the auth callback once a code has been exchanged.
pub const SESSION_COOKIE: &str = "session";

/// The signed-in user, from a Bearer token or the session cookie.
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);

        let token = bearer_token(&parts.headers)
            .or_else(|| session_cookie(&parts.headers))
            .ok_or_else(|| {
                warn!("no session on request");
                AppError::NotLoggedIn
            })?;

        let claims = keys.verify(&token).map_err(|e| {
            warn!(error = %e, "invalid or expired token");
            AppError::NotLoggedIn
        })?;

        if claims.kind != TokenKind::Access {
            warn!(kind = ?claims.kind, "non-access token presented");
            return Err(AppError::NotLoggedIn);
        }

        Ok(AuthUser(claims.sub))
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    auth.strip_prefix("Bearer ")
        .or_else(|| auth.strip_prefix("bearer "))
        .map(|t| t.trim().to_string())
}

fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|v| !v.is_empty())
}
