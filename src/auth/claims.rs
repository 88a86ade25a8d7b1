use serde::{Deserialize, Serialize};
use std::time::Duration;
use time::OffsetDateTime;
use uuid::Uuid;

/// What a signed token may be used for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Bearer token or session cookie.
    Access,
    Refresh,
    /// Short-lived code exchanged at `/auth/callback`.
    Code,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: usize,
    pub exp: usize,
    pub iss: String,
    pub aud: String,
    pub kind: TokenKind,
}

impl Claims {
    pub fn issue(
        user_id: Uuid,
        kind: TokenKind,
        issuer: &str,
        audience: &str,
        ttl: Duration,
        now: OffsetDateTime,
    ) -> Self {
        let iat = now.unix_timestamp();
        let ttl = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        Self {
            sub: user_id,
            iat: iat as usize,
            exp: iat.saturating_add(ttl) as usize,
            iss: issuer.to_string(),
            aud: audience.to_string(),
            kind,
        }
    }
}
