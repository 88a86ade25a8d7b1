use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: u64,
    pub refresh_ttl_minutes: u64,
    pub code_ttl_minutes: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    /// Base URL of the external meal-plan generator, e.g. `http://localhost:8000`.
    pub meal_plan_api_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "projectfit".into()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "projectfit-users".into()),
            ttl_minutes: minutes_var("JWT_TTL_MINUTES", 60),
            refresh_ttl_minutes: minutes_var("JWT_REFRESH_TTL_MINUTES", 60 * 24 * 14),
            code_ttl_minutes: minutes_var("AUTH_CODE_TTL_MINUTES", 5),
        };
        let meal_plan_api_url = std::env::var("MEAL_PLAN_API_URL")
            .ok()
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty());
        Ok(Self {
            database_url,
            jwt,
            meal_plan_api_url,
        })
    }
}

fn minutes_var(key: &str, default: u64) -> u64 {
    parse_minutes(std::env::var(key).ok().as_deref(), default)
}

/// Positive whole minutes; anything else falls back to `default`.
fn parse_minutes(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|m| *m > 0)
        .unwrap_or(default)
}
