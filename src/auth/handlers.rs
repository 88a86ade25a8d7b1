use axum::{
    extract::{FromRef, Query, State},
    http::header,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{
            AuthResponse, CallbackQuery, CodeResponse, LoginRequest, PublicUser, RefreshRequest,
            RegisterRequest,
        },
        extractors::{AuthUser, SESSION_COOKIE},
        password::{hash_password, password_problem, verify_password},
        repo_types::User,
        services::{is_valid_email, JwtKeys},
    },
    error::AppError,
    state::AppState,
};

/// Landing route after a successful sign-in.
pub const SIGNED_IN_REDIRECT: &str = "/questionnaire";
/// Landing route when the code exchange fails.
pub const CODE_ERROR_REDIRECT: &str = "/auth/auth-code-error";

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/code", post(issue_code))
        .route("/auth/callback", get(callback))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

fn token_pair(keys: &JwtKeys, user: &User) -> Result<AuthResponse, AppError> {
    let access_token = keys.sign_access(user.id).map_err(|e| {
        error!(error = %e, "jwt sign access failed");
        AppError::Internal(e.to_string())
    })?;
    let refresh_token = keys.sign_refresh(user.id).map_err(|e| {
        error!(error = %e, "jwt sign refresh failed");
        AppError::Internal(e.to_string())
    })?;
    Ok(AuthResponse {
        access_token,
        refresh_token,
        user: user.public(),
        redirect_to: SIGNED_IN_REDIRECT,
    })
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(AppError::BadRequest("Invalid email".into()));
    }

    if let Some(problem) = password_problem(&payload.password) {
        warn!(problem, "password rejected");
        return Err(AppError::BadRequest(problem.into()));
    }

    let hash = hash_password(&payload.password).map_err(|e| {
        error!(error = %e, "hash_password failed");
        AppError::Internal(e.to_string())
    })?;

    let user = User::create(&state.db, &payload.email, &hash)
        .await
        .map_err(|e| {
            error!(error = %e, "create user failed");
            AppError::from(e)
        })?
        .ok_or_else(|| {
            warn!(email = %payload.email, "email already registered");
            AppError::Conflict("Email already registered".into())
        })?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    let keys = JwtKeys::from_ref(&state);
    Ok(Json(token_pair(&keys, &user)?))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(AppError::BadRequest("Invalid email".into()));
    }

    let user = match User::find_by_email(&state.db, &payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(email = %payload.email, "login unknown email");
            return Err(AppError::Unauthorized("Invalid credentials".into()));
        }
        Err(e) => {
            error!(error = %e, "find_by_email failed");
            return Err(e.into());
        }
    };

    let ok = verify_password(&payload.password, &user.password_hash).map_err(|e| {
        error!(error = %e, "verify_password failed");
        AppError::Internal(e.to_string())
    })?;

    if !ok {
        warn!(email = %payload.email, user_id = %user.id, "login invalid password");
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    info!(user_id = %user.id, email = %user.email, "user logged in");
    let keys = JwtKeys::from_ref(&state);
    Ok(Json(token_pair(&keys, &user)?))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys
        .verify_refresh(&payload.refresh_token)
        .map_err(|e| AppError::Unauthorized(e.to_string()))?;

    let user = User::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".into()))?;

    Ok(Json(token_pair(&keys, &user)?))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>, AppError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| {
            error!(user_id = %user_id, "user not found");
            AppError::Unauthorized("User not found".into())
        })?;

    Ok(Json(user.public()))
}

/// Issue a short-lived authorization code for the redirect callback.
#[instrument(skip(state))]
pub async fn issue_code(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<CodeResponse>, AppError> {
    let keys = JwtKeys::from_ref(&state);
    let code = keys.sign_code(user_id).map_err(|e| {
        error!(error = %e, "jwt sign code failed");
        AppError::Internal(e.to_string())
    })?;
    Ok(Json(CodeResponse {
        code,
        expires_in: keys.code_ttl.as_secs(),
    }))
}

/// Exchange `?code=` for a session cookie and redirect into the app.
#[instrument(skip(state, query))]
pub async fn callback(State(state): State<AppState>, Query(query): Query<CallbackQuery>) -> Response {
    let Some(code) = query.code.filter(|c| !c.is_empty()) else {
        warn!("auth callback without code");
        return Redirect::to(CODE_ERROR_REDIRECT).into_response();
    };

    let keys = JwtKeys::from_ref(&state);
    let session = keys
        .verify_code(&code)
        .and_then(|user_id| keys.sign_access(user_id).map(|token| (user_id, token)));

    match session {
        Ok((user_id, token)) => {
            info!(user_id = %user_id, "auth code exchanged");
            let cookie = format!(
                "{SESSION_COOKIE}={token}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
                keys.access_ttl.as_secs()
            );
            ([(header::SET_COOKIE, cookie)], Redirect::to(SIGNED_IN_REDIRECT)).into_response()
        }
        Err(e) => {
            error!(error = %e, "auth callback error");
            Redirect::to(CODE_ERROR_REDIRECT).into_response()
        }
    }
}
