use axum::{
    extract::State,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use super::{
    derive::PlanSummary,
    dto::{ConstraintsRequest, GenerateResponse},
};
use crate::{auth::AuthUser, error::AppError, sessions::Action, state::AppState};

/// Where the client goes once the plan exists.
pub const DASHBOARD_ROUTE: &str = "/dashboard";

const NO_PROFILE: &str = "Profile not found. Complete the questionnaire first.";

pub fn summary_routes() -> Router<AppState> {
    Router::new()
        .route("/questionnaire/summary", get(get_summary))
        .route("/questionnaire/summary/constraints", put(update_constraints))
        .route("/questionnaire/summary/generate", post(generate_plan))
}

async fn load_summary(state: &AppState, user_id: Uuid) -> Result<PlanSummary, AppError> {
    let profile = state
        .profiles
        .find(user_id)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %user_id, "profile fetch failed");
            AppError::from(e)
        })?
        .ok_or_else(|| AppError::NotFound(NO_PROFILE.into()))?;
    Ok(PlanSummary::derive(&profile))
}

#[instrument(skip(state))]
pub async fn get_summary(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PlanSummary>, AppError> {
    Ok(Json(load_summary(&state, user_id).await?))
}

#[instrument(skip(state, payload))]
pub async fn update_constraints(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ConstraintsRequest>,
) -> Result<Json<PlanSummary>, AppError> {
    let joined = payload
        .constraints
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    let updated = state
        .profiles
        .update_constraints(user_id, Some(&joined))
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %user_id, "constraints update failed");
            AppError::from(e)
        })?;
    if !updated {
        return Err(AppError::NotFound(NO_PROFILE.into()));
    }

    info!(user_id = %user_id, "constraints updated");
    Ok(Json(load_summary(&state, user_id).await?))
}

#[instrument(skip(state))]
pub async fn generate_plan(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<GenerateResponse>, AppError> {
    let _guard = state
        .in_flight
        .try_start(user_id, Action::GeneratePlan)
        .ok_or_else(|| {
            warn!(user_id = %user_id, "generation already running");
            AppError::Conflict("Meal plan generation already in progress.".into())
        })?;

    state.generator.generate(user_id).await.map_err(|e| {
        error!(error = %e, user_id = %user_id, "meal plan generation failed");
        AppError::Generator(e.to_string())
    })?;

    Ok(Json(GenerateResponse {
        redirect: DASHBOARD_ROUTE,
    }))
}
