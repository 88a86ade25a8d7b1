use axum::{extract::State, routing::get, Json, Router};
use tracing::{error, instrument};

use super::{
    dto::{DashboardView, MealRecipe},
    services::{dashboard_view, recipes},
};
use crate::{
    auth::AuthUser,
    error::AppError,
    shopping::demo::{sample_week, SampleDay},
    state::AppState,
};

pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/recipes", get(list_recipes))
        .route("/dashboard/demo", get(demo_week))
}

#[instrument(skip(state))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<DashboardView>, AppError> {
    let plan = state.plans.find_by_user(user_id).await.map_err(|e| {
        error!(error = %e, user_id = %user_id, "weekly plan fetch failed");
        AppError::from(e)
    })?;
    Ok(Json(dashboard_view(plan.as_ref())))
}

#[instrument(skip(state))]
pub async fn list_recipes(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<MealRecipe>>, AppError> {
    let plan = state.plans.find_by_user(user_id).await.map_err(|e| {
        error!(error = %e, user_id = %user_id, "weekly plan fetch failed");
        AppError::from(e)
    })?;
    Ok(Json(plan.as_ref().map(recipes).unwrap_or_default()))
}

/// The built-in sample week, meals and daily totals included.
pub async fn demo_week(AuthUser(_): AuthUser) -> Json<Vec<SampleDay>> {
    Json(sample_week())
}
