use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use super::{
    dto::{NextResponse, SubmitResponse, WizardView},
    model::{FormAction, QuestionnaireForm},
    repo_types::ProfileRow,
    wizard::{Advance, Wizard},
};
use crate::{
    auth::AuthUser,
    error::AppError,
    sessions::Action,
    state::AppState,
};

/// Where the client goes once the answers are stored.
pub const SUMMARY_ROUTE: &str = "/questionnaire/summary";

pub fn questionnaire_routes() -> Router<AppState> {
    Router::new()
        .route("/questionnaire", get(get_wizard).put(submit_form))
        .route("/questionnaire/answer", post(answer))
        .route("/questionnaire/next", post(next))
        .route("/questionnaire/previous", post(previous))
}

/// Validate and upsert the answers as the user's profile.
pub async fn submit_profile(
    state: &AppState,
    user_id: Uuid,
    form: &QuestionnaireForm,
) -> Result<(), AppError> {
    form.validate().map_err(|msg| {
        warn!(user_id = %user_id, %msg, "questionnaire rejected");
        AppError::BadRequest(msg)
    })?;

    let _guard = state
        .in_flight
        .try_start(user_id, Action::SubmitQuestionnaire)
        .ok_or_else(|| AppError::Conflict("Questionnaire submission already in progress.".into()))?;

    let row = ProfileRow::from_form(user_id, form, OffsetDateTime::now_utc());
    state.profiles.upsert(&row).await.map_err(|e| {
        error!(error = %e, user_id = %user_id, "profile upsert failed");
        AppError::from(e)
    })?;

    info!(user_id = %user_id, "profile saved");
    Ok(())
}

#[instrument(skip(state))]
pub async fn get_wizard(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Json<WizardView> {
    let wizard = state.wizards.get(user_id).await;
    Json(WizardView::from(&wizard))
}

#[instrument(skip(state, action))]
pub async fn answer(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(action): Json<FormAction>,
) -> Result<Json<WizardView>, AppError> {
    action.validate().map_err(|msg| {
        warn!(user_id = %user_id, %msg, "answer rejected");
        AppError::BadRequest(msg)
    })?;
    let ((), wizard) = state
        .wizards
        .update(user_id, |w| w.form.apply(action))
        .await;
    Ok(Json(WizardView::from(&wizard)))
}

#[instrument(skip(state))]
pub async fn next(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<NextResponse>, AppError> {
    let (advance, wizard) = state.wizards.update(user_id, |w| w.next()).await;

    match advance {
        Advance::Moved => Ok(Json(NextResponse {
            wizard: WizardView::from(&wizard),
            redirect: None,
        })),
        Advance::Submit => {
            submit_profile(&state, user_id, &wizard.form).await?;
            state.wizards.reset(user_id).await;
            Ok(Json(NextResponse {
                wizard: WizardView::from(&Wizard::default()),
                redirect: Some(SUMMARY_ROUTE),
            }))
        }
    }
}

#[instrument(skip(state))]
pub async fn previous(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Json<WizardView> {
    let ((), wizard) = state.wizards.update(user_id, |w| w.previous()).await;
    Json(WizardView::from(&wizard))
}

/// Submit a complete form in one request.
#[instrument(skip(state, form))]
pub async fn submit_form(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(form): Json<QuestionnaireForm>,
) -> Result<Json<SubmitResponse>, AppError> {
    submit_profile(&state, user_id, &form).await?;
    state.wizards.reset(user_id).await;
    Ok(Json(SubmitResponse {
        redirect: SUMMARY_ROUTE,
    }))
}
