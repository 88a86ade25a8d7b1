use crate::state::AppState;
use axum::Router;

pub mod derive;
mod dto;
pub mod handlers;

pub fn router() -> Router<AppState> {
    handlers::summary_routes()
}
