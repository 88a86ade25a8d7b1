use crate::state::AppState;
use axum::Router;

pub mod categorize;
pub mod demo;
mod dto;
pub mod handlers;
pub mod services;
pub mod stock;

pub fn router() -> Router<AppState> {
    handlers::shopping_routes()
}
