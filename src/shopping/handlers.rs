use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use std::collections::HashMap;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use super::{
    categorize::ShoppingList,
    demo::{sample_week, week_ingredients},
    dto::{ShoppingListView, ShoppingQuery, StockRequest},
    services::{list_view, plan_list},
    stock::{InStock, StockChange},
};
use crate::{
    auth::AuthUser, error::AppError, plans::services::NO_PLAN_MESSAGE, state::AppState,
};

pub fn shopping_routes() -> Router<AppState> {
    Router::new()
        .route("/shopping-list", get(get_list))
        .route("/shopping-list/demo", get(get_demo_list))
        .route(
            "/shopping-list/stock",
            get(get_stock).post(add_stock).delete(remove_stock),
        )
}

async fn load_stock(state: &AppState, user_id: Uuid) -> Result<InStock, AppError> {
    state.stock.load(user_id).await.map_err(|e| {
        error!(error = %e, user_id = %user_id, "stock load failed");
        AppError::from(e)
    })
}

async fn change_stock(
    state: &AppState,
    user_id: Uuid,
    change: &StockChange,
) -> Result<InStock, AppError> {
    state.stock.update(user_id, change).await.map_err(|e| {
        error!(error = %e, user_id = %user_id, ?change, "stock update failed");
        AppError::from(e)
    })
}

/// Shopping list for the user's stored plan.
#[instrument(skip(state))]
pub async fn get_list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<ShoppingQuery>,
) -> Result<Json<ShoppingListView>, AppError> {
    let plan = state.plans.find_by_user(user_id).await.map_err(|e| {
        error!(error = %e, user_id = %user_id, "weekly plan fetch failed");
        AppError::from(e)
    })?;

    let Some(plan) = plan.filter(|p| !p.days().is_empty()) else {
        return Ok(Json(ShoppingListView::NoPlan {
            message: NO_PLAN_MESSAGE,
        }));
    };

    let (list, amounts) = plan_list(&plan);
    if list.is_empty() {
        warn!(user_id = %user_id, "plan has no ingredient list yet");
    } else {
        debug!(user_id = %user_id, items = list.len(), "shopping list built");
    }
    let stock = load_stock(&state, user_id).await?;
    Ok(Json(list_view(&list, &amounts, stock, query.search.as_deref())))
}

/// Shopping list over the built-in sample week.
#[instrument(skip(state))]
pub async fn get_demo_list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<ShoppingQuery>,
) -> Result<Json<ShoppingListView>, AppError> {
    let week = sample_week();
    let list = ShoppingList::build(week_ingredients(&week));
    let stock = load_stock(&state, user_id).await?;
    Ok(Json(list_view(
        &list,
        &HashMap::new(),
        stock,
        query.search.as_deref(),
    )))
}

#[instrument(skip(state))]
pub async fn get_stock(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<InStock>, AppError> {
    Ok(Json(load_stock(&state, user_id).await?))
}

#[instrument(skip(state, payload))]
pub async fn add_stock(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<StockRequest>,
) -> Result<Json<InStock>, AppError> {
    let stock = change_stock(&state, user_id, &StockChange::Add(payload.item.clone())).await?;
    info!(user_id = %user_id, item = %payload.item.trim(), "marked in stock");
    Ok(Json(stock))
}

#[instrument(skip(state, payload))]
pub async fn remove_stock(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<StockRequest>,
) -> Result<Json<InStock>, AppError> {
    let stock = change_stock(&state, user_id, &StockChange::Remove(payload.item.clone())).await?;
    info!(user_id = %user_id, item = %payload.item, "removed from stock");
    Ok(Json(stock))
}

#[cfg(test)]
mod tests {
    use crate::testing::{read_json, sample_plan, TestHarness};
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use std::time::Duration;
    use tower::ServiceExt;

    async fn send(
        harness: &TestHarness,
        req: axum::http::request::Builder,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let req = harness
            .authed(req)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();
        let res = harness.app().oneshot(req).await.unwrap();
        let status = res.status();
        (status, read_json(res).await)
    }

    fn category<'a>(view: &'a Value, name: &str) -> &'a Value {
        view["categories"]
            .as_array()
            .and_then(|cs| cs.iter().find(|c| c["category"] == name))
            .map(|c| &c["items"])
            .unwrap()
    }

    #[tokio::test]
    async fn no_plan_state_without_plan() {
        let harness = TestHarness::new();
        let (status, body) = send(&harness, Request::get("/shopping-list"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["state"], "no_plan");
    }

    #[tokio::test]
    async fn plan_ingredients_are_grouped() {
        let harness = TestHarness::new();
        harness.plans.insert(sample_plan(harness.user_id));

        let (_, body) = send(&harness, Request::get("/shopping-list"), None).await;
        assert_eq!(body["state"], "list");
        let proteins = category(&body, "Proteins");
        assert_eq!(proteins.as_array().map(Vec::len), Some(1));
        assert_eq!(proteins[0]["name"], "salmon fillet");
        assert_eq!(proteins[0]["amount"], "200g");
        assert_eq!(proteins[0]["in_stock"], false);
    }

    #[tokio::test]
    async fn search_filters_case_insensitively() {
        let harness = TestHarness::new();
        harness.plans.insert(sample_plan(harness.user_id));
        let (_, body) = send(&harness, Request::get("/shopping-list?search=QUIN"), None).await;
        assert_eq!(category(&body, "Grains")[0]["name"], "quinoa");
        assert_eq!(category(&body, "Proteins"), &json!([]));
    }

    #[tokio::test]
    async fn demo_list_uses_sample_week() {
        let harness = TestHarness::new();
        let (status, body) = send(&harness, Request::get("/shopping-list/demo"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            category(&body, "Dairy"),
            &json!([
                {"name": "Feta cheese", "in_stock": false},
                {"name": "Greek yogurt", "in_stock": false}
            ])
        );
        assert_eq!(
            category(&body, "Vegetables"),
            &json!([
                {"name": "Cherry tomatoes", "in_stock": false},
                {"name": "Bell peppers", "in_stock": false}
            ])
        );
        // capitalised names miss the lowercase keywords
        assert_eq!(category(&body, "Snacks"), &json!([]));
    }

    #[tokio::test]
    async fn stock_round_trip_is_persisted() {
        let harness = TestHarness::new();

        let (status, body) = send(
            &harness,
            Request::post("/shopping-list/stock"),
            Some(json!({"item": "  Olive oil "})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!(["Olive oil"]));

        // duplicates and blanks are ignored
        send(&harness, Request::post("/shopping-list/stock"), Some(json!({"item": "Olive oil"}))).await;
        send(&harness, Request::post("/shopping-list/stock"), Some(json!({"item": " "}))).await;
        assert_eq!(harness.stock.saved(harness.user_id), vec!["Olive oil".to_string()]);
        assert_eq!(harness.stock.saves(), 1);

        let (_, body) = send(&harness, Request::get("/shopping-list/demo?search=olive"), None).await;
        assert_eq!(category(&body, "Pantry")[0]["in_stock"], true);
        assert_eq!(body["to_buy"], 0);

        let (_, body) = send(
            &harness,
            Request::delete("/shopping-list/stock"),
            Some(json!({"item": "Olive oil"})),
        )
        .await;
        assert_eq!(body, json!([]));
        assert!(harness.stock.saved(harness.user_id).is_empty());
    }

    #[tokio::test]
    async fn overlapping_stock_adds_keep_both_items() {
        let harness = TestHarness::new();
        harness.stock.slow_reads(Duration::from_millis(50));

        let (salt, honey) = tokio::join!(
            send(&harness, Request::post("/shopping-list/stock"), Some(json!({"item": "Salt"}))),
            send(&harness, Request::post("/shopping-list/stock"), Some(json!({"item": "Honey"}))),
        );
        assert_eq!(salt.0, StatusCode::OK);
        assert_eq!(honey.0, StatusCode::OK);

        let mut saved = harness.stock.saved(harness.user_id);
        saved.sort();
        assert_eq!(saved, ["Honey", "Salt"]);
        assert_eq!(harness.stock.saves(), 2);
    }

    #[tokio::test]
    async fn stock_store_failure_is_reported() {
        let harness = TestHarness::new();
        harness.stock.fail_with("disk full");
        let (status, body) = send(&harness, Request::get("/shopping-list/stock"), None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "select items in stock: disk full");
    }
}
