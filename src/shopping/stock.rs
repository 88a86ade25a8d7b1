use anyhow::Context;
use axum::async_trait;
use serde::Serialize;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

/// Key the in-stock list is saved under.
pub const STOCK_KEY: &str = "itemsInStock";

/// Items the user already has at home.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct InStock {
    items: Vec<String>,
}

impl InStock {
    pub fn new(items: Vec<String>) -> Self {
        Self { items }
    }

    /// Trims `item`; blank and already-present items are ignored.
    pub fn add(&mut self, item: &str) -> bool {
        let item = item.trim();
        if item.is_empty() || self.contains(item) {
            return false;
        }
        self.items.push(item.to_string());
        true
    }

    pub fn remove(&mut self, item: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i != item);
        self.items.len() != before
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items.iter().any(|i| i == item)
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }
}

/// One edit to the in-stock list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockChange {
    Add(String),
    Remove(String),
}

impl StockChange {
    /// `true` if the list changed and needs writing back.
    pub fn apply(&self, stock: &mut InStock) -> bool {
        match self {
            StockChange::Add(item) => stock.add(item),
            StockChange::Remove(item) => stock.remove(item),
        }
    }
}

/// Per-user saved state. `update` reads, edits and writes as one atomic step.
#[async_trait]
pub trait StockStore: Send + Sync {
    async fn load(&self, user_id: Uuid) -> anyhow::Result<InStock>;
    async fn update(&self, user_id: Uuid, change: &StockChange) -> anyhow::Result<InStock>;
}

#[derive(Clone)]
pub struct PgStockStore {
    db: PgPool,
}

impl PgStockStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StockStore for PgStockStore {
    async fn load(&self, user_id: Uuid) -> anyhow::Result<InStock> {
        let value: Option<Json<Vec<String>>> = sqlx::query_scalar(
            r#"SELECT value FROM user_local_state WHERE user_id = $1 AND key = $2"#,
        )
        .bind(user_id)
        .bind(STOCK_KEY)
        .fetch_optional(&self.db)
        .await
        .context("select items in stock")?;
        Ok(value.map(|v| InStock::new(v.0)).unwrap_or_default())
    }

    async fn update(&self, user_id: Uuid, change: &StockChange) -> anyhow::Result<InStock> {
        let mut tx = self.db.begin().await.context("begin stock update")?;

        // make sure there is a row to lock
        sqlx::query(
            r#"
            INSERT INTO user_local_state (user_id, key, value)
            VALUES ($1, $2, '[]'::jsonb)
            ON CONFLICT (user_id, key) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(STOCK_KEY)
        .execute(&mut *tx)
        .await
        .context("create items in stock")?;

        let Json(items): Json<Vec<String>> = sqlx::query_scalar(
            r#"SELECT value FROM user_local_state WHERE user_id = $1 AND key = $2 FOR UPDATE"#,
        )
        .bind(user_id)
        .bind(STOCK_KEY)
        .fetch_one(&mut *tx)
        .await
        .context("lock items in stock")?;

        let mut stock = InStock::new(items);
        if change.apply(&mut stock) {
            sqlx::query(
                r#"
                UPDATE user_local_state SET value = $3, updated_at = now()
                WHERE user_id = $1 AND key = $2
                "#,
            )
            .bind(user_id)
            .bind(STOCK_KEY)
            .bind(Json(stock.items()))
            .execute(&mut *tx)
            .await
            .context("save items in stock")?;
        }

        tx.commit().await.context("commit stock update")?;
        Ok(stock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_trims_and_skips_blanks_and_duplicates() {
        let mut stock = InStock::default();
        assert!(stock.add("  Olive oil "));
        assert!(!stock.add("Olive oil"));
        assert!(!stock.add("   "));
        assert!(stock.add("Salt"));
        assert_eq!(stock.items(), ["Olive oil", "Salt"]);
        assert!(stock.contains("Olive oil"));
    }

    #[test]
    fn remove_drops_the_item() {
        let mut stock = InStock::new(vec!["Salt".into(), "Honey".into()]);
        assert!(stock.remove("Salt"));
        assert!(!stock.remove("Salt"));
        assert!(!stock.contains("Salt"));
        assert_eq!(stock.items(), ["Honey"]);
    }

    #[test]
    fn change_reports_whether_the_list_moved() {
        let mut stock = InStock::default();
        assert!(StockChange::Add(" Salt ".into()).apply(&mut stock));
        assert!(!StockChange::Add("Salt".into()).apply(&mut stock));
        assert!(!StockChange::Remove("Honey".into()).apply(&mut stock));
        assert!(StockChange::Remove("Salt".into()).apply(&mut stock));
        assert!(stock.items().is_empty());
    }

    #[test]
    fn serializes_as_plain_list() {
        let stock = InStock::new(vec!["Salt".into()]);
        assert_eq!(serde_json::to_string(&stock).unwrap(), r#"["Salt"]"#);
    }
}
