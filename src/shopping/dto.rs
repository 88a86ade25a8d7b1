use serde::{Deserialize, Serialize};

use super::{categorize::Category, stock::InStock};

#[derive(Debug, Default, Deserialize)]
pub struct ShoppingQuery {
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StockRequest {
    pub item: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ShoppingListView {
    NoPlan {
        message: &'static str,
    },
    List {
        categories: Vec<CategoryView>,
        in_stock: InStock,
        /// Listed items not marked as in stock.
        to_buy: usize,
    },
}

#[derive(Debug, Serialize)]
pub struct CategoryView {
    pub category: Category,
    pub items: Vec<ItemView>,
}

#[derive(Debug, Serialize)]
pub struct ItemView {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    pub in_stock: bool,
}
