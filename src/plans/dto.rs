use serde::Serialize;

use super::repo_types::MealItem;

#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DashboardView {
    NoPlan {
        message: &'static str,
    },
    Plan {
        start_date: Option<String>,
        #[serde(with = "time::serde::rfc3339::option")]
        updated_at: Option<time::OffsetDateTime>,
        days: Vec<DayRow>,
    },
}

/// One table row of the dashboard.
#[derive(Debug, Serialize)]
pub struct DayRow {
    pub day: String,
    pub breakfast: MealItem,
    pub lunch: MealItem,
    pub snacks: String,
    pub dinner: MealItem,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealRecipe {
    pub day_of_week: &'static str,
    pub meal_type: &'static str,
    pub name: String,
    pub recipe: String,
}
