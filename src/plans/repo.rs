use anyhow::Context;
use axum::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::WeeklyMealPlanRow;

/// Read access to the generated weekly plans; the generator owns the writes.
#[async_trait]
pub trait MealPlanStore: Send + Sync {
    async fn find_by_user(&self, user_id: Uuid) -> anyhow::Result<Option<WeeklyMealPlanRow>>;
}

#[derive(Clone)]
pub struct PgMealPlanStore {
    db: PgPool,
}

impl PgMealPlanStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MealPlanStore for PgMealPlanStore {
    async fn find_by_user(&self, user_id: Uuid) -> anyhow::Result<Option<WeeklyMealPlanRow>> {
        let row = sqlx::query_as::<_, WeeklyMealPlanRow>(
            r#"
            SELECT user_id, start_date, created_at, updated_at,
                   monday_meals, tuesday_meals, wednesday_meals, thursday_meals,
                   friday_meals, saturday_meals, sunday_meals, ingredients
              FROM user_weekly_meal_plan
             WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("select weekly meal plan")?;
        Ok(row)
    }
}
