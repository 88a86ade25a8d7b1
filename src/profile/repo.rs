use anyhow::Context;
use axum::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::ProfileRow;

/// Row-store access for questionnaire profiles, keyed by user id.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Insert or replace the answers; `additional_constraints` is left untouched on conflict.
    async fn upsert(&self, row: &ProfileRow) -> anyhow::Result<()>;
    async fn find(&self, user_id: Uuid) -> anyhow::Result<Option<ProfileRow>>;
    /// Returns `false` when the user has no profile yet.
    async fn update_constraints(
        &self,
        user_id: Uuid,
        constraints: Option<&str>,
    ) -> anyhow::Result<bool>;
}

#[derive(Clone)]
pub struct PgProfileStore {
    db: PgPool,
}

impl PgProfileStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn upsert(&self, row: &ProfileRow) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO profiles (
                id, wearable_devices, other_wearable,
                current_weight, current_weight_unit, goal_weight, goal_weight_unit,
                height, height_unit, age, gender,
                medical_conditions, other_medical, activity_level,
                dietary_preferences, other_dietary, fitness_goals, other_goals,
                time_availability, sleep_quality, meal_prep_time, cooking_skill,
                allergies, other_allergies, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                    $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25)
            ON CONFLICT (id) DO UPDATE SET
                wearable_devices = EXCLUDED.wearable_devices,
                other_wearable = EXCLUDED.other_wearable,
                current_weight = EXCLUDED.current_weight,
                current_weight_unit = EXCLUDED.current_weight_unit,
                goal_weight = EXCLUDED.goal_weight,
                goal_weight_unit = EXCLUDED.goal_weight_unit,
                height = EXCLUDED.height,
                height_unit = EXCLUDED.height_unit,
                age = EXCLUDED.age,
                gender = EXCLUDED.gender,
                medical_conditions = EXCLUDED.medical_conditions,
                other_medical = EXCLUDED.other_medical,
                activity_level = EXCLUDED.activity_level,
                dietary_preferences = EXCLUDED.dietary_preferences,
                other_dietary = EXCLUDED.other_dietary,
                fitness_goals = EXCLUDED.fitness_goals,
                other_goals = EXCLUDED.other_goals,
                time_availability = EXCLUDED.time_availability,
                sleep_quality = EXCLUDED.sleep_quality,
                meal_prep_time = EXCLUDED.meal_prep_time,
                cooking_skill = EXCLUDED.cooking_skill,
                allergies = EXCLUDED.allergies,
                other_allergies = EXCLUDED.other_allergies,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(row.id)
        .bind(&row.wearable_devices)
        .bind(&row.other_wearable)
        .bind(row.current_weight)
        .bind(&row.current_weight_unit)
        .bind(row.goal_weight)
        .bind(&row.goal_weight_unit)
        .bind(row.height)
        .bind(&row.height_unit)
        .bind(row.age)
        .bind(&row.gender)
        .bind(&row.medical_conditions)
        .bind(&row.other_medical)
        .bind(&row.activity_level)
        .bind(&row.dietary_preferences)
        .bind(&row.other_dietary)
        .bind(&row.fitness_goals)
        .bind(&row.other_goals)
        .bind(&row.time_availability)
        .bind(&row.sleep_quality)
        .bind(&row.meal_prep_time)
        .bind(&row.cooking_skill)
        .bind(&row.allergies)
        .bind(&row.other_allergies)
        .bind(row.updated_at)
        .execute(&self.db)
        .await
        .context("upsert profile")?;
        Ok(())
    }

    async fn find(&self, user_id: Uuid) -> anyhow::Result<Option<ProfileRow>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT id, wearable_devices, other_wearable,
                   current_weight, current_weight_unit, goal_weight, goal_weight_unit,
                   height, height_unit, age, gender,
                   medical_conditions, other_medical, activity_level,
                   dietary_preferences, other_dietary, fitness_goals, other_goals,
                   time_availability, sleep_quality, meal_prep_time, cooking_skill,
                   allergies, other_allergies, additional_constraints, updated_at
              FROM profiles
             WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("select profile")?;
        Ok(row)
    }

    async fn update_constraints(
        &self,
        user_id: Uuid,
        constraints: Option<&str>,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE profiles
               SET additional_constraints = $2, updated_at = now()
             WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(constraints)
        .execute(&self.db)
        .await
        .context("update profile constraints")?;
        Ok(res.rows_affected() > 0)
    }
}
