use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use super::model::QuestionnaireForm;

/// A row of the `profiles` table; field names are the column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub wearable_devices: Vec<String>,
    pub other_wearable: String,
    pub current_weight: f64,
    pub current_weight_unit: String,
    pub goal_weight: f64,
    pub goal_weight_unit: String,
    pub height: f64,
    pub height_unit: String,
    pub age: i32,
    pub gender: String,
    pub medical_conditions: Vec<String>,
    pub other_medical: String,
    pub activity_level: String,
    pub dietary_preferences: Vec<String>,
    pub other_dietary: String,
    pub fitness_goals: Vec<String>,
    pub other_goals: String,
    pub time_availability: String,
    pub sleep_quality: String,
    pub meal_prep_time: String,
    pub cooking_skill: String,
    pub allergies: Vec<String>,
    pub other_allergies: String,
    pub additional_constraints: Option<String>,
    pub updated_at: OffsetDateTime,
}

impl ProfileRow {
    /// Map questionnaire answers onto the store's columns.
    pub fn from_form(user_id: Uuid, form: &QuestionnaireForm, updated_at: OffsetDateTime) -> Self {
        Self {
            id: user_id,
            wearable_devices: form.wearable_devices.clone(),
            other_wearable: form.other_wearable.clone(),
            current_weight: form.current_weight,
            current_weight_unit: form.current_weight_unit.to_string(),
            goal_weight: form.goal_weight,
            goal_weight_unit: form.goal_weight_unit.to_string(),
            height: form.height,
            height_unit: form.height_unit.to_string(),
            age: form.age,
            gender: form.gender.to_string(),
            medical_conditions: form.medical_conditions.clone(),
            other_medical: form.other_medical.clone(),
            activity_level: form.activity_level.to_string(),
            dietary_preferences: form.dietary_preferences.clone(),
            other_dietary: form.other_dietary.clone(),
            fitness_goals: form.fitness_goals.clone(),
            other_goals: form.other_goals.clone(),
            time_availability: form.time_availability.to_string(),
            sleep_quality: form.sleep_quality.to_string(),
            meal_prep_time: form.meal_prep_time.to_string(),
            cooking_skill: form.cooking_skill.to_string(),
            allergies: form.allergies.clone(),
            other_allergies: form.other_allergies.clone(),
            additional_constraints: None,
            updated_at,
        }
    }
}
