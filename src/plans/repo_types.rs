use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealItem {
    pub name: String,
    pub recipe: String,
}

/// One day of a generated plan, in the generator's JSON shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    #[serde(rename = "Day of Week")]
    pub day_of_week: String,
    #[serde(rename = "Breakfast")]
    pub breakfast: MealItem,
    #[serde(rename = "Lunch")]
    pub lunch: MealItem,
    #[serde(rename = "Snacks")]
    pub snacks: String,
    #[serde(rename = "Dinner")]
    pub dinner: MealItem,
}

/// Ingredient with an amount, as computed server-side for the shopping list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientItem {
    pub ingredient: String,
    pub amount: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

/// A row of `user_weekly_meal_plan`, written by the external generator.
#[derive(Debug, Clone, FromRow)]
pub struct WeeklyMealPlanRow {
    pub user_id: Uuid,
    pub start_date: Option<Date>,
    pub created_at: OffsetDateTime,
    pub updated_at: Option<OffsetDateTime>,
    pub monday_meals: Option<Json<DayPlan>>,
    pub tuesday_meals: Option<Json<DayPlan>>,
    pub wednesday_meals: Option<Json<DayPlan>>,
    pub thursday_meals: Option<Json<DayPlan>>,
    pub friday_meals: Option<Json<DayPlan>>,
    pub saturday_meals: Option<Json<DayPlan>>,
    pub sunday_meals: Option<Json<DayPlan>>,
    pub ingredients: Option<Json<Vec<IngredientItem>>>,
}

impl WeeklyMealPlanRow {
    pub fn day(&self, day: Weekday) -> Option<&DayPlan> {
        let column = match day {
            Weekday::Monday => &self.monday_meals,
            Weekday::Tuesday => &self.tuesday_meals,
            Weekday::Wednesday => &self.wednesday_meals,
            Weekday::Thursday => &self.thursday_meals,
            Weekday::Friday => &self.friday_meals,
            Weekday::Saturday => &self.saturday_meals,
            Weekday::Sunday => &self.sunday_meals,
        };
        column.as_ref().map(|json| &json.0)
    }

    /// Non-null days, Monday first.
    pub fn days(&self) -> Vec<(Weekday, &DayPlan)> {
        Weekday::ALL
            .iter()
            .filter_map(|&d| self.day(d).map(|plan| (d, plan)))
            .collect()
    }

    pub fn ingredients(&self) -> Option<&[IngredientItem]> {
        self.ingredients.as_ref().map(|json| json.0.as_slice())
    }
}
