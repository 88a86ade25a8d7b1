use super::{
    dto::{DashboardView, DayRow, MealRecipe},
    repo_types::WeeklyMealPlanRow,
};

pub const NO_PLAN_MESSAGE: &str = "It looks like a meal plan hasn't been generated for you yet. \
You might need to complete the questionnaire first.";

/// A missing row and a row with every day null both render as "no plan".
pub fn dashboard_view(plan: Option<&WeeklyMealPlanRow>) -> DashboardView {
    let Some(plan) = plan else {
        return DashboardView::NoPlan {
            message: NO_PLAN_MESSAGE,
        };
    };

    let days: Vec<DayRow> = plan
        .days()
        .into_iter()
        .map(|(_, day)| DayRow {
            day: day.day_of_week.clone(),
            breakfast: day.breakfast.clone(),
            lunch: day.lunch.clone(),
            snacks: day.snacks.clone(),
            dinner: day.dinner.clone(),
        })
        .collect();

    if days.is_empty() {
        return DashboardView::NoPlan {
            message: NO_PLAN_MESSAGE,
        };
    }

    DashboardView::Plan {
        start_date: plan.start_date.map(|d| d.to_string()),
        updated_at: plan.updated_at.or(Some(plan.created_at)),
        days,
    }
}

/// Every named recipe of the plan, Monday first, in meal order.
pub fn recipes(plan: &WeeklyMealPlanRow) -> Vec<MealRecipe> {
    plan.days()
        .into_iter()
        .flat_map(|(weekday, day)| {
            [
                ("Breakfast", &day.breakfast),
                ("Lunch", &day.lunch),
                ("Dinner", &day.dinner),
            ]
            .into_iter()
            .filter(|(_, meal)| !meal.name.is_empty() && !meal.recipe.is_empty())
            .map(move |(meal_type, meal)| MealRecipe {
                day_of_week: weekday.name(),
                meal_type,
                name: meal.name.clone(),
                recipe: meal.recipe.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_plan;
    use uuid::Uuid;

    #[test]
    fn absent_row_is_no_plan() {
        assert!(matches!(dashboard_view(None), DashboardView::NoPlan { .. }));
    }

    #[test]
    fn all_null_days_is_no_plan() {
        let mut plan = sample_plan(Uuid::new_v4());
        plan.monday_meals = None;
        plan.wednesday_meals = None;
        assert!(matches!(dashboard_view(Some(&plan)), DashboardView::NoPlan { .. }));
    }

    #[test]
    fn days_are_ordered_and_nulls_skipped() {
        let plan = sample_plan(Uuid::new_v4());
        let DashboardView::Plan { days, start_date, .. } = dashboard_view(Some(&plan)) else {
            panic!("expected a plan");
        };
        let names: Vec<_> = days.iter().map(|d| d.day.as_str()).collect();
        assert_eq!(names, vec!["Monday", "Wednesday"]);
        assert_eq!(start_date.as_deref(), Some("2025-03-03"));
    }

    #[test]
    fn recipes_are_flattened() {
        let plan = sample_plan(Uuid::new_v4());
        let all = recipes(&plan);
        assert_eq!(all.len(), 6);
        assert_eq!(all[0].day_of_week, "Monday");
        assert_eq!(all[0].meal_type, "Breakfast");
        assert_eq!(all[5].day_of_week, "Wednesday");
        assert_eq!(all[5].meal_type, "Dinner");
    }
}
