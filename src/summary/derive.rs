//! Turns stored questionnaire answers into the reviewable plan summary.

use serde::Serialize;

use crate::profile::{
    model::{ActivityLevel, Gender, HeightUnit, MealPrepTime, WeightUnit},
    repo_types::ProfileRow,
};

const KG_PER_LB: f64 = 0.453_592;
const CM_PER_INCH: f64 = 2.54;
const CALORIE_FLOOR: f64 = 1200.0;
const DEFICIT: f64 = 500.0;
const SURPLUS: f64 = 250.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    Loss,
    Gain,
    Recomposition,
    Maintain,
}

impl GoalKind {
    pub fn describe(self) -> &'static str {
        match self {
            GoalKind::Loss => "Fat loss",
            GoalKind::Gain => "Muscle gain",
            GoalKind::Recomposition => "Fat loss with muscle gain (recomposition)",
            GoalKind::Maintain => "Maintain current weight",
        }
    }

    /// Planned change in kg per week.
    fn weekly_rate(self) -> f64 {
        match self {
            GoalKind::Loss => 0.5,
            GoalKind::Recomposition => 0.2,
            GoalKind::Gain => 0.25,
            GoalKind::Maintain => 0.0,
        }
    }

    fn calorie_adjustment(self) -> f64 {
        match self {
            GoalKind::Loss | GoalKind::Recomposition => -DEFICIT,
            GoalKind::Gain => SURPLUS,
            GoalKind::Maintain => 0.0,
        }
    }
}

/// Editable review of the plan the generator will be asked for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanSummary {
    pub goal_kind: GoalKind,
    pub goal: String,
    pub target_loss: String,
    pub daily_calorie_target: String,
    pub protein: String,
    pub carbohydrates: String,
    pub fats: String,
    pub constraints: Vec<String>,
    pub calories: i64,
    pub maintenance_calories: i64,
    pub protein_grams: i64,
}

/// Body measurements normalised to kg and cm.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Body {
    weight_kg: f64,
    goal_kg: f64,
    height_cm: f64,
    age: f64,
}

fn to_kg(value: f64, unit: &str) -> f64 {
    match unit.parse::<WeightUnit>() {
        Ok(WeightUnit::Lbs) => value * KG_PER_LB,
        _ => value,
    }
}

fn to_cm(value: f64, unit: &str) -> f64 {
    match unit.parse::<HeightUnit>() {
        Ok(HeightUnit::Inches) => value * CM_PER_INCH,
        _ => value,
    }
}

fn has(list: &[String], option: &str) -> bool {
    list.iter().any(|v| v == option)
}

pub fn goal_kind(fitness_goals: &[String], weight_change_kg: f64) -> GoalKind {
    let wants_loss = has(fitness_goals, "Weight Loss");
    let wants_muscle = has(fitness_goals, "Muscle Gain");

    if weight_change_kg < -0.5 {
        if wants_muscle {
            GoalKind::Recomposition
        } else {
            GoalKind::Loss
        }
    } else if weight_change_kg > 0.5 {
        GoalKind::Gain
    } else {
        match (wants_loss, wants_muscle) {
            (true, true) => GoalKind::Recomposition,
            (true, false) => GoalKind::Loss,
            (false, true) => GoalKind::Gain,
            (false, false) => GoalKind::Maintain,
        }
    }
}

/// Mifflin-St Jeor resting energy expenditure in kcal/day.
pub fn resting_energy(weight_kg: f64, height_cm: f64, age: f64, gender: Gender) -> f64 {
    let offset = match gender {
        Gender::Male => 5.0,
        Gender::Female => -161.0,
        Gender::Other => -78.0,
    };
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * age + offset
}

pub fn protein_per_kg(goal: GoalKind, activity: ActivityLevel) -> f64 {
    let base = match goal {
        GoalKind::Gain | GoalKind::Recomposition => 2.0,
        GoalKind::Loss => 1.8,
        GoalKind::Maintain => 1.4,
    };
    let bonus = match activity {
        ActivityLevel::Very | ActivityLevel::Extra => 0.2,
        _ => 0.0,
    };
    f64::min(base + bonus, 2.2)
}

/// `2350` -> `"2,350"`.
fn thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if n < 0 {
        out.insert(0, '-');
    }
    out
}

fn trim_number(v: f64) -> String {
    let s = format!("{v:.1}");
    s.strip_suffix(".0").map(str::to_string).unwrap_or(s)
}

fn target_change(goal: GoalKind, body: Body) -> String {
    let change = (body.goal_kg - body.weight_kg).abs();
    let rate = goal.weekly_rate();
    if rate == 0.0 || change < 0.5 {
        return match goal {
            GoalKind::Maintain => "No weight change targeted".to_string(),
            _ => format!("Steady progress at ~{rate} kg/week"),
        };
    }
    let weeks = (change / rate).ceil() as i64;
    let direction = if goal == GoalKind::Gain { "gain" } else { "loss" };
    format!(
        "~{}kg {direction} in {weeks} weeks = {rate} kg/week",
        trim_number(change)
    )
}

fn carbohydrates(activity: ActivityLevel, dietary: &[String]) -> String {
    if has(dietary, "Keto") {
        return "Very low, ketogenic".to_string();
    }
    match activity {
        ActivityLevel::Sedentary | ActivityLevel::Light => {
            "Lower, mostly from vegetables and whole grains"
        }
        ActivityLevel::Moderate => "Moderate, mostly complex and timed post-workout",
        ActivityLevel::Very | ActivityLevel::Extra => "Higher, complex carbs around training",
    }
    .to_string()
}

fn fats(dietary: &[String]) -> String {
    if has(dietary, "Keto") {
        "High, from olive oil, nuts, avocado, oily fish"
    } else if has(dietary, "Vegan") || has(dietary, "Vegetarian") {
        "Healthy fats from olive oil, nuts, seeds, avocado"
    } else {
        "Healthy fats from olive oil, nuts, oily fish"
    }
    .to_string()
}

fn picked<'a>(list: &'a [String], other: &'a str) -> impl Iterator<Item = &'a str> {
    list.iter()
        .map(String::as_str)
        .filter(|v| *v != "None" && *v != "Other")
        .chain(Some(other.trim()).filter(|o| !o.is_empty()))
}

/// Constraints implied by the answers when the user has not edited them.
pub fn default_constraints(profile: &ProfileRow) -> Vec<String> {
    let mut out = Vec::new();

    if let Ok(prep) = profile.meal_prep_time.parse::<MealPrepTime>() {
        out.push(format!("Quick prep (up to {} mins)", prep.minutes()));
    }
    out.extend(
        picked(&profile.dietary_preferences, &profile.other_dietary).map(|p| format!("{p} meals")),
    );
    out.extend(picked(&profile.allergies, &profile.other_allergies).map(|a| format!("No {a}")));
    out.extend(
        picked(&profile.medical_conditions, &profile.other_medical)
            .map(|c| format!("Suitable for {c}")),
    );
    out
}

/// Stored constraints are newline separated; blank lines are ignored.
pub fn parse_constraints(stored: &str) -> Vec<String> {
    stored
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

impl PlanSummary {
    pub fn derive(profile: &ProfileRow) -> Self {
        let body = Body {
            weight_kg: to_kg(profile.current_weight, &profile.current_weight_unit),
            goal_kg: to_kg(profile.goal_weight, &profile.goal_weight_unit),
            height_cm: to_cm(profile.height, &profile.height_unit),
            age: f64::from(profile.age),
        };
        let gender = profile.gender.parse().unwrap_or(Gender::Other);
        let activity = profile
            .activity_level
            .parse()
            .unwrap_or(ActivityLevel::Moderate);

        let goal = goal_kind(&profile.fitness_goals, body.goal_kg - body.weight_kg);

        let maintenance = resting_energy(body.weight_kg, body.height_cm, body.age, gender)
            * activity.factor();
        let target = f64::max(maintenance + goal.calorie_adjustment(), CALORIE_FLOOR);
        let (calories, maintenance_calories) = (target.round() as i64, maintenance.round() as i64);

        let per_kg = protein_per_kg(goal, activity);
        let protein_grams = (per_kg * body.weight_kg).round() as i64;

        let constraints = match profile.additional_constraints.as_deref() {
            Some(stored) => parse_constraints(stored),
            None => default_constraints(profile),
        };

        Self {
            goal_kind: goal,
            goal: goal.describe().to_string(),
            target_loss: target_change(goal, body),
            daily_calorie_target: format!(
                "~{} kcal/day, based on your {} kcal average burn",
                thousands(calories),
                thousands(maintenance_calories)
            ),
            protein: format!("~{per_kg:.1}g per kg = ~{protein_grams}g/day"),
            carbohydrates: carbohydrates(activity, &profile.dietary_preferences),
            fats: fats(&profile.dietary_preferences),
            constraints,
            calories,
            maintenance_calories,
            protein_grams,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::model::{FormAction, QuestionnaireForm};
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn profile(actions: Vec<FormAction>) -> ProfileRow {
        let mut form = QuestionnaireForm::default();
        for a in actions {
            form.apply(a);
        }
        ProfileRow::from_form(Uuid::new_v4(), &form, OffsetDateTime::now_utc())
    }

    #[test]
    fn resting_energy_uses_gender_offset() {
        assert_eq!(resting_energy(80.0, 180.0, 30.0, Gender::Male), 1780.0);
        assert_eq!(resting_energy(80.0, 180.0, 30.0, Gender::Female), 1614.0);
        assert_eq!(resting_energy(80.0, 180.0, 30.0, Gender::Other), 1697.0);
    }

    #[test]
    fn losing_weight_applies_deficit() {
        let row = profile(vec![
            FormAction::CurrentWeight(80.0),
            FormAction::GoalWeight(76.0),
            FormAction::Height(180.0),
            FormAction::Age(30),
            FormAction::ActivityLevel(ActivityLevel::Moderate),
        ]);
        let s = PlanSummary::derive(&row);
        assert_eq!(s.goal_kind, GoalKind::Loss);
        // 1780 * 1.55 = 2759
        assert_eq!(s.maintenance_calories, 2759);
        assert_eq!(s.calories, 2259);
        assert_eq!(
            s.daily_calorie_target,
            "~2,259 kcal/day, based on your 2,759 kcal average burn"
        );
        assert_eq!(s.target_loss, "~4kg loss in 8 weeks = 0.5 kg/week");
        assert_eq!(s.protein_grams, 144);
        assert_eq!(s.protein, "~1.8g per kg = ~144g/day");
    }

    #[test]
    fn imperial_units_are_normalised() {
        let metric = profile(vec![
            FormAction::CurrentWeight(80.0),
            FormAction::GoalWeight(80.0),
            FormAction::Height(180.0),
            FormAction::Age(30),
        ]);
        let imperial = profile(vec![
            FormAction::CurrentWeight(80.0 / KG_PER_LB),
            FormAction::CurrentWeightUnit(WeightUnit::Lbs),
            FormAction::GoalWeight(80.0),
            FormAction::Height(180.0 / CM_PER_INCH),
            FormAction::HeightUnit(HeightUnit::Inches),
            FormAction::Age(30),
        ]);
        assert_eq!(
            PlanSummary::derive(&metric).calories,
            PlanSummary::derive(&imperial).calories
        );
    }

    #[test]
    fn calories_never_drop_below_floor() {
        let row = profile(vec![
            FormAction::CurrentWeight(45.0),
            FormAction::GoalWeight(40.0),
            FormAction::Height(150.0),
            FormAction::Age(70),
            FormAction::Gender(Gender::Female),
            FormAction::ActivityLevel(ActivityLevel::Sedentary),
        ]);
        assert_eq!(PlanSummary::derive(&row).calories, 1200);
    }

    #[test]
    fn goal_follows_weight_change_then_fitness_goals() {
        let goals = |g: &[&str]| g.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(goal_kind(&goals(&["Muscle Gain"]), -3.0), GoalKind::Recomposition);
        assert_eq!(goal_kind(&goals(&[]), 4.0), GoalKind::Gain);
        assert_eq!(goal_kind(&goals(&["Weight Loss"]), 0.0), GoalKind::Loss);
        assert_eq!(goal_kind(&goals(&["Endurance"]), 0.2), GoalKind::Maintain);
    }

    #[test]
    fn default_constraints_come_from_answers() {
        let row = profile(vec![
            FormAction::MealPrepTime(MealPrepTime::Min15),
            FormAction::DietaryPreferences(vec!["Vegan".into(), "Other".into()]),
            FormAction::OtherDietary("Low FODMAP".into()),
            FormAction::Allergies(vec!["Peanuts".into(), "None".into()]),
            FormAction::MedicalConditions(vec!["Diabetes".into()]),
        ]);
        assert_eq!(
            PlanSummary::derive(&row).constraints,
            vec![
                "Quick prep (up to 15 mins)",
                "Vegan meals",
                "Low FODMAP meals",
                "No Peanuts",
                "Suitable for Diabetes",
            ]
        );
    }

    #[test]
    fn stored_constraints_replace_defaults() {
        let mut row = profile(vec![]);
        row.additional_constraints = Some("One cheat day per week\n\n  Two fasted mornings \n".into());
        assert_eq!(
            PlanSummary::derive(&row).constraints,
            vec!["One cheat day per week", "Two fasted mornings"]
        );

        row.additional_constraints = Some(String::new());
        assert!(PlanSummary::derive(&row).constraints.is_empty());
    }

    #[test]
    fn thousands_separator() {
        assert_eq!(thousands(950), "950");
        assert_eq!(thousands(2350), "2,350");
        assert_eq!(thousands(1234567), "1,234,567");
    }
}
