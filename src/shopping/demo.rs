//! Static sample week behind the demo dashboard and shopping list.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MealCategory {
    Breakfast,
    Lunch,
    Snack,
    Dinner,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meal {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fats: u32,
    pub prep_time: u32,
    pub notes: &'static [&'static str],
    pub ingredients: &'static [&'static str],
    pub category: MealCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleDay {
    pub id: &'static str,
    pub name: &'static str,
    pub breakfast: &'static Meal,
    pub lunch: &'static Meal,
    pub snack: &'static Meal,
    pub dinner: &'static Meal,
    pub total_calories: u32,
    pub total_protein: u32,
    pub total_carbs: u32,
    pub total_fats: u32,
    pub notes: &'static [&'static str],
}

impl SampleDay {
    pub fn meals(&self) -> [&'static Meal; 4] {
        [self.breakfast, self.lunch, self.snack, self.dinner]
    }
}

pub static SAMPLE_MEALS: [Meal; 8] = [
    Meal {
        id: "b1",
        name: "Mediterranean Omelette",
        description: "Egg whites, spinach, feta, tomatoes",
        calories: 350,
        protein: 25,
        carbs: 10,
        fats: 20,
        prep_time: 15,
        notes: &["High protein", "Quick prep"],
        ingredients: &["Egg whites", "Spinach", "Feta cheese", "Tomatoes", "Olive oil", "Salt", "Pepper"],
        category: MealCategory::Breakfast,
    },
    Meal {
        id: "b2",
        name: "Greek Yogurt Parfait",
        description: "Greek yogurt, berries, granola, honey",
        calories: 320,
        protein: 20,
        carbs: 40,
        fats: 10,
        prep_time: 10,
        notes: &["High protein", "Quick prep"],
        ingredients: &["Greek yogurt", "Mixed berries", "Granola", "Honey", "Almonds"],
        category: MealCategory::Breakfast,
    },
    Meal {
        id: "l1",
        name: "Grilled Chicken Salad",
        description: "Grilled chicken breast, mixed greens, avocado, cherry tomatoes",
        calories: 450,
        protein: 35,
        carbs: 15,
        fats: 25,
        prep_time: 20,
        notes: &["High protein", "Low carb"],
        ingredients: &[
            "Chicken breast",
            "Mixed greens",
            "Avocado",
            "Cherry tomatoes",
            "Olive oil",
            "Balsamic vinegar",
            "Salt",
            "Pepper",
        ],
        category: MealCategory::Lunch,
    },
    Meal {
        id: "l2",
        name: "Quinoa Bowl",
        description: "Quinoa, roasted vegetables, chickpeas, tahini dressing",
        calories: 420,
        protein: 15,
        carbs: 60,
        fats: 15,
        prep_time: 25,
        notes: &["Vegetarian", "High fiber"],
        ingredients: &[
            "Quinoa",
            "Broccoli",
            "Bell peppers",
            "Chickpeas",
            "Tahini",
            "Lemon juice",
            "Olive oil",
            "Salt",
            "Pepper",
        ],
        category: MealCategory::Lunch,
    },
    Meal {
        id: "s1",
        name: "Protein Smoothie",
        description: "Protein powder, banana, almond milk, spinach, almond butter",
        calories: 300,
        protein: 25,
        carbs: 30,
        fats: 10,
        prep_time: 5,
        notes: &["High protein", "Quick prep"],
        ingredients: &["Protein powder", "Banana", "Almond milk", "Spinach", "Almond butter", "Ice"],
        category: MealCategory::Snack,
    },
    Meal {
        id: "s2",
        name: "Hummus and Veggies",
        description: "Hummus, cucumber, carrots, bell peppers",
        calories: 250,
        protein: 8,
        carbs: 25,
        fats: 15,
        prep_time: 10,
        notes: &["Vegetarian", "High fiber"],
        ingredients: &["Hummus", "Cucumber", "Carrots", "Bell peppers"],
        category: MealCategory::Snack,
    },
    Meal {
        id: "d1",
        name: "Salmon with Asparagus",
        description: "Grilled salmon, roasted asparagus, quinoa",
        calories: 550,
        protein: 40,
        carbs: 30,
        fats: 25,
        prep_time: 30,
        notes: &["High protein", "Omega-3"],
        ingredients: &["Salmon fillet", "Asparagus", "Quinoa", "Olive oil", "Lemon", "Dill", "Salt", "Pepper"],
        category: MealCategory::Dinner,
    },
    Meal {
        id: "d2",
        name: "Turkey Meatballs",
        description: "Turkey meatballs, zucchini noodles, marinara sauce",
        calories: 450,
        protein: 35,
        carbs: 20,
        fats: 20,
        prep_time: 35,
        notes: &["High protein", "Low carb"],
        ingredients: &[
            "Ground turkey",
            "Zucchini",
            "Marinara sauce",
            "Egg",
            "Breadcrumbs",
            "Parmesan",
            "Garlic",
            "Onion",
            "Basil",
            "Salt",
            "Pepper",
        ],
        category: MealCategory::Dinner,
    },
];

const PROTEIN_DAY: &[&str] = &["High protein day", "Omega-3 rich dinner"];
const FIBER_DAY: &[&str] = &["Vegetarian options", "High fiber day"];

fn protein_day(id: &'static str, name: &'static str) -> SampleDay {
    SampleDay {
        id,
        name,
        breakfast: &SAMPLE_MEALS[0],
        lunch: &SAMPLE_MEALS[2],
        snack: &SAMPLE_MEALS[4],
        dinner: &SAMPLE_MEALS[6],
        total_calories: 1650,
        total_protein: 125,
        total_carbs: 85,
        total_fats: 80,
        notes: PROTEIN_DAY,
    }
}

fn fiber_day(id: &'static str, name: &'static str) -> SampleDay {
    SampleDay {
        id,
        name,
        breakfast: &SAMPLE_MEALS[1],
        lunch: &SAMPLE_MEALS[3],
        snack: &SAMPLE_MEALS[5],
        dinner: &SAMPLE_MEALS[7],
        total_calories: 1440,
        total_protein: 83,
        total_carbs: 125,
        total_fats: 60,
        notes: FIBER_DAY,
    }
}

/// Monday to Friday, alternating the two sample days.
pub fn sample_week() -> Vec<SampleDay> {
    vec![
        protein_day("monday", "Monday"),
        fiber_day("tuesday", "Tuesday"),
        protein_day("wednesday", "Wednesday"),
        fiber_day("thursday", "Thursday"),
        protein_day("friday", "Friday"),
    ]
}

/// Every ingredient of every meal in the week, repeats included.
pub fn week_ingredients(week: &[SampleDay]) -> Vec<&'static str> {
    week.iter()
        .flat_map(|day| day.meals())
        .flat_map(|meal| meal.ingredients.iter().copied())
        .collect()
}
