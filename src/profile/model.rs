use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub const WEARABLE_DEVICES: &[&str] = &["Apple Watch", "Fitbit", "Garmin", "Samsung Watch", "Other"];

pub const MEDICAL_CONDITIONS: &[&str] = &[
    "Diabetes",
    "Hypertension",
    "Heart Disease",
    "Joint Issues",
    "None",
    "Other",
];

pub const DIETARY_PREFERENCES: &[&str] = &[
    "Vegetarian",
    "Vegan",
    "Pescatarian",
    "Keto",
    "Paleo",
    "Gluten-Free",
    "Dairy-Free",
    "Other",
];

pub const FITNESS_GOALS: &[&str] = &[
    "Weight Loss",
    "Muscle Gain",
    "Endurance",
    "Strength",
    "Flexibility",
    "General Health",
    "Other",
];

pub const ALLERGIES: &[&str] = &[
    "Peanuts",
    "Tree Nuts",
    "Milk",
    "Eggs",
    "Soy",
    "Wheat",
    "Fish",
    "Shellfish",
    "None",
    "Other",
];

/// Declares a closed set of answers stored as plain text columns.
macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $text:literal, $label:literal;)+ }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $text)] $variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Value as stored in the profile table.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }

            /// Human-readable label used in summaries.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = anyhow::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => anyhow::bail!(concat!("unknown ", stringify!($name), ": {}"), other),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

text_enum!(WeightUnit {
    Kg => "kg", "kg";
    Lbs => "lbs", "lbs";
});

text_enum!(HeightUnit {
    Cm => "cm", "cm";
    Inches => "inches", "inches";
});

text_enum!(Gender {
    Male => "male", "Male";
    Female => "female", "Female";
    Other => "other", "Other";
});

text_enum!(ActivityLevel {
    Sedentary => "sedentary", "Sedentary";
    Light => "light", "Lightly active";
    Moderate => "moderate", "Moderately active";
    Very => "very", "Very active";
    Extra => "extra", "Extra active";
});

text_enum!(TimeAvailability {
    Min15 => "15min", "15 minutes";
    Min30 => "30min", "30 minutes";
    Min45 => "45min", "45 minutes";
    Min60 => "60min", "60 minutes";
    Min90 => "90min", "90 minutes";
});

text_enum!(SleepQuality {
    Poor => "poor", "Poor";
    Fair => "fair", "Fair";
    Good => "good", "Good";
    Excellent => "excellent", "Excellent";
});

text_enum!(MealPrepTime {
    Min15 => "15min", "15 minutes";
    Min30 => "30min", "30 minutes";
    Min45 => "45min", "45 minutes";
    Min60 => "60min", "60 minutes";
});

text_enum!(CookingSkill {
    Beginner => "beginner", "Beginner";
    Intermediate => "intermediate", "Intermediate";
    Advanced => "advanced", "Advanced";
});

impl ActivityLevel {
    /// TDEE multiplier applied to the resting energy expenditure.
    pub fn factor(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Very => 1.725,
            ActivityLevel::Extra => 1.9,
        }
    }
}

impl MealPrepTime {
    pub fn minutes(self) -> u32 {
        match self {
            MealPrepTime::Min15 => 15,
            MealPrepTime::Min30 => 30,
            MealPrepTime::Min45 => 45,
            MealPrepTime::Min60 => 60,
        }
    }
}

/// Answers collected by the questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionnaireForm {
    pub wearable_devices: Vec<String>,
    pub other_wearable: String,
    pub current_weight: f64,
    pub current_weight_unit: WeightUnit,
    pub goal_weight: f64,
    pub goal_weight_unit: WeightUnit,
    pub height: f64,
    pub height_unit: HeightUnit,
    pub age: i32,
    pub gender: Gender,
    pub medical_conditions: Vec<String>,
    pub other_medical: String,
    pub activity_level: ActivityLevel,
    pub dietary_preferences: Vec<String>,
    pub other_dietary: String,
    pub fitness_goals: Vec<String>,
    pub other_goals: String,
    pub time_availability: TimeAvailability,
    pub sleep_quality: SleepQuality,
    pub meal_prep_time: MealPrepTime,
    pub cooking_skill: CookingSkill,
    pub allergies: Vec<String>,
    pub other_allergies: String,
}

impl Default for QuestionnaireForm {
    fn default() -> Self {
        Self {
            wearable_devices: Vec::new(),
            other_wearable: String::new(),
            current_weight: 0.0,
            current_weight_unit: WeightUnit::Kg,
            goal_weight: 0.0,
            goal_weight_unit: WeightUnit::Kg,
            height: 0.0,
            height_unit: HeightUnit::Cm,
            age: 0,
            gender: Gender::Male,
            medical_conditions: Vec::new(),
            other_medical: String::new(),
            activity_level: ActivityLevel::Moderate,
            dietary_preferences: Vec::new(),
            other_dietary: String::new(),
            fitness_goals: Vec::new(),
            other_goals: String::new(),
            time_availability: TimeAvailability::Min30,
            sleep_quality: SleepQuality::Good,
            meal_prep_time: MealPrepTime::Min30,
            cooking_skill: CookingSkill::Intermediate,
            allergies: Vec::new(),
            other_allergies: String::new(),
        }
    }
}

/// The multi-select answers, addressable by checkbox actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceList {
    WearableDevices,
    MedicalConditions,
    DietaryPreferences,
    FitnessGoals,
    Allergies,
}

impl ChoiceList {
    pub const ALL: [ChoiceList; 5] = [
        ChoiceList::WearableDevices,
        ChoiceList::MedicalConditions,
        ChoiceList::DietaryPreferences,
        ChoiceList::FitnessGoals,
        ChoiceList::Allergies,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ChoiceList::WearableDevices => "wearable_devices",
            ChoiceList::MedicalConditions => "medical_conditions",
            ChoiceList::DietaryPreferences => "dietary_preferences",
            ChoiceList::FitnessGoals => "fitness_goals",
            ChoiceList::Allergies => "allergies",
        }
    }

    /// The choices offered for this list, in display order.
    pub fn options(self) -> &'static [&'static str] {
        match self {
            ChoiceList::WearableDevices => WEARABLE_DEVICES,
            ChoiceList::MedicalConditions => MEDICAL_CONDITIONS,
            ChoiceList::DietaryPreferences => DIETARY_PREFERENCES,
            ChoiceList::FitnessGoals => FITNESS_GOALS,
            ChoiceList::Allergies => ALLERGIES,
        }
    }

    pub fn check<S: AsRef<str>>(self, values: &[S]) -> Result<(), String> {
        match values
            .iter()
            .map(|v| -> &str { v.as_ref() })
            .find(|v| !self.options().contains(v))
        {
            Some(unknown) => Err(format!("Unknown {} option: {unknown}", self.name())),
            None => Ok(()),
        }
    }
}

/// One edit to the form: a field assignment or a checkbox toggle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FormAction {
    WearableDevices(Vec<String>),
    OtherWearable(String),
    CurrentWeight(f64),
    CurrentWeightUnit(WeightUnit),
    GoalWeight(f64),
    GoalWeightUnit(WeightUnit),
    Height(f64),
    HeightUnit(HeightUnit),
    Age(i32),
    Gender(Gender),
    MedicalConditions(Vec<String>),
    OtherMedical(String),
    ActivityLevel(ActivityLevel),
    DietaryPreferences(Vec<String>),
    OtherDietary(String),
    FitnessGoals(Vec<String>),
    OtherGoals(String),
    TimeAvailability(TimeAvailability),
    SleepQuality(SleepQuality),
    MealPrepTime(MealPrepTime),
    CookingSkill(CookingSkill),
    Allergies(Vec<String>),
    OtherAllergies(String),
    Check {
        list: ChoiceList,
        option: String,
        checked: bool,
    },
}

impl FormAction {
    /// Rejects list values missing from the matching catalogue.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            FormAction::Check { list, option, .. } => list.check(std::slice::from_ref(option)),
            FormAction::WearableDevices(v) => ChoiceList::WearableDevices.check(v),
            FormAction::MedicalConditions(v) => ChoiceList::MedicalConditions.check(v),
            FormAction::DietaryPreferences(v) => ChoiceList::DietaryPreferences.check(v),
            FormAction::FitnessGoals(v) => ChoiceList::FitnessGoals.check(v),
            FormAction::Allergies(v) => ChoiceList::Allergies.check(v),
            _ => Ok(()),
        }
    }
}

impl QuestionnaireForm {
    pub fn apply(&mut self, action: FormAction) {
        match action {
            FormAction::WearableDevices(v) => self.wearable_devices = v,
            FormAction::OtherWearable(v) => self.other_wearable = v,
            FormAction::CurrentWeight(v) => self.current_weight = v,
            FormAction::CurrentWeightUnit(v) => self.current_weight_unit = v,
            FormAction::GoalWeight(v) => self.goal_weight = v,
            FormAction::GoalWeightUnit(v) => self.goal_weight_unit = v,
            FormAction::Height(v) => self.height = v,
            FormAction::HeightUnit(v) => self.height_unit = v,
            FormAction::Age(v) => self.age = v,
            FormAction::Gender(v) => self.gender = v,
            FormAction::MedicalConditions(v) => self.medical_conditions = v,
            FormAction::OtherMedical(v) => self.other_medical = v,
            FormAction::ActivityLevel(v) => self.activity_level = v,
            FormAction::DietaryPreferences(v) => self.dietary_preferences = v,
            FormAction::OtherDietary(v) => self.other_dietary = v,
            FormAction::FitnessGoals(v) => self.fitness_goals = v,
            FormAction::OtherGoals(v) => self.other_goals = v,
            FormAction::TimeAvailability(v) => self.time_availability = v,
            FormAction::SleepQuality(v) => self.sleep_quality = v,
            FormAction::MealPrepTime(v) => self.meal_prep_time = v,
            FormAction::CookingSkill(v) => self.cooking_skill = v,
            FormAction::Allergies(v) => self.allergies = v,
            FormAction::OtherAllergies(v) => self.other_allergies = v,
            FormAction::Check {
                list,
                option,
                checked,
            } => {
                let values = self.list_mut(list);
                if checked {
                    if !values.contains(&option) {
                        values.push(option);
                    }
                } else {
                    values.retain(|v| *v != option);
                }
            }
        }
    }

    pub fn list(&self, list: ChoiceList) -> &[String] {
        match list {
            ChoiceList::WearableDevices => &self.wearable_devices,
            ChoiceList::MedicalConditions => &self.medical_conditions,
            ChoiceList::DietaryPreferences => &self.dietary_preferences,
            ChoiceList::FitnessGoals => &self.fitness_goals,
            ChoiceList::Allergies => &self.allergies,
        }
    }

    fn list_mut(&mut self, list: ChoiceList) -> &mut Vec<String> {
        match list {
            ChoiceList::WearableDevices => &mut self.wearable_devices,
            ChoiceList::MedicalConditions => &mut self.medical_conditions,
            ChoiceList::DietaryPreferences => &mut self.dietary_preferences,
            ChoiceList::FitnessGoals => &mut self.fitness_goals,
            ChoiceList::Allergies => &mut self.allergies,
        }
    }

    /// Rejects answers no store column can meaningfully hold.
    pub fn validate(&self) -> Result<(), String> {
        let numbers = [
            ("current weight", self.current_weight),
            ("goal weight", self.goal_weight),
            ("height", self.height),
        ];
        for (name, value) in numbers {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("Invalid {name}: {value}"));
            }
        }
        if self.age < 0 {
            return Err(format!("Invalid age: {}", self.age));
        }
        for list in ChoiceList::ALL {
            list.check(self.list(list))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_blank_questionnaire() {
        let form = QuestionnaireForm::default();
        assert_eq!(form.current_weight_unit, WeightUnit::Kg);
        assert_eq!(form.height_unit, HeightUnit::Cm);
        assert_eq!(form.gender, Gender::Male);
        assert_eq!(form.activity_level, ActivityLevel::Moderate);
        assert_eq!(form.time_availability, TimeAvailability::Min30);
        assert_eq!(form.cooking_skill, CookingSkill::Intermediate);
        assert!(form.allergies.is_empty());
    }

    #[test]
    fn check_appends_once_and_uncheck_removes() {
        let mut form = QuestionnaireForm::default();
        let check = |checked| FormAction::Check {
            list: ChoiceList::Allergies,
            option: "Peanuts".into(),
            checked,
        };
        form.apply(check(true));
        form.apply(check(true));
        assert_eq!(form.allergies, vec!["Peanuts".to_string()]);
        form.apply(check(false));
        assert!(form.allergies.is_empty());
    }

    #[test]
    fn actions_deserialize_from_tagged_json() {
        let action: FormAction =
            serde_json::from_str(r#"{"field":"time_availability","value":"45min"}"#).unwrap();
        assert_eq!(action, FormAction::TimeAvailability(TimeAvailability::Min45));

        let action: FormAction = serde_json::from_str(
            r#"{"field":"check","value":{"list":"fitness_goals","option":"Strength","checked":true}}"#,
        )
        .unwrap();
        let mut form = QuestionnaireForm::default();
        form.apply(action);
        assert_eq!(form.fitness_goals, vec!["Strength".to_string()]);
    }

    #[test]
    fn options_outside_the_catalogue_are_rejected() {
        let check = FormAction::Check {
            list: ChoiceList::Allergies,
            option: "Bacon".into(),
            checked: true,
        };
        assert_eq!(check.validate().unwrap_err(), "Unknown allergies option: Bacon");
        assert!(FormAction::FitnessGoals(vec!["Strength".into()]).validate().is_ok());
        assert!(FormAction::WearableDevices(vec!["Fitbit".into(), "Pager".into()])
            .validate()
            .is_err());

        // the full form is held to the same catalogues
        let mut form = QuestionnaireForm::default();
        form.medical_conditions.push("Gout".into());
        assert_eq!(form.validate().unwrap_err(), "Unknown medical_conditions option: Gout");
    }

    #[test]
    fn every_list_has_its_catalogue() {
        for list in ChoiceList::ALL {
            assert!(list.options().contains(&"Other"), "{}", list.name());
        }
        assert_eq!(ChoiceList::Allergies.options().len(), 10);
    }

    #[test]
    fn enum_text_parses_back() {
        for level in ActivityLevel::ALL {
            assert_eq!(level.as_str().parse::<ActivityLevel>().unwrap(), *level);
        }
        assert!("weekly".parse::<SleepQuality>().is_err());
        assert_eq!(ActivityLevel::Light.label(), "Lightly active");
    }

    #[test]
    fn validation_rejects_negative_numbers() {
        let mut form = QuestionnaireForm::default();
        assert!(form.validate().is_ok());
        form.apply(FormAction::GoalWeight(-3.0));
        assert!(form.validate().unwrap_err().contains("goal weight"));
        form.apply(FormAction::GoalWeight(70.0));
        form.apply(FormAction::Age(-1));
        assert!(form.validate().is_err());
    }
}
