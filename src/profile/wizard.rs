//! The questionnaire as a finite-state machine.
//!
//! Fourteen questions are split into three groups. Finishing the last
//! question of a group shows that group's summary; confirming the summary
//! moves on to the next group, and confirming the last summary submits.

use serde::Serialize;

use super::model::{ChoiceList, QuestionnaireForm};

pub const TOTAL_STEPS: u8 = 14;

pub const QUESTION_TITLES: [&str; TOTAL_STEPS as usize] = [
    "Wearable Devices",
    "Current Weight",
    "Goal Weight",
    "Height",
    "Age",
    "Gender",
    "Medical Conditions",
    "Activity Level",
    "Dietary Preferences",
    "Fitness Goals",
    "Time Availability",
    "Sleep Quality",
    "Meal Prep Time",
    "Food Allergies",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionGroup {
    pub title: &'static str,
    pub first: u8,
    pub last: u8,
}

pub const GROUPS: [QuestionGroup; 3] = [
    QuestionGroup {
        title: "Basic Information",
        first: 1,
        last: 6,
    },
    QuestionGroup {
        title: "Health Information",
        first: 7,
        last: 11,
    },
    QuestionGroup {
        title: "Lifestyle Habits",
        first: 12,
        last: 14,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", content = "index", rename_all = "snake_case")]
pub enum WizardState {
    /// Showing question `n` (1-based).
    InStep(u8),
    /// Showing the summary of group `g` (0-based).
    GroupSummary(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Moved,
    /// Every group is confirmed; the form should be submitted.
    Submit,
}

/// Index of the group containing `step`.
pub fn group_of(step: u8) -> usize {
    GROUPS
        .iter()
        .position(|g| (g.first..=g.last).contains(&step))
        .unwrap_or(GROUPS.len() - 1)
}

/// The multi-select list asked for at `step`, if any.
pub fn choices_for(step: u8) -> Option<ChoiceList> {
    match step {
        1 => Some(ChoiceList::WearableDevices),
        7 => Some(ChoiceList::MedicalConditions),
        9 => Some(ChoiceList::DietaryPreferences),
        10 => Some(ChoiceList::FitnessGoals),
        14 => Some(ChoiceList::Allergies),
        _ => None,
    }
}

pub fn progress_for(step: u8) -> u8 {
    ((f64::from(step) / f64::from(TOTAL_STEPS)) * 100.0).round() as u8
}

impl WizardState {
    pub fn next(self) -> (WizardState, Advance) {
        match self {
            WizardState::InStep(n) => {
                let g = group_of(n);
                if n >= GROUPS[g].last {
                    (WizardState::GroupSummary(g), Advance::Moved)
                } else {
                    (WizardState::InStep(n + 1), Advance::Moved)
                }
            }
            WizardState::GroupSummary(g) if g + 1 < GROUPS.len() => {
                (WizardState::InStep(GROUPS[g + 1].first), Advance::Moved)
            }
            WizardState::GroupSummary(_) => (self, Advance::Submit),
        }
    }

    pub fn previous(self) -> WizardState {
        match self {
            WizardState::GroupSummary(g) => WizardState::InStep(GROUPS[g].last),
            WizardState::InStep(n) if n > 1 => WizardState::InStep(n - 1),
            WizardState::InStep(_) => self,
        }
    }

    pub fn group(self) -> usize {
        match self {
            WizardState::InStep(n) => group_of(n),
            WizardState::GroupSummary(g) => g,
        }
    }

    /// The question shown, or the last question of the summarised group.
    pub fn step(self) -> u8 {
        match self {
            WizardState::InStep(n) => n,
            WizardState::GroupSummary(g) => GROUPS[g].last,
        }
    }

    pub fn progress(self) -> u8 {
        progress_for(self.step())
    }
}

/// Questionnaire position plus the answers collected so far.
#[derive(Debug, Clone, PartialEq)]
pub struct Wizard {
    pub state: WizardState,
    pub form: QuestionnaireForm,
}

impl Default for Wizard {
    fn default() -> Self {
        Self {
            state: WizardState::InStep(1),
            form: QuestionnaireForm::default(),
        }
    }
}

impl Wizard {
    pub fn next(&mut self) -> Advance {
        let (state, advance) = self.state.next();
        self.state = state;
        advance
    }

    pub fn previous(&mut self) {
        self.state = self.state.previous();
    }

    pub fn group_summary(&self, group: usize) -> Vec<SummaryLine> {
        let g = GROUPS[group];
        (g.first..=g.last)
            .map(|step| SummaryLine {
                question: QUESTION_TITLES[usize::from(step) - 1],
                answer: answer_text(step, &self.form),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryLine {
    pub question: &'static str,
    pub answer: String,
}

fn list_or(values: &[String], empty: &str) -> String {
    if values.is_empty() {
        empty.to_string()
    } else {
        values.join(", ")
    }
}

/// The answer to question `step` as shown on a group summary.
pub fn answer_text(step: u8, form: &QuestionnaireForm) -> String {
    match step {
        1 => list_or(&form.wearable_devices, "None selected"),
        2 => format!("{} {}", form.current_weight, form.current_weight_unit),
        3 => format!("{} {}", form.goal_weight, form.goal_weight_unit),
        4 => format!("{} {}", form.height, form.height_unit),
        5 => form.age.to_string(),
        6 => form.gender.label().to_string(),
        7 => list_or(&form.medical_conditions, "None"),
        8 => form.activity_level.label().to_string(),
        9 => list_or(&form.dietary_preferences, "None selected"),
        10 => list_or(&form.fitness_goals, "None selected"),
        11 => form.time_availability.label().to_string(),
        12 => form.sleep_quality.label().to_string(),
        13 => form.meal_prep_time.label().to_string(),
        14 => list_or(&form.allergies, "None"),
        _ => String::new(),
    }
}
