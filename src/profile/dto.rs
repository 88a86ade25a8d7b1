use serde::Serialize;

use super::{
    model::QuestionnaireForm,
    wizard::{
        choices_for, SummaryLine, Wizard, WizardState, GROUPS, QUESTION_TITLES, TOTAL_STEPS,
    },
};

/// What the questionnaire screen renders.
#[derive(Debug, Serialize)]
pub struct WizardView {
    pub state: WizardState,
    pub step: u8,
    pub total_steps: u8,
    pub group: usize,
    pub group_title: &'static str,
    pub question: Option<&'static str>,
    /// Choices for a multi-select question.
    pub options: Option<&'static [&'static str]>,
    pub progress: u8,
    pub summary: Option<Vec<SummaryLine>>,
    pub form: QuestionnaireForm,
}

impl From<&Wizard> for WizardView {
    fn from(w: &Wizard) -> Self {
        let group = w.state.group();
        let (question, options, summary) = match w.state {
            WizardState::InStep(n) => (
                Some(QUESTION_TITLES[usize::from(n) - 1]),
                choices_for(n).map(|list| list.options()),
                None,
            ),
            WizardState::GroupSummary(g) => (None, None, Some(w.group_summary(g))),
        };
        Self {
            state: w.state,
            step: w.state.step(),
            total_steps: TOTAL_STEPS,
            group,
            group_title: GROUPS[group].title,
            question,
            options,
            progress: w.state.progress(),
            summary,
            form: w.form.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NextResponse {
    pub wizard: WizardView,
    /// Set once the answers are saved.
    pub redirect: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub redirect: &'static str,
}
