//! Wizard step sequence and the derived navigation view.

use std::fmt;

use crate::action::Action;
use crate::error::CoreError;
use crate::model::Draft;
use crate::state::DraftState;
use crate::store::StoreHandle;

/// Number of wizard steps; valid step numbers are `1..=STEP_COUNT`.
pub const STEP_COUNT: u8 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    BasicDetails = 1,
    Parties = 2,
    Plaint = 3,
    Schedules = 4,
    Documents = 5,
    Applications = 6,
    Judgements = 7,
}

impl WizardStep {
    pub const ALL: [WizardStep; STEP_COUNT as usize] = [
        Self::BasicDetails,
        Self::Parties,
        Self::Plaint,
        Self::Schedules,
        Self::Documents,
        Self::Applications,
        Self::Judgements,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::BasicDetails => "Basic Details",
            Self::Parties => "Party Details",
            Self::Plaint => "Plaint Details",
            Self::Schedules => "Schedule Details",
            Self::Documents => "Document Details",
            Self::Applications => "Interlocutory Applications",
            Self::Judgements => "Judgements",
        }
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = CoreError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        n.checked_sub(1)
            .and_then(|i| Self::ALL.get(i as usize).copied())
            .ok_or(CoreError::InvalidStep(n))
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.title())
    }
}

/// Field-level validation, supplied by the form layer.
pub trait StepValidator {
    /// Errors for `step` of `draft`; empty means the step may be left.
    fn validate(&self, step: WizardStep, draft: &Draft) -> Vec<String>;
}

/// Accepts everything.
pub struct NoValidation;

impl StepValidator for NoValidation {
    fn validate(&self, _step: WizardStep, _draft: &Draft) -> Vec<String> {
        Vec::new()
    }
}

/// Read-only navigation view over a [`DraftState`].
pub struct WizardView<'a> {
    state: &'a DraftState,
}

impl<'a> WizardView<'a> {
    pub fn new(state: &'a DraftState) -> Self {
        Self { state }
    }

    pub fn current(&self) -> Option<WizardStep> {
        WizardStep::try_from(self.state.current_step).ok()
    }

    pub fn is_first(&self) -> bool {
        self.state.current_step <= 1
    }

    pub fn is_last(&self) -> bool {
        self.state.current_step >= STEP_COUNT
    }

    pub fn is_completed(&self, step: WizardStep) -> bool {
        self.state
            .current_draft
            .as_ref()
            .is_some_and(|d| d.metadata.completed_steps.contains(&step.number()))
    }

    /// Share of steps completed, `0..=100`.
    pub fn progress_percent(&self) -> u8 {
        let done = WizardStep::ALL
            .iter()
            .filter(|s| self.is_completed(**s))
            .count();
        (done * 100 / STEP_COUNT as usize) as u8
    }

    pub fn errors(&self, step: WizardStep) -> &'a [String] {
        self.state.errors_for(step.number())
    }
}

/// Try to advance past the current step.
///
/// Runs `validator` on the current step; on errors they are recorded against
/// the step and navigation is refused. Returns whether the cursor moved.
pub fn advance(store: &StoreHandle, validator: &dyn StepValidator) -> Result<bool, CoreError> {
    let state = store.state();
    let draft = state.current_draft.as_ref().ok_or(CoreError::NoActiveDraft)?;
    let step = WizardStep::try_from(state.current_step)?;
    if step.number() == STEP_COUNT {
        return Ok(false);
    }

    let errors = validator.validate(step, draft);
    if !errors.is_empty() {
        tracing::debug!(step = step.number(), count = errors.len(), "step failed validation");
        store.dispatch(Action::SetValidationErrors {
            step: step.number(),
            errors,
        });
        return Ok(false);
    }

    store.dispatch(Action::ClearValidationErrors(step.number()));
    store.dispatch(Action::GoToNextStep);
    Ok(true)
}
