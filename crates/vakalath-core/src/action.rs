//! The closed set of operations that may mutate a [`DraftState`](crate::DraftState).

use chrono::{DateTime, Utc};

use crate::model::{
    BasicDetails, DocumentItem, Draft, DraftId, GeneratedDocument, InterlocutoryApplication,
    ItemId, Judgement, Party, PartyRole, PlaintDetails, Schedule,
};

/// A named store operation.
///
/// Values that are not deterministic (fresh ids, the current time) are
/// captured when the action is built, so applying one is a pure mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    StartNewDraft { id: DraftId, at: DateTime<Utc> },
    LoadDraft(Box<Draft>),
    ClearDraft,

    UpdateBasicDetails(BasicDetails),
    UpdatePlaintDetails(PlaintDetails),

    AddParty(Party),
    UpdateParty(Party),
    RemoveParty(ItemId),
    ReorderParties { role: PartyRole, from: usize, to: usize },

    AddSchedule(Schedule),
    UpdateSchedule(Schedule),
    RemoveSchedule(ItemId),
    ReorderSchedules { from: usize, to: usize },

    AddDocument(DocumentItem),
    UpdateDocument(DocumentItem),
    RemoveDocument(ItemId),
    ReorderDocuments { from: usize, to: usize },

    AddApplication(InterlocutoryApplication),
    UpdateApplication(InterlocutoryApplication),
    RemoveApplication(ItemId),
    ReorderApplications { from: usize, to: usize },

    AddJudgement(Judgement),
    UpdateJudgement(Judgement),
    RemoveJudgement(ItemId),
    ReorderJudgements { from: usize, to: usize },

    GoToNextStep,
    GoToPreviousStep,
    GoToStep(u8),

    StartSaving,
    SavingComplete { at: DateTime<Utc> },
    SavingError(String),

    StartGeneration,
    UpdateGenerationProgress(u8),
    SetGeneratedDocuments(Vec<GeneratedDocument>),
    GenerationError(String),

    SetValidationErrors { step: u8, errors: Vec<String> },
    ClearValidationErrors(u8),
}

impl Action {
    /// Fresh draft with a new id, stamped now.
    pub fn start_new_draft() -> Self {
        Self::StartNewDraft {
            id: DraftId::new(),
            at: Utc::now(),
        }
    }

    pub fn load_draft(draft: Draft) -> Self {
        Self::LoadDraft(Box::new(draft))
    }

    /// Stable name used in logs and by the save-trigger allow-list.
    pub fn name(&self) -> &'static str {
        match self {
            Self::StartNewDraft { .. } => "start_new_draft",
            Self::LoadDraft(_) => "load_draft",
            Self::ClearDraft => "clear_draft",
            Self::UpdateBasicDetails(_) => "update_basic_details",
            Self::UpdatePlaintDetails(_) => "update_plaint_details",
            Self::AddParty(_) => "add_party",
            Self::UpdateParty(_) => "update_party",
            Self::RemoveParty(_) => "remove_party",
            Self::ReorderParties { .. } => "reorder_parties",
            Self::AddSchedule(_) => "add_schedule",
            Self::UpdateSchedule(_) => "update_schedule",
            Self::RemoveSchedule(_) => "remove_schedule",
            Self::ReorderSchedules { .. } => "reorder_schedules",
            Self::AddDocument(_) => "add_document",
            Self::UpdateDocument(_) => "update_document",
            Self::RemoveDocument(_) => "remove_document",
            Self::ReorderDocuments { .. } => "reorder_documents",
            Self::AddApplication(_) => "add_application",
            Self::UpdateApplication(_) => "update_application",
            Self::RemoveApplication(_) => "remove_application",
            Self::ReorderApplications { .. } => "reorder_applications",
            Self::AddJudgement(_) => "add_judgement",
            Self::UpdateJudgement(_) => "update_judgement",
            Self::RemoveJudgement(_) => "remove_judgement",
            Self::ReorderJudgements { .. } => "reorder_judgements",
            Self::GoToNextStep => "go_to_next_step",
            Self::GoToPreviousStep => "go_to_previous_step",
            Self::GoToStep(_) => "go_to_step",
            Self::StartSaving => "start_saving",
            Self::SavingComplete { .. } => "saving_complete",
            Self::SavingError(_) => "saving_error",
            Self::StartGeneration => "start_generation",
            Self::UpdateGenerationProgress(_) => "update_generation_progress",
            Self::SetGeneratedDocuments(_) => "set_generated_documents",
            Self::GenerationError(_) => "generation_error",
            Self::SetValidationErrors { .. } => "set_validation_errors",
            Self::ClearValidationErrors(_) => "clear_validation_errors",
        }
    }

    /// Whether this operation should schedule a remote write.
    ///
    /// Step and collection mutators plus navigation. Status, generation,
    /// validation, and whole-draft lifecycle operations never do.
    pub fn triggers_remote_save(&self) -> bool {
        SAVE_TRIGGERS.contains(&self.name())
    }
}

/// Allow-list of operation names that schedule a remote write.
pub const SAVE_TRIGGERS: &[&str] = &[
    "update_basic_details",
    "update_plaint_details",
    "add_party",
    "update_party",
    "remove_party",
    "reorder_parties",
    "add_schedule",
    "update_schedule",
    "remove_schedule",
    "reorder_schedules",
    "add_document",
    "update_document",
    "remove_document",
    "reorder_documents",
    "add_application",
    "update_application",
    "remove_application",
    "reorder_applications",
    "add_judgement",
    "update_judgement",
    "remove_judgement",
    "reorder_judgements",
    "go_to_next_step",
    "go_to_previous_step",
    "go_to_step",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutators_and_navigation_trigger_saves() {
        assert!(Action::UpdateBasicDetails(BasicDetails::default()).triggers_remote_save());
        assert!(Action::RemoveParty(ItemId::new()).triggers_remote_save());
        assert!(Action::ReorderDocuments { from: 0, to: 1 }.triggers_remote_save());
        assert!(Action::GoToNextStep.triggers_remote_save());
        assert!(Action::GoToStep(3).triggers_remote_save());
    }

    #[test]
    fn status_and_lifecycle_do_not_trigger_saves() {
        assert!(!Action::StartSaving.triggers_remote_save());
        assert!(!Action::SavingComplete { at: Utc::now() }.triggers_remote_save());
        assert!(!Action::SavingError("x".into()).triggers_remote_save());
        assert!(!Action::StartGeneration.triggers_remote_save());
        assert!(!Action::UpdateGenerationProgress(50).triggers_remote_save());
        assert!(!Action::ClearValidationErrors(1).triggers_remote_save());
        assert!(!Action::start_new_draft().triggers_remote_save());
        assert!(!Action::ClearDraft.triggers_remote_save());
    }

    #[test]
    fn every_trigger_name_is_a_real_action_name() {
        let samples = [
            Action::UpdatePlaintDetails(PlaintDetails::default()),
            Action::AddSchedule(Schedule::new("x")),
            Action::AddApplication(InterlocutoryApplication::new("x")),
            Action::ReorderJudgements { from: 0, to: 0 },
            Action::GoToPreviousStep,
        ];
        for action in samples {
            assert!(SAVE_TRIGGERS.contains(&action.name()), "{}", action.name());
        }
    }
}
