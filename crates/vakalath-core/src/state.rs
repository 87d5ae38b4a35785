//! In-memory draft and wizard state, and the reducer that mutates it.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::action::Action;
use crate::derive;
use crate::model::{Draft, ItemId, PartyRole};
use crate::wizard::STEP_COUNT;

/// Progress of the external document generator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationStatus {
    pub is_generating: bool,
    /// Percent, `0..=100`.
    pub progress: u8,
    pub error: Option<String>,
}

/// Everything the wizard UI reads.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftState {
    pub current_draft: Option<Draft>,
    pub current_step: u8,
    /// Step number → current error list. Absent means no recorded errors.
    pub validation_errors: BTreeMap<u8, Vec<String>>,
    pub is_saving: bool,
    pub last_saved: Option<DateTime<Utc>>,
    pub save_error: Option<String>,
    pub generation: GenerationStatus,
}

impl Default for DraftState {
    fn default() -> Self {
        Self {
            current_draft: None,
            current_step: 1,
            validation_errors: BTreeMap::new(),
            is_saving: false,
            last_saved: None,
            save_error: None,
            generation: GenerationStatus::default(),
        }
    }
}

impl DraftState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one action. Per-step and per-collection mutators are no-ops
    /// when no draft is active.
    pub fn apply(&mut self, action: &Action) {
        match action {
            Action::StartNewDraft { id, at } => {
                self.current_draft = Some(Draft::new(*id, *at));
                self.current_step = 1;
                self.validation_errors.clear();
                self.save_error = None;
                self.generation = GenerationStatus::default();
            }
            Action::LoadDraft(draft) => {
                self.current_step = draft.metadata.current_step;
                self.current_draft = Some((**draft).clone());
            }
            Action::ClearDraft => {
                self.current_draft = None;
                self.current_step = 1;
                self.validation_errors.clear();
            }

            Action::UpdateBasicDetails(details) => self.with_draft(|draft| {
                draft.basic_details = details.clone();
                // IA numbers carry the case year.
                let year = derive::filing_year(draft);
                derive::renumber_applications(&mut draft.ia_details.applications, year);
            }),
            Action::UpdatePlaintDetails(details) => self.with_draft(|draft| {
                draft.plaint_details = details.clone();
            }),

            Action::AddParty(party) => self.with_draft(|draft| {
                let group = draft.party_details.group_mut(party.role);
                group.push(party.clone());
                derive::renumber_parties(group);
            }),
            Action::UpdateParty(party) => self.with_draft(|draft| {
                let details = &mut draft.party_details;
                let Some(old_role) = details.find(party.id).map(|p| p.role) else {
                    return;
                };
                let old_group = details.group_mut(old_role);
                let Some(pos) = old_group.iter().position(|p| p.id == party.id) else {
                    return;
                };
                if old_role == party.role {
                    old_group[pos] = party.clone();
                } else {
                    old_group.remove(pos);
                    details.group_mut(party.role).push(party.clone());
                }
                derive::renumber_parties(&mut details.plaintiffs);
                derive::renumber_parties(&mut details.defendants);
            }),
            Action::RemoveParty(id) => self.with_draft(|draft| {
                let details = &mut draft.party_details;
                details.plaintiffs.retain(|p| p.id != *id);
                details.defendants.retain(|p| p.id != *id);
                derive::renumber_parties(&mut details.plaintiffs);
                derive::renumber_parties(&mut details.defendants);
            }),
            Action::ReorderParties { role, from, to } => self.with_draft(|draft| {
                let group = draft.party_details.group_mut(*role);
                derive::move_item(group, *from, *to);
                derive::renumber_parties(group);
            }),

            Action::AddSchedule(schedule) => self.with_draft(|draft| {
                let schedules = &mut draft.schedule_details.schedules;
                schedules.push(schedule.clone());
                derive::reletter_schedules(schedules);
            }),
            Action::UpdateSchedule(schedule) => self.with_draft(|draft| {
                let schedules = &mut draft.schedule_details.schedules;
                replace_by_id(schedules, schedule.id, schedule, |s| s.id);
                derive::reletter_schedules(schedules);
            }),
            Action::RemoveSchedule(id) => self.with_draft(|draft| {
                let schedules = &mut draft.schedule_details.schedules;
                schedules.retain(|s| s.id != *id);
                derive::reletter_schedules(schedules);
            }),
            Action::ReorderSchedules { from, to } => self.with_draft(|draft| {
                let schedules = &mut draft.schedule_details.schedules;
                derive::move_item(schedules, *from, *to);
                derive::reletter_schedules(schedules);
            }),

            Action::AddDocument(doc) => self.with_draft(|draft| {
                draft.document_details.documents.push(doc.clone());
                derive::relabel_documents(&mut draft.document_details);
            }),
            Action::UpdateDocument(doc) => self.with_draft(|draft| {
                replace_by_id(&mut draft.document_details.documents, doc.id, doc, |d| d.id);
                derive::relabel_documents(&mut draft.document_details);
            }),
            Action::RemoveDocument(id) => self.with_draft(|draft| {
                draft.document_details.documents.retain(|d| d.id != *id);
                derive::relabel_documents(&mut draft.document_details);
            }),
            Action::ReorderDocuments { from, to } => self.with_draft(|draft| {
                derive::move_item(&mut draft.document_details.documents, *from, *to);
                derive::relabel_documents(&mut draft.document_details);
            }),

            Action::AddApplication(ia) => self.with_draft(|draft| {
                draft.ia_details.applications.push(ia.clone());
                renumber_ias(draft);
            }),
            Action::UpdateApplication(ia) => self.with_draft(|draft| {
                replace_by_id(&mut draft.ia_details.applications, ia.id, ia, |a| a.id);
                renumber_ias(draft);
            }),
            Action::RemoveApplication(id) => self.with_draft(|draft| {
                draft.ia_details.applications.retain(|a| a.id != *id);
                renumber_ias(draft);
            }),
            Action::ReorderApplications { from, to } => self.with_draft(|draft| {
                derive::move_item(&mut draft.ia_details.applications, *from, *to);
                renumber_ias(draft);
            }),

            Action::AddJudgement(judgement) => self.with_draft(|draft| {
                let judgements = &mut draft.judgement_details.judgements;
                judgements.push(judgement.clone());
                derive::reorder_judgements(judgements);
            }),
            Action::UpdateJudgement(judgement) => self.with_draft(|draft| {
                let judgements = &mut draft.judgement_details.judgements;
                replace_by_id(judgements, judgement.id, judgement, |j| j.id);
                derive::reorder_judgements(judgements);
            }),
            Action::RemoveJudgement(id) => self.with_draft(|draft| {
                let judgements = &mut draft.judgement_details.judgements;
                judgements.retain(|j| j.id != *id);
                derive::reorder_judgements(judgements);
            }),
            Action::ReorderJudgements { from, to } => self.with_draft(|draft| {
                let judgements = &mut draft.judgement_details.judgements;
                derive::move_item(judgements, *from, *to);
                derive::reorder_judgements(judgements);
            }),

            Action::GoToNextStep => {
                if self.current_step >= STEP_COUNT {
                    return;
                }
                let left = self.current_step;
                self.set_step(left + 1);
                if let Some(draft) = self.current_draft.as_mut() {
                    draft.metadata.completed_steps.insert(left);
                }
            }
            Action::GoToPreviousStep => {
                if self.current_step > 1 {
                    self.set_step(self.current_step - 1);
                }
            }
            Action::GoToStep(step) => {
                if (1..=STEP_COUNT).contains(step) {
                    self.set_step(*step);
                }
            }

            Action::StartSaving => {
                self.is_saving = true;
                self.save_error = None;
            }
            Action::SavingComplete { at } => {
                self.is_saving = false;
                self.save_error = None;
                self.last_saved = Some(*at);
                if let Some(draft) = self.current_draft.as_mut() {
                    draft.metadata.updated_at = *at;
                }
            }
            Action::SavingError(message) => {
                self.is_saving = false;
                self.save_error = Some(message.clone());
            }

            Action::StartGeneration => {
                self.generation = GenerationStatus {
                    is_generating: true,
                    progress: 0,
                    error: None,
                };
            }
            Action::UpdateGenerationProgress(progress) => {
                self.generation.progress = (*progress).min(100);
            }
            Action::SetGeneratedDocuments(documents) => {
                self.generation.is_generating = false;
                self.generation.progress = 100;
                self.generation.error = None;
                if let Some(draft) = self.current_draft.as_mut() {
                    draft.metadata.is_complete = true;
                    draft.metadata.generated_documents = Some(documents.clone());
                }
            }
            Action::GenerationError(message) => {
                self.generation.is_generating = false;
                self.generation.error = Some(message.clone());
            }

            Action::SetValidationErrors { step, errors } => {
                self.validation_errors.insert(*step, errors.clone());
            }
            Action::ClearValidationErrors(step) => {
                self.validation_errors.remove(step);
            }
        }
    }

    /// The active draft's id, if any.
    pub fn draft_id(&self) -> Option<crate::model::DraftId> {
        self.current_draft.as_ref().map(|d| d.id)
    }

    /// Errors recorded for `step`, empty when none.
    pub fn errors_for(&self, step: u8) -> &[String] {
        self.validation_errors
            .get(&step)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Ids of one party group in display order.
    pub fn party_ids(&self, role: PartyRole) -> Vec<ItemId> {
        self.current_draft
            .as_ref()
            .map(|d| d.party_details.group(role).iter().map(|p| p.id).collect())
            .unwrap_or_default()
    }

    fn with_draft(&mut self, f: impl FnOnce(&mut Draft)) {
        match self.current_draft.as_mut() {
            Some(draft) => f(draft),
            None => debug!("no active draft, mutation ignored"),
        }
    }

    fn set_step(&mut self, step: u8) {
        self.current_step = step;
        if let Some(draft) = self.current_draft.as_mut() {
            draft.metadata.current_step = step;
        }
    }
}

fn renumber_ias(draft: &mut Draft) {
    let year = derive::filing_year(draft);
    derive::renumber_applications(&mut draft.ia_details.applications, year);
}

fn replace_by_id<T: Clone>(items: &mut [T], id: ItemId, value: &T, key: impl Fn(&T) -> ItemId) {
    if let Some(slot) = items.iter_mut().find(|item| key(item) == id) {
        *slot = value.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        BasicDetails, DocumentItem, DraftId, GeneratedDocument, InterlocutoryApplication,
        Judgement, Party, Schedule,
    };
    use chrono::{Datelike, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap()
    }

    fn started() -> DraftState {
        let mut state = DraftState::new();
        state.apply(&Action::StartNewDraft {
            id: DraftId::new(),
            at: t0(),
        });
        state
    }

    fn draft(state: &DraftState) -> &Draft {
        state.current_draft.as_ref().unwrap()
    }

    fn assert_dense(orders: impl Iterator<Item = u32>) {
        let orders: Vec<u32> = orders.collect();
        let expected: Vec<u32> = (1..=orders.len() as u32).collect();
        assert_eq!(orders, expected);
    }

    #[test]
    fn start_new_draft_resets_step() {
        let mut state = started();
        state.apply(&Action::GoToNextStep);
        assert_eq!(state.current_step, 2);
        state.apply(&Action::start_new_draft());
        assert_eq!(state.current_step, 1);
        assert!(draft(&state).metadata.completed_steps.is_empty());
    }

    #[test]
    fn load_draft_takes_step_from_metadata() {
        let mut d = Draft::new(DraftId::new(), t0());
        d.metadata.current_step = 5;
        let mut state = DraftState::new();
        state.apply(&Action::load_draft(d.clone()));
        assert_eq!(state.current_step, 5);
        assert_eq!(state.current_draft, Some(d));
    }

    #[test]
    fn clear_draft_is_idempotent() {
        let mut state = started();
        state.apply(&Action::ClearDraft);
        state.apply(&Action::ClearDraft);
        assert!(state.current_draft.is_none());
    }

    #[test]
    fn mutators_without_draft_are_noops() {
        let mut state = DraftState::new();
        let actions = [
            Action::UpdateBasicDetails(BasicDetails::default()),
            Action::AddParty(Party::new(PartyRole::Plaintiff, "x")),
            Action::RemoveParty(ItemId::new()),
            Action::AddSchedule(Schedule::new("x")),
            Action::ReorderSchedules { from: 0, to: 1 },
            Action::AddDocument(DocumentItem::new("x", 1)),
            Action::AddApplication(InterlocutoryApplication::new("x")),
            Action::AddJudgement(Judgement::new("x")),
            Action::RemoveJudgement(ItemId::new()),
        ];
        for action in &actions {
            state.apply(action);
            assert!(state.current_draft.is_none(), "{}", action.name());
        }
    }

    #[test]
    fn party_orders_stay_dense_per_role() {
        let mut state = started();
        let mut plaintiffs = Vec::new();
        for name in ["p1", "p2", "p3"] {
            let p = Party::new(PartyRole::Plaintiff, name);
            plaintiffs.push(p.id);
            state.apply(&Action::AddParty(p));
        }
        state.apply(&Action::AddParty(Party::new(PartyRole::Defendant, "d1")));
        state.apply(&Action::RemoveParty(plaintiffs[1]));
        state.apply(&Action::ReorderParties {
            role: PartyRole::Plaintiff,
            from: 1,
            to: 0,
        });

        let d = draft(&state);
        assert_dense(d.party_details.plaintiffs.iter().map(|p| p.order));
        assert_dense(d.party_details.defendants.iter().map(|p| p.order));
        let names: Vec<&str> = d
            .party_details
            .plaintiffs
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["p3", "p1"]);
    }

    #[test]
    fn update_party_can_change_role() {
        let mut state = started();
        let mut p = Party::new(PartyRole::Plaintiff, "p1");
        state.apply(&Action::AddParty(p.clone()));
        state.apply(&Action::AddParty(Party::new(PartyRole::Plaintiff, "p2")));
        state.apply(&Action::AddParty(Party::new(PartyRole::Defendant, "d1")));

        p.role = PartyRole::Defendant;
        p.name = "moved".into();
        state.apply(&Action::UpdateParty(p));

        let d = draft(&state);
        assert_eq!(d.party_details.plaintiffs.len(), 1);
        assert_eq!(d.party_details.plaintiffs[0].order, 1);
        assert_eq!(d.party_details.defendants.len(), 2);
        assert_eq!(d.party_details.defendants[1].name, "moved");
        assert_eq!(d.party_details.defendants[1].order, 2);
    }

    #[test]
    fn schedule_letters_rederived_after_removal() {
        let mut state = started();
        let ids: Vec<ItemId> = (0..3)
            .map(|i| {
                let s = Schedule::new(format!("plot {i}"));
                let id = s.id;
                state.apply(&Action::AddSchedule(s));
                id
            })
            .collect();
        state.apply(&Action::RemoveSchedule(ids[1]));

        let names: Vec<&str> = draft(&state)
            .schedule_details
            .schedules
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn schedule_letters_follow_new_order_after_reorder() {
        let mut state = started();
        for desc in ["house", "well", "paddy field"] {
            state.apply(&Action::AddSchedule(Schedule::new(desc)));
        }
        state.apply(&Action::ReorderSchedules { from: 2, to: 0 });

        let schedules = &draft(&state).schedule_details.schedules;
        let rows: Vec<(&str, &str)> = schedules
            .iter()
            .map(|s| (s.name.as_str(), s.description.as_str()))
            .collect();
        assert_eq!(
            rows,
            vec![("A", "paddy field"), ("B", "house"), ("C", "well")]
        );
        assert_dense(schedules.iter().map(|s| s.order));
    }

    #[test]
    fn schedule_name_cannot_be_set_by_update() {
        let mut state = started();
        let mut s = Schedule::new("plot");
        state.apply(&Action::AddSchedule(s.clone()));
        s.name = "Q".into();
        s.description = "renamed plot".into();
        state.apply(&Action::UpdateSchedule(s));
        let schedule = &draft(&state).schedule_details.schedules[0];
        assert_eq!(schedule.name, "A");
        assert_eq!(schedule.description, "renamed plot");
    }

    #[test]
    fn documents_keep_labels_and_totals_consistent() {
        let mut state = started();
        let mut docs = Vec::new();
        for (pages, marked) in [(4, true), (1, false), (6, true), (2, true)] {
            let mut doc = DocumentItem::new("doc", pages);
            doc.is_marked = marked;
            docs.push(doc.clone());
            state.apply(&Action::AddDocument(doc));
        }

        // Unmark the first, grow the third, then drop the second.
        let mut first = docs[0].clone();
        first.is_marked = false;
        state.apply(&Action::UpdateDocument(first));
        let mut third = docs[2].clone();
        third.pages = 10;
        state.apply(&Action::UpdateDocument(third));
        state.apply(&Action::RemoveDocument(docs[1].id));
        state.apply(&Action::ReorderDocuments { from: 2, to: 0 });

        let details = &draft(&state).document_details;
        let labels: Vec<Option<&str>> = details
            .documents
            .iter()
            .map(|d| d.exhibit_label.as_deref())
            .collect();
        assert_eq!(labels, vec![Some("EX-A1"), None, Some("EX-A2")]);
        assert_eq!(details.total_pages, 2 + 4 + 10);
        assert_dense(details.documents.iter().map(|d| d.serial_no));
    }

    #[test]
    fn ia_numbers_use_basic_details_year() {
        let mut state = started();
        state.apply(&Action::UpdateBasicDetails(BasicDetails {
            year: Some(2025),
            ..Default::default()
        }));
        let first = InterlocutoryApplication::new("injunction");
        let first_id = first.id;
        state.apply(&Action::AddApplication(first));
        state.apply(&Action::AddApplication(InterlocutoryApplication::new(
            "commission",
        )));

        let numbers: Vec<String> = draft(&state)
            .ia_details
            .applications
            .iter()
            .map(|a| a.number.clone())
            .collect();
        assert_eq!(numbers, vec!["IA 1/2025", "IA 2/2025"]);

        state.apply(&Action::RemoveApplication(first_id));
        let apps = &draft(&state).ia_details.applications;
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].number, "IA 1/2025");
        assert_eq!(apps[0].title, "commission");
    }

    #[test]
    fn ia_reorder_renumbers_by_position() {
        let mut state = started();
        state.apply(&Action::UpdateBasicDetails(BasicDetails {
            year: Some(2024),
            ..Default::default()
        }));
        for title in ["injunction", "commission"] {
            state.apply(&Action::AddApplication(InterlocutoryApplication::new(title)));
        }
        state.apply(&Action::ReorderApplications { from: 1, to: 0 });

        let apps = &draft(&state).ia_details.applications;
        let rows: Vec<(&str, &str, u32)> = apps
            .iter()
            .map(|a| (a.title.as_str(), a.number.as_str(), a.order))
            .collect();
        assert_eq!(
            rows,
            vec![("commission", "IA 1/2024", 1), ("injunction", "IA 2/2024", 2)]
        );
    }

    #[test]
    fn ia_numbers_fall_back_to_current_year() {
        let mut state = started();
        assert_eq!(draft(&state).basic_details.year, None);
        state.apply(&Action::AddApplication(InterlocutoryApplication::new("stay")));
        state.apply(&Action::AddApplication(InterlocutoryApplication::new("amend")));

        let year = Utc::now().year();
        let numbers: Vec<&str> = draft(&state)
            .ia_details
            .applications
            .iter()
            .map(|a| a.number.as_str())
            .collect();
        assert_eq!(numbers, vec![format!("IA 1/{year}"), format!("IA 2/{year}")]);
    }

    #[test]
    fn page_total_saturates_instead_of_overflowing() {
        let mut state = started();
        state.apply(&Action::AddDocument(DocumentItem::new("bundle", u32::MAX)));
        state.apply(&Action::AddDocument(DocumentItem::new("note", 1)));

        let details = &draft(&state).document_details;
        assert_eq!(details.documents.len(), 2);
        assert_eq!(details.total_pages, u32::MAX);
        assert_dense(details.documents.iter().map(|d| d.serial_no));
    }

    #[test]
    fn changing_year_renumbers_existing_applications() {
        let mut state = started();
        state.apply(&Action::UpdateBasicDetails(BasicDetails {
            year: Some(2024),
            ..Default::default()
        }));
        state.apply(&Action::AddApplication(InterlocutoryApplication::new("x")));
        state.apply(&Action::UpdateBasicDetails(BasicDetails {
            year: Some(2025),
            ..Default::default()
        }));
        assert_eq!(draft(&state).ia_details.applications[0].number, "IA 1/2025");
    }

    #[test]
    fn judgement_order_rederived() {
        let mut state = started();
        let a = Judgement::new("AIR 1990 SC 1");
        let a_id = a.id;
        state.apply(&Action::AddJudgement(a));
        state.apply(&Action::AddJudgement(Judgement::new("2020 (1) KLT 5")));
        state.apply(&Action::AddJudgement(Judgement::new("2021 (3) KHC 9")));
        state.apply(&Action::RemoveJudgement(a_id));
        state.apply(&Action::ReorderJudgements { from: 1, to: 0 });
        let js = &draft(&state).judgement_details.judgements;
        assert_dense(js.iter().map(|j| j.order));
        assert_eq!(js[0].citation, "2021 (3) KHC 9");
    }

    #[test]
    fn navigation_clamps_and_marks_completed() {
        let mut state = started();
        state.apply(&Action::GoToPreviousStep);
        assert_eq!(state.current_step, 1);

        state.apply(&Action::GoToNextStep);
        state.apply(&Action::GoToNextStep);
        assert_eq!(state.current_step, 3);
        assert_eq!(
            draft(&state).metadata.completed_steps.iter().copied().collect::<Vec<_>>(),
            vec![1, 2]
        );

        state.apply(&Action::GoToStep(1));
        state.apply(&Action::GoToNextStep);
        assert_eq!(draft(&state).metadata.completed_steps.len(), 2);

        state.apply(&Action::GoToStep(0));
        state.apply(&Action::GoToStep(STEP_COUNT + 1));
        assert_eq!(state.current_step, 2);

        state.apply(&Action::GoToStep(STEP_COUNT));
        state.apply(&Action::GoToNextStep);
        assert_eq!(state.current_step, STEP_COUNT);
        assert!(!draft(&state).metadata.completed_steps.contains(&STEP_COUNT));
        assert_eq!(draft(&state).metadata.current_step, STEP_COUNT);
    }

    #[test]
    fn saving_transitions_stamp_updated_at() {
        let mut state = started();
        state.apply(&Action::StartSaving);
        assert!(state.is_saving);

        state.apply(&Action::SavingError("offline".into()));
        assert!(!state.is_saving);
        assert_eq!(state.save_error.as_deref(), Some("offline"));

        let later = Utc.with_ymd_and_hms(2025, 6, 1, 10, 5, 0).unwrap();
        state.apply(&Action::StartSaving);
        assert!(state.save_error.is_none());
        state.apply(&Action::SavingComplete { at: later });
        assert!(!state.is_saving);
        assert_eq!(state.last_saved, Some(later));
        assert_eq!(draft(&state).metadata.updated_at, later);
        assert_eq!(draft(&state).metadata.created_at, t0());
    }

    #[test]
    fn generated_documents_mark_draft_complete() {
        let mut state = started();
        state.apply(&Action::StartGeneration);
        state.apply(&Action::UpdateGenerationProgress(250));
        assert_eq!(state.generation.progress, 100);

        let doc = GeneratedDocument {
            id: ItemId::new(),
            format: crate::model::DocumentFormat::Pdf,
            file_name: "vakalathnama.pdf".into(),
            location: None,
            generated_at: t0(),
        };
        state.apply(&Action::SetGeneratedDocuments(vec![doc.clone()]));
        assert!(!state.generation.is_generating);
        let meta = &draft(&state).metadata;
        assert!(meta.is_complete);
        assert_eq!(meta.generated_documents, Some(vec![doc]));

        state.apply(&Action::StartGeneration);
        state.apply(&Action::GenerationError("template missing".into()));
        assert!(!state.generation.is_generating);
        assert_eq!(state.generation.error.as_deref(), Some("template missing"));
    }

    #[test]
    fn validation_errors_are_per_step() {
        let mut state = started();
        state.apply(&Action::SetValidationErrors {
            step: 1,
            errors: vec!["court is required".into()],
        });
        state.apply(&Action::SetValidationErrors {
            step: 2,
            errors: vec!["add a plaintiff".into()],
        });
        assert_eq!(state.errors_for(1), ["court is required".to_string()]);
        state.apply(&Action::ClearValidationErrors(1));
        assert!(state.errors_for(1).is_empty());
        assert_eq!(state.errors_for(2).len(), 1);
    }
}
