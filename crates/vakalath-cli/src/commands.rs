//! Apply parsed commands to a draft session.

use anyhow::{Context, Result, anyhow, bail};
use vakalath_core::model::{
    BasicDetails, DocumentItem, Draft, InterlocutoryApplication, Judgement, Party, PlaintDetails,
    Schedule,
};
use vakalath_core::wizard::{self, StepValidator};
use vakalath_core::{Action, ExportView, ItemId, PartyRole, WizardStep};
use vakalath_store::FileStorage;
use vakalath_sync::DraftSession;

use crate::cli::{
    BasicArgs, Command, DocumentCmd, IaCmd, JudgementCmd, PartyCmd, PlaintArgs, ScheduleCmd,
};
use crate::display;

pub type Session = DraftSession<FileStorage>;

/// How the current process is driving the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// A single subcommand; the process exits afterwards.
    OneShot,
    /// Lines read by `vakalath shell`.
    Shell,
}

pub async fn execute(session: &Session, command: Command, mode: Mode) -> Result<()> {
    if mode == Mode::OneShot && command.is_navigation() {
        bail!(
            "wizard navigation only works inside `vakalath shell`; \
             a reopened draft always starts at step 1"
        );
    }
    match command {
        Command::New => {
            session.dispatch(Action::start_new_draft());
            let id = session.state().draft_id().context("draft was not created")?;
            println!("Started draft {id}");
        }
        Command::Show => display::print_draft_card(&session.state()),
        Command::Basic(args) => {
            let mut basic = active(session)?.basic_details;
            apply_basic(&mut basic, args);
            session.dispatch(Action::UpdateBasicDetails(basic));
        }
        Command::Plaint(args) => {
            let mut plaint = active(session)?.plaint_details;
            apply_plaint(&mut plaint, args);
            session.dispatch(Action::UpdatePlaintDetails(plaint));
        }
        Command::Party(cmd) => party(session, cmd)?,
        Command::Schedule(cmd) => schedule(session, cmd)?,
        Command::Document(cmd) => document(session, cmd)?,
        Command::Ia(cmd) => application(session, cmd)?,
        Command::Judgement(cmd) => judgement(session, cmd)?,
        Command::Next => {
            if wizard::advance(session.store(), &RequiredFields)? {
                print_step(session);
            } else {
                let state = session.state();
                let errors = state.errors_for(state.current_step);
                if errors.is_empty() {
                    println!("Already at the last step.");
                } else {
                    for error in errors {
                        println!("! {error}");
                    }
                    bail!("step {} is incomplete", state.current_step);
                }
            }
        }
        Command::Prev => {
            active(session)?;
            session.dispatch(Action::GoToPreviousStep);
            print_step(session);
        }
        Command::Goto { step } => {
            active(session)?;
            let step = WizardStep::try_from(step)?;
            session.dispatch(Action::GoToStep(step.number()));
            print_step(session);
        }
        Command::Save => {
            let at = session.save_now().await.context("remote save failed")?;
            println!("Saved at {}", at.format("%d/%m/%Y %H:%M:%S UTC"));
        }
        Command::ListRemote => {
            let drafts = session
                .list_remote()
                .await
                .context("listing remote drafts")?;
            display::print_remote_list(&drafts);
        }
        Command::OpenRemote { id } => {
            session
                .open_remote(id)
                .await
                .with_context(|| format!("opening remote draft {id}"))?;
            display::print_draft_card(&session.state());
        }
        Command::Export { pretty } => {
            let draft = active(session)?;
            let view = ExportView::from_draft(&draft);
            let json = if pretty {
                serde_json::to_string_pretty(&view)?
            } else {
                serde_json::to_string(&view)?
            };
            println!("{json}");
        }
        Command::Clear { purge } => {
            session.dispatch(Action::ClearDraft);
            if purge {
                session.purge_local().context("removing local snapshot")?;
            }
            println!("Draft cleared.");
        }
        Command::Shell => bail!("already in a shell"),
    }
    Ok(())
}

fn active(session: &Session) -> Result<Draft> {
    session
        .state()
        .current_draft
        .ok_or_else(|| anyhow!("no active draft; run `vakalath new` first"))
}

fn print_step(session: &Session) {
    let state = session.state();
    match WizardStep::try_from(state.current_step) {
        Ok(step) => println!("Now at {step}"),
        Err(_) => println!("Now at step {}", state.current_step),
    }
}

/// 1-based position to the id of the row at that position.
fn id_at(ids: &[ItemId], position: usize, what: &str) -> Result<ItemId> {
    position
        .checked_sub(1)
        .and_then(|i| ids.get(i))
        .copied()
        .ok_or_else(|| anyhow!("no {what} at position {position} (have {})", ids.len()))
}

fn index_of(position: usize, len: usize, what: &str) -> Result<usize> {
    match position.checked_sub(1) {
        Some(i) if i < len => Ok(i),
        _ => bail!("no {what} at position {position} (have {len})"),
    }
}

fn apply_basic(basic: &mut BasicDetails, args: BasicArgs) {
    if let Some(kind) = args.appearance {
        basic.appearance = kind.into();
    }
    set(&mut basic.court, args.court);
    set(&mut basic.district, args.district);
    set(&mut basic.case_type, args.case_type);
    set(&mut basic.case_number, args.case_number);
    set(&mut basic.year, args.year);
    set(&mut basic.filing_date, args.filing_date);
    set(&mut basic.advocate_name, args.advocate_name);
    set(&mut basic.advocate_enrolment_no, args.enrolment_no);
    set(&mut basic.advocate_address, args.advocate_address);
}

fn apply_plaint(plaint: &mut PlaintDetails, args: PlaintArgs) {
    if let Some(facts) = args.facts {
        plaint.facts = facts;
    }
    if let Some(cause) = args.cause_of_action {
        plaint.cause_of_action = cause;
    }
    if let Some(jurisdiction) = args.jurisdiction {
        plaint.jurisdiction = jurisdiction;
    }
    set(&mut plaint.cause_of_action_date, args.cause_of_action_date);
    set(&mut plaint.valuation, args.valuation);
    set(&mut plaint.court_fee, args.court_fee);
    if !args.reliefs.is_empty() {
        plaint.reliefs = args.reliefs;
    }
}

fn set<T>(field: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *field = value;
    }
}

fn party(session: &Session, cmd: PartyCmd) -> Result<()> {
    active(session)?;
    match cmd {
        PartyCmd::Add {
            role,
            name,
            parent_name,
            age,
            occupation,
            address,
        } => {
            let mut party = Party::new(role.into(), name);
            party.parent_name = parent_name;
            party.age = age;
            party.occupation = occupation;
            party.address = address;
            session.dispatch(Action::AddParty(party));
        }
        PartyCmd::Remove { role, position } => {
            let role: PartyRole = role.into();
            let id = id_at(&session.state().party_ids(role), position, &role.to_string())?;
            session.dispatch(Action::RemoveParty(id));
        }
        PartyCmd::Move { role, from, to } => {
            let role: PartyRole = role.into();
            let len = session.state().party_ids(role).len();
            let from = index_of(from, len, &role.to_string())?;
            let to = index_of(to, len, &role.to_string())?;
            session.dispatch(Action::ReorderParties { role, from, to });
        }
    }
    Ok(())
}

fn schedule(session: &Session, cmd: ScheduleCmd) -> Result<()> {
    let draft = active(session)?;
    let ids: Vec<ItemId> = draft.schedule_details.schedules.iter().map(|s| s.id).collect();
    match cmd {
        ScheduleCmd::Add {
            description,
            survey_number,
            extent,
        } => {
            let mut schedule = Schedule::new(description);
            schedule.survey_number = survey_number;
            schedule.extent = extent;
            session.dispatch(Action::AddSchedule(schedule));
        }
        ScheduleCmd::Remove { position } => {
            session.dispatch(Action::RemoveSchedule(id_at(&ids, position, "schedule")?));
        }
        ScheduleCmd::Move { from, to } => {
            let from = index_of(from, ids.len(), "schedule")?;
            let to = index_of(to, ids.len(), "schedule")?;
            session.dispatch(Action::ReorderSchedules { from, to });
        }
    }
    Ok(())
}

fn document(session: &Session, cmd: DocumentCmd) -> Result<()> {
    let draft = active(session)?;
    let documents = draft.document_details.documents;
    match cmd {
        DocumentCmd::Add {
            description,
            pages,
            date,
            marked,
        } => {
            let mut doc = DocumentItem::new(description, pages);
            doc.document_date = date;
            doc.is_marked = marked;
            session.dispatch(Action::AddDocument(doc));
        }
        DocumentCmd::Remove { position } => {
            let i = index_of(position, documents.len(), "document")?;
            session.dispatch(Action::RemoveDocument(documents[i].id));
        }
        DocumentCmd::Move { from, to } => {
            let from = index_of(from, documents.len(), "document")?;
            let to = index_of(to, documents.len(), "document")?;
            session.dispatch(Action::ReorderDocuments { from, to });
        }
        DocumentCmd::Mark { position, unmark } => {
            let i = index_of(position, documents.len(), "document")?;
            let mut doc = documents[i].clone();
            doc.is_marked = !unmark;
            session.dispatch(Action::UpdateDocument(doc));
        }
    }
    Ok(())
}

fn application(session: &Session, cmd: IaCmd) -> Result<()> {
    let draft = active(session)?;
    let ids: Vec<ItemId> = draft.ia_details.applications.iter().map(|a| a.id).collect();
    match cmd {
        IaCmd::Add {
            title,
            provision,
            prayer,
        } => {
            let mut ia = InterlocutoryApplication::new(title);
            ia.provision = provision;
            ia.prayer = prayer;
            session.dispatch(Action::AddApplication(ia));
        }
        IaCmd::Remove { position } => {
            session.dispatch(Action::RemoveApplication(id_at(&ids, position, "application")?));
        }
        IaCmd::Move { from, to } => {
            let from = index_of(from, ids.len(), "application")?;
            let to = index_of(to, ids.len(), "application")?;
            session.dispatch(Action::ReorderApplications { from, to });
        }
    }
    Ok(())
}

fn judgement(session: &Session, cmd: JudgementCmd) -> Result<()> {
    let draft = active(session)?;
    let ids: Vec<ItemId> = draft.judgement_details.judgements.iter().map(|j| j.id).collect();
    match cmd {
        JudgementCmd::Add {
            citation,
            court,
            decided_on,
            summary,
        } => {
            let mut judgement = Judgement::new(citation);
            judgement.court = court;
            judgement.decided_on = decided_on;
            judgement.summary = summary;
            session.dispatch(Action::AddJudgement(judgement));
        }
        JudgementCmd::Remove { position } => {
            session.dispatch(Action::RemoveJudgement(id_at(&ids, position, "judgement")?));
        }
        JudgementCmd::Move { from, to } => {
            let from = index_of(from, ids.len(), "judgement")?;
            let to = index_of(to, ids.len(), "judgement")?;
            session.dispatch(Action::ReorderJudgements { from, to });
        }
    }
    Ok(())
}

/// Minimum fields before a step may be left.
pub struct RequiredFields;

impl StepValidator for RequiredFields {
    fn validate(&self, step: WizardStep, draft: &Draft) -> Vec<String> {
        let mut errors = Vec::new();
        match step {
            WizardStep::BasicDetails => {
                let b = &draft.basic_details;
                if b.court.as_deref().is_none_or(str::is_empty) {
                    errors.push("court is required".to_string());
                }
                if b.advocate_name.as_deref().is_none_or(str::is_empty) {
                    errors.push("advocate name is required".to_string());
                }
            }
            WizardStep::Parties => {
                if draft.party_details.plaintiffs.is_empty() {
                    errors.push("at least one plaintiff is required".to_string());
                }
                if draft.party_details.defendants.is_empty() {
                    errors.push("at least one defendant is required".to_string());
                }
            }
            _ => {}
        }
        errors
    }
}
