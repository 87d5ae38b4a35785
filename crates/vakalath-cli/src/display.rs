//! Vertical card display for drafts.
//!
//! Renders the flattened export view of the active draft as a grouped,
//! human-readable card, preceded by the wizard position and sync status.

use vakalath_core::export::ExportSection;
use vakalath_core::{DraftState, ExportView, WizardStep, WizardView};
use vakalath_sync::DraftSummary;

const MAX_SECTION_ROWS: usize = 40;
const LABEL_WIDTH: usize = 26;

pub fn print_draft_card(state: &DraftState) {
    let Some(draft) = state.current_draft.as_ref() else {
        println!("No active draft. Run `vakalath new` or `vakalath open-remote <ID>`.");
        return;
    };
    let view = ExportView::from_draft(draft);

    println!("=== {} ===", view.title);
    println!("{}  ({})", view.appearance, view.draft_id);
    println!();

    print_wizard(state);
    print_status(state);

    for section in &view.sections {
        print_section(section);
    }
}

fn print_wizard(state: &DraftState) {
    let wizard = WizardView::new(state);
    println!("Wizard");
    for step in WizardStep::ALL {
        let marker = if Some(step) == wizard.current() {
            ">"
        } else if wizard.is_completed(step) {
            "x"
        } else {
            " "
        };
        println!("  [{marker}] {step}");
        for error in wizard.errors(step) {
            println!("        ! {error}");
        }
    }
    println!("  {:<LABEL_WIDTH$} {}%", "Progress", wizard.progress_percent());
    println!();
}

fn print_status(state: &DraftState) {
    println!("Sync");
    let saved = match (&state.last_saved, state.is_saving) {
        (_, true) => "saving...".to_string(),
        (Some(at), false) => at.format("%d/%m/%Y %H:%M:%S UTC").to_string(),
        (None, false) => "never".to_string(),
    };
    println!("  {:<LABEL_WIDTH$} {}", "Last saved", saved);
    if let Some(error) = &state.save_error {
        println!("  {:<LABEL_WIDTH$} {}", "Save error", error);
    }
    if state.generation.is_generating {
        println!("  {:<LABEL_WIDTH$} {}%", "Generating", state.generation.progress);
    }
    println!();
}

fn print_section(section: &ExportSection) {
    println!("{}", section.title);
    for row in section.rows.iter().take(MAX_SECTION_ROWS) {
        println!("  {:<LABEL_WIDTH$} {}", row.label, row.value);
    }
    if section.rows.len() > MAX_SECTION_ROWS {
        println!("    ... and {} more", section.rows.len() - MAX_SECTION_ROWS);
    }
    println!();
}

pub fn print_remote_list(drafts: &[DraftSummary]) {
    if drafts.is_empty() {
        println!("No remote drafts.");
        return;
    }
    println!("{:<36}  {:<4}  {:<19}  TITLE", "ID", "STEP", "UPDATED");
    for d in drafts {
        println!(
            "{:<36}  {:<4}  {:<19}  {}",
            d.id,
            d.current_step,
            d.updated_at.format("%Y-%m-%d %H:%M:%S"),
            d.title
        );
    }
}
