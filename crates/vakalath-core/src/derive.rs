//! Recomputation of derived fields on a draft's child collections.
//!
//! Every function here rebuilds its computed fields from scratch over the
//! whole collection. Callers run them after each mutation, so no operation
//! ever relies on a previous operation having left the fields correct.

use chrono::{Datelike, Utc};

use crate::model::{Draft, DocumentDetails, InterlocutoryApplication, Judgement, Party, Schedule};

/// Prefix for exhibit labels: first marked document is `EX-A1`.
pub const EXHIBIT_PREFIX: &str = "EX-A";

/// Bijective base-26 letter for a 0-based position: 0 → "A", 25 → "Z", 26 → "AA".
pub fn schedule_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Assign `order = 1..=N` within one role group.
pub fn renumber_parties(parties: &mut [Party]) {
    for (i, party) in parties.iter_mut().enumerate() {
        party.order = i as u32 + 1;
    }
}

pub fn reletter_schedules(schedules: &mut [Schedule]) {
    for (i, schedule) in schedules.iter_mut().enumerate() {
        schedule.order = i as u32 + 1;
        schedule.name = schedule_letter(i);
    }
}

/// Serial numbers, exhibit labels, and the page total (saturating at `u32::MAX`).
pub fn relabel_documents(details: &mut DocumentDetails) {
    let mut marked = 0u32;
    for (i, doc) in details.documents.iter_mut().enumerate() {
        doc.serial_no = i as u32 + 1;
        doc.order = i as u32 + 1;
        doc.exhibit_label = if doc.is_marked {
            marked += 1;
            Some(format!("{EXHIBIT_PREFIX}{marked}"))
        } else {
            None
        };
    }
    details.total_pages = details
        .documents
        .iter()
        .fold(0u32, |total, d| total.saturating_add(d.pages));
}

/// Number applications `IA {position}/{year}`.
pub fn renumber_applications(applications: &mut [InterlocutoryApplication], year: i32) {
    for (i, ia) in applications.iter_mut().enumerate() {
        ia.order = i as u32 + 1;
        ia.number = format!("IA {}/{}", i + 1, year);
    }
}

pub fn reorder_judgements(judgements: &mut [Judgement]) {
    for (i, judgement) in judgements.iter_mut().enumerate() {
        judgement.order = i as u32 + 1;
    }
}

/// Year used for IA numbers: the case year, else the current calendar year.
pub fn filing_year(draft: &Draft) -> i32 {
    draft
        .basic_details
        .year
        .unwrap_or_else(|| Utc::now().year())
}

/// Move the element at `from` to position `to`, shifting the rest.
///
/// Returns `false` (and leaves the slice alone) when either index is out of range.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        return false;
    }
    if from != to {
        let item = items.remove(from);
        items.insert(to, item);
    }
    true
}
