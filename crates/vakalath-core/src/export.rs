//! Flattened, ordered view of a draft for document generators.
//!
//! Generators (PDF, DOCX, HTML) consume titled sections of label/value rows
//! and never walk the draft model themselves. Empty values are dropped, and
//! a section with no rows is omitted.

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{Draft, Party};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportSection {
    pub title: String,
    pub rows: Vec<ExportRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportView {
    pub draft_id: String,
    pub title: String,
    pub appearance: String,
    pub sections: Vec<ExportSection>,
}

impl ExportView {
    pub fn from_draft(draft: &Draft) -> Self {
        let b = &draft.basic_details;
        let mut sections = Vec::new();

        let mut basic = SectionBuilder::new("Basic Details");
        basic.opt("Court", b.court.as_deref());
        basic.opt("District", b.district.as_deref());
        basic.opt("Case type", b.case_type.as_deref());
        basic.opt("Case number", b.case_number.as_deref());
        basic.opt("Year", b.year.map(|y| y.to_string()).as_deref());
        basic.opt("Filing date", b.filing_date.map(fmt_date).as_deref());
        basic.opt("Advocate", b.advocate_name.as_deref());
        basic.opt("Enrolment no.", b.advocate_enrolment_no.as_deref());
        basic.opt("Advocate address", b.advocate_address.as_deref());
        sections.extend(basic.finish());

        let mut parties = SectionBuilder::new("Parties");
        for p in &draft.party_details.plaintiffs {
            parties.row(format!("Plaintiff {}", p.order), describe_party(p));
        }
        for p in &draft.party_details.defendants {
            parties.row(format!("Defendant {}", p.order), describe_party(p));
        }
        sections.extend(parties.finish());

        let plaint = &draft.plaint_details;
        let mut body = SectionBuilder::new("Plaint");
        body.text("Facts", &plaint.facts);
        body.text("Cause of action", &plaint.cause_of_action);
        body.opt(
            "Cause of action arose on",
            plaint.cause_of_action_date.map(fmt_date).as_deref(),
        );
        body.text("Jurisdiction", &plaint.jurisdiction);
        body.opt("Valuation", plaint.valuation.map(fmt_amount).as_deref());
        body.opt("Court fee", plaint.court_fee.map(fmt_amount).as_deref());
        for (i, relief) in plaint.reliefs.iter().enumerate() {
            body.text(&format!("Relief {}", i + 1), relief);
        }
        sections.extend(body.finish());

        let mut schedules = SectionBuilder::new("Schedules");
        for s in &draft.schedule_details.schedules {
            let mut value = s.description.clone();
            if let Some(survey) = &s.survey_number {
                value.push_str(&format!(" (Sy. No. {survey})"));
            }
            if let Some(extent) = &s.extent {
                value.push_str(&format!(", extent {extent}"));
            }
            schedules.row(format!("{} Schedule", s.name), value);
        }
        sections.extend(schedules.finish());

        let docs = &draft.document_details;
        let mut documents = SectionBuilder::new("Documents");
        for d in &docs.documents {
            let mut value = format!("{} ({} pp.)", d.description, d.pages);
            if let Some(date) = d.document_date {
                value.push_str(&format!(", dated {}", fmt_date(date)));
            }
            if let Some(label) = &d.exhibit_label {
                value.push_str(&format!(" [{label}]"));
            }
            documents.row(format!("{}.", d.serial_no), value);
        }
        if !docs.documents.is_empty() {
            documents.row("Total pages".into(), docs.total_pages.to_string());
        }
        sections.extend(documents.finish());

        let mut ias = SectionBuilder::new("Interlocutory Applications");
        for ia in &draft.ia_details.applications {
            let mut value = ia.title.clone();
            if let Some(provision) = &ia.provision {
                value.push_str(&format!(" under {provision}"));
            }
            ias.row(ia.number.clone(), value);
        }
        sections.extend(ias.finish());

        let mut judgements = SectionBuilder::new("Judgements Relied On");
        for j in &draft.judgement_details.judgements {
            judgements.row(format!("{}.", j.order), j.citation.clone());
        }
        sections.extend(judgements.finish());

        Self {
            draft_id: draft.id.to_string(),
            title: draft.case_title(),
            appearance: b.appearance.to_string(),
            sections,
        }
    }

    pub fn section(&self, title: &str) -> Option<&ExportSection> {
        self.sections.iter().find(|s| s.title == title)
    }
}

struct SectionBuilder {
    title: &'static str,
    rows: Vec<ExportRow>,
}

impl SectionBuilder {
    fn new(title: &'static str) -> Self {
        Self {
            title,
            rows: Vec::new(),
        }
    }

    fn row(&mut self, label: String, value: String) {
        self.rows.push(ExportRow { label, value });
    }

    fn text(&mut self, label: &str, value: &str) {
        if !value.trim().is_empty() {
            self.row(label.to_string(), value.trim().to_string());
        }
    }

    fn opt(&mut self, label: &str, value: Option<&str>) {
        if let Some(v) = value {
            self.text(label, v);
        }
    }

    fn finish(self) -> Option<ExportSection> {
        (!self.rows.is_empty()).then(|| ExportSection {
            title: self.title.to_string(),
            rows: self.rows,
        })
    }
}

fn describe_party(p: &Party) -> String {
    let mut s = p.name.clone();
    if let Some(parent) = &p.parent_name {
        s.push_str(&format!(", S/o or D/o {parent}"));
    }
    if let Some(age) = p.age {
        s.push_str(&format!(", aged {age}"));
    }
    if let Some(occupation) = &p.occupation {
        s.push_str(&format!(", {occupation}"));
    }
    if let Some(address) = &p.address {
        s.push_str(&format!(", residing at {address}"));
    }
    s
}

fn fmt_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn fmt_amount(amount: f64) -> String {
    format!("Rs. {amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentItem, DraftId, PartyRole};
    use chrono::Utc;

    #[test]
    fn empty_draft_has_no_sections() {
        let draft = Draft::new(DraftId::new(), Utc::now());
        let view = ExportView::from_draft(&draft);
        assert!(view.sections.is_empty());
        assert_eq!(view.appearance, "Vakalathnama");
        assert_eq!(view.title, "Untitled draft");
    }

    #[test]
    fn sections_follow_wizard_order() {
        let mut draft = Draft::new(DraftId::new(), Utc::now());
        draft.basic_details.court = Some("Sub Court, Kottayam".into());
        draft.basic_details.filing_date = NaiveDate::from_ymd_opt(2025, 1, 9);
        let mut p = Party::new(PartyRole::Plaintiff, "Mathew");
        p.order = 1;
        p.age = Some(52);
        draft.party_details.plaintiffs.push(p);
        let mut doc = DocumentItem::new("Sale deed", 6);
        doc.serial_no = 1;
        doc.exhibit_label = Some("EX-A1".into());
        draft.document_details.documents.push(doc);
        draft.document_details.total_pages = 6;

        let view = ExportView::from_draft(&draft);
        let titles: Vec<&str> = view.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Basic Details", "Parties", "Documents"]);

        let basic = view.section("Basic Details").unwrap();
        assert_eq!(basic.rows[1].value, "09/01/2025");
        let parties = view.section("Parties").unwrap();
        assert_eq!(parties.rows[0].label, "Plaintiff 1");
        assert_eq!(parties.rows[0].value, "Mathew, aged 52");
        let docs = view.section("Documents").unwrap();
        assert_eq!(docs.rows[0].value, "Sale deed (6 pp.) [EX-A1]");
        assert_eq!(docs.rows[1].value, "6");
    }
}
