//! Draft data model for a multi-step suit filing.
//!
//! A [`Draft`] always carries all seven step records, possibly empty, so a
//! draft loaded from any source can be merged without presence checks.
//! Computed fields (orders, schedule letters, exhibit labels, IA numbers,
//! page totals) are owned by [`crate::derive`] and are never set by callers.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier shared by a draft's in-memory copy, snapshot, and remote record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftId(pub Uuid);

impl DraftId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DraftId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for DraftId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Stable identifier of a child row (party, schedule, document, IA, judgement).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The root record for one in-progress filing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub id: DraftId,
    pub basic_details: BasicDetails,
    pub party_details: PartyDetails,
    pub plaint_details: PlaintDetails,
    pub schedule_details: ScheduleDetails,
    pub document_details: DocumentDetails,
    pub ia_details: IaDetails,
    pub judgement_details: JudgementDetails,
    pub metadata: DraftMetadata,
}

impl Draft {
    /// An empty draft at step 1, created at `now`.
    pub fn new(id: DraftId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            basic_details: BasicDetails::default(),
            party_details: PartyDetails::default(),
            plaint_details: PlaintDetails::default(),
            schedule_details: ScheduleDetails::default(),
            document_details: DocumentDetails::default(),
            ia_details: IaDetails::default(),
            judgement_details: JudgementDetails::default(),
            metadata: DraftMetadata {
                created_at: now,
                updated_at: now,
                current_step: 1,
                completed_steps: BTreeSet::new(),
                is_complete: false,
                generated_documents: None,
            },
        }
    }

    /// Short human title, e.g. "O.S. 123/2025 - Raman v. Kumar".
    pub fn case_title(&self) -> String {
        let b = &self.basic_details;
        let mut title = String::new();
        if let Some(case_type) = &b.case_type {
            title.push_str(case_type);
        }
        if let Some(number) = &b.case_number {
            if !title.is_empty() {
                title.push(' ');
            }
            title.push_str(number);
            if let Some(year) = b.year {
                title.push_str(&format!("/{year}"));
            }
        }
        let first = |parties: &[Party]| parties.first().map(|p| p.name.clone());
        if let (Some(p), Some(d)) = (
            first(&self.party_details.plaintiffs),
            first(&self.party_details.defendants),
        ) {
            if !title.is_empty() {
                title.push_str(" - ");
            }
            title.push_str(&format!("{p} v. {d}"));
        }
        if title.is_empty() {
            title.push_str("Untitled draft");
        }
        title
    }
}

/// Which filing is being drafted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AppearanceKind {
    #[default]
    Vakalathnama,
    MemoOfAppearance,
}

impl fmt::Display for AppearanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vakalathnama => f.write_str("Vakalathnama"),
            Self::MemoOfAppearance => f.write_str("Memo of Appearance"),
        }
    }
}

/// Step 1: court and advocate particulars.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BasicDetails {
    pub appearance: AppearanceKind,
    pub court: Option<String>,
    pub district: Option<String>,
    pub case_type: Option<String>,
    pub case_number: Option<String>,
    /// Case year; also drives IA numbering.
    pub year: Option<i32>,
    pub filing_date: Option<NaiveDate>,
    pub advocate_name: Option<String>,
    pub advocate_enrolment_no: Option<String>,
    pub advocate_address: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PartyRole {
    Plaintiff,
    Defendant,
}

impl fmt::Display for PartyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plaintiff => f.write_str("plaintiff"),
            Self::Defendant => f.write_str("defendant"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub id: ItemId,
    pub role: PartyRole,
    /// 1-based position within the role group.
    pub order: u32,
    pub name: String,
    #[serde(default)]
    pub parent_name: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl Party {
    pub fn new(role: PartyRole, name: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            role,
            order: 0,
            name: name.into(),
            parent_name: None,
            age: None,
            occupation: None,
            address: None,
        }
    }
}

/// Step 2: plaintiffs and defendants, each ordered independently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartyDetails {
    pub plaintiffs: Vec<Party>,
    pub defendants: Vec<Party>,
}

impl PartyDetails {
    pub fn group(&self, role: PartyRole) -> &Vec<Party> {
        match role {
            PartyRole::Plaintiff => &self.plaintiffs,
            PartyRole::Defendant => &self.defendants,
        }
    }

    pub fn group_mut(&mut self, role: PartyRole) -> &mut Vec<Party> {
        match role {
            PartyRole::Plaintiff => &mut self.plaintiffs,
            PartyRole::Defendant => &mut self.defendants,
        }
    }

    pub fn find(&self, id: ItemId) -> Option<&Party> {
        self.plaintiffs
            .iter()
            .chain(self.defendants.iter())
            .find(|p| p.id == id)
    }
}

/// Step 3: the body of the plaint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaintDetails {
    pub facts: String,
    pub cause_of_action: String,
    pub cause_of_action_date: Option<NaiveDate>,
    pub jurisdiction: String,
    pub valuation: Option<f64>,
    pub court_fee: Option<f64>,
    pub reliefs: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Boundaries {
    pub north: Option<String>,
    pub south: Option<String>,
    pub east: Option<String>,
    pub west: Option<String>,
}

/// A property schedule; `name` is the position letter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: ItemId,
    pub name: String,
    pub order: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub survey_number: Option<String>,
    #[serde(default)]
    pub extent: Option<String>,
    #[serde(default)]
    pub boundaries: Boundaries,
}

impl Schedule {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            name: String::new(),
            order: 0,
            description: description.into(),
            survey_number: None,
            extent: None,
            boundaries: Boundaries::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScheduleDetails {
    pub schedules: Vec<Schedule>,
}

/// A document produced with the plaint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentItem {
    pub id: ItemId,
    pub serial_no: u32,
    pub order: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub document_date: Option<NaiveDate>,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub is_marked: bool,
    /// `EX-A{n}` when marked, otherwise `None`.
    #[serde(default)]
    pub exhibit_label: Option<String>,
}

impl DocumentItem {
    pub fn new(description: impl Into<String>, pages: u32) -> Self {
        Self {
            id: ItemId::new(),
            serial_no: 0,
            order: 0,
            description: description.into(),
            document_date: None,
            pages,
            is_marked: false,
            exhibit_label: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentDetails {
    pub documents: Vec<DocumentItem>,
    pub total_pages: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterlocutoryApplication {
    pub id: ItemId,
    /// `IA {position}/{year}`.
    pub number: String,
    pub order: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub provision: Option<String>,
    #[serde(default)]
    pub prayer: String,
    #[serde(default)]
    pub filing_date: Option<NaiveDate>,
}

impl InterlocutoryApplication {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            number: String::new(),
            order: 0,
            title: title.into(),
            provision: None,
            prayer: String::new(),
            filing_date: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IaDetails {
    pub applications: Vec<InterlocutoryApplication>,
}

/// A cited precedent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Judgement {
    pub id: ItemId,
    pub order: u32,
    #[serde(default)]
    pub citation: String,
    #[serde(default)]
    pub court: Option<String>,
    #[serde(default)]
    pub decided_on: Option<NaiveDate>,
    #[serde(default)]
    pub summary: String,
}

impl Judgement {
    pub fn new(citation: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            order: 0,
            citation: citation.into(),
            court: None,
            decided_on: None,
            summary: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JudgementDetails {
    pub judgements: Vec<Judgement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Html,
}

/// Reference to an output of the external document generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedDocument {
    pub id: ItemId,
    pub format: DocumentFormat,
    pub file_name: String,
    #[serde(default)]
    pub location: Option<String>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftMetadata {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub current_step: u8,
    #[serde(default)]
    pub completed_steps: BTreeSet<u8>,
    #[serde(default)]
    pub is_complete: bool,
    #[serde(default)]
    pub generated_documents: Option<Vec<GeneratedDocument>>,
}
