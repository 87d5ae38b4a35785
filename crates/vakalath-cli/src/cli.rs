use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use vakalath_core::DraftId;
use vakalath_core::PartyRole;
use vakalath_core::model::AppearanceKind;

#[derive(Parser, Debug)]
#[command(
    name = "vakalath",
    version,
    about = "Draft court filings step by step, with local snapshots and remote sync",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Directory holding the local draft snapshot.
    #[arg(long, global = true, env = "VAKALATH_DATA_DIR", default_value = ".vakalath")]
    pub data_dir: PathBuf,

    /// Base URL of the remote draft store (default: in-process only).
    #[arg(long, global = true, env = "VAKALATH_REMOTE_URL")]
    pub remote_url: Option<String>,

    /// Signed-in user id used for remote saves.
    #[arg(long, global = true, env = "VAKALATH_USER")]
    pub user: Option<String>,

    /// Quiet period before an automatic remote save, in seconds.
    #[arg(long, global = true, env = "VAKALATH_DEBOUNCE_SECS", default_value_t = 30)]
    pub debounce_secs: u64,

    #[command(subcommand)]
    pub command: Command,
}

/// One line typed into `vakalath shell`.
#[derive(Parser, Debug)]
#[command(name = "vakalath", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start a new, empty draft (replaces the active one).
    New,

    /// Show the active draft as a card.
    Show,

    /// Set court, case, and advocate particulars (step 1).
    Basic(BasicArgs),

    /// Set plaint particulars (step 3).
    Plaint(PlaintArgs),

    /// Plaintiffs and defendants (step 2).
    #[command(subcommand)]
    Party(PartyCmd),

    /// Property schedules (step 4).
    #[command(subcommand)]
    Schedule(ScheduleCmd),

    /// Documents relied on (step 5).
    #[command(subcommand)]
    Document(DocumentCmd),

    /// Interlocutory applications (step 6).
    #[command(subcommand)]
    Ia(IaCmd),

    /// Judgements relied on (step 7).
    #[command(subcommand)]
    Judgement(JudgementCmd),

    /// Validate the current step and move forward (shell only).
    Next,

    /// Move back one step (shell only).
    Prev,

    /// Jump to a step, 1-7 (shell only).
    Goto { step: u8 },

    /// Push the active draft to the remote store now.
    Save,

    /// List the user's remote drafts.
    #[command(alias = "ls")]
    ListRemote,

    /// Load a remote draft and make it active.
    OpenRemote { id: DraftId },

    /// Print the flattened export view as JSON.
    Export {
        #[arg(long)]
        pretty: bool,
    },

    /// Discard the active draft.
    Clear {
        /// Also delete the local snapshot file.
        #[arg(long)]
        purge: bool,
    },

    /// Interactive session; automatic remote saves run while it is open.
    Shell,
}

impl Command {
    /// Moves the wizard cursor. The cursor is not restored on reopen.
    pub fn is_navigation(&self) -> bool {
        matches!(self, Command::Next | Command::Prev | Command::Goto { .. })
    }
}

#[derive(Args, Debug, Default)]
pub struct BasicArgs {
    #[arg(long, value_enum)]
    pub appearance: Option<AppearanceArg>,
    #[arg(long)]
    pub court: Option<String>,
    #[arg(long)]
    pub district: Option<String>,
    #[arg(long)]
    pub case_type: Option<String>,
    #[arg(long)]
    pub case_number: Option<String>,
    #[arg(long)]
    pub year: Option<i32>,
    #[arg(long, value_parser = parse_date)]
    pub filing_date: Option<NaiveDate>,
    #[arg(long)]
    pub advocate_name: Option<String>,
    #[arg(long)]
    pub enrolment_no: Option<String>,
    #[arg(long)]
    pub advocate_address: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct PlaintArgs {
    #[arg(long)]
    pub facts: Option<String>,
    #[arg(long)]
    pub cause_of_action: Option<String>,
    #[arg(long, value_parser = parse_date)]
    pub cause_of_action_date: Option<NaiveDate>,
    #[arg(long)]
    pub jurisdiction: Option<String>,
    #[arg(long)]
    pub valuation: Option<f64>,
    #[arg(long)]
    pub court_fee: Option<f64>,
    /// Relief sought; repeat for several. Replaces the existing list.
    #[arg(long = "relief")]
    pub reliefs: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum PartyCmd {
    Add {
        #[arg(value_enum)]
        role: RoleArg,
        name: String,
        #[arg(long)]
        parent_name: Option<String>,
        #[arg(long)]
        age: Option<u32>,
        #[arg(long)]
        occupation: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    /// Remove by 1-based position within the role group.
    Remove {
        #[arg(value_enum)]
        role: RoleArg,
        position: usize,
    },
    /// Move a party from one 1-based position to another.
    Move {
        #[arg(value_enum)]
        role: RoleArg,
        from: usize,
        to: usize,
    },
}

#[derive(Subcommand, Debug)]
pub enum ScheduleCmd {
    Add {
        description: String,
        #[arg(long)]
        survey_number: Option<String>,
        #[arg(long)]
        extent: Option<String>,
    },
    Remove { position: usize },
    Move { from: usize, to: usize },
}

#[derive(Subcommand, Debug)]
pub enum DocumentCmd {
    Add {
        description: String,
        #[arg(long, default_value_t = 1)]
        pages: u32,
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        /// Mark as an exhibit.
        #[arg(long)]
        marked: bool,
    },
    Remove { position: usize },
    Move { from: usize, to: usize },
    /// Mark (or with --unmark, unmark) a document as an exhibit.
    Mark {
        position: usize,
        #[arg(long)]
        unmark: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum IaCmd {
    Add {
        title: String,
        #[arg(long)]
        provision: Option<String>,
        #[arg(long, default_value = "")]
        prayer: String,
    },
    Remove { position: usize },
    Move { from: usize, to: usize },
}

#[derive(Subcommand, Debug)]
pub enum JudgementCmd {
    Add {
        citation: String,
        #[arg(long)]
        court: Option<String>,
        #[arg(long, value_parser = parse_date)]
        decided_on: Option<NaiveDate>,
        #[arg(long, default_value = "")]
        summary: String,
    },
    Remove { position: usize },
    Move { from: usize, to: usize },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoleArg {
    Plaintiff,
    Defendant,
}

impl From<RoleArg> for PartyRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Plaintiff => PartyRole::Plaintiff,
            RoleArg::Defendant => PartyRole::Defendant,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppearanceArg {
    Vakalathnama,
    Memo,
}

impl From<AppearanceArg> for AppearanceKind {
    fn from(kind: AppearanceArg) -> Self {
        match kind {
            AppearanceArg::Vakalathnama => AppearanceKind::Vakalathnama,
            AppearanceArg::Memo => AppearanceKind::MemoOfAppearance,
        }
    }
}

/// Accepts `2025-03-14` or `14/03/2025`.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%Y"))
        .map_err(|_| format!("invalid date `{s}`, expected YYYY-MM-DD or DD/MM/YYYY"))
}

/// Split a shell line into words; double quotes group words.
pub fn split_line(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;
    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if quoted {
        return Err("unterminated quote".into());
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
