use std::collections::{BTreeSet, VecDeque};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::api::{AnswerVerdict, EntryWire, FillBlankQuestion, MonthlyStat, NewEntry, StatsSummary};
use crate::capabilities::{ConnectionState, TimerId};
use crate::config::ClientConfig;

pub const MAX_VISIBLE_TOASTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    #[default]
    Learning,
    Learned,
}

impl EntryStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Learning => "learning",
            Self::Learned => "learned",
        }
    }

    /// Unknown or missing values read as `Learning`.
    #[must_use]
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("learned") => Self::Learned,
            _ => Self::Learning,
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Learning => Self::Learned,
            Self::Learned => Self::Learning,
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Learning,
    Learned,
}

impl StatusFilter {
    #[must_use]
    pub const fn as_query(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Learning => "learning",
            Self::Learned => "learned",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pronunciation {
    pub ipa_uk: Option<String>,
    pub ipa_us: Option<String>,
    pub audio_uk: Option<String>,
    pub audio_us: Option<String>,
}

impl Pronunciation {
    #[must_use]
    pub const fn has_ipa(&self) -> bool {
        self.ipa_uk.is_some() || self.ipa_us.is_some()
    }
}

/// A client-side copy of one server record. Possibly stale; never edited
/// locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EntryWire", into = "EntryWire")]
pub struct VocabularyEntry {
    pub id: EntryId,
    pub word: String,
    pub definition: String,
    pub example: Option<String>,
    pub translation: Option<String>,
    pub status: EntryStatus,
    pub pronunciation: Option<Pronunciation>,
    pub times_practiced: u32,
    pub created_at: Option<String>,
    pub learned_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult {
    pub items: Vec<VocabularyEntry>,
    pub total_items: u64,
    pub total_pages: u32,
    pub current_page: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageResult {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The server echoes the requested page even when it lies past the end.
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        self.current_page > self.total_pages.max(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    #[default]
    Vocabulary,
    Flashcard,
    FillBlank,
    Statistics,
}

impl Section {
    pub const ALL: [Self; 4] = [Self::Vocabulary, Self::Flashcard, Self::FillBlank, Self::Statistics];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vocabulary => "vocabulary",
            Self::Flashcard => "flashcard",
            Self::FillBlank => "fill_blank",
            Self::Statistics => "statistics",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListViewState {
    pub page: u32,
    pub search_term: String,
    pub status_filter: StatusFilter,
}

impl Default for ListViewState {
    fn default() -> Self {
        Self {
            page: 1,
            search_term: String::new(),
            status_filter: StatusFilter::All,
        }
    }
}

impl ListViewState {
    #[must_use]
    pub fn has_search(&self) -> bool {
        !self.search_term.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Monotonic token source. A response applies only when it carries the
/// most recently issued token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestSeq {
    latest: u64,
}

impl RequestSeq {
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    #[must_use]
    pub const fn is_latest(&self, token: u64) -> bool {
        self.latest == token
    }
}

#[derive(Debug, Default)]
pub struct VocabularyState {
    pub list: ListViewState,
    /// Raw contents of the search box, committed to `list.search_term` only
    /// once the debounce elapses.
    pub search_input: String,
    pub search_timer: Option<TimerId>,
    pub seq: RequestSeq,
    pub load: LoadState,
    pub page: Option<PageResult>,
    /// Search term of the request in flight, and of the one that produced
    /// `page`. They differ while a new search is loading.
    pub pending_term: String,
    pub page_term: String,
    pub form: NewEntry,
    pub submitting: bool,
    pub pending_deletes: BTreeSet<EntryId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashcardSession {
    pub entry: VocabularyEntry,
    pub revealed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashcardPhase {
    Empty,
    ShownFront,
    ShownBack,
}

#[derive(Debug, Default)]
pub struct FlashcardState {
    pub filter: StatusFilter,
    pub session: Option<FlashcardSession>,
    pub seq: RequestSeq,
    pub loading: bool,
}

impl FlashcardState {
    #[must_use]
    pub fn phase(&self) -> FlashcardPhase {
        match &self.session {
            None => FlashcardPhase::Empty,
            Some(s) if s.revealed => FlashcardPhase::ShownBack,
            Some(_) => FlashcardPhase::ShownFront,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillBlankSession {
    pub question: FillBlankQuestion,
    pub verdict: Option<AnswerVerdict>,
    pub checking: bool,
    /// Identifies this session to its auto-advance timer.
    pub round: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillBlankPhase {
    Empty,
    QuestionActive,
    Answered,
}

#[derive(Debug, Default)]
pub struct FillBlankState {
    pub filter: StatusFilter,
    pub session: Option<FillBlankSession>,
    pub answer_draft: String,
    pub seq: RequestSeq,
    pub rounds: u64,
    pub loading: bool,
}

impl FillBlankState {
    #[must_use]
    pub fn phase(&self) -> FillBlankPhase {
        match &self.session {
            None => FillBlankPhase::Empty,
            Some(s) if s.verdict.is_some() => FillBlankPhase::Answered,
            Some(_) => FillBlankPhase::QuestionActive,
        }
    }
}

#[derive(Debug, Default)]
pub struct StatisticsState {
    pub summary: Option<StatsSummary>,
    pub monthly: Vec<MonthlyStat>,
    pub summary_seq: RequestSeq,
    pub monthly_seq: RequestSeq,
    pub load: LoadState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl ToastKind {
    #[must_use]
    pub const fn default_duration_ms(self) -> u64 {
        match self {
            Self::Info => 3000,
            Self::Success => 2000,
            Self::Warning => 4000,
            Self::Error => 5000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
    pub duration_ms: u64,
}

#[derive(Debug, Default)]
pub struct Model {
    pub config: ClientConfig,
    pub started: bool,
    pub section: Section,
    pub vocabulary: VocabularyState,
    pub flashcard: FlashcardState,
    pub fill_blank: FillBlankState,
    pub statistics: StatisticsState,
    pub toasts: VecDeque<Toast>,
    pub next_toast_id: u64,
    pub next_timer_id: u64,
    pub connection: ConnectionState,
    pub playing_audio: Option<String>,
}

impl Model {
    pub fn allocate_timer(&mut self) -> TimerId {
        self.next_timer_id += 1;
        TimerId(self.next_timer_id)
    }

    /// Queues a toast, dropping the oldest once the visible limit is hit.
    pub fn push_toast(&mut self, message: impl Into<String>, kind: ToastKind) -> u64 {
        self.next_toast_id += 1;
        let id = self.next_toast_id;
        self.toasts.push_back(Toast {
            id,
            message: message.into(),
            kind,
            duration_ms: kind.default_duration_ms(),
        });
        while self.toasts.len() > MAX_VISIBLE_TOASTS {
            self.toasts.pop_front();
        }
        id
    }

    /// Returns whether a toast was actually removed.
    pub fn dismiss_toast(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    #[must_use]
    pub fn is_active(&self, section: Section) -> bool {
        self.section == section
    }
}
