use serde::{Deserialize, Serialize};

use crate::api::{MonthlyStat, NewEntry, StatsSummary};
use crate::capabilities::ConnectionState;
use crate::model::{
    EntryStatus, FillBlankPhase, FlashcardPhase, LoadState, Model, PageResult, Section,
    StatusFilter, Toast, ToastKind, VocabularyEntry,
};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ViewModel {
    pub section: Section,
    pub vocabulary: VocabularyView,
    pub flashcard: FlashcardView,
    pub fill_blank: FillBlankView,
    pub statistics: StatisticsView,
    pub toasts: Vec<ToastView>,
    pub connection: ConnectionState,
    pub connected: bool,
    pub playing_audio: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct VocabularyView {
    pub form: NewEntry,
    pub submitting: bool,
    pub search_input: String,
    pub status_filter: StatusFilter,
    pub is_loading: bool,
    pub body: ListBody,
    pub pagination: Option<PaginationView>,
}

/// What the list area shows. Empty results are states, not errors.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListBody {
    Loading,
    Failed { message: String },
    NoWords { message: String },
    NoMatches { term: String, message: String },
    Entries { items: Vec<EntryView> },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct EntryView {
    pub id: u64,
    pub word: String,
    pub definition: String,
    pub example: Option<String>,
    pub translation: Option<String>,
    pub status: String,
    pub times_practiced: String,
    pub ipa_uk: Option<String>,
    pub ipa_us: Option<String>,
    pub audio_uk: Option<String>,
    pub audio_us: Option<String>,
    pub can_fetch_pronunciation: bool,
    /// Status the toggle button switches to.
    pub toggle_to: EntryStatus,
    pub toggle_label: String,
    pub delete_pending: bool,
}

impl EntryView {
    fn new(entry: &VocabularyEntry, delete_pending: bool) -> Self {
        let pronunciation = entry.pronunciation.clone().unwrap_or_default();
        let toggle_to = entry.status.toggled();
        Self {
            id: entry.id.0,
            word: entry.word.clone(),
            definition: entry.definition.clone(),
            example: entry.example.clone(),
            translation: entry.translation.clone(),
            status: entry.status.as_str().to_string(),
            times_practiced: entry.times_practiced.to_string(),
            can_fetch_pronunciation: !pronunciation.has_ipa(),
            ipa_uk: pronunciation.ipa_uk,
            ipa_us: pronunciation.ipa_us,
            audio_uk: pronunciation.audio_uk,
            audio_us: pronunciation.audio_us,
            toggle_to,
            toggle_label: match toggle_to {
                EntryStatus::Learned => "Mark as Learned".into(),
                EntryStatus::Learning => "Mark as Learning".into(),
            },
            delete_pending,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaginationView {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

/// Controls only appear with more than one page. Each button is disabled
/// at its edge or when the server says there is nothing that way.
#[must_use]
pub fn pagination_view(page: &PageResult) -> Option<PaginationView> {
    if page.total_pages <= 1 {
        return None;
    }
    Some(PaginationView {
        current_page: page.current_page,
        total_pages: page.total_pages,
        total_items: page.total_items,
        prev_disabled: page.current_page <= 1 || !page.has_prev,
        next_disabled: page.current_page >= page.total_pages || !page.has_next,
    })
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FlashcardView {
    pub phase: FlashcardPhase,
    pub filter: StatusFilter,
    pub is_loading: bool,
    pub card: Option<FlashcardCard>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FlashcardCard {
    pub id: u64,
    pub word: String,
    pub ipa_uk: Option<String>,
    pub ipa_us: Option<String>,
    pub audio_uk: Option<String>,
    pub audio_us: Option<String>,
    /// Present only once the card is flipped.
    pub back: Option<FlashcardBack>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FlashcardBack {
    pub definition: String,
    pub example: Option<String>,
    pub translation: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FillBlankView {
    pub phase: FillBlankPhase,
    pub filter: StatusFilter,
    pub is_loading: bool,
    pub question: Option<String>,
    pub hint: Option<String>,
    pub answer_draft: String,
    pub checking: bool,
    pub verdict: Option<VerdictView>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct VerdictView {
    pub correct: bool,
    pub correct_answer: String,
    pub message: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct StatisticsView {
    pub is_loading: bool,
    pub summary: Option<StatsSummary>,
    /// Share of learned words, 0..=100.
    pub learned_percent: u32,
    pub monthly: Vec<MonthlyStat>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ToastView {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
    pub duration_ms: u64,
}

impl From<&Toast> for ToastView {
    fn from(toast: &Toast) -> Self {
        Self {
            id: toast.id,
            message: toast.message.clone(),
            kind: toast.kind,
            duration_ms: toast.duration_ms,
        }
    }
}

pub(crate) fn build(model: &Model) -> ViewModel {
    ViewModel {
        section: model.section,
        vocabulary: vocabulary_view(model),
        flashcard: flashcard_view(model),
        fill_blank: fill_blank_view(model),
        statistics: statistics_view(model),
        toasts: model.toasts.iter().map(ToastView::from).collect(),
        connection: model.connection,
        connected: model.connection.is_connected(),
        playing_audio: model.playing_audio.clone(),
    }
}

fn vocabulary_view(model: &Model) -> VocabularyView {
    let state = &model.vocabulary;
    let body = match (&state.page, state.load) {
        (Some(page), _) if !page.is_empty() => ListBody::Entries {
            items: page
                .items
                .iter()
                .map(|e| EntryView::new(e, state.pending_deletes.contains(&e.id)))
                .collect(),
        },
        (Some(_), _) if !state.page_term.is_empty() => ListBody::NoMatches {
            term: state.page_term.clone(),
            message: format!("No words found matching \"{}\"", state.page_term),
        },
        (Some(_), _) => ListBody::NoWords {
            message: "No words yet. Add your first word above!".into(),
        },
        (None, LoadState::Failed) => ListBody::Failed {
            message: "Failed to load vocabulary".into(),
        },
        (None, _) => ListBody::Loading,
    };

    VocabularyView {
        form: state.form.clone(),
        submitting: state.submitting,
        search_input: state.search_input.clone(),
        status_filter: state.list.status_filter,
        is_loading: state.load == LoadState::Loading,
        body,
        pagination: state.page.as_ref().and_then(pagination_view),
    }
}

fn flashcard_view(model: &Model) -> FlashcardView {
    let state = &model.flashcard;
    let card = state.session.as_ref().map(|session| {
        let entry = &session.entry;
        let pronunciation = entry.pronunciation.clone().unwrap_or_default();
        FlashcardCard {
            id: entry.id.0,
            word: entry.word.clone(),
            ipa_uk: pronunciation.ipa_uk,
            ipa_us: pronunciation.ipa_us,
            audio_uk: pronunciation.audio_uk,
            audio_us: pronunciation.audio_us,
            back: session.revealed.then(|| FlashcardBack {
                definition: entry.definition.clone(),
                example: entry.example.clone(),
                translation: entry.translation.clone(),
            }),
        }
    });

    FlashcardView {
        phase: state.phase(),
        filter: state.filter,
        is_loading: state.loading,
        card,
    }
}

fn fill_blank_view(model: &Model) -> FillBlankView {
    let state = &model.fill_blank;
    let session = state.session.as_ref();

    FillBlankView {
        phase: state.phase(),
        filter: state.filter,
        is_loading: state.loading,
        question: session.map(|s| s.question.question.clone()),
        hint: session.map(|s| s.question.hint.clone()),
        answer_draft: state.answer_draft.clone(),
        checking: session.is_some_and(|s| s.checking),
        verdict: session.and_then(|s| s.verdict.as_ref()).map(|v| VerdictView {
            correct: v.correct,
            correct_answer: v.correct_answer.clone(),
            message: if v.correct {
                "Correct! Great job!".into()
            } else {
                format!("Incorrect. The correct answer is: {}", v.correct_answer)
            },
        }),
    }
}

fn statistics_view(model: &Model) -> StatisticsView {
    let state = &model.statistics;
    let learned_percent = state.summary.as_ref().map_or(0, |s| {
        if s.total_words == 0 {
            0
        } else {
            let learned = u64::from(s.learned_words.min(s.total_words));
            u32::try_from(learned * 100 / u64::from(s.total_words)).unwrap_or(100)
        }
    });

    StatisticsView {
        is_loading: state.load == LoadState::Loading,
        summary: state.summary.clone(),
        learned_percent,
        monthly: state.monthly.clone(),
    }
}
