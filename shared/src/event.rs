use serde::{Deserialize, Serialize};

use crate::api::{EntryField, NewEntry};
use crate::capabilities::{AudioResult, HttpResult, RealtimeMessage, TimerOutput};
use crate::config::ClientConfig;
use crate::model::{EntryId, EntryStatus, Section, StatusFilter, ToastKind};

/// Token matched against a [`crate::model::RequestSeq`].
pub type SeqToken = u64;

// --- Event enum: shell-facing variants first, capability callbacks after.
// Callback variants carrying an HTTP exchange are boxed and never cross the
// bridge.

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Event {
    Noop,
    Start(Box<ClientConfig>),

    // Navigation
    ActivateSection {
        section: Section,
    },

    // Vocabulary list
    EntryFieldEdited {
        field: EntryField,
        value: String,
    },
    SubmitNewEntry(Box<NewEntry>),
    RefreshList {
        page: u32,
    },
    ChangePage {
        page: u32,
    },
    SetStatus {
        id: EntryId,
        status: EntryStatus,
    },
    DeleteRequested {
        id: EntryId,
    },
    SearchInput {
        text: String,
    },
    StatusFilterChanged {
        filter: StatusFilter,
    },
    FetchPronunciation {
        id: EntryId,
    },

    // Flashcard
    FlashcardFilterChanged {
        filter: StatusFilter,
    },
    DrawFlashcard,
    FlipFlashcard,
    MarkFlashcard {
        correct: bool,
    },

    // Fill in the blank
    FillBlankFilterChanged {
        filter: StatusFilter,
    },
    DrawFillBlank,
    AnswerEdited {
        text: String,
    },
    SubmitAnswer {
        answer: String,
    },

    // Statistics
    RefreshStats,

    // Notifications & audio
    Notify {
        kind: ToastKind,
        message: String,
    },
    DismissToast {
        id: u64,
    },
    PlayPronunciation {
        url: String,
    },

    // --- Capability callbacks ---
    #[serde(skip)]
    ListFetched {
        token: SeqToken,
        result: Box<HttpResult>,
    },
    #[serde(skip)]
    EntryCreated(Box<HttpResult>),
    #[serde(skip)]
    StatusSet {
        id: EntryId,
        status: EntryStatus,
        result: Box<HttpResult>,
    },
    #[serde(skip)]
    DeleteConfirmed {
        id: EntryId,
        confirmed: bool,
    },
    #[serde(skip)]
    EntryDeleted {
        id: EntryId,
        result: Box<HttpResult>,
    },
    #[serde(skip)]
    PronunciationFetched {
        id: EntryId,
        result: Box<HttpResult>,
    },
    #[serde(skip)]
    SearchDebounceElapsed(TimerOutput),
    #[serde(skip)]
    Realtime(Box<RealtimeMessage>),
    #[serde(skip)]
    FlashcardDrawn {
        token: SeqToken,
        result: Box<HttpResult>,
    },
    #[serde(skip)]
    PracticeRecorded {
        id: EntryId,
        result: Box<HttpResult>,
    },
    #[serde(skip)]
    FillBlankDrawn {
        token: SeqToken,
        result: Box<HttpResult>,
    },
    #[serde(skip)]
    AnswerChecked {
        round: u64,
        result: Box<HttpResult>,
    },
    #[serde(skip)]
    FillBlankAdvance {
        round: u64,
        output: TimerOutput,
    },
    #[serde(skip)]
    SummaryFetched {
        token: SeqToken,
        result: Box<HttpResult>,
    },
    #[serde(skip)]
    MonthlyFetched {
        token: SeqToken,
        result: Box<HttpResult>,
    },
    #[serde(skip)]
    ToastExpired {
        id: u64,
        output: TimerOutput,
    },
    #[serde(skip)]
    PlaybackEnded {
        url: String,
        result: Box<AudioResult>,
    },
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Noop => "noop",
            Self::Start(_) => "start",
            Self::ActivateSection { .. } => "activate_section",
            Self::EntryFieldEdited { .. } => "entry_field_edited",
            Self::SubmitNewEntry(_) => "submit_new_entry",
            Self::RefreshList { .. } => "refresh_list",
            Self::ChangePage { .. } => "change_page",
            Self::SetStatus { .. } => "set_status",
            Self::DeleteRequested { .. } => "delete_requested",
            Self::SearchInput { .. } => "search_input",
            Self::StatusFilterChanged { .. } => "status_filter_changed",
            Self::FetchPronunciation { .. } => "fetch_pronunciation",
            Self::FlashcardFilterChanged { .. } => "flashcard_filter_changed",
            Self::DrawFlashcard => "draw_flashcard",
            Self::FlipFlashcard => "flip_flashcard",
            Self::MarkFlashcard { .. } => "mark_flashcard",
            Self::FillBlankFilterChanged { .. } => "fill_blank_filter_changed",
            Self::DrawFillBlank => "draw_fill_blank",
            Self::AnswerEdited { .. } => "answer_edited",
            Self::SubmitAnswer { .. } => "submit_answer",
            Self::RefreshStats => "refresh_stats",
            Self::DismissToast { .. } => "dismiss_toast",
            Self::PlayPronunciation { .. } => "play_pronunciation",
            Self::ListFetched { .. } => "list_fetched",
            Self::EntryCreated(_) => "entry_created",
            Self::StatusSet { .. } => "status_set",
            Self::DeleteConfirmed { .. } => "delete_confirmed",
            Self::EntryDeleted { .. } => "entry_deleted",
            Self::PronunciationFetched { .. } => "pronunciation_fetched",
            Self::SearchDebounceElapsed(_) => "search_debounce_elapsed",
            Self::Realtime(_) => "realtime",
            Self::FlashcardDrawn { .. } => "flashcard_drawn",
            Self::PracticeRecorded { .. } => "practice_recorded",
            Self::FillBlankDrawn { .. } => "fill_blank_drawn",
            Self::AnswerChecked { .. } => "answer_checked",
            Self::FillBlankAdvance { .. } => "fill_blank_advance",
            Self::SummaryFetched { .. } => "summary_fetched",
            Self::MonthlyFetched { .. } => "monthly_fetched",
            Self::ToastExpired { .. } => "toast_expired",
            Self::PlaybackEnded { .. } => "playback_ended",
            Self::Notify { .. } => "notify",
        }
    }

    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        matches!(
            self,
            Self::ActivateSection { .. }
                | Self::EntryFieldEdited { .. }
                | Self::SubmitNewEntry(_)
                | Self::ChangePage { .. }
                | Self::SetStatus { .. }
                | Self::DeleteRequested { .. }
                | Self::SearchInput { .. }
                | Self::StatusFilterChanged { .. }
                | Self::FetchPronunciation { .. }
                | Self::FlashcardFilterChanged { .. }
                | Self::DrawFlashcard
                | Self::FlipFlashcard
                | Self::MarkFlashcard { .. }
                | Self::FillBlankFilterChanged { .. }
                | Self::DrawFillBlank
                | Self::AnswerEdited { .. }
                | Self::SubmitAnswer { .. }
                | Self::DismissToast { .. }
                | Self::PlayPronunciation { .. }
        )
    }
}

impl Default for Event {
    fn default() -> Self {
        Self::Noop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_size_is_reasonable() {
        let size = std::mem::size_of::<Event>();
        assert!(size <= 64, "Event enum is {size} bytes, box more variants");
    }

    #[test]
    fn shell_events_cross_the_bridge() {
        let event = Event::SetStatus {
            id: EntryId(42),
            status: EntryStatus::Learned,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
        assert!(back.is_user_initiated());
        assert_eq!(back.name(), "set_status");
    }

    #[test]
    fn callbacks_are_not_user_initiated() {
        let event = Event::DeleteConfirmed {
            id: EntryId(1),
            confirmed: true,
        };
        assert!(!event.is_user_initiated());
    }
}
