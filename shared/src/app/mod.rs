mod fill_blank;
mod flashcard;
mod notify;
mod pronunciation;
mod reconciler;
mod router;
mod statistics;
mod vocabulary;

use tracing::{debug, error, info, trace, warn};

use crate::capabilities::Capabilities;
use crate::config::ClientConfig;
use crate::event::Event;
use crate::model::Model;
use crate::view::{self, ViewModel};

#[derive(Default)]
pub struct App;

impl App {
    fn start(model: &mut Model, caps: &Capabilities, config: ClientConfig) {
        if model.started {
            warn!("start received twice, ignoring");
            return;
        }
        model.started = true;

        match config.validated() {
            Ok(config) => model.config = config,
            Err(e) => {
                error!(error = %e, "invalid client config, keeping defaults");
                notify::warning(model, caps, format!("Invalid configuration: {e}"));
            }
        }
        info!(
            api_base = %model.config.api_base,
            page_size = model.config.page_size,
            "client core started"
        );

        reconciler::connect(model, caps);
        let section = model.section;
        router::activate_section(model, caps, section);
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        let event_name = event.name();
        if event.is_user_initiated() {
            debug!(event = event_name, "user action");
        } else {
            trace!(event = event_name, "update");
        }

        match event {
            Event::Noop => return,
            Event::Start(config) => Self::start(model, caps, *config),

            Event::ActivateSection { section } => router::activate_section(model, caps, section),

            Event::EntryFieldEdited { field, value } => vocabulary::edit_field(model, field, value),
            Event::SubmitNewEntry(entry) => vocabulary::submit_new_entry(model, caps, *entry),
            Event::EntryCreated(result) => vocabulary::entry_created(model, caps, *result),
            Event::RefreshList { page } => vocabulary::refresh_list(model, caps, page),
            Event::ListFetched { token, result } => {
                vocabulary::list_fetched(model, caps, token, *result);
            }
            Event::ChangePage { page } => vocabulary::change_page(model, caps, page),
            Event::SetStatus { id, status } => vocabulary::set_status(model, caps, id, status),
            Event::StatusSet { id, status, result } => {
                vocabulary::status_set(model, caps, id, status, *result);
            }
            Event::DeleteRequested { id } => vocabulary::request_delete(model, caps, id),
            Event::DeleteConfirmed { id, confirmed } => {
                vocabulary::delete_confirmed(model, caps, id, confirmed);
            }
            Event::EntryDeleted { id, result } => vocabulary::entry_deleted(model, caps, id, *result),
            Event::SearchInput { text } => vocabulary::search_input(model, caps, text),
            Event::SearchDebounceElapsed(output) => {
                vocabulary::search_debounce_elapsed(model, caps, output);
            }
            Event::StatusFilterChanged { filter } => {
                vocabulary::set_status_filter(model, caps, filter);
            }
            Event::FetchPronunciation { id } => vocabulary::fetch_pronunciation(model, caps, id),
            Event::PronunciationFetched { id, result } => {
                vocabulary::pronunciation_fetched(model, caps, id, *result);
            }

            Event::Realtime(message) => reconciler::handle(model, caps, *message),

            Event::FlashcardFilterChanged { filter } => flashcard::set_filter(model, filter),
            Event::DrawFlashcard => flashcard::draw(model, caps),
            Event::FlashcardDrawn { token, result } => {
                flashcard::drawn(model, caps, token, *result);
            }
            Event::FlipFlashcard => flashcard::flip(model),
            Event::MarkFlashcard { correct } => flashcard::mark(model, caps, correct),
            Event::PracticeRecorded { id, result } => {
                flashcard::practice_recorded(id, *result);
                return;
            }

            Event::FillBlankFilterChanged { filter } => fill_blank::set_filter(model, filter),
            Event::DrawFillBlank => fill_blank::draw(model, caps),
            Event::FillBlankDrawn { token, result } => {
                fill_blank::drawn(model, caps, token, *result);
            }
            Event::AnswerEdited { text } => fill_blank::edit_answer(model, text),
            Event::SubmitAnswer { answer } => fill_blank::submit_answer(model, caps, &answer),
            Event::AnswerChecked { round, result } => {
                fill_blank::answer_checked(model, caps, round, *result);
            }
            Event::FillBlankAdvance { round, output } => {
                fill_blank::advance(model, caps, round, output);
            }

            Event::RefreshStats => statistics::refresh(model, caps),
            Event::SummaryFetched { token, result } => {
                statistics::summary_fetched(model, caps, token, *result);
            }
            Event::MonthlyFetched { token, result } => {
                statistics::monthly_fetched(model, caps, token, *result);
            }

            Event::Notify { kind, message } => notify::notify(model, caps, kind, message),
            Event::DismissToast { id } => notify::dismiss(model, id),
            Event::ToastExpired { id, output } => notify::expired(model, id, output),

            Event::PlayPronunciation { url } => pronunciation::play(model, caps, url),
            Event::PlaybackEnded { url, result } => {
                pronunciation::ended(model, caps, &url, *result);
            }
        }

        caps.render.render();
    }

    fn view(&self, model: &Model) -> ViewModel {
        view::build(model)
    }
}
