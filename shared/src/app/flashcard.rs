//! Flashcard drill: draw a random entry, flip it, mark it, draw the next.

use tracing::{debug, error, warn};

use super::notify;
use crate::api::{PracticeReport, Routes};
use crate::capabilities::{
    decode_json, encode_json, expect_success, Capabilities, HttpResult, JSON_CONTENT_TYPE,
};
use crate::event::{Event, SeqToken};
use crate::model::{EntryId, FlashcardSession, Model, Section, StatusFilter, VocabularyEntry};

pub(crate) fn set_filter(model: &mut Model, filter: StatusFilter) {
    model.flashcard.filter = filter;
}

pub(crate) fn draw(model: &mut Model, caps: &Capabilities) {
    let token = model.flashcard.seq.issue();
    model.flashcard.loading = true;
    let url = Routes::new(&model.config.api_base).random_flashcard(model.flashcard.filter);
    debug!(token, %url, "drawing flashcard");

    caps.http.get(url).send(move |result| Event::FlashcardDrawn {
        token,
        result: Box::new(result),
    });
}

pub(crate) fn drawn(model: &mut Model, caps: &Capabilities, token: SeqToken, result: HttpResult) {
    if !model.flashcard.seq.is_latest(token) {
        debug!(token, "ignoring stale flashcard");
        return;
    }
    model.flashcard.loading = false;
    if !model.is_active(Section::Flashcard) {
        debug!("flashcard arrived after leaving the section");
        return;
    }

    match decode_json::<VocabularyEntry>(result) {
        Ok(entry) => {
            debug!(id = %entry.id, "flashcard drawn");
            model.flashcard.session = Some(FlashcardSession {
                entry,
                revealed: false,
            });
        }
        Err(e) if e.is_not_found() => {
            model.flashcard.session = None;
            notify::info(model, caps, "No words available for practice!");
        }
        Err(e) => {
            error!(error = %e, "failed to load flashcard");
            model.flashcard.session = None;
            notify::failure(model, caps, &e, "Failed to load flashcard");
        }
    }
}

pub(crate) fn flip(model: &mut Model) {
    if let Some(session) = model.flashcard.session.as_mut() {
        session.revealed = !session.revealed;
    }
}

/// Records the outcome as a best-effort side effect and moves straight on to
/// the next card. The practice response is only logged.
pub(crate) fn mark(model: &mut Model, caps: &Capabilities, correct: bool) {
    let Some(session) = &model.flashcard.session else {
        notify::warning(model, caps, "Please load a flashcard first!");
        return;
    };
    let id = session.entry.id;

    match encode_json(&PracticeReport {
        vocabulary_id: id,
        correct,
    }) {
        Ok(body) => {
            caps.http
                .post(Routes::new(&model.config.api_base).practice())
                .header("Content-Type", JSON_CONTENT_TYPE)
                .body(body)
                .send(move |result| Event::PracticeRecorded {
                    id,
                    result: Box::new(result),
                });
        }
        Err(e) => error!(%id, error = %e, "failed to encode practice report"),
    }

    draw(model, caps);
}

pub(crate) fn practice_recorded(id: EntryId, result: HttpResult) {
    match expect_success(result) {
        Ok(()) => debug!(%id, "practice recorded"),
        Err(e) => warn!(%id, error = %e, "practice report was not recorded"),
    }
}
