//! Fill-in-the-blank drill. The server judges answers; the core only shows
//! the verdict and advances after a fixed delay.

use tracing::{debug, error, warn};

use super::notify;
use crate::api::{AnswerSubmission, AnswerVerdict, FillBlankQuestion, Routes};
use crate::capabilities::{
    decode_json, encode_json, Capabilities, HttpResult, TimerOutput, JSON_CONTENT_TYPE,
};
use crate::event::{Event, SeqToken};
use crate::model::{FillBlankPhase, FillBlankSession, Model, Section, StatusFilter};

pub(crate) fn set_filter(model: &mut Model, filter: StatusFilter) {
    model.fill_blank.filter = filter;
}

pub(crate) fn draw(model: &mut Model, caps: &Capabilities) {
    let token = model.fill_blank.seq.issue();
    model.fill_blank.loading = true;
    let url = Routes::new(&model.config.api_base).fill_blank_question(model.fill_blank.filter);
    debug!(token, %url, "drawing fill-blank question");

    caps.http.get(url).send(move |result| Event::FillBlankDrawn {
        token,
        result: Box::new(result),
    });
}

pub(crate) fn drawn(model: &mut Model, caps: &Capabilities, token: SeqToken, result: HttpResult) {
    if !model.fill_blank.seq.is_latest(token) {
        debug!(token, "ignoring stale fill-blank question");
        return;
    }
    model.fill_blank.loading = false;
    if !model.is_active(Section::FillBlank) {
        debug!("question arrived after leaving the section");
        return;
    }

    match decode_json::<FillBlankQuestion>(result) {
        Ok(question) => {
            let state = &mut model.fill_blank;
            state.rounds += 1;
            state.answer_draft.clear();
            debug!(id = %question.vocabulary_id, round = state.rounds, "question ready");
            state.session = Some(FillBlankSession {
                question,
                verdict: None,
                checking: false,
                round: state.rounds,
            });
        }
        Err(e) if e.is_not_found() => {
            model.fill_blank.session = None;
            notify::info(model, caps, "No words with examples available for practice!");
        }
        Err(e) => {
            error!(error = %e, "failed to load question");
            notify::failure(model, caps, &e, "Failed to load question");
        }
    }
}

pub(crate) fn edit_answer(model: &mut Model, text: String) {
    model.fill_blank.answer_draft = text;
}

/// Blank answers never leave the client.
pub(crate) fn submit_answer(model: &mut Model, caps: &Capabilities, answer: &str) {
    if model.fill_blank.phase() != FillBlankPhase::QuestionActive {
        debug!(phase = ?model.fill_blank.phase(), "no open question to answer");
        return;
    }

    let answer = answer.trim();
    if answer.is_empty() {
        notify::warning(model, caps, "Please enter an answer!");
        return;
    }

    let Some(session) = model.fill_blank.session.as_ref() else {
        return;
    };
    if session.checking {
        debug!(round = session.round, "answer already submitted");
        return;
    }
    let round = session.round;
    let submission = AnswerSubmission {
        vocabulary_id: session.question.vocabulary_id,
        answer: answer.to_string(),
    };

    let body = match encode_json(&submission) {
        Ok(body) => body,
        Err(e) => {
            notify::failure(model, caps, &e, "Failed to check answer");
            return;
        }
    };
    if let Some(session) = model.fill_blank.session.as_mut() {
        session.checking = true;
    }

    caps.http
        .post(Routes::new(&model.config.api_base).fill_blank_check())
        .header("Content-Type", JSON_CONTENT_TYPE)
        .body(body)
        .send(move |result| Event::AnswerChecked {
            round,
            result: Box::new(result),
        });
}

pub(crate) fn answer_checked(model: &mut Model, caps: &Capabilities, round: u64, result: HttpResult) {
    let current = model.fill_blank.session.as_ref().map(|s| s.round);
    if current != Some(round) {
        debug!(round, ?current, "verdict for a question no longer shown");
        return;
    }

    match decode_json::<AnswerVerdict>(result) {
        Ok(verdict) => {
            debug!(round, correct = verdict.correct, "answer checked");
            if let Some(session) = model.fill_blank.session.as_mut() {
                session.checking = false;
                session.verdict = Some(verdict);
            }
            let timer = model.allocate_timer();
            caps.timer.start(timer, model.config.fill_blank_advance(), move |output| {
                Event::FillBlankAdvance { round, output }
            });
        }
        Err(e) => {
            if let Some(session) = model.fill_blank.session.as_mut() {
                session.checking = false;
            }
            warn!(round, error = %e, "answer check failed");
            notify::failure(model, caps, &e, "Failed to check answer");
        }
    }
}

/// Fires once per answered round; does nothing if the round was replaced or
/// the section was left in the meantime.
pub(crate) fn advance(model: &mut Model, caps: &Capabilities, round: u64, output: TimerOutput) {
    if !output.fired() || !model.is_active(Section::FillBlank) {
        return;
    }
    let answered_round = model
        .fill_blank
        .session
        .as_ref()
        .filter(|s| s.verdict.is_some())
        .map(|s| s.round);
    if answered_round != Some(round) {
        debug!(round, "auto-advance for a stale round");
        return;
    }
    draw(model, caps);
}
