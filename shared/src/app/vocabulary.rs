//! The vocabulary list: paging, search, filter and per-entry mutations.
//!
//! Every mutation ends in a refresh of the current page; the list is never
//! patched locally.

use tracing::{debug, error, info, warn};

use super::notify;
use crate::api::{EntryField, ListResponse, NewEntry, Routes, StatusUpdate};
use crate::capabilities::{
    decode_json, encode_json, expect_success, Capabilities, HttpResult, TimerOutput,
    JSON_CONTENT_TYPE,
};
use crate::error::AppError;
use crate::event::{Event, SeqToken};
use crate::model::{EntryId, EntryStatus, LoadState, Model, PageResult, StatusFilter};

const DELETE_PROMPT: &str = "Are you sure you want to delete this word?";

pub(crate) fn refresh_list(model: &mut Model, caps: &Capabilities, page: u32) {
    let state = &mut model.vocabulary;
    state.list.page = page.max(1);
    let token = state.seq.issue();
    state.load = LoadState::Loading;
    state.pending_term.clone_from(&state.list.search_term);

    let url = Routes::new(&model.config.api_base).list(&state.list, model.config.page_size);
    debug!(token, page = state.list.page, %url, "refreshing vocabulary list");

    caps.http.get(url).send(move |result| Event::ListFetched {
        token,
        result: Box::new(result),
    });
}

pub(crate) fn refresh_current(model: &mut Model, caps: &Capabilities) {
    let page = model.vocabulary.list.page;
    refresh_list(model, caps, page);
}

pub(crate) fn list_fetched(model: &mut Model, caps: &Capabilities, token: SeqToken, result: HttpResult) {
    if !model.vocabulary.seq.is_latest(token) {
        debug!(token, "ignoring stale list response");
        return;
    }

    match decode_json::<ListResponse>(result) {
        Ok(response) => {
            let page = PageResult::from(response);
            if page.is_out_of_range() && model.vocabulary.list.page != 1 {
                info!(
                    requested = model.vocabulary.list.page,
                    total_pages = page.total_pages,
                    "page past the end, returning to the first page"
                );
                refresh_list(model, caps, 1);
                return;
            }

            debug!(
                items = page.items.len(),
                total = page.total_items,
                page = page.current_page,
                "vocabulary list loaded"
            );
            let state = &mut model.vocabulary;
            state.list.page = page.current_page;
            state.page = Some(page);
            state.page_term.clone_from(&state.pending_term);
            state.load = LoadState::Loaded;
        }
        Err(e) => {
            error!(error = %e, "failed to load vocabulary list");
            model.vocabulary.load = LoadState::Failed;
            notify::failure(model, caps, &e, "Failed to load vocabulary");
        }
    }
}

pub(crate) fn edit_field(model: &mut Model, field: EntryField, value: String) {
    model.vocabulary.form.set(field, value);
}

/// Presence of `word` and `definition` is checked by the caller.
pub(crate) fn submit_new_entry(model: &mut Model, caps: &Capabilities, entry: NewEntry) {
    if model.vocabulary.submitting {
        debug!("submission already in flight");
        return;
    }

    let body = match encode_json(&entry) {
        Ok(body) => body,
        Err(e) => {
            error!(error = %e, "failed to encode new entry");
            notify::failure(model, caps, &e, "Failed to add word");
            return;
        }
    };

    model.vocabulary.form = entry;
    model.vocabulary.submitting = true;
    caps.http
        .post(Routes::new(&model.config.api_base).create())
        .header("Content-Type", JSON_CONTENT_TYPE)
        .body(body)
        .send(|result| Event::EntryCreated(Box::new(result)));
}

pub(crate) fn entry_created(model: &mut Model, caps: &Capabilities, result: HttpResult) {
    model.vocabulary.submitting = false;

    match expect_success(result) {
        Ok(()) => {
            info!(word = %model.vocabulary.form.word, "word added");
            model.vocabulary.form.clear();
            notify::success(model, caps, "Word added successfully!");
            refresh_current(model, caps);
        }
        Err(e) => {
            warn!(error = %e, "server rejected new entry");
            notify::failure(model, caps, &e, "Failed to add word");
        }
    }
}

/// No short-circuit when the entry already has `status`.
pub(crate) fn set_status(model: &mut Model, caps: &Capabilities, id: EntryId, status: EntryStatus) {
    let body = match encode_json(&StatusUpdate { status }) {
        Ok(body) => body,
        Err(e) => {
            notify::failure(model, caps, &e, "Failed to update word");
            return;
        }
    };

    debug!(%id, %status, "updating entry status");
    caps.http
        .put(Routes::new(&model.config.api_base).entry(id))
        .header("Content-Type", JSON_CONTENT_TYPE)
        .body(body)
        .send(move |result| Event::StatusSet {
            id,
            status,
            result: Box::new(result),
        });
}

pub(crate) fn status_set(
    model: &mut Model,
    caps: &Capabilities,
    id: EntryId,
    status: EntryStatus,
    result: HttpResult,
) {
    match expect_success(result) {
        Ok(()) => {
            let message = match status {
                EntryStatus::Learned => "Marked as learned",
                EntryStatus::Learning => "Moved back to learning",
            };
            notify::success(model, caps, message);
            refresh_current(model, caps);
        }
        Err(e) => {
            warn!(%id, error = %e, "status update failed");
            notify::failure(model, caps, &e, "Failed to update word");
        }
    }
}

/// Asks for confirmation first. An entry stays in `pending_deletes` from the
/// prompt until the server answers, and further requests for it are dropped.
pub(crate) fn request_delete(model: &mut Model, caps: &Capabilities, id: EntryId) {
    if !model.vocabulary.pending_deletes.insert(id) {
        debug!(%id, "delete already pending");
        return;
    }
    caps.dialog
        .confirm(DELETE_PROMPT, move |confirmed| Event::DeleteConfirmed { id, confirmed });
}

pub(crate) fn delete_confirmed(model: &mut Model, caps: &Capabilities, id: EntryId, confirmed: bool) {
    if !confirmed {
        debug!(%id, "delete declined");
        model.vocabulary.pending_deletes.remove(&id);
        return;
    }

    caps.http
        .delete(Routes::new(&model.config.api_base).entry(id))
        .send(move |result| Event::EntryDeleted {
            id,
            result: Box::new(result),
        });
}

pub(crate) fn entry_deleted(model: &mut Model, caps: &Capabilities, id: EntryId, result: HttpResult) {
    model.vocabulary.pending_deletes.remove(&id);

    match expect_success(result) {
        Ok(()) => {
            info!(%id, "word deleted");
            notify::success(model, caps, "Word deleted");
            refresh_current(model, caps);
        }
        Err(e) => {
            warn!(%id, error = %e, "delete failed");
            notify::failure(model, caps, &e, "Failed to delete word");
        }
    }
}

/// Restarts the debounce window. Only the timer started by the latest
/// keystroke may commit the term.
pub(crate) fn search_input(model: &mut Model, caps: &Capabilities, text: String) {
    if let Some(previous) = model.vocabulary.search_timer.take() {
        caps.timer.cancel(previous);
    }
    model.vocabulary.search_input = text;

    let timer = model.allocate_timer();
    model.vocabulary.search_timer = Some(timer);
    caps.timer
        .start(timer, model.config.search_debounce(), Event::SearchDebounceElapsed);
}

pub(crate) fn search_debounce_elapsed(model: &mut Model, caps: &Capabilities, output: TimerOutput) {
    if !output.fired() || model.vocabulary.search_timer != Some(output.id()) {
        return;
    }
    model.vocabulary.search_timer = None;
    model.vocabulary.list.search_term = model.vocabulary.search_input.trim().to_string();
    debug!(term = %model.vocabulary.list.search_term, "search term committed");
    refresh_list(model, caps, 1);
}

pub(crate) fn set_status_filter(model: &mut Model, caps: &Capabilities, filter: StatusFilter) {
    model.vocabulary.list.status_filter = filter;
    refresh_list(model, caps, 1);
}

pub(crate) fn change_page(model: &mut Model, caps: &Capabilities, page: u32) {
    if page == 0 {
        debug!("ignoring request for page 0");
        return;
    }
    refresh_list(model, caps, page);
}

pub(crate) fn fetch_pronunciation(model: &mut Model, caps: &Capabilities, id: EntryId) {
    caps.http
        .post(Routes::new(&model.config.api_base).fetch_pronunciation(id))
        .send(move |result| Event::PronunciationFetched {
            id,
            result: Box::new(result),
        });
}

pub(crate) fn pronunciation_fetched(
    model: &mut Model,
    caps: &Capabilities,
    id: EntryId,
    result: HttpResult,
) {
    match expect_success(result) {
        Ok(()) => {
            notify::success(model, caps, "Pronunciation updated");
            refresh_current(model, caps);
        }
        Err(e) => {
            log_failure(id, &e);
            notify::failure(model, caps, &e, "Failed to fetch pronunciation");
        }
    }
}

fn log_failure(id: EntryId, e: &AppError) {
    if e.status.is_some() {
        warn!(%id, error = %e, "pronunciation lookup rejected");
    } else {
        error!(%id, error = %e, "pronunciation lookup failed");
    }
}
