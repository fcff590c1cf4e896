//! Transient toasts. Raising one never depends on who raised it; each toast
//! owns a one-shot dismiss timer that is a no-op once the toast is gone.

use std::time::Duration;

use tracing::{debug, trace};

use crate::capabilities::{Capabilities, TimerOutput};
use crate::error::AppError;
use crate::event::Event;
use crate::model::{Model, ToastKind};

pub(crate) fn notify(
    model: &mut Model,
    caps: &Capabilities,
    kind: ToastKind,
    message: impl Into<String>,
) {
    let id = model.push_toast(message, kind);
    let timer = model.allocate_timer();
    debug!(toast = id, ?kind, %timer, "toast raised");

    caps.timer.start(
        timer,
        Duration::from_millis(kind.default_duration_ms()),
        move |output| Event::ToastExpired { id, output },
    );
}

pub(crate) fn success(model: &mut Model, caps: &Capabilities, message: impl Into<String>) {
    notify(model, caps, ToastKind::Success, message);
}

pub(crate) fn info(model: &mut Model, caps: &Capabilities, message: impl Into<String>) {
    notify(model, caps, ToastKind::Info, message);
}

pub(crate) fn error(model: &mut Model, caps: &Capabilities, message: impl Into<String>) {
    notify(model, caps, ToastKind::Error, message);
}

pub(crate) fn warning(model: &mut Model, caps: &Capabilities, message: impl Into<String>) {
    notify(model, caps, ToastKind::Warning, message);
}

/// Shows the server's message when it sent one, `fallback` otherwise.
pub(crate) fn failure(model: &mut Model, caps: &Capabilities, error: &AppError, fallback: &str) {
    self::error(model, caps, error.user_facing_message(fallback));
}

pub(crate) fn dismiss(model: &mut Model, id: u64) {
    if !model.dismiss_toast(id) {
        trace!(toast = id, "dismissal of a toast that is already gone");
    }
}

pub(crate) fn expired(model: &mut Model, id: u64, output: TimerOutput) {
    if output.fired() {
        dismiss(model, id);
    }
}
