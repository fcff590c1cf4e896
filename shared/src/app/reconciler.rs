//! Reacts to unsolicited changes announced over the push channel.

use tracing::{debug, info, warn};

use super::{notify, vocabulary};
use crate::api::PushPayload;
use crate::capabilities::{
    Capabilities, ConnectionState, RealtimeMessage, ENTRY_ADDED, ENTRY_DELETED, ENTRY_UPDATED,
    SUBSCRIBED_EVENTS,
};
use crate::event::Event;
use crate::model::{Model, Section};

pub(crate) fn connect(model: &mut Model, caps: &Capabilities) {
    model.connection = ConnectionState::Connecting;
    info!(url = %model.config.realtime_url, "opening push channel");
    caps.realtime.connect(model.config.realtime_url.clone(), |message| {
        Event::Realtime(Box::new(message))
    });
}

pub(crate) fn handle(model: &mut Model, caps: &Capabilities, message: RealtimeMessage) {
    match message {
        RealtimeMessage::Connected => {
            info!("push channel connected, subscribing");
            model.connection = ConnectionState::Connected;
            caps.realtime.subscribe(&SUBSCRIBED_EVENTS);
        }
        RealtimeMessage::Disconnected { reason } => {
            warn!(reason = reason.as_deref().unwrap_or("unknown"), "push channel disconnected");
            model.connection = ConnectionState::Disconnected;
        }
        RealtimeMessage::Event { name, payload } => {
            let Some(message) = describe(&name, &PushPayload::from_value(&payload)) else {
                debug!(%name, "ignoring unknown push event");
                return;
            };
            notify::info(model, caps, message);

            if model.is_active(Section::Vocabulary) {
                vocabulary::refresh_current(model, caps);
            } else {
                debug!(%name, section = model.section.as_str(), "list not visible, skipping refresh");
            }
        }
    }
}

/// Toast text for a change, or `None` for events nobody listens to.
fn describe(name: &str, payload: &PushPayload) -> Option<String> {
    let word = payload.word.as_deref();
    let text = match name {
        ENTRY_ADDED => word.map_or_else(
            || "A new word was added".to_string(),
            |w| format!("New word added: {w}"),
        ),
        ENTRY_UPDATED => word.map_or_else(
            || "A word was updated".to_string(),
            |w| format!("Word updated: {w}"),
        ),
        ENTRY_DELETED => word.map_or_else(
            || "A word was deleted".to_string(),
            |w| format!("Word deleted: {w}"),
        ),
        _ => return None,
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn describes_known_events_with_fallbacks() {
        let named = PushPayload::from_value(&json!({"id": 1, "word": "lucid"}));
        assert_eq!(
            describe(ENTRY_ADDED, &named).as_deref(),
            Some("New word added: lucid")
        );

        let bare = PushPayload::from_value(&json!(null));
        assert_eq!(
            describe(ENTRY_DELETED, &bare).as_deref(),
            Some("A word was deleted")
        );
        assert_eq!(
            describe(ENTRY_UPDATED, &PushPayload::from_value(&json!([1, 2]))).as_deref(),
            Some("A word was updated")
        );
        assert_eq!(describe("entry_archived", &named), None);
    }
}
