use crux_core::capability::{CapabilityContext, Operation};
use crux_core::macros::Capability;
use futures::StreamExt;
use serde::{Deserialize, Serialize};

pub const ENTRY_ADDED: &str = "entry_added";
pub const ENTRY_UPDATED: &str = "entry_updated";
pub const ENTRY_DELETED: &str = "entry_deleted";

/// Channel events the reconciler listens to.
pub const SUBSCRIBED_EVENTS: [&str; 3] = [ENTRY_ADDED, ENTRY_UPDATED, ENTRY_DELETED];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "op", content = "data", rename_all = "snake_case")]
pub enum RealtimeOperation {
    /// Open the push channel. The shell answers with a stream of
    /// [`RealtimeMessage`]s for the lifetime of the connection, including
    /// reconnects.
    Connect { url: String },
    /// Attach listeners for the named events on the current connection.
    Subscribe { events: Vec<String> },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum RealtimeMessage {
    Connected,
    Disconnected {
        #[serde(default)]
        reason: Option<String>,
    },
    Event {
        name: String,
        #[serde(default)]
        payload: serde_json::Value,
    },
}

impl RealtimeMessage {
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

impl Operation for RealtimeOperation {
    type Output = RealtimeMessage;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    #[default]
    Idle,
    Connecting,
    Connected,
    Disconnected,
}

impl ConnectionState {
    #[must_use]
    pub const fn is_connected(self) -> bool {
        matches!(self, Self::Connected)
    }
}

/// Push channel owned by the shell. Reconnection and backoff live there;
/// the core only reacts to the messages it is handed.
#[derive(Capability)]
pub struct Realtime<Ev> {
    context: CapabilityContext<RealtimeOperation, Ev>,
}

impl<Ev> Realtime<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<RealtimeOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn connect<F>(&self, url: impl Into<String>, make_event: F)
    where
        F: Fn(RealtimeMessage) -> Ev + Send + 'static,
    {
        let context = self.context.clone();
        let url = url.into();
        self.context.spawn(async move {
            let mut messages = context.stream_from_shell(RealtimeOperation::Connect { url });
            while let Some(message) = messages.next().await {
                context.update_app(make_event(message));
            }
        });
    }

    pub fn subscribe(&self, events: &[&str]) {
        let context = self.context.clone();
        let events = events.iter().map(|e| (*e).to_string()).collect();
        self.context.spawn(async move {
            context
                .notify_shell(RealtimeOperation::Subscribe { events })
                .await;
        });
    }
}
