use crux_core::capability::{CapabilityContext, Operation};
use crux_core::macros::Capability;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum AudioOperation {
    Play { url: String },
    Stop,
}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum AudioError {
    #[error("audio source could not be loaded: {reason}")]
    Load { reason: String },

    #[error("playback was blocked by the platform")]
    Blocked,

    #[error("unknown error: {message}")]
    Unknown { message: String },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AudioOutput {
    Finished,
    Interrupted,
}

pub type AudioResult = Result<AudioOutput, AudioError>;

impl Operation for AudioOperation {
    type Output = AudioResult;
}

/// Pronunciation playback. Only one clip plays at a time.
#[derive(Capability)]
pub struct Audio<Ev> {
    context: CapabilityContext<AudioOperation, Ev>,
}

impl<Ev> Audio<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<AudioOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn play<F>(&self, url: impl Into<String>, make_event: F)
    where
        F: FnOnce(AudioResult) -> Ev + Send + 'static,
    {
        let context = self.context.clone();
        let url = url.into();
        self.context.spawn(async move {
            let result = context
                .request_from_shell(AudioOperation::Play { url })
                .await;
            context.update_app(make_event(result));
        });
    }

    pub fn stop(&self) {
        let context = self.context.clone();
        self.context.spawn(async move {
            context.notify_shell(AudioOperation::Stop).await;
        });
    }
}
