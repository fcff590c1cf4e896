mod audio;
mod dialog;
mod http;
mod realtime;
mod timer;

pub use self::audio::{AudioError, AudioOperation, AudioOutput, AudioResult};
pub use self::dialog::{DialogOperation, DialogResponse};
pub use self::http::{decode_json, encode_json, expect_success, into_body, HttpResult, JSON_CONTENT_TYPE};
pub use self::realtime::{
    ConnectionState, RealtimeMessage, RealtimeOperation, ENTRY_ADDED, ENTRY_DELETED,
    ENTRY_UPDATED, SUBSCRIBED_EVENTS,
};
pub use self::timer::{TimerId, TimerOperation, TimerOutput};

// Crux's built-in Render capability covers view updates.
pub use crux_core::render::Render;
pub use crux_http::Http;

pub use self::audio::Audio;
pub use self::dialog::Dialog;
pub use self::realtime::Realtime;
pub use self::timer::Timer;

#[allow(unused_imports)]
use crate::app::App;
use crate::event::Event;

#[derive(crux_core::macros::Effect)]
pub struct Capabilities {
    pub render: Render<Event>,
    pub http: Http<Event>,
    pub timer: Timer<Event>,
    pub realtime: Realtime<Event>,
    pub dialog: Dialog<Event>,
    pub audio: Audio<Event>,
}
