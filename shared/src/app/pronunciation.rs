use tracing::{debug, warn};
use url::Url;

use super::notify;
use crate::capabilities::{AudioOutput, AudioResult, Capabilities};
use crate::event::Event;
use crate::model::Model;

const PLAYBACK_FAILED: &str = "Unable to play audio. Please check your connection.";

/// Stops whatever is playing before starting `url`.
pub(crate) fn play(model: &mut Model, caps: &Capabilities, url: String) {
    if let Err(e) = Url::parse(&url) {
        warn!(%url, error = %e, "refusing to play a malformed audio url");
        notify::error(model, caps, PLAYBACK_FAILED);
        return;
    }

    if let Some(previous) = model.playing_audio.take() {
        debug!(%previous, "stopping current clip");
        caps.audio.stop();
    }
    model.playing_audio = Some(url.clone());
    caps.audio.play(url.clone(), move |result| Event::PlaybackEnded {
        url,
        result: Box::new(result),
    });
}

/// Only the clip currently playing may clear `playing_audio`.
pub(crate) fn ended(model: &mut Model, caps: &Capabilities, url: &str, result: AudioResult) {
    let current = model.playing_audio.as_deref() == Some(url);
    match result {
        Ok(AudioOutput::Finished) if current => model.playing_audio = None,
        Ok(_) => debug!(%url, current, "clip ended"),
        Err(e) if current => {
            warn!(%url, error = %e, "audio playback failed");
            model.playing_audio = None;
            notify::error(model, caps, PLAYBACK_FAILED);
        }
        Err(e) => debug!(%url, error = %e, "replaced clip failed"),
    }
}
