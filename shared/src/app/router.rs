use tracing::debug;

use super::{statistics, vocabulary};
use crate::capabilities::Capabilities;
use crate::model::{Model, Section};

/// Exactly one section is visible. Leaving a game drops its session;
/// entering a data-backed section reloads it.
pub(crate) fn activate_section(model: &mut Model, caps: &Capabilities, section: Section) {
    let previous = model.section;
    model.section = section;

    if previous != section {
        debug!(from = previous.as_str(), to = section.as_str(), "section changed");
        match previous {
            Section::Flashcard => model.flashcard.session = None,
            Section::FillBlank => {
                model.fill_blank.session = None;
                model.fill_blank.answer_draft.clear();
            }
            Section::Vocabulary | Section::Statistics => {}
        }
    }

    match section {
        Section::Vocabulary => vocabulary::refresh_current(model, caps),
        Section::Statistics => statistics::refresh(model, caps),
        Section::Flashcard | Section::FillBlank => {}
    }
}
