//! Wire types for the vocabulary REST API and the routes that reach it.
//!
//! Decoding here is deliberately forgiving. The server omits or nulls
//! optional columns, and a single bad list item must not cost the whole page.

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::form_urlencoded;

use crate::model::{
    EntryId, EntryStatus, ListViewState, PageResult, Pronunciation, StatusFilter, VocabularyEntry,
};

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Blank strings read as absent.
fn non_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

/// Accepts any JSON number (or nothing) and clamps it into a counter.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let count = match value {
        Some(serde_json::Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f > 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    };
    Ok(u32::try_from(count).unwrap_or(u32::MAX))
}

/// Decodes each element on its own and drops the ones that do not fit.
fn skip_invalid<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<T>(value) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(error = %e, "dropping malformed list item");
                None
            }
        })
        .collect())
}

/// An entry exactly as the server sends it: flat, nullable, loosely typed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryWire {
    pub id: Option<u64>,
    #[serde(deserialize_with = "null_as_default")]
    pub word: String,
    #[serde(deserialize_with = "null_as_default")]
    pub definition: String,
    #[serde(deserialize_with = "non_blank")]
    pub example: Option<String>,
    #[serde(deserialize_with = "non_blank")]
    pub translation: Option<String>,
    #[serde(deserialize_with = "non_blank")]
    pub ipa_uk: Option<String>,
    #[serde(deserialize_with = "non_blank")]
    pub ipa_us: Option<String>,
    #[serde(deserialize_with = "non_blank")]
    pub audio_uk: Option<String>,
    #[serde(deserialize_with = "non_blank")]
    pub audio_us: Option<String>,
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient_count")]
    pub times_practiced: u32,
    pub created_at: Option<String>,
    pub learned_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("entry is missing its id")]
pub struct MissingId;

impl TryFrom<EntryWire> for VocabularyEntry {
    type Error = MissingId;

    fn try_from(wire: EntryWire) -> Result<Self, Self::Error> {
        let id = wire.id.ok_or(MissingId)?;
        let pronunciation = Pronunciation {
            ipa_uk: wire.ipa_uk,
            ipa_us: wire.ipa_us,
            audio_uk: wire.audio_uk,
            audio_us: wire.audio_us,
        };
        let has_any = pronunciation.has_ipa()
            || pronunciation.audio_uk.is_some()
            || pronunciation.audio_us.is_some();

        Ok(Self {
            id: EntryId(id),
            word: wire.word,
            definition: wire.definition,
            example: wire.example,
            translation: wire.translation,
            status: EntryStatus::parse_lenient(wire.status.as_deref()),
            pronunciation: has_any.then_some(pronunciation),
            times_practiced: wire.times_practiced,
            created_at: wire.created_at,
            learned_at: wire.learned_at,
        })
    }
}

impl From<VocabularyEntry> for EntryWire {
    fn from(entry: VocabularyEntry) -> Self {
        let pronunciation = entry.pronunciation.unwrap_or_default();
        Self {
            id: Some(entry.id.0),
            word: entry.word,
            definition: entry.definition,
            example: entry.example,
            translation: entry.translation,
            ipa_uk: pronunciation.ipa_uk,
            ipa_us: pronunciation.ipa_us,
            audio_uk: pronunciation.audio_uk,
            audio_us: pronunciation.audio_us,
            status: Some(entry.status.as_str().to_string()),
            times_practiced: entry.times_practiced,
            created_at: entry.created_at,
            learned_at: entry.learned_at,
        }
    }
}

/// `GET /vocabulary` response body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListResponse {
    #[serde(deserialize_with = "skip_invalid")]
    pub words: Vec<VocabularyEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub total: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub pages: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub current_page: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub has_next: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub has_prev: bool,
}

impl From<ListResponse> for PageResult {
    fn from(r: ListResponse) -> Self {
        Self {
            items: r.words,
            total_items: r.total,
            total_pages: r.pages,
            current_page: r.current_page.max(1),
            has_next: r.has_next,
            has_prev: r.has_prev,
        }
    }
}

/// Fields of the add-word form. Also the `POST /vocabulary` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntry {
    pub word: String,
    pub definition: String,
    pub example: String,
    pub translation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryField {
    Word,
    Definition,
    Example,
    Translation,
}

impl NewEntry {
    pub fn set(&mut self, field: EntryField, value: String) {
        let slot = match field {
            EntryField::Word => &mut self.word,
            EntryField::Definition => &mut self.definition,
            EntryField::Example => &mut self.example,
            EntryField::Translation => &mut self.translation,
        };
        *slot = value;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusUpdate {
    pub status: EntryStatus,
}

/// Body of `POST /games/flashcard/practice`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PracticeReport {
    pub vocabulary_id: EntryId,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerSubmission {
    pub vocabulary_id: EntryId,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillBlankQuestion {
    #[serde(rename = "id")]
    pub vocabulary_id: EntryId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub question: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hint: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerVerdict {
    #[serde(default, deserialize_with = "null_as_default")]
    pub correct: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub correct_answer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsSummary {
    #[serde(deserialize_with = "lenient_count")]
    pub total_words: u32,
    #[serde(deserialize_with = "lenient_count")]
    pub learning_words: u32,
    #[serde(deserialize_with = "lenient_count")]
    pub learned_words: u32,
    #[serde(deserialize_with = "lenient_count")]
    pub words_added_this_month: u32,
    #[serde(deserialize_with = "lenient_count")]
    pub words_learned_this_month: u32,
    #[serde(deserialize_with = "lenient_count")]
    pub practices_this_month: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthlyStat {
    #[serde(deserialize_with = "null_as_default")]
    pub month: String,
    #[serde(deserialize_with = "null_as_default")]
    pub month_name: String,
    #[serde(deserialize_with = "lenient_count")]
    pub words_added: u32,
    #[serde(deserialize_with = "lenient_count")]
    pub words_learned: u32,
    #[serde(deserialize_with = "lenient_count")]
    pub practices: u32,
}

/// The `id`/`word` a push event may carry. Anything else is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PushPayload {
    pub id: Option<u64>,
    #[serde(deserialize_with = "non_blank")]
    pub word: Option<String>,
}

impl PushPayload {
    /// Never fails: a payload of the wrong shape reads as empty.
    #[must_use]
    pub fn from_value(value: &serde_json::Value) -> Self {
        Self::deserialize(value).unwrap_or_default()
    }
}

/// Route builder over a validated base url (no trailing slash).
#[derive(Debug, Clone, Copy)]
pub struct Routes<'a> {
    base: &'a str,
}

impl<'a> Routes<'a> {
    #[must_use]
    pub const fn new(base: &'a str) -> Self {
        Self { base }
    }

    /// `search` is left out entirely when the term is empty.
    #[must_use]
    pub fn list(&self, state: &ListViewState, per_page: u32) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query
            .append_pair("status", state.status_filter.as_query())
            .append_pair("page", &state.page.to_string())
            .append_pair("per_page", &per_page.to_string());
        if state.has_search() {
            query.append_pair("search", &state.search_term);
        }
        format!("{}/vocabulary?{}", self.base, query.finish())
    }

    #[must_use]
    pub fn create(&self) -> String {
        format!("{}/vocabulary", self.base)
    }

    /// Target of both `PUT` (status) and `DELETE`.
    #[must_use]
    pub fn entry(&self, id: EntryId) -> String {
        format!("{}/vocabulary/{id}", self.base)
    }

    #[must_use]
    pub fn fetch_pronunciation(&self, id: EntryId) -> String {
        format!("{}/vocabulary/{id}/fetch-pronunciation", self.base)
    }

    #[must_use]
    pub fn random_flashcard(&self, filter: StatusFilter) -> String {
        self.with_status("games/flashcard/random", filter)
    }

    #[must_use]
    pub fn practice(&self) -> String {
        format!("{}/games/flashcard/practice", self.base)
    }

    #[must_use]
    pub fn fill_blank_question(&self, filter: StatusFilter) -> String {
        self.with_status("games/fill-blank/question", filter)
    }

    #[must_use]
    pub fn fill_blank_check(&self) -> String {
        format!("{}/games/fill-blank/check", self.base)
    }

    #[must_use]
    pub fn stats_summary(&self) -> String {
        format!("{}/stats/summary", self.base)
    }

    #[must_use]
    pub fn stats_monthly(&self) -> String {
        format!("{}/stats/monthly", self.base)
    }

    fn with_status(&self, path: &str, filter: StatusFilter) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("status", filter.as_query())
            .finish();
        format!("{}/{path}?{query}", self.base)
    }
}
