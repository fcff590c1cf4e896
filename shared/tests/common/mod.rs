#![allow(dead_code)]

use crux_core::testing::AppTester;
use crux_core::Request;
use crux_http::protocol::{HttpRequest, HttpResponse, HttpResult};
use crux_http::HttpError;
use serde_json::{json, Value};

use vocab_shared::capabilities::{
    AudioOperation, DialogOperation, RealtimeOperation, TimerId, TimerOperation,
};
use vocab_shared::config::ClientConfig;
use vocab_shared::{App, Effect, Event, Model};

pub type Tester = AppTester<App, Effect>;

pub const API: &str = "http://localhost:5000/api";

/// Effects sorted by capability.
#[derive(Default)]
pub struct Effects {
    pub http: Vec<Request<HttpRequest>>,
    pub timers: Vec<Request<TimerOperation>>,
    pub realtime: Vec<Request<RealtimeOperation>>,
    pub dialogs: Vec<Request<DialogOperation>>,
    pub audio: Vec<Request<AudioOperation>>,
    pub renders: usize,
}

impl Effects {
    pub fn from_effects(effects: impl IntoIterator<Item = Effect>) -> Self {
        let mut out = Self::default();
        out.extend(effects);
        out
    }

    pub fn extend(&mut self, effects: impl IntoIterator<Item = Effect>) {
        for effect in effects {
            match effect {
                Effect::Http(r) => self.http.push(r),
                Effect::Timer(r) => self.timers.push(r),
                Effect::Realtime(r) => self.realtime.push(r),
                Effect::Dialog(r) => self.dialogs.push(r),
                Effect::Audio(r) => self.audio.push(r),
                Effect::Render(_) => self.renders += 1,
            }
        }
    }

    pub fn urls(&self) -> Vec<String> {
        self.http.iter().map(|r| r.operation.url.clone()).collect()
    }

    /// Requests for the vocabulary list.
    pub fn list_requests(&self) -> Vec<&Request<HttpRequest>> {
        self.http
            .iter()
            .filter(|r| r.operation.method == "GET" && r.operation.url.contains("/vocabulary?"))
            .collect()
    }

    /// Started timers, skipping cancellations.
    pub fn started_timers(&mut self) -> Vec<(TimerId, u64, Request<TimerOperation>)> {
        self.timers
            .drain(..)
            .filter_map(|r| match r.operation {
                TimerOperation::Start { id, millis } => Some((id, millis, r)),
                TimerOperation::Cancel { .. } => None,
            })
            .collect()
    }

    pub fn cancelled_timers(&self) -> Vec<TimerId> {
        self.timers
            .iter()
            .filter_map(|r| match r.operation {
                TimerOperation::Cancel { id } => Some(id),
                TimerOperation::Start { .. } => None,
            })
            .collect()
    }

    pub fn take_http(&mut self, method: &str, path: &str) -> Request<HttpRequest> {
        let index = self
            .http
            .iter()
            .position(|r| r.operation.method == method && r.operation.url.contains(path))
            .unwrap_or_else(|| panic!("no {method} {path} in {:?}", self.urls()));
        self.http.remove(index)
    }
}

pub fn update(app: &Tester, model: &mut Model, event: Event) -> Effects {
    Effects::from_effects(app.update(event, model).effects)
}

/// Resolves a request and feeds the resulting events back into the app.
pub fn resolve_with<Op>(
    app: &Tester,
    model: &mut Model,
    request: &mut Request<Op>,
    output: Op::Output,
) -> Effects
where
    Op: crux_core::capability::Operation,
{
    let update = app.resolve(request, output).expect("request should resolve");
    let mut effects = Effects::from_effects(update.effects);
    for event in update.events {
        effects.extend(app.update(event, model).effects);
    }
    effects
}

pub fn respond(
    app: &Tester,
    model: &mut Model,
    request: &mut Request<HttpRequest>,
    response: HttpResponse,
) -> Effects {
    resolve_with(app, model, request, HttpResult::Ok(response))
}

/// Answers as if the request never reached the server.
pub fn fail(
    app: &Tester,
    model: &mut Model,
    request: &mut Request<HttpRequest>,
    error: HttpError,
) -> Effects {
    resolve_with(app, model, request, HttpResult::Err(error))
}

pub fn respond_json(
    app: &Tester,
    model: &mut Model,
    request: &mut Request<HttpRequest>,
    body: Value,
) -> Effects {
    respond(app, model, request, HttpResponse::ok().json(body).build())
}

pub fn entry_json(id: u64, word: &str) -> Value {
    json!({
        "id": id,
        "word": word,
        "definition": format!("meaning of {word}"),
        "example": null,
        "translation": null,
        "status": "learning",
        "times_practiced": 0,
    })
}

pub fn list_json(words: Vec<Value>, total: u64, pages: u32, current_page: u32) -> Value {
    json!({
        "words": words,
        "total": total,
        "pages": pages,
        "current_page": current_page,
        "per_page": 10,
        "has_next": current_page < pages,
        "has_prev": current_page > 1,
    })
}

/// Starts the core with default config and serves the initial list fetch.
pub fn started_with(words: Vec<Value>) -> (Tester, Model) {
    let app = Tester::default();
    let mut model = Model::default();

    let mut effects = update(
        &app,
        &mut model,
        Event::Start(Box::new(ClientConfig::default())),
    );
    let mut list = effects.take_http("GET", "/vocabulary?");
    let total = words.len() as u64;
    respond_json(&app, &mut model, &mut list, list_json(words, total, 1, 1));

    (app, model)
}

pub fn started() -> (Tester, Model) {
    started_with(vec![entry_json(1, "apple"), entry_json(2, "banana")])
}

pub fn last_toast(model: &Model) -> Option<&str> {
    model.toasts.back().map(|t| t.message.as_str())
}
