mod common;

use assert_matches::assert_matches;
use crux_http::protocol::HttpResponse;
use serde_json::json;

use common::*;
use vocab_shared::capabilities::{AudioError, AudioOperation, AudioOutput, TimerOutput};
use vocab_shared::model::{FillBlankPhase, FlashcardPhase, Model, Section, StatusFilter, ToastKind};
use vocab_shared::{App, Event};

use crux_core::App as _;

fn enter(app: &Tester, model: &mut Model, section: Section) -> Effects {
    update(app, model, Event::ActivateSection { section })
}

fn with_flashcard() -> (Tester, Model) {
    let (app, mut model) = started();
    enter(&app, &mut model, Section::Flashcard);

    let mut effects = update(&app, &mut model, Event::DrawFlashcard);
    let mut draw = effects.take_http("GET", "/games/flashcard/random?status=all");
    respond_json(
        &app,
        &mut model,
        &mut draw,
        json!({
            "id": 7,
            "word": "ephemeral",
            "definition": "lasting a very short time",
            "example": "Fame is ephemeral.",
            "ipa_uk": "/ɪˈfem.ər.əl/",
        }),
    );
    (app, model)
}

fn with_question() -> (Tester, Model) {
    let (app, mut model) = started();
    enter(&app, &mut model, Section::FillBlank);

    let mut effects = update(&app, &mut model, Event::DrawFillBlank);
    let mut draw = effects.take_http("GET", "/games/fill-blank/question");
    respond_json(
        &app,
        &mut model,
        &mut draw,
        json!({
            "id": 7,
            "question": "Fame is _____.",
            "hint": "lasting a very short time",
            "word": "ephemeral",
        }),
    );
    (app, model)
}

#[test]
fn flashcard_draw_flip_and_view() {
    let (app, mut model) = with_flashcard();
    assert_eq!(model.flashcard.phase(), FlashcardPhase::ShownFront);

    let card = App.view(&model).flashcard.card.unwrap();
    assert_eq!(card.word, "ephemeral");
    assert_eq!(card.back, None);

    update(&app, &mut model, Event::FlipFlashcard);
    let card = App.view(&model).flashcard.card.unwrap();
    assert_eq!(model.flashcard.phase(), FlashcardPhase::ShownBack);
    assert_eq!(card.back.unwrap().definition, "lasting a very short time");

    update(&app, &mut model, Event::FlipFlashcard);
    assert_eq!(model.flashcard.phase(), FlashcardPhase::ShownFront);
}

#[test]
fn flashcard_filter_is_sent_with_draw() {
    let (app, mut model) = started();
    enter(&app, &mut model, Section::Flashcard);
    update(
        &app,
        &mut model,
        Event::FlashcardFilterChanged {
            filter: StatusFilter::Learning,
        },
    );

    let effects = update(&app, &mut model, Event::DrawFlashcard);
    assert_eq!(
        effects.urls(),
        vec![format!("{API}/games/flashcard/random?status=learning")]
    );
}

#[test]
fn flashcard_not_found_stays_empty() {
    let (app, mut model) = started();
    enter(&app, &mut model, Section::Flashcard);

    let mut effects = update(&app, &mut model, Event::DrawFlashcard);
    let mut draw = effects.take_http("GET", "/games/flashcard/random");
    respond(
        &app,
        &mut model,
        &mut draw,
        HttpResponse::status(404)
            .json(json!({"error": "No words available"}))
            .build(),
    );

    assert_eq!(model.flashcard.phase(), FlashcardPhase::Empty);
    assert_eq!(last_toast(&model), Some("No words available for practice!"));
}

#[test]
fn marking_without_a_card_only_warns() {
    let (app, mut model) = started();
    enter(&app, &mut model, Section::Flashcard);

    let effects = update(&app, &mut model, Event::MarkFlashcard { correct: true });

    assert!(effects.http.is_empty());
    assert_eq!(model.toasts.back().unwrap().kind, ToastKind::Warning);
}

#[test]
fn marking_reports_practice_and_draws_next() {
    let (app, mut model) = with_flashcard();

    let mut effects = update(&app, &mut model, Event::MarkFlashcard { correct: false });
    let mut practice = effects.take_http("POST", "/games/flashcard/practice");
    let body: serde_json::Value = serde_json::from_slice(&practice.operation.body).unwrap();
    assert_eq!(body, json!({"vocabulary_id": 7, "correct": false}));
    effects.take_http("GET", "/games/flashcard/random");

    // The practice outcome is only logged, even when it fails.
    let toasts = model.toasts.len();
    let after = respond(
        &app,
        &mut model,
        &mut practice,
        HttpResponse::status(500).build(),
    );
    assert!(after.http.is_empty());
    assert_eq!(model.toasts.len(), toasts);
}

#[test]
fn failed_draw_after_marking_clears_the_card() {
    let (app, mut model) = with_flashcard();

    let mut effects = update(&app, &mut model, Event::MarkFlashcard { correct: true });
    effects.take_http("POST", "/games/flashcard/practice");
    let mut draw = effects.take_http("GET", "/games/flashcard/random");
    respond(&app, &mut model, &mut draw, HttpResponse::status(500).build());

    assert_eq!(model.flashcard.phase(), FlashcardPhase::Empty);
    assert_eq!(last_toast(&model), Some("Failed to load flashcard"));

    // The same card cannot be reported twice.
    let again = update(&app, &mut model, Event::MarkFlashcard { correct: true });
    assert!(again.http.is_empty());
    assert_eq!(last_toast(&model), Some("Please load a flashcard first!"));
}

#[test]
fn leaving_the_flashcard_section_drops_the_session() {
    let (app, mut model) = with_flashcard();

    enter(&app, &mut model, Section::Vocabulary);
    enter(&app, &mut model, Section::Flashcard);

    assert_eq!(model.flashcard.phase(), FlashcardPhase::Empty);
    assert_eq!(App.view(&model).flashcard.card, None);
}

#[test]
fn flashcard_arriving_after_leaving_is_discarded() {
    let (app, mut model) = started();
    enter(&app, &mut model, Section::Flashcard);
    let mut effects = update(&app, &mut model, Event::DrawFlashcard);
    let mut draw = effects.take_http("GET", "/games/flashcard/random");

    enter(&app, &mut model, Section::Statistics);
    respond_json(&app, &mut model, &mut draw, entry_json(3, "late"));

    assert_eq!(model.flashcard.phase(), FlashcardPhase::Empty);
}

#[test]
fn empty_answer_is_rejected_locally() {
    let (app, mut model) = with_question();

    for answer in ["", "   "] {
        let effects = update(&app, &mut model, Event::SubmitAnswer { answer: answer.into() });
        assert!(effects.http.is_empty());
        assert_eq!(last_toast(&model), Some("Please enter an answer!"));
    }
    assert_eq!(model.fill_blank.phase(), FillBlankPhase::QuestionActive);
}

#[test]
fn answer_is_checked_and_next_question_follows() {
    let (app, mut model) = with_question();

    let mut effects = update(
        &app,
        &mut model,
        Event::SubmitAnswer {
            answer: "  Ephemeral ".into(),
        },
    );
    let mut check = effects.take_http("POST", "/games/fill-blank/check");
    let body: serde_json::Value = serde_json::from_slice(&check.operation.body).unwrap();
    assert_eq!(body, json!({"vocabulary_id": 7, "answer": "Ephemeral"}));

    let mut checked = respond_json(
        &app,
        &mut model,
        &mut check,
        json!({"correct": true, "correct_answer": "ephemeral", "times_practiced": 3}),
    );
    assert_eq!(model.fill_blank.phase(), FillBlankPhase::Answered);
    let verdict = App.view(&model).fill_blank.verdict.unwrap();
    assert!(verdict.correct);
    assert_eq!(verdict.message, "Correct! Great job!");

    let mut timers = checked.started_timers();
    assert_eq!(timers.len(), 1);
    let (id, millis, mut advance) = timers.remove(0);
    assert_eq!(millis, 2000);

    let next = resolve_with(&app, &mut model, &mut advance, TimerOutput::Fired { id });
    assert_eq!(
        next.urls(),
        vec![format!("{API}/games/fill-blank/question?status=all")]
    );
}

#[test]
fn wrong_answer_reveals_the_correct_one() {
    let (app, mut model) = with_question();
    let mut effects = update(&app, &mut model, Event::SubmitAnswer { answer: "eternal".into() });
    let mut check = effects.take_http("POST", "/games/fill-blank/check");

    respond_json(
        &app,
        &mut model,
        &mut check,
        json!({"correct": false, "correct_answer": "ephemeral"}),
    );

    let verdict = App.view(&model).fill_blank.verdict.unwrap();
    assert!(!verdict.correct);
    assert_eq!(verdict.message, "Incorrect. The correct answer is: ephemeral");
}

#[test]
fn auto_advance_is_a_no_op_after_leaving() {
    let (app, mut model) = with_question();
    let mut effects = update(&app, &mut model, Event::SubmitAnswer { answer: "x".into() });
    let mut check = effects.take_http("POST", "/games/fill-blank/check");
    let mut checked = respond_json(
        &app,
        &mut model,
        &mut check,
        json!({"correct": false, "correct_answer": "ephemeral"}),
    );
    let (id, _, mut advance) = checked.started_timers().remove(0);

    enter(&app, &mut model, Section::Vocabulary);
    let fired = resolve_with(&app, &mut model, &mut advance, TimerOutput::Fired { id });

    assert!(fired.http.is_empty());
    assert_eq!(model.fill_blank.phase(), FillBlankPhase::Empty);
}

#[test]
fn statistics_load_independently() {
    let (app, mut model) = started();
    let mut effects = enter(&app, &mut model, Section::Statistics);
    let mut summary = effects.take_http("GET", "/stats/summary");
    let mut monthly = effects.take_http("GET", "/stats/monthly");

    respond(&app, &mut model, &mut summary, HttpResponse::status(500).build());
    respond_json(
        &app,
        &mut model,
        &mut monthly,
        json!([
            {"month": "2026-09", "month_name": "September 2026", "words_added": 4, "words_learned": 1, "practices": 9},
            {"month": "2026-10", "month_name": "October 2026", "words_added": null, "words_learned": 2, "practices": 3}
        ]),
    );

    let view = App.view(&model).statistics;
    assert_eq!(view.summary, None);
    assert_eq!(view.monthly.len(), 2);
    assert_eq!(view.monthly[1].words_added, 0);
    assert_eq!(last_toast(&model), Some("Failed to load statistics"));
}

#[test]
fn toasts_expire_and_ignore_unknown_ids() {
    let (app, mut model) = started();
    let mut effects = update(
        &app,
        &mut model,
        Event::Notify {
            kind: ToastKind::Info,
            message: "hello".into(),
        },
    );
    let toast_id = model.toasts.back().unwrap().id;
    let (timer_id, millis, mut timer) = effects.started_timers().remove(0);
    assert_eq!(millis, 3000);

    update(&app, &mut model, Event::DismissToast { id: 9_999 });
    assert_eq!(model.toasts.len(), 1);

    update(&app, &mut model, Event::DismissToast { id: toast_id });
    assert!(model.toasts.is_empty());

    // Timer for a toast the user already closed.
    resolve_with(&app, &mut model, &mut timer, TimerOutput::Fired { id: timer_id });
    assert!(model.toasts.is_empty());
}

#[test]
fn only_five_toasts_are_kept() {
    let (app, mut model) = started();
    for i in 0..7 {
        update(
            &app,
            &mut model,
            Event::Notify {
                kind: ToastKind::Warning,
                message: format!("toast {i}"),
            },
        );
    }

    let view = App.view(&model);
    assert_eq!(view.toasts.len(), 5);
    assert_eq!(view.toasts[0].message, "toast 2");
}

#[test]
fn new_clip_stops_the_current_one() {
    let (app, mut model) = started();

    let mut first = update(
        &app,
        &mut model,
        Event::PlayPronunciation {
            url: "https://audio.test/uk.mp3".into(),
        },
    );
    assert_matches!(&first.audio[..], [play] if matches!(play.operation, AudioOperation::Play { .. }));
    let mut first_play = first.audio.remove(0);

    let mut second = update(
        &app,
        &mut model,
        Event::PlayPronunciation {
            url: "https://audio.test/us.mp3".into(),
        },
    );
    let ops: Vec<_> = second.audio.iter().map(|r| r.operation.clone()).collect();
    assert_eq!(
        ops,
        vec![
            AudioOperation::Stop,
            AudioOperation::Play {
                url: "https://audio.test/us.mp3".into()
            },
        ]
    );

    // The stopped clip reporting in late leaves the new one playing.
    resolve_with(&app, &mut model, &mut first_play, Ok(AudioOutput::Finished));
    assert_eq!(
        model.playing_audio.as_deref(),
        Some("https://audio.test/us.mp3")
    );

    let mut play = second.audio.remove(1);
    resolve_with(&app, &mut model, &mut play, Err(AudioError::Blocked));
    assert_eq!(model.playing_audio, None);
    assert_eq!(
        last_toast(&model),
        Some("Unable to play audio. Please check your connection.")
    );
}

#[test]
fn finished_clip_clears_playing_state() {
    let (app, mut model) = started();
    let mut effects = update(
        &app,
        &mut model,
        Event::PlayPronunciation {
            url: "https://audio.test/uk.mp3".into(),
        },
    );
    let mut play = effects.audio.remove(0);
    resolve_with(&app, &mut model, &mut play, Ok(AudioOutput::Finished));

    assert_eq!(App.view(&model).playing_audio, None);
}
