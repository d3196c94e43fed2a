use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use digital_timer::{
    audio::{Tone, ToneGenerator, ToneSink},
    create_router,
    engine::{IntervalScheduler, TimerEngine, TimerEvent},
    state::{AppState, AudioSettings, TimerConfig},
    tasks::tick_task,
};

#[derive(Default)]
struct RecordingSink(Mutex<Vec<Tone>>);

impl RecordingSink {
    fn count(&self, frequency: f32) -> usize {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.frequency_hz == frequency)
            .count()
    }
}

impl ToneSink for RecordingSink {
    fn play(&self, tone: Tone) {
        self.0.lock().unwrap().push(tone);
    }
}

struct Console {
    state: Arc<AppState>,
    router: Router,
    tones: Arc<RecordingSink>,
}

fn console(minutes: u8, seconds: u8) -> Console {
    let tones = Arc::new(RecordingSink::default());
    let (scheduler, tick_rx) = IntervalScheduler::new(Duration::from_secs(1));
    let engine = TimerEngine::new(
        TimerConfig::new(minutes, seconds),
        AudioSettings::default(),
        ToneGenerator::new(tones.clone()),
        Box::new(scheduler),
    );
    let state = Arc::new(AppState::new(0, "127.0.0.1".to_string(), engine));
    tokio::spawn(tick_task(Arc::clone(&state), tick_rx));

    Console {
        router: create_router(Arc::clone(&state)),
        state,
        tones,
    }
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test(start_paused = true)]
async fn test_countdown_runs_to_completion() {
    let c = console(0, 5);

    let (status, body) = send(&c.router, "POST", "/timer/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accepted"], true);
    assert_eq!(body["timer"]["remaining_seconds"], 5);
    assert_eq!(body["timer"]["is_running"], true);

    tokio::time::sleep(Duration::from_millis(5500)).await;

    let (_, body) = send(&c.router, "GET", "/timer", None).await;
    assert_eq!(body["timer"]["remaining_seconds"], 0);
    assert_eq!(body["timer"]["is_running"], false);
    assert_eq!(body["timer"]["is_completed"], true);
    assert_eq!(body["timer"]["phase"], "completed");
    assert_eq!(c.tones.count(1000.0), 1);

    // Nothing left to tick once complete
    tokio::time::sleep(Duration::from_secs(3)).await;
    let (_, body) = send(&c.router, "GET", "/timer", None).await;
    assert_eq!(body["timer"]["remaining_seconds"], 0);
}

#[tokio::test(start_paused = true)]
async fn test_warning_event_on_eleven_to_ten() {
    let c = console(0, 12);
    let mut events = c.state.event_tx.subscribe();

    send(&c.router, "POST", "/timer/start", None).await;
    tokio::time::sleep(Duration::from_millis(2500)).await;

    assert_eq!(events.recv().await.unwrap(), TimerEvent::Tick { remaining_seconds: 11 });
    assert_eq!(events.recv().await.unwrap(), TimerEvent::Tick { remaining_seconds: 10 });
    assert_eq!(
        events.recv().await.unwrap(),
        TimerEvent::WarningThreshold { remaining_seconds: 10 }
    );
    assert_eq!(c.tones.count(400.0), 1);
}

#[tokio::test(start_paused = true)]
async fn test_pause_holds_and_resume_continues() {
    let c = console(0, 30);

    send(&c.router, "POST", "/timer/start", None).await;
    tokio::time::sleep(Duration::from_millis(3500)).await;

    let (_, body) = send(&c.router, "POST", "/timer/pause", None).await;
    assert_eq!(body["timer"]["remaining_seconds"], 27);
    assert_eq!(body["timer"]["phase"], "paused");

    tokio::time::sleep(Duration::from_secs(10)).await;
    let (_, body) = send(&c.router, "GET", "/timer", None).await;
    assert_eq!(body["timer"]["remaining_seconds"], 27);

    let (_, body) = send(&c.router, "POST", "/timer/start", None).await;
    assert_eq!(body["timer"]["remaining_seconds"], 27);
    tokio::time::sleep(Duration::from_millis(1500)).await;

    let (_, body) = send(&c.router, "GET", "/timer", None).await;
    assert_eq!(body["timer"]["remaining_seconds"], 26);
}

#[tokio::test]
async fn test_adjust_and_preset_commands() {
    let c = console(5, 0);

    let (_, body) = send(&c.router, "POST", "/timer/minutes/down", None).await;
    assert_eq!(body["timer"]["configured_minutes"], 4);
    let (_, body) = send(&c.router, "POST", "/timer/seconds/up", None).await;
    assert_eq!(body["timer"]["configured_seconds"], 1);
    assert_eq!(body["timer"]["display_time"], "04:01");

    let (status, _) = send(&c.router, "POST", "/timer/seconds/sideways", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&c.router, "POST", "/timer/preset", Some(json!({"minutes": 3, "seconds": 0}))).await;
    assert_eq!(body["timer"]["configured_minutes"], 3);
    assert_eq!(body["timer"]["remaining_seconds"], 0);
    assert_eq!(body["timer"]["display_time"], "03:00");

    let (_, body) = send(&c.router, "POST", "/presets/workout", None).await;
    assert_eq!(body["timer"]["display_time"], "01:30");

    let (status, _) = send(&c.router, "POST", "/presets/tea", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&c.router, "GET", "/presets", None).await;
    assert_eq!(body.as_array().unwrap().len(), 4);
    assert_eq!(body[3]["label"], "POWER NAP");
}

#[tokio::test]
async fn test_commands_ignored_while_running() {
    let c = console(1, 0);
    send(&c.router, "POST", "/timer/start", None).await;

    let (status, body) = send(&c.router, "POST", "/timer/minutes/up", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accepted"], false);
    assert_eq!(body["status"], "ignored");
    assert_eq!(body["timer"]["configured_minutes"], 1);

    let (_, body) = send(&c.router, "POST", "/presets/coffee", None).await;
    assert_eq!(body["accepted"], false);

    let (_, body) = send(&c.router, "POST", "/timer/stop", None).await;
    assert_eq!(body["timer"]["is_running"], false);
    assert_eq!(body["timer"]["remaining_seconds"], 0);
}

#[tokio::test]
async fn test_start_with_zero_duration_is_ignored() {
    let c = console(0, 0);
    let (_, body) = send(&c.router, "POST", "/timer/start", None).await;
    assert_eq!(body["accepted"], false);
    assert_eq!(body["timer"]["is_running"], false);
}

#[tokio::test]
async fn test_volume_mute_and_navigation() {
    let c = console(5, 0);

    let (_, body) = send(&c.router, "POST", "/audio/mute", None).await;
    assert_eq!(body["timer"]["muted"], true);

    let (_, body) = send(&c.router, "POST", "/audio/volume", Some(json!({"volume": 80}))).await;
    assert_eq!(body["timer"]["volume"], 80);
    assert_eq!(body["timer"]["muted"], false);

    let (_, body) = send(&c.router, "POST", "/view/settings", None).await;
    assert_eq!(body["view"], "settings");
    assert_eq!(body["label"], "SETTINGS");

    let (_, body) = send(&c.router, "POST", "/view/back", None).await;
    assert_eq!(body["view"], "timer");
    assert_eq!(body["changed"], true);

    let (status, _) = send(&c.router, "POST", "/view/radio", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&c.router, "GET", "/status", None).await;
    assert_eq!(body["view"], "timer");
    assert_eq!(body["system"]["model"], "DIGITAL-TIMER-2024");
    assert_eq!(body["last_action"], "view-back");
}

#[tokio::test]
async fn test_health() {
    let c = console(5, 0);
    let (status, body) = send(&c.router, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
