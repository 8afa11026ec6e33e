use chrono::NaiveDate;
use serde_json::json;
use shared::domain::EventId;
use storage::MemoryStore;

use super::*;
use crate::persistence::{EVENTS_KEY, REGISTERED_EVENTS_KEY};

fn clock() -> Box<dyn Clock> {
    Box::new(FixedClock(
        NaiveDate::from_ymd_opt(2025, 11, 1).expect("date"),
    ))
}

#[tokio::test]
async fn bootstrap_seeds_and_persists_empty_store() {
    let store = MemoryStore::new();
    let controller = bootstrap(&store, clock(), ControllerOptions::default())
        .await
        .expect("bootstrap");

    assert_eq!(controller.state().events.len(), 6);
    let stored = store.get(EVENTS_KEY).await.expect("get").expect("events saved");
    let stored: serde_json::Value = serde_json::from_str(&stored).expect("json");
    assert_eq!(stored.as_array().map(Vec::len), Some(6));
}

#[tokio::test]
async fn bootstrap_reseeds_legacy_events_but_keeps_registrations() {
    let store = MemoryStore::with_records([
        (EVENTS_KEY, json!([{"id": "1", "title": "old"}]).to_string()),
        (REGISTERED_EVENTS_KEY, r#"["1"]"#.to_string()),
    ]);

    let controller = bootstrap(&store, clock(), ControllerOptions::default())
        .await
        .expect("bootstrap");

    let titles: Vec<&str> = controller
        .state()
        .events
        .iter()
        .map(|e| e.title.as_str())
        .collect();
    assert!(!titles.contains(&"old"));
    assert_eq!(titles.len(), 6);
    assert!(controller.is_registered(&EventId::new("1")));
}

#[tokio::test]
async fn mutations_survive_a_restart() {
    let store = MemoryStore::new();
    let mut controller = bootstrap(&store, clock(), ControllerOptions::default())
        .await
        .expect("bootstrap");

    let effects = controller
        .dispatch(Command::Register {
            event_id: EventId::new("3"),
        })
        .expect("register");
    assert!(requires_persist(&effects));
    save_state(&store, controller.state()).await.expect("save");

    let restarted = bootstrap(&store, clock(), ControllerOptions::default())
        .await
        .expect("restart");
    assert!(restarted.is_registered(&EventId::new("3")));
    assert_eq!(restarted.state().view, ViewState::default());
}

fn stored_event(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": "Rust study group",
        "description": "Weekly",
        "date": "2025-12-02",
        "time": "17:30",
        "location": "On Campus",
        "category": "Meetup",
        "photo": "https://example.org/rust.png"
    })
}

#[tokio::test]
async fn bootstrap_keeps_user_events_next_to_an_undecodable_one() {
    let mut broken = stored_event("778");
    broken.as_object_mut().expect("object").remove("photo");
    let raw = json!([stored_event("777"), broken]).to_string();
    let store = MemoryStore::with_records([(EVENTS_KEY, raw.clone())]);

    let controller = bootstrap(&store, clock(), ControllerOptions::default())
        .await
        .expect("bootstrap");

    assert!(controller.state().find_event(&EventId::new("777")).is_some());
    assert_eq!(controller.state().events.len(), 1);
    assert_eq!(store.get(EVENTS_KEY).await.expect("get"), Some(raw));
}

#[tokio::test]
async fn bootstrap_never_seeds_over_an_unreadable_events_record() {
    let store = MemoryStore::with_records([(EVENTS_KEY, r#"{"not":"a list"}"#)]);

    let controller = bootstrap(&store, clock(), ControllerOptions::default())
        .await
        .expect("bootstrap");

    assert_eq!(controller.state().events.len(), 6);
    assert_eq!(
        store.get(EVENTS_KEY).await.expect("get").as_deref(),
        Some(r#"{"not":"a list"}"#)
    );
}
