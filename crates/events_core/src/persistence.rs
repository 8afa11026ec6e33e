//! Mapping between [`AppState`] and the four records kept in a [`KeyValueStore`].

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use shared::domain::{Event, Profile};
use storage::KeyValueStore;

use crate::state::{AppState, EventRequests, RegistrationSet};

pub const EVENTS_KEY: &str = "events";
pub const REGISTERED_EVENTS_KEY: &str = "registeredEvents";
pub const PROFILE_KEY: &str = "profile";
pub const EVENT_REQUESTS_KEY: &str = "eventRequests";

pub const RECORD_KEYS: [&str; 4] = [
    EVENTS_KEY,
    REGISTERED_EVENTS_KEY,
    PROFILE_KEY,
    EVENT_REQUESTS_KEY,
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedState {
    pub events: Vec<Event>,
    /// Entries of the stored event list that did not decode as [`Event`].
    pub retained_events: Vec<Value>,
    pub registrations: RegistrationSet,
    pub profile: Profile,
    pub requests: EventRequests,
    /// The stored events were in the pre-category format and have been dropped.
    pub discarded_legacy_events: bool,
    /// The events record exists but is not a readable JSON list.
    pub unreadable_events: bool,
}

impl LoadedState {
    pub fn into_app_state(self) -> AppState {
        AppState {
            events: self.events,
            retained_events: self.retained_events,
            registrations: self.registrations,
            profile: self.profile,
            requests: self.requests,
            ..AppState::default()
        }
    }
}

/// Reads the four records. Absent or undecodable records fall back to their
/// defaults; only store failures are errors. Event list entries are decoded
/// one by one and entries that fail are retained verbatim.
pub async fn load_state(store: &dyn KeyValueStore) -> Result<LoadedState> {
    let mut loaded = LoadedState::default();

    if let Some(raw) = store.get(EVENTS_KEY).await? {
        match serde_json::from_str::<Value>(&raw) {
            Ok(value) if is_legacy_event_list(&value) => {
                tracing::info!("stored events use the old format without categories; resetting them");
                store
                    .remove(EVENTS_KEY)
                    .await
                    .context("failed to drop legacy events record")?;
                loaded.discarded_legacy_events = true;
            }
            Ok(Value::Array(records)) => {
                for record in records {
                    match serde_json::from_value::<Event>(record.clone()) {
                        Ok(event) => loaded.events.push(event),
                        Err(error) => {
                            tracing::warn!(
                                key = EVENTS_KEY,
                                id = %record.get("id").unwrap_or(&serde_json::Value::Null),
                                %error,
                                "keeping undecodable event record as stored"
                            );
                            loaded.retained_events.push(record);
                        }
                    }
                }
            }
            Ok(_) => {
                tracing::warn!(key = EVENTS_KEY, "ignoring record that is not a list");
                loaded.unreadable_events = true;
            }
            Err(error) => {
                tracing::warn!(key = EVENTS_KEY, %error, "ignoring unreadable record");
                loaded.unreadable_events = true;
            }
        }
    }

    if let Some(registrations) = read_record(store, REGISTERED_EVENTS_KEY).await? {
        loaded.registrations = registrations;
    }
    if let Some(profile) = read_record(store, PROFILE_KEY).await? {
        loaded.profile = profile;
    }
    if let Some(requests) = read_record(store, EVENT_REQUESTS_KEY).await? {
        loaded.requests = requests;
    }

    tracing::debug!(
        events = loaded.events.len(),
        retained = loaded.retained_events.len(),
        registrations = loaded.registrations.len(),
        "loaded persisted state"
    );
    Ok(loaded)
}

/// Writes a full snapshot of every persisted record.
pub async fn save_state(store: &dyn KeyValueStore, state: &AppState) -> Result<()> {
    let mut events = state
        .events
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<Value>, _>>()
        .context("failed to encode events")?;
    events.extend(state.retained_events.iter().cloned());
    write_record(store, EVENTS_KEY, &events).await?;
    write_record(store, REGISTERED_EVENTS_KEY, &state.registrations).await?;
    write_record(store, PROFILE_KEY, &state.profile).await?;
    write_record(store, EVENT_REQUESTS_KEY, &state.requests).await?;
    Ok(())
}

/// A non-empty event list whose first entry has no usable `category` field.
pub fn is_legacy_event_list(value: &Value) -> bool {
    let Some(first) = value.as_array().and_then(|events| events.first()) else {
        return false;
    };
    match first.get("category") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => true,
        Some(Value::String(category)) => category.is_empty(),
        Some(_) => false,
    }
}

async fn read_record<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>> {
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };
    match serde_json::from_str::<Value>(&raw) {
        Ok(value) => Ok(decode_value(key, value)),
        Err(error) => {
            tracing::warn!(key, %error, "ignoring unreadable record");
            Ok(None)
        }
    }
}

fn decode_value<T: DeserializeOwned>(key: &str, value: Value) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(error) => {
            tracing::warn!(key, %error, "ignoring record with unexpected shape");
            None
        }
    }
}

async fn write_record<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let raw = serde_json::to_string(value).with_context(|| format!("failed to encode {key}"))?;
    store.set(key, &raw).await
}

#[cfg(test)]
#[path = "tests/persistence_tests.rs"]
mod tests;
