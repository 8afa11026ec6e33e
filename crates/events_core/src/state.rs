//! In-memory application state: the four persisted records plus session-only
//! filter and view state.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::domain::{Category, Event, EventId, Location, Profile, RequesterId, TimeFilter, View};

/// Ordered set of registered event ids. Duplicates are dropped on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<EventId>", into = "Vec<EventId>")]
pub struct RegistrationSet {
    ids: Vec<EventId>,
}

impl RegistrationSet {
    pub fn contains(&self, id: &EventId) -> bool {
        self.ids.contains(id)
    }

    /// Returns `false` when the id was already registered.
    pub fn insert(&mut self, id: EventId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Returns `false` when the id was not registered.
    pub fn remove(&mut self, id: &EventId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| existing != id);
        self.ids.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventId> {
        self.ids.iter()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn as_slice(&self) -> &[EventId] {
        &self.ids
    }
}

impl From<Vec<EventId>> for RegistrationSet {
    fn from(raw: Vec<EventId>) -> Self {
        let mut set = Self::default();
        for id in raw {
            set.insert(id);
        }
        set
    }
}

impl From<RegistrationSet> for Vec<EventId> {
    fn from(set: RegistrationSet) -> Self {
        set.ids
    }
}

/// "Find company" requests per event. Entries only ever grow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventRequests {
    by_event: BTreeMap<EventId, Vec<RequesterId>>,
}

impl EventRequests {
    /// Returns `false` when the requester was already listed for the event.
    pub fn add(&mut self, event_id: EventId, requester: RequesterId) -> bool {
        let requesters = self.by_event.entry(event_id).or_default();
        if requesters.contains(&requester) {
            return false;
        }
        requesters.push(requester);
        true
    }

    pub fn requesters(&self, event_id: &EventId) -> Option<&[RequesterId]> {
        self.by_event.get(event_id).map(Vec::as_slice)
    }

    pub fn contains(&self, event_id: &EventId, requester: &RequesterId) -> bool {
        self.requesters(event_id)
            .is_some_and(|requesters| requesters.contains(requester))
    }

    pub fn is_empty(&self) -> bool {
        self.by_event.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub time: Option<TimeFilter>,
    pub categories: Vec<Category>,
    pub locations: Vec<Location>,
}

impl FilterState {
    pub fn toggle_time(&mut self, option: TimeFilter) {
        self.time = if self.time == Some(option) {
            None
        } else {
            Some(option)
        };
    }

    pub fn toggle_category(&mut self, category: Category) {
        toggle_member(&mut self.categories, category);
    }

    pub fn toggle_location(&mut self, location: Location) {
        toggle_member(&mut self.locations, location);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_active(&self) -> bool {
        self.time.is_some() || !self.categories.is_empty() || !self.locations.is_empty()
    }

    pub fn active_count(&self) -> usize {
        usize::from(self.time.is_some()) + self.categories.len() + self.locations.len()
    }
}

fn toggle_member<T: PartialEq>(values: &mut Vec<T>, value: T) {
    if let Some(index) = values.iter().position(|existing| *existing == value) {
        values.remove(index);
    } else {
        values.push(value);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub current: View,
    pub selected_event: Option<EventId>,
    pub selected_date: Option<NaiveDate>,
    pub filter_modal_open: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub events: Vec<Event>,
    /// Stored event records that failed to decode. They are written back
    /// unchanged after `events` so a save never drops them.
    pub retained_events: Vec<Value>,
    pub registrations: RegistrationSet,
    pub profile: Profile,
    pub requests: EventRequests,
    pub filters: FilterState,
    pub view: ViewState,
}

impl AppState {
    pub fn find_event(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|event| &event.id == id)
    }

    /// Registered events in registration order; ids without a stored event are skipped.
    pub fn registered_events(&self) -> Vec<&Event> {
        self.registrations
            .iter()
            .filter_map(|id| self.find_event(id))
            .collect()
    }
}
