use chrono::{Datelike, Local, NaiveDate, Utc};
use shared::{
    domain::{
        Category, Event, EventId, Location, NewEvent, ProfileFields, RequesterId, TimeFilter, View,
    },
    error::CoreError,
};

use crate::{
    calendar,
    commands::{persist_and_render, render_only, Command, Effect},
    filter::filter_events,
    matching::{self, MatchedUser},
    seed,
    state::AppState,
};

pub const DEFAULT_CURRENT_USER: &str = "currentUser";

pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
    fn now_millis(&self) -> i64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Pins "today" to a date; creation ids derive from midnight of that date.
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }

    fn now_millis(&self) -> i64 {
        self.0
            .and_hms_opt(0, 0, 0)
            .map_or(0, |midnight| midnight.and_utc().timestamp_millis())
    }
}

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub current_user: RequesterId,
    pub admin_mode: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            current_user: RequesterId::new(DEFAULT_CURRENT_USER),
            admin_mode: true,
        }
    }
}

/// Owns the application state; every change goes through one of its methods.
///
/// Mutations return the effects the runtime must carry out. A call that
/// changes nothing returns no effects.
pub struct AppController {
    state: AppState,
    clock: Box<dyn Clock>,
    options: ControllerOptions,
}

impl AppController {
    pub fn new(state: AppState, clock: Box<dyn Clock>, options: ControllerOptions) -> Self {
        Self {
            state,
            clock,
            options,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Fills an empty catalogue with the sample events.
    pub fn ensure_seeded(&mut self) -> Vec<Effect> {
        if !self.state.events.is_empty() {
            return Vec::new();
        }
        self.state.events = seed::sample_events();
        tracing::info!(count = self.state.events.len(), "seeded sample events");
        vec![Effect::Persist]
    }

    pub fn dispatch(&mut self, command: Command) -> Result<Vec<Effect>, CoreError> {
        let name = command.name();
        let result = match command {
            Command::Navigate { view, event_id } => Ok(self.navigate(view, event_id)),
            Command::Register { event_id } => self.register(event_id),
            Command::Unregister { event_id } => Ok(self.unregister(&event_id)),
            Command::FindCompany { event_id } => self.find_company(event_id),
            Command::ToggleTimeFilter(option) => Ok(self.toggle_time_filter(option)),
            Command::ToggleCategoryFilter(category) => Ok(self.toggle_category_filter(category)),
            Command::ToggleLocationFilter(location) => Ok(self.toggle_location_filter(location)),
            Command::ClearFilters => Ok(self.clear_filters()),
            Command::OpenFilterModal => Ok(self.set_filter_modal(true)),
            Command::CloseFilterModal => Ok(self.set_filter_modal(false)),
            Command::SelectDate { day } => Ok(self.select_date(day)),
            Command::SaveProfile(fields) => self.save_profile(fields),
            Command::AddInterest { interest, pending } => {
                Ok(self.add_interest(&interest, pending.as_ref()))
            }
            Command::RemoveInterest { interest, pending } => {
                Ok(self.remove_interest(&interest, pending.as_ref()))
            }
            Command::CreateEvent(new_event) => {
                self.create_event(new_event).map(|(_, effects)| effects)
            }
        };
        match &result {
            Ok(effects) => tracing::debug!(command = name, effects = effects.len(), "applied command"),
            Err(error) => tracing::info!(command = name, %error, "rejected command"),
        }
        result
    }

    // -- navigation ---------------------------------------------------------

    /// Switches view. The selected event only changes when an id is supplied.
    pub fn navigate(&mut self, view: View, event_id: Option<EventId>) -> Vec<Effect> {
        self.state.view.current = view;
        if let Some(event_id) = event_id {
            self.state.view.selected_event = Some(event_id);
        }
        render_only()
    }

    pub fn selected_event(&self) -> Option<&Event> {
        self.state
            .view
            .selected_event
            .as_ref()
            .and_then(|id| self.state.find_event(id))
    }

    // -- registration -------------------------------------------------------

    /// Registering twice is a no-op. Unknown ids are rejected so the set only
    /// ever references stored events.
    pub fn register(&mut self, event_id: EventId) -> Result<Vec<Effect>, CoreError> {
        self.require_event(&event_id)?;
        if self.state.registrations.insert(event_id) {
            Ok(persist_and_render())
        } else {
            Ok(Vec::new())
        }
    }

    pub fn unregister(&mut self, event_id: &EventId) -> Vec<Effect> {
        if self.state.registrations.remove(event_id) {
            persist_and_render()
        } else {
            Vec::new()
        }
    }

    pub fn find_company(&mut self, event_id: EventId) -> Result<Vec<Effect>, CoreError> {
        self.require_event(&event_id)?;
        let requester = self.options.current_user.clone();
        if self.state.requests.add(event_id, requester) {
            Ok(persist_and_render())
        } else {
            Ok(Vec::new())
        }
    }

    fn require_event(&self, event_id: &EventId) -> Result<(), CoreError> {
        match self.state.find_event(event_id) {
            Some(_) => Ok(()),
            None => Err(CoreError::not_found(format!("no event with id {event_id}"))),
        }
    }

    pub fn is_registered(&self, event_id: &EventId) -> bool {
        self.state.registrations.contains(event_id)
    }

    pub fn has_requested_company(&self, event_id: &EventId) -> bool {
        self.state
            .requests
            .contains(event_id, &self.options.current_user)
    }

    /// Placeholder matches, shown only after the current user asked for company.
    pub fn matched_users(&self, event_id: &EventId) -> Vec<MatchedUser> {
        if !self.has_requested_company(event_id) {
            return Vec::new();
        }
        let requesters = self
            .state
            .requests
            .requesters(event_id)
            .map_or(0, <[RequesterId]>::len);
        matching::matched_users(requesters, &self.state.profile.interests)
    }

    // -- filters --------------------------------------------------------------

    pub fn filtered_events(&self) -> Vec<&Event> {
        filter_events(&self.state.events, &self.state.filters, self.today())
    }

    /// Registered events, narrowed by the same filters as the main list.
    pub fn my_events(&self) -> Vec<&Event> {
        filter_events(
            self.state.registered_events(),
            &self.state.filters,
            self.today(),
        )
    }

    pub fn toggle_time_filter(&mut self, option: TimeFilter) -> Vec<Effect> {
        self.state.filters.toggle_time(option);
        render_only()
    }

    pub fn toggle_category_filter(&mut self, category: Category) -> Vec<Effect> {
        self.state.filters.toggle_category(category);
        render_only()
    }

    pub fn toggle_location_filter(&mut self, location: Location) -> Vec<Effect> {
        self.state.filters.toggle_location(location);
        render_only()
    }

    pub fn clear_filters(&mut self) -> Vec<Effect> {
        self.state.filters.clear();
        render_only()
    }

    pub fn set_filter_modal(&mut self, open: bool) -> Vec<Effect> {
        self.state.view.filter_modal_open = open;
        render_only()
    }

    // -- calendar -------------------------------------------------------------

    pub fn calendar_days(&self, year: i32, month0: u32) -> Vec<Option<u32>> {
        calendar::calendar_days(year, month0)
    }

    pub fn current_month_grid(&self) -> Vec<Option<u32>> {
        let today = self.today();
        calendar::calendar_days(today.year(), today.month0())
    }

    pub fn has_events_on_date(&self, date: NaiveDate) -> bool {
        self.state
            .registered_events()
            .iter()
            .any(|event| event.date == date)
    }

    pub fn events_for_date(&self, date: NaiveDate) -> Vec<&Event> {
        self.state
            .registered_events()
            .into_iter()
            .filter(|event| event.date == date)
            .collect()
    }

    /// Selects a day of the current month. Days outside the month are ignored.
    pub fn select_date(&mut self, day: u32) -> Vec<Effect> {
        match calendar::day_in_month_of(self.today(), day) {
            Some(date) => {
                self.state.view.selected_date = Some(date);
                render_only()
            }
            None => Vec::new(),
        }
    }

    pub fn selected_date_events(&self) -> Vec<&Event> {
        self.state
            .view
            .selected_date
            .map(|date| self.events_for_date(date))
            .unwrap_or_default()
    }

    // -- profile --------------------------------------------------------------

    pub fn save_profile(&mut self, fields: ProfileFields) -> Result<Vec<Effect>, CoreError> {
        if fields.username.trim().is_empty() {
            return Err(CoreError::validation("username is required"));
        }
        self.apply_profile_fields(fields);
        Ok(vec![
            Effect::Persist,
            Effect::Notify("Profile saved!".to_string()),
        ])
    }

    /// Appends a trimmed interest. Unsaved form values in `pending` are kept.
    pub fn add_interest(&mut self, interest: &str, pending: Option<&ProfileFields>) -> Vec<Effect> {
        let interest = interest.trim();
        if interest.is_empty() || self.state.profile.interests.iter().any(|i| i == interest) {
            return Vec::new();
        }
        self.apply_pending(pending);
        self.state.profile.interests.push(interest.to_string());
        persist_and_render()
    }

    pub fn remove_interest(&mut self, interest: &str, pending: Option<&ProfileFields>) -> Vec<Effect> {
        self.apply_pending(pending);
        self.state.profile.interests.retain(|i| i != interest);
        persist_and_render()
    }

    fn apply_pending(&mut self, pending: Option<&ProfileFields>) {
        let Some(pending) = pending else {
            return;
        };
        let mut fields = pending.clone();
        if fields.username.trim().is_empty() {
            fields.username = self.state.profile.username.clone();
        }
        self.apply_profile_fields(fields);
    }

    fn apply_profile_fields(&mut self, fields: ProfileFields) {
        let profile = &mut self.state.profile;
        profile.username = fields.username.trim().to_string();
        profile.about = fields.about;
        profile.course = fields.course;
        profile.specialty = fields.specialty;
        profile.hobbies = fields.hobbies;
    }

    // -- event creation -------------------------------------------------------

    pub fn create_event(&mut self, new_event: NewEvent) -> Result<(EventId, Vec<Effect>), CoreError> {
        if !self.options.admin_mode {
            return Err(CoreError::forbidden("creating events requires admin mode"));
        }
        let title = new_event.title.trim();
        if title.is_empty() {
            return Err(CoreError::validation("event title is required"));
        }

        let id = self.next_event_id();
        let photo = new_event
            .photo
            .map(|photo| photo.trim().to_string())
            .filter(|photo| !photo.is_empty())
            .unwrap_or_else(|| seed::DEFAULT_PHOTO.to_string());

        let event = Event {
            id: id.clone(),
            title: title.to_string(),
            description: new_event.description,
            date: new_event.date,
            time: new_event.time,
            location: new_event.location,
            category: new_event.category,
            photo,
        };
        tracing::info!(event_id = %id, title = %event.title, "created event");
        self.state.events.insert(0, event);
        Ok((id, persist_and_render()))
    }

    fn next_event_id(&self) -> EventId {
        let mut candidate = self.clock.now_millis();
        loop {
            let id = EventId::new(candidate.to_string());
            if self.state.find_event(&id).is_none() {
                return id;
            }
            candidate += 1;
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
