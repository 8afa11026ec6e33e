//! Commands accepted by the controller and the effects it asks the runtime to run.

use shared::domain::{Category, EventId, Location, NewEvent, ProfileFields, TimeFilter, View};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Navigate {
        view: View,
        event_id: Option<EventId>,
    },
    Register {
        event_id: EventId,
    },
    Unregister {
        event_id: EventId,
    },
    FindCompany {
        event_id: EventId,
    },
    ToggleTimeFilter(TimeFilter),
    ToggleCategoryFilter(Category),
    ToggleLocationFilter(Location),
    ClearFilters,
    OpenFilterModal,
    CloseFilterModal,
    SelectDate {
        day: u32,
    },
    SaveProfile(ProfileFields),
    AddInterest {
        interest: String,
        pending: Option<ProfileFields>,
    },
    RemoveInterest {
        interest: String,
        pending: Option<ProfileFields>,
    },
    CreateEvent(NewEvent),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Navigate { .. } => "navigate",
            Command::Register { .. } => "register",
            Command::Unregister { .. } => "unregister",
            Command::FindCompany { .. } => "find_company",
            Command::ToggleTimeFilter(_) => "toggle_time_filter",
            Command::ToggleCategoryFilter(_) => "toggle_category_filter",
            Command::ToggleLocationFilter(_) => "toggle_location_filter",
            Command::ClearFilters => "clear_filters",
            Command::OpenFilterModal => "open_filter_modal",
            Command::CloseFilterModal => "close_filter_modal",
            Command::SelectDate { .. } => "select_date",
            Command::SaveProfile(_) => "save_profile",
            Command::AddInterest { .. } => "add_interest",
            Command::RemoveInterest { .. } => "remove_interest",
            Command::CreateEvent(_) => "create_event",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Write a full snapshot of the persisted records.
    Persist,
    Render,
    Notify(String),
}

pub(crate) fn persist_and_render() -> Vec<Effect> {
    vec![Effect::Persist, Effect::Render]
}

pub(crate) fn render_only() -> Vec<Effect> {
    vec![Effect::Render]
}

pub fn requires_persist(effects: &[Effect]) -> bool {
    effects.contains(&Effect::Persist)
}
