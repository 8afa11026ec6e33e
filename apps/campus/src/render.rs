//! Plain-text rendering of the controller state.

use chrono::{Datelike, NaiveDate};
use events_core::{share::format_event_date, share::share_link, AppController};
use shared::domain::{Category, Event, Location, TimeFilter, View};
use url::Url;

const DAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub fn render(controller: &AppController, share_base: &Url) -> String {
    let mut out = match controller.state().view.current {
        View::Events => render_events(controller),
        View::EventDetails => render_event_details(controller, share_base),
        View::MyEvents => render_my_events(controller),
        View::Calendar => render_calendar(controller),
        View::Profile => render_profile(controller),
    };
    if controller.state().view.filter_modal_open {
        out.push('\n');
        out.push_str(&render_filter_panel(controller));
    }
    out
}

pub fn render_events(controller: &AppController) -> String {
    let events = controller.filtered_events();
    let mut out = heading("Events", controller);
    if events.is_empty() {
        out.push_str("  No events match the current filters.\n");
    }
    for event in events {
        out.push_str(&event_line(event, controller.is_registered(&event.id)));
    }
    out
}

pub fn render_my_events(controller: &AppController) -> String {
    let events = controller.my_events();
    let mut out = heading("My events", controller);
    if events.is_empty() {
        out.push_str("  You have not registered for any matching events.\n");
    }
    for event in events {
        out.push_str(&event_line(event, true));
    }
    out
}

pub fn render_event_details(controller: &AppController, share_base: &Url) -> String {
    let Some(event) = controller.selected_event() else {
        return "Event not found.\n".to_string();
    };

    let mut out = String::new();
    out.push_str(&format!("{}\n", event.title));
    out.push_str(&format!(
        "  {} at {} | {} | {}\n",
        format_event_date(event.date),
        event.time.format("%H:%M"),
        event.location,
        event.category
    ));
    out.push_str(&format!("  Photo: {}\n", event.photo));
    out.push('\n');
    out.push_str(&format!("  {}\n", event.description));
    out.push('\n');

    let status = if controller.is_registered(&event.id) {
        "registered (unregister to cancel)"
    } else {
        "not registered"
    };
    out.push_str(&format!("  Status: {status}\n"));

    if controller.has_requested_company(&event.id) {
        let matches = controller.matched_users(&event.id);
        if matches.is_empty() {
            out.push_str("  Looking for company... no matches yet.\n");
        } else {
            out.push_str("  People you might join:\n");
            for user in matches {
                out.push_str(&format!(
                    "    {} (shared: {})\n",
                    user.username,
                    user.shared_interests.join(", ")
                ));
            }
        }
    } else {
        out.push_str(&format!("  Want company? Use find-company {}\n", event.id));
    }

    let link = share_link(event, share_base);
    out.push_str(&format!("  Share: {} ({})\n", link.url, link.text));
    out
}

pub fn render_calendar(controller: &AppController) -> String {
    let today = controller.today();
    let mut out = String::new();
    out.push_str(&format!("{}\n", today.format("%B %Y")));
    out.push_str(&format!("{}\n", DAY_HEADERS.join(" ")));

    let selected = controller.state().view.selected_date;
    let grid = controller.current_month_grid();
    for week in grid.chunks(7) {
        let cells: Vec<String> = week
            .iter()
            .map(|cell| match cell {
                None => "   ".to_string(),
                Some(day) => {
                    let date = NaiveDate::from_ymd_opt(today.year(), today.month(), *day);
                    let marker = match date {
                        Some(date) if selected == Some(date) => '>',
                        Some(date) if controller.has_events_on_date(date) => '*',
                        _ => ' ',
                    };
                    format!("{marker}{day:>2}")
                }
            })
            .collect();
        out.push_str(&format!("{}\n", cells.join(" ").trim_end()));
    }

    if let Some(date) = selected {
        out.push('\n');
        out.push_str(&format!("{}\n", format_event_date(date)));
        let events = controller.selected_date_events();
        if events.is_empty() {
            out.push_str("  No registered events.\n");
        }
        for event in events {
            out.push_str(&event_line(event, true));
        }
    }
    out
}

pub fn render_profile(controller: &AppController) -> String {
    let profile = &controller.state().profile;
    let mut out = String::new();
    out.push_str("Profile\n");
    out.push_str(&format!("  Username:  {}\n", profile.username));
    out.push_str(&format!("  About:     {}\n", profile.about));
    out.push_str(&format!("  Course:    {}\n", profile.course));
    out.push_str(&format!("  Specialty: {}\n", profile.specialty));
    out.push_str(&format!("  Hobbies:   {}\n", profile.hobbies));
    let interests = if profile.interests.is_empty() {
        "(none)".to_string()
    } else {
        profile.interests.join(", ")
    };
    out.push_str(&format!("  Interests: {interests}\n"));
    out
}

pub fn render_filter_panel(controller: &AppController) -> String {
    let filters = &controller.state().filters;
    let mut out = String::from("Filters\n");
    let times: Vec<String> = TimeFilter::ALL
        .iter()
        .map(|t| checkbox(filters.time == Some(*t), t.as_str()))
        .collect();
    let categories: Vec<String> = Category::ALL
        .iter()
        .map(|c| checkbox(filters.categories.contains(c), c.as_str()))
        .collect();
    let locations: Vec<String> = Location::ALL
        .iter()
        .map(|l| checkbox(filters.locations.contains(l), l.as_str()))
        .collect();
    out.push_str(&format!("  Time:     {}\n", times.join("  ")));
    out.push_str(&format!("  Category: {}\n", categories.join("  ")));
    out.push_str(&format!("  Location: {}\n", locations.join("  ")));
    out
}

fn heading(title: &str, controller: &AppController) -> String {
    let active = controller.state().filters.active_count();
    if active == 0 {
        format!("{title}\n")
    } else {
        format!("{title} ({active} filters active)\n")
    }
}

fn event_line(event: &Event, registered: bool) -> String {
    format!(
        "  [{}] {} | {} {} | {} | {}{}\n",
        event.id,
        event.title,
        format_event_date(event.date),
        event.time.format("%H:%M"),
        event.location,
        event.category,
        if registered { " | registered" } else { "" }
    )
}

fn checkbox(checked: bool, label: &str) -> String {
    format!("[{}] {label}", if checked { 'x' } else { ' ' })
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
