use chrono::NaiveTime;
use shared::domain::{Category, EventId, Location};

use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn event(id: &str, on: NaiveDate, category: Category, location: Location) -> Event {
    Event {
        id: EventId::new(id),
        title: format!("event {id}"),
        description: String::new(),
        date: on,
        time: NaiveTime::from_hms_opt(12, 0, 0).expect("time"),
        location,
        category,
        photo: String::new(),
    }
}

fn ids(events: &[&Event]) -> Vec<String> {
    events.iter().map(|e| e.id.to_string()).collect()
}

fn catalogue() -> Vec<Event> {
    vec![
        event("1", date(2025, 11, 20), Category::Meetup, Location::OnCampus),
        event("2", date(2025, 11, 25), Category::Hackathon, Location::OffCampus),
        event("3", date(2025, 11, 28), Category::Workshop, Location::Online),
        event("4", date(2025, 11, 16), Category::Workshop, Location::OnCampus),
        event("5", date(2025, 11, 30), Category::Meetup, Location::OffCampus),
        event("6", date(2025, 11, 18), Category::Lecture, Location::Online),
    ]
}

#[test]
fn empty_filters_return_input_unchanged() {
    let events = catalogue();
    let filtered = filter_events(&events, &FilterState::default(), date(2030, 1, 1));
    assert_eq!(ids(&filtered), vec!["1", "2", "3", "4", "5", "6"]);
}

#[test]
fn single_category_keeps_matching_subsequence() {
    let events = catalogue();
    let today = date(2025, 11, 1);
    for category in Category::ALL {
        let filters = FilterState {
            categories: vec![*category],
            ..FilterState::default()
        };
        let expected: Vec<String> = events
            .iter()
            .filter(|e| e.category == *category)
            .map(|e| e.id.to_string())
            .collect();
        assert_eq!(ids(&filter_events(&events, &filters, today)), expected);
    }
}

#[test]
fn meetup_filter_picks_first_of_two_events() {
    let events = vec![
        event("1", date(2025, 11, 20), Category::Meetup, Location::OnCampus),
        event("2", date(2025, 11, 25), Category::Hackathon, Location::OffCampus),
    ];
    let filters = FilterState {
        categories: vec![Category::Meetup],
        ..FilterState::default()
    };
    assert_eq!(
        ids(&filter_events(&events, &filters, date(2025, 11, 1))),
        vec!["1"]
    );
}

#[test]
fn dimensions_combine_with_and_values_with_or() {
    let events = catalogue();
    let filters = FilterState {
        time: None,
        categories: vec![Category::Workshop, Category::Meetup],
        locations: vec![Location::OnCampus],
    };
    assert_eq!(
        ids(&filter_events(&events, &filters, date(2025, 11, 1))),
        vec!["1", "4"]
    );
}

#[test]
fn today_matches_only_same_date() {
    let events = catalogue();
    let filters = FilterState {
        time: Some(TimeFilter::Today),
        ..FilterState::default()
    };
    assert_eq!(
        ids(&filter_events(&events, &filters, date(2025, 11, 25))),
        vec!["2"]
    );
}

#[test]
fn week_window_is_inclusive_on_both_ends() {
    let events = catalogue();
    let filters = FilterState {
        time: Some(TimeFilter::Week),
        ..FilterState::default()
    };
    // Window 2025-11-18 ..= 2025-11-25.
    assert_eq!(
        ids(&filter_events(&events, &filters, date(2025, 11, 18))),
        vec!["1", "2", "6"]
    );
}

#[test]
fn month_window_adds_one_calendar_month() {
    let today = date(2025, 10, 30);
    assert!(matches_time(date(2025, 11, 30), TimeFilter::Month, today));
    assert!(!matches_time(date(2025, 12, 1), TimeFilter::Month, today));
    assert!(!matches_time(date(2025, 10, 29), TimeFilter::Month, today));

    // Jan 31 + 1 month rolls past the end of February to Mar 3.
    let end_of_january = date(2026, 1, 31);
    assert!(matches_time(date(2026, 2, 28), TimeFilter::Month, end_of_january));
    assert!(matches_time(date(2026, 3, 2), TimeFilter::Month, end_of_january));
    assert!(matches_time(date(2026, 3, 3), TimeFilter::Month, end_of_january));
    assert!(!matches_time(date(2026, 3, 4), TimeFilter::Month, end_of_january));

    // Leap year: Jan 30 2024 + 1 month is Mar 1.
    let leap = date(2024, 1, 30);
    assert!(matches_time(date(2024, 3, 1), TimeFilter::Month, leap));
    assert!(!matches_time(date(2024, 3, 2), TimeFilter::Month, leap));
}

#[test]
fn upcoming_excludes_past_events() {
    let events = catalogue();
    let filters = FilterState {
        time: Some(TimeFilter::Upcoming),
        ..FilterState::default()
    };
    assert_eq!(
        ids(&filter_events(&events, &filters, date(2025, 11, 25))),
        vec!["2", "3", "5"]
    );
}

#[test]
fn toggles_add_and_remove_selections() {
    let mut filters = FilterState::default();
    assert!(!filters.is_active());

    filters.toggle_time(TimeFilter::Week);
    filters.toggle_category(Category::Lecture);
    filters.toggle_category(Category::Meetup);
    filters.toggle_location(Location::Online);
    assert_eq!(filters.active_count(), 4);

    filters.toggle_time(TimeFilter::Week);
    filters.toggle_category(Category::Lecture);
    assert_eq!(filters.time, None);
    assert_eq!(filters.categories, vec![Category::Meetup]);
    assert_eq!(filters.active_count(), 2);

    filters.toggle_time(TimeFilter::Today);
    filters.toggle_time(TimeFilter::Upcoming);
    assert_eq!(filters.time, Some(TimeFilter::Upcoming));

    filters.clear();
    assert_eq!(filters, FilterState::default());
}
