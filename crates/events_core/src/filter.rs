use chrono::{Datelike, Days, Months, NaiveDate};
use shared::domain::{Event, TimeFilter};

use crate::state::FilterState;

/// Returns the events that pass every active filter dimension, in input order.
///
/// An unset time filter or an empty category/location selection does not
/// restrict anything. Within one dimension any selected value matches.
pub fn filter_events<'a, I>(events: I, filters: &FilterState, today: NaiveDate) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    events
        .into_iter()
        .filter(|event| matches_filters(event, filters, today))
        .collect()
}

pub fn matches_filters(event: &Event, filters: &FilterState, today: NaiveDate) -> bool {
    let time_ok = filters
        .time
        .map_or(true, |option| matches_time(event.date, option, today));
    let category_ok =
        filters.categories.is_empty() || filters.categories.contains(&event.category);
    let location_ok = filters.locations.is_empty() || filters.locations.contains(&event.location);
    time_ok && category_ok && location_ok
}

pub fn matches_time(date: NaiveDate, option: TimeFilter, today: NaiveDate) -> bool {
    match option {
        TimeFilter::Today => date == today,
        TimeFilter::Week => within(date, today, today.checked_add_days(Days::new(7))),
        TimeFilter::Month => within(date, today, month_end(today)),
        TimeFilter::Upcoming => date >= today,
    }
}

/// Same day next month. Days past the end of a shorter month roll over into
/// the month after (Jan 31 -> Mar 3 in 2026) instead of clamping.
fn month_end(today: NaiveDate) -> Option<NaiveDate> {
    today
        .with_day(1)?
        .checked_add_months(Months::new(1))?
        .checked_add_days(Days::new(u64::from(today.day0())))
}

fn within(date: NaiveDate, start: NaiveDate, end: Option<NaiveDate>) -> bool {
    date >= start && end.map_or(true, |end| date <= end)
}

#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod tests;
