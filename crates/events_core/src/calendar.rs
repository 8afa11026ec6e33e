use chrono::{Datelike, NaiveDate};

/// Month grid for a zero-based `month0`: one `None` per weekday before the 1st
/// (Sunday = 0), then `Some(1)..=Some(days_in_month)`.
///
/// Out-of-range months produce an empty grid.
pub fn calendar_days(year: i32, month0: u32) -> Vec<Option<u32>> {
    let Some(first) = month0
        .checked_add(1)
        .and_then(|month| NaiveDate::from_ymd_opt(year, month, 1))
    else {
        return Vec::new();
    };
    let leading = first.weekday().num_days_from_sunday() as usize;
    let days = days_in_month(first);

    let mut grid = Vec::with_capacity(leading + days as usize);
    grid.resize(leading, None);
    grid.extend((1..=days).map(Some));
    grid
}

pub fn days_in_month(first_of_month: NaiveDate) -> u32 {
    let (year, month) = (first_of_month.year(), first_of_month.month());
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next.and_then(|next| next.pred_opt())
        .map_or(31, |last| last.day())
}

/// The date of `day` in the month containing `reference`, if it exists.
pub fn day_in_month_of(reference: NaiveDate, day: u32) -> Option<NaiveDate> {
    reference.with_day(day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_placeholders_match_first_weekday() {
        // November 2025 starts on a Saturday.
        let grid = calendar_days(2025, 10);
        assert_eq!(grid.len(), 6 + 30);
        assert!(grid[..6].iter().all(Option::is_none));
        let days: Vec<u32> = grid[6..].iter().map(|d| d.expect("day")).collect();
        assert_eq!(days, (1..=30).collect::<Vec<_>>());
    }

    #[test]
    fn month_starting_on_sunday_has_no_placeholders() {
        // June 2025 starts on a Sunday.
        let grid = calendar_days(2025, 5);
        assert_eq!(grid.first(), Some(&Some(1)));
        assert_eq!(grid.len(), 30);
    }

    #[test]
    fn february_respects_leap_years() {
        let first = |year| NaiveDate::from_ymd_opt(year, 2, 1).expect("date");
        assert_eq!(days_in_month(first(2024)), 29);
        assert_eq!(days_in_month(first(2025)), 28);
        assert_eq!(
            days_in_month(NaiveDate::from_ymd_opt(2025, 12, 1).expect("date")),
            31
        );
    }

    #[test]
    fn every_month_has_weekday_placeholders_then_all_days() {
        for month0 in 0..12 {
            let first = NaiveDate::from_ymd_opt(2026, month0 + 1, 1).expect("date");
            let w = first.weekday().num_days_from_sunday() as usize;
            let d = days_in_month(first);
            let grid = calendar_days(2026, month0);
            assert_eq!(grid.iter().take_while(|cell| cell.is_none()).count(), w);
            assert_eq!(grid.len(), w + d as usize);
            assert_eq!(grid.last(), Some(&Some(d)));
        }
    }

    #[test]
    fn invalid_month_yields_empty_grid() {
        assert!(calendar_days(2025, 12).is_empty());
        assert!(calendar_days(2025, u32::MAX).is_empty());
    }

    #[test]
    fn rejects_days_past_month_end() {
        let reference = NaiveDate::from_ymd_opt(2025, 2, 10).expect("date");
        assert_eq!(day_in_month_of(reference, 30), None);
        assert_eq!(
            day_in_month_of(reference, 3),
            NaiveDate::from_ymd_opt(2025, 2, 3)
        );
    }
}
