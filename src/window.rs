//! Date windows
//!
//! Each screen instance shows the tasks due up to a given horizon: today,
//! tomorrow, this week (7 days) or this month (30 days). The horizon is
//! fixed for the lifetime of the screen.

use chrono::{DateTime, Duration, Local, NaiveDateTime};

/// The inclusive upper bound of a fetch window: 23:59:59 (local time) on the
/// calendar day `days_ahead` days after `now`.
///
/// Pure and deterministic given `now`. Any `days_ahead` yields a valid bound,
/// not only the four recognized presets
pub fn upper_bound(days_ahead: i64, now: DateTime<Local>) -> NaiveDateTime {
    let day = now.date_naive() + Duration::days(days_ahead);
    day.and_hms_opt(23, 59, 59).unwrap(/* 23:59:59 exists on every calendar day */)
}

/// Render a bound the way the task API expects its `date` query parameter
pub fn format_query_date(bound: &NaiveDateTime) -> String {
    bound.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Timelike};

    fn some_afternoon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 10, 15, 30, 12).unwrap()
    }

    #[test]
    fn every_preset_ends_its_day() {
        let now = some_afternoon();
        for days_ahead in &[0, 1, 7, 30] {
            let bound = upper_bound(*days_ahead, now);
            assert_eq!(bound.date(), now.date_naive() + Duration::days(*days_ahead));
            assert_eq!((bound.hour(), bound.minute(), bound.second()), (23, 59, 59));
        }
    }

    #[test]
    fn unknown_horizons_still_produce_a_valid_bound() {
        let bound = upper_bound(3, some_afternoon());
        assert_eq!(bound.date(), NaiveDate::from_ymd_opt(2024, 1, 13).unwrap());
    }

    #[test]
    fn the_bound_follows_month_rollovers() {
        let end_of_january = Local.with_ymd_and_hms(2024, 1, 31, 8, 0, 0).unwrap();
        let bound = upper_bound(1, end_of_january);
        assert_eq!(bound.date(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    }

    #[test]
    fn query_date_format() {
        let bound = upper_bound(0, some_afternoon());
        assert_eq!(format_query_date(&bound), "2024-01-10 23:59:59");
    }
}
