use chrono::{Local, NaiveDate};

/// Signed whole days from `today` to the target date.
///
/// Both sides are local calendar dates, so the subtraction is exact and
/// needs no time-of-day truncation.
pub fn diff_days_on(date_str: &str, today: NaiveDate) -> Option<i64> {
    let target = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").ok()?;
    Some((target - today).num_days())
}

/// Format the countdown label for an event.
///
/// The date string is expected to have passed the syntactic check at the
/// form boundary. Strings that are well-shaped but not real calendar dates
/// ("2024-13-45") render as `D-?` rather than failing.
pub fn compute(name: &str, date_str: &str) -> String {
    compute_on(name, date_str, Local::now().date_naive())
}

pub fn compute_on(name: &str, date_str: &str, today: NaiveDate) -> String {
    match diff_days_on(date_str, today) {
        Some(0) => format!("{name} D-Day"),
        Some(d) if d > 0 => format!("{name} D-{d}"),
        Some(d) => format!("{name} D+{}", -d),
        None => format!("{name} D-?"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn compute_against_the_wall_clock() {
        let today = Local::now().date_naive();
        assert_eq!(
            compute("Now", &today.format("%Y-%m-%d").to_string()),
            "Now D-Day"
        );
    }

    #[test]
    fn target_today_is_d_day() {
        let today = day("2030-06-15");
        assert_eq!(compute_on("Launch", "2030-06-15", today), "Launch D-Day");
    }

    #[test]
    fn future_dates_count_down() {
        let today = day("2030-06-15");
        assert_eq!(compute_on("Launch", "2030-06-16", today), "Launch D-1");
        assert_eq!(compute_on("Launch", "2030-07-15", today), "Launch D-30");
        assert_eq!(compute_on("Launch", "2031-06-15", today), "Launch D-365");
    }

    #[test]
    fn past_dates_count_up() {
        let today = day("2030-06-15");
        assert_eq!(compute_on("Release", "2030-06-14", today), "Release D+1");
        assert_eq!(compute_on("Release", "2030-05-15", today), "Release D+31");
    }

    #[test]
    fn counts_across_leap_day() {
        // 2032 is a leap year; Feb 29 sits between the two dates.
        assert_eq!(
            diff_days_on("2032-03-01", day("2032-02-28")),
            Some(2)
        );
    }

    #[test]
    fn non_calendar_date_renders_placeholder() {
        let today = day("2030-06-15");
        assert_eq!(diff_days_on("2024-13-45", today), None);
        assert_eq!(compute_on("Oops", "2024-13-45", today), "Oops D-?");
    }
}
