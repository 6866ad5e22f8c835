use chrono::{Datelike, NaiveDate};

/// Day of the year for `date`, January 1 being day 1.
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}

/// Week index of `date` within its own calendar year.
///
/// Week 1 contains January 1 and weeks advance on a plain Sunday grid from
/// there, offset by January 1's weekday. Deliberately not ISO-8601: there is
/// no Thursday anchoring and late December never spills into week 1 of the
/// next year. Existing log entries were bucketed by this scheme, so it must
/// not be swapped for `iso_week()`.
pub fn week_number(date: NaiveDate) -> u32 {
    let jan1_weekday = NaiveDate::from_ymd_opt(date.year(), 1, 1)
        .map(|jan1| jan1.weekday().num_days_from_sunday())
        .unwrap_or(0);
    let days = date.ordinal() - 1;
    (days + jan1_weekday + 1).div_ceil(7)
}

/// Canonical `YYYY-MM-DD` form of a calendar day, used as the log key.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses a `YYYY-MM-DD` key back into a date. Aggregation skips keys this
/// rejects rather than failing the whole document.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_of_year_starts_at_one() {
        assert_eq!(day_of_year(date(2026, 1, 1)), 1);
        assert_eq!(day_of_year(date(2026, 1, 2)), 2);
        assert_eq!(day_of_year(date(2026, 12, 31)), 365);
    }

    #[test]
    fn day_of_year_counts_leap_days() {
        assert_eq!(day_of_year(date(2024, 2, 29)), 60);
        assert_eq!(day_of_year(date(2024, 12, 31)), 366);
        // 2026 is not a leap year, so March 1 is day 60.
        assert_eq!(day_of_year(date(2026, 3, 1)), 60);
    }

    #[test]
    fn week_one_always_contains_january_first() {
        for year in 2020..=2030 {
            assert_eq!(week_number(date(year, 1, 1)), 1, "year {year}");
        }
    }

    #[test]
    fn weeks_roll_over_on_sundays() {
        // January 1 2026 is a Thursday; the first Sunday is January 4.
        assert_eq!(week_number(date(2026, 1, 3)), 1);
        assert_eq!(week_number(date(2026, 1, 4)), 2);
        assert_eq!(week_number(date(2026, 1, 10)), 2);
        assert_eq!(week_number(date(2026, 1, 11)), 3);
    }

    #[test]
    fn week_numbers_match_the_reference_scheme() {
        // ceil((days_since_jan1 + weekday_of_jan1 + 1) / 7), Sunday = 0.
        assert_eq!(week_number(date(2026, 2, 28)), 9);
        assert_eq!(week_number(date(2026, 3, 1)), 10);
        assert_eq!(week_number(date(2026, 12, 31)), 53);
        // 2022 began on a Saturday, so January 2 already opens week 2.
        assert_eq!(week_number(date(2022, 1, 2)), 2);
        assert_eq!(week_number(date(2022, 12, 31)), 53);
    }

    #[test]
    fn week_number_is_not_iso_week() {
        // ISO places January 1 2021 in week 53 of 2020; this scheme never
        // borrows from a neighboring year.
        let jan1 = date(2021, 1, 1);
        assert_eq!(week_number(jan1), 1);
        assert_ne!(week_number(jan1), jan1.iso_week().week());
    }

    #[test]
    fn format_parse_round_trip() {
        for d in [
            date(2026, 1, 1),
            date(2026, 10, 7),
            date(2024, 2, 29),
            date(1999, 12, 31),
        ] {
            let formatted = format_date(d);
            let reparsed = parse_date(&formatted).unwrap();
            assert_eq!(reparsed, d);
            assert_eq!(format_date(reparsed), formatted);
        }
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("not-a-date"), None);
        assert_eq!(parse_date("2026-13-01"), None);
        assert_eq!(parse_date("2026/01/01"), None);
    }
}
