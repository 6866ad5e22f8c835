use crate::dates::{day_of_year, format_date, parse_date, week_number};
use crate::models::{LogDocument, RepCounts, SummaryResponse, TARGET};
use chrono::{Datelike, NaiveDate};

/// Sum of every entry in the document, regardless of year.
///
/// The product tracks a single target year, so the document never holds more
/// than one year of data and no year filter is applied.
pub fn year_totals(doc: &LogDocument) -> RepCounts {
    let mut totals = RepCounts::default();
    for counts in doc.logs.values() {
        totals.accumulate(counts);
    }
    totals
}

/// Totals for the week of `reference`.
///
/// An entry counts only when both its week number and its calendar year match
/// the reference date; a same-numbered week of another year is excluded.
/// Keys that do not parse as dates are skipped.
pub fn week_totals(doc: &LogDocument, reference: NaiveDate) -> RepCounts {
    let week = week_number(reference);
    let year = reference.year();
    let mut totals = RepCounts::default();
    for (key, counts) in &doc.logs {
        if let Some(date) = parse_date(key) {
            if week_number(date) == week && date.year() == year {
                totals.accumulate(counts);
            }
        }
    }
    totals
}

/// Counts recorded on `reference`, all zero when the date has no entry.
pub fn day_totals(doc: &LogDocument, reference: NaiveDate) -> RepCounts {
    doc.logs
        .get(&format_date(reference))
        .copied()
        .unwrap_or_default()
}

/// Everything the presentation needs for one reference date, recomputed per
/// request; documents top out at one entry per day of the year.
pub fn build_summary(doc: &LogDocument, reference: NaiveDate) -> SummaryResponse {
    let doy = day_of_year(reference);
    let days_in_year = if reference.leap_year() { 366 } else { 365 };
    SummaryResponse {
        date: format_date(reference),
        day_of_year: doy,
        week_number: week_number(reference),
        target: TARGET,
        days_left: days_in_year - doy,
        day: day_totals(doc, reference),
        week: week_totals(doc, reference),
        year: year_totals(doc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Exercise;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn doc_with(entries: &[(&str, RepCounts)]) -> LogDocument {
        let mut doc = LogDocument::default();
        for (key, counts) in entries {
            doc.logs.insert((*key).to_string(), *counts);
        }
        doc
    }

    fn reps(pushups: u64, squats: u64, pullups: u64) -> RepCounts {
        RepCounts {
            pushups,
            squats,
            pullups,
        }
    }

    #[test]
    fn day_totals_default_to_zero() {
        let doc = LogDocument::default();
        assert_eq!(day_totals(&doc, date(2026, 1, 1)), RepCounts::default());
    }

    #[test]
    fn single_entry_feeds_day_and_year() {
        let mut doc = LogDocument::default();
        doc.logs
            .entry("2026-01-01".to_string())
            .or_default()
            .add(Exercise::Pushups, 5);

        assert_eq!(day_totals(&doc, date(2026, 1, 1)), reps(5, 0, 0));
        assert_eq!(year_totals(&doc), reps(5, 0, 0));
    }

    #[test]
    fn repeated_adds_accumulate() {
        let mut doc = LogDocument::default();
        let entry = doc.logs.entry("2026-01-01".to_string()).or_default();
        entry.add(Exercise::Pushups, 3);
        entry.add(Exercise::Pushups, 7);

        assert_eq!(day_totals(&doc, date(2026, 1, 1)).pushups, 10);
    }

    #[test]
    fn year_totals_are_the_sum_of_day_totals() {
        let doc = doc_with(&[
            ("2026-01-01", reps(5, 10, 1)),
            ("2026-03-14", reps(20, 0, 4)),
            ("2026-11-30", reps(0, 7, 0)),
        ]);

        let mut expected = RepCounts::default();
        for key in ["2026-01-01", "2026-03-14", "2026-11-30"] {
            expected.accumulate(&day_totals(&doc, parse_date(key).unwrap()));
        }
        assert_eq!(year_totals(&doc), expected);
        assert_eq!(year_totals(&doc), reps(25, 17, 5));
    }

    #[test]
    fn year_totals_do_not_filter_by_year() {
        let doc = doc_with(&[
            ("2025-12-31", reps(100, 0, 0)),
            ("2026-01-01", reps(1, 0, 0)),
        ]);
        assert_eq!(year_totals(&doc).pushups, 101);
    }

    #[test]
    fn week_totals_cover_the_sunday_grid_week() {
        // Week 10 of 2026 runs Sunday March 1 through Saturday March 7.
        let doc = doc_with(&[
            ("2026-02-28", reps(1, 0, 0)),
            ("2026-03-01", reps(2, 0, 0)),
            ("2026-03-04", reps(4, 0, 0)),
            ("2026-03-07", reps(8, 0, 0)),
            ("2026-03-08", reps(16, 0, 0)),
        ]);

        assert_eq!(week_totals(&doc, date(2026, 3, 3)).pushups, 2 + 4 + 8);
    }

    #[test]
    fn week_totals_exclude_equal_weeks_of_other_years() {
        let reference = date(2026, 1, 1);
        let doc = doc_with(&[
            ("2026-01-01", reps(5, 0, 0)),
            // Same week number, different year: must not count.
            ("2025-01-01", reps(50, 0, 0)),
        ]);

        assert_eq!(week_number(date(2025, 1, 1)), week_number(reference));
        assert_eq!(week_totals(&doc, reference).pushups, 5);
    }

    #[test]
    fn week_totals_skip_unparsable_keys() {
        let doc = doc_with(&[
            ("2026-01-01", reps(5, 0, 0)),
            ("corrupted", reps(99, 99, 99)),
        ]);
        assert_eq!(week_totals(&doc, date(2026, 1, 1)), reps(5, 0, 0));
    }

    #[test]
    fn totals_are_independent_of_insertion_order() {
        let forward = doc_with(&[
            ("2026-01-01", reps(3, 0, 0)),
            ("2026-01-02", reps(7, 0, 0)),
        ]);
        let backward = doc_with(&[
            ("2026-01-02", reps(7, 0, 0)),
            ("2026-01-01", reps(3, 0, 0)),
        ]);

        assert_eq!(year_totals(&forward), year_totals(&backward));
        assert_eq!(
            week_totals(&forward, date(2026, 1, 1)),
            week_totals(&backward, date(2026, 1, 1))
        );
    }

    #[test]
    fn summary_carries_date_facts_and_rollups() {
        let doc = doc_with(&[("2026-01-01", reps(5, 0, 0))]);
        let summary = build_summary(&doc, date(2026, 1, 1));

        assert_eq!(summary.date, "2026-01-01");
        assert_eq!(summary.day_of_year, 1);
        assert_eq!(summary.week_number, 1);
        assert_eq!(summary.target, TARGET);
        assert_eq!(summary.days_left, 364);
        assert_eq!(summary.day, reps(5, 0, 0));
        assert_eq!(summary.year, reps(5, 0, 0));
    }

    #[test]
    fn summary_days_left_respects_leap_years() {
        let summary = build_summary(&LogDocument::default(), date(2024, 1, 1));
        assert_eq!(summary.days_left, 365);
        let summary = build_summary(&LogDocument::default(), date(2024, 12, 31));
        assert_eq!(summary.days_left, 0);
    }
}
