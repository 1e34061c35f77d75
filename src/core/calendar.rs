use chrono::{Datelike, Months, NaiveDate};

/// Date of the `offset`-th monthly contribution. Always measured from the
/// anchor so a month-end start clamps per month without drifting
/// (Jan 31 -> Feb 28 -> Mar 31).
pub fn nth_month(anchor: NaiveDate, offset: u32) -> Option<NaiveDate> {
    anchor.checked_add_months(Months::new(offset))
}

/// Number of contribution dates in `start..=end`. Zero when the range is
/// inverted.
pub fn month_count(start: NaiveDate, end: NaiveDate) -> u32 {
    if start > end {
        return 0;
    }

    let span = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    let mut last = span.max(0) as u32;
    while last > 0 && nth_month(start, last).is_none_or(|date| date > end) {
        last -= 1;
    }
    last + 1
}

/// First day of `today`'s month through the last day of the month eleven
/// months later, i.e. a twelve-contribution window.
pub fn default_date_range(today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let start = today.with_day(1)?;
    let end = start.checked_add_months(Months::new(12))?.pred_opt()?;
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn nth_month_clamps_month_end_without_drift() {
        let anchor = date(2024, 1, 31);
        let dates: Vec<_> = (0..5)
            .map(|i| nth_month(anchor, i).expect("in range"))
            .collect();
        assert_eq!(
            dates,
            vec![
                date(2024, 1, 31),
                date(2024, 2, 29),
                date(2024, 3, 31),
                date(2024, 4, 30),
                date(2024, 5, 31),
            ]
        );
    }

    #[test]
    fn month_count_same_day_is_one() {
        let d = date(2025, 6, 15);
        assert_eq!(month_count(d, d), 1);
    }

    #[test]
    fn month_count_excludes_partial_final_month() {
        assert_eq!(month_count(date(2025, 1, 15), date(2025, 3, 14)), 2);
        assert_eq!(month_count(date(2025, 1, 15), date(2025, 3, 15)), 3);
    }

    #[test]
    fn month_count_counts_clamped_month_end() {
        assert_eq!(month_count(date(2023, 1, 31), date(2023, 2, 28)), 2);
        assert_eq!(month_count(date(2023, 1, 31), date(2023, 2, 27)), 1);
    }

    #[test]
    fn month_count_inverted_range_is_zero() {
        assert_eq!(month_count(date(2025, 2, 1), date(2025, 1, 1)), 0);
    }

    #[test]
    fn default_range_spans_twelve_months() {
        let (start, end) = default_date_range(date(2026, 10, 19)).expect("range");
        assert_eq!(start, date(2026, 10, 1));
        assert_eq!(end, date(2027, 9, 30));
        assert_eq!(month_count(start, end), 12);
    }

    #[test]
    fn default_range_from_january_ends_in_december() {
        let (start, end) = default_date_range(date(2024, 1, 31)).expect("range");
        assert_eq!(start, date(2024, 1, 1));
        assert_eq!(end, date(2024, 12, 31));
    }
}
