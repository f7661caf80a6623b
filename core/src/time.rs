use chrono::{Datelike, Duration, NaiveDate};

/// A fixed calendar-aligned range used to group entries for trends.
/// Both ends are inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub label: String,
}

/// Weeks start on Monday throughout.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

pub fn end_of_week(date: NaiveDate) -> NaiveDate {
    start_of_week(date) + Duration::days(6)
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    // Day 1 always exists
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap()
}

pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    let first_of_next = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1).unwrap()
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1).unwrap()
    };
    first_of_next - Duration::days(1)
}

pub fn start_of_quarter(date: NaiveDate) -> NaiveDate {
    let quarter_month = ((date.month() - 1) / 3) * 3 + 1;
    NaiveDate::from_ymd_opt(date.year(), quarter_month, 1).unwrap()
}

pub fn end_of_quarter(date: NaiveDate) -> NaiveDate {
    end_of_month(start_of_quarter(date) + Duration::days(70))
}

pub fn start_of_year(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap()
}

pub fn end_of_year(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap()
}

/// `count` consecutive week buckets, the last one containing `anchor`.
pub fn trailing_weeks(anchor: NaiveDate, count: usize) -> Vec<Bucket> {
    let last_start = start_of_week(anchor);
    let mut buckets = Vec::with_capacity(count);
    for i in (0..count).rev() {
        let start = last_start - Duration::weeks(i as i64);
        buckets.push(Bucket {
            start,
            end: start + Duration::days(6),
            label: format!("Week of {}", start.format("%b %-d")),
        });
    }
    buckets
}

/// `count` consecutive month buckets, the last one containing `anchor`.
pub fn trailing_months(anchor: NaiveDate, count: usize) -> Vec<Bucket> {
    let mut year = anchor.year();
    let mut month = anchor.month() as i32 - (count as i32 - 1);
    while month <= 0 {
        month += 12;
        year -= 1;
    }

    let mut buckets = Vec::with_capacity(count);
    for _ in 0..count {
        let start = NaiveDate::from_ymd_opt(year, month as u32, 1).unwrap();
        buckets.push(Bucket {
            start,
            end: end_of_month(start),
            label: start.format("%b %Y").to_string(),
        });
        month += 1;
        if month > 12 {
            month = 1;
            year += 1;
        }
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_week_starts_monday() {
        // 2025-05-07 is a Wednesday
        assert_eq!(start_of_week(date("2025-05-07")), date("2025-05-05"));
        assert_eq!(end_of_week(date("2025-05-07")), date("2025-05-11"));
        // A Monday is its own week start
        assert_eq!(start_of_week(date("2025-05-05")), date("2025-05-05"));
        // Sunday belongs to the week started the previous Monday
        assert_eq!(start_of_week(date("2025-05-11")), date("2025-05-05"));
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(start_of_month(date("2025-02-14")), date("2025-02-01"));
        assert_eq!(end_of_month(date("2025-02-14")), date("2025-02-28"));
        assert_eq!(end_of_month(date("2024-02-14")), date("2024-02-29"));
        assert_eq!(end_of_month(date("2025-12-05")), date("2025-12-31"));
    }

    #[test]
    fn test_quarter_and_year_bounds() {
        assert_eq!(start_of_quarter(date("2025-05-07")), date("2025-04-01"));
        assert_eq!(end_of_quarter(date("2025-05-07")), date("2025-06-30"));
        assert_eq!(start_of_quarter(date("2025-12-31")), date("2025-10-01"));
        assert_eq!(end_of_quarter(date("2025-12-31")), date("2025-12-31"));
        assert_eq!(start_of_year(date("2025-05-07")), date("2025-01-01"));
        assert_eq!(end_of_year(date("2025-05-07")), date("2025-12-31"));
    }

    #[test]
    fn test_trailing_weeks() {
        let buckets = trailing_weeks(date("2025-05-07"), 8);
        assert_eq!(buckets.len(), 8);
        // Last bucket is the week containing the anchor
        assert_eq!(buckets[7].start, date("2025-05-05"));
        assert_eq!(buckets[7].end, date("2025-05-11"));
        // Buckets are consecutive, oldest first
        assert_eq!(buckets[0].start, date("2025-03-17"));
        for pair in buckets.windows(2) {
            assert_eq!(pair[0].end + Duration::days(1), pair[1].start);
        }
        assert_eq!(buckets[7].label, "Week of May 5");
    }

    #[test]
    fn test_trailing_months_across_year_boundary() {
        let buckets = trailing_months(date("2025-02-10"), 6);
        assert_eq!(buckets.len(), 6);
        assert_eq!(buckets[0].start, date("2024-09-01"));
        assert_eq!(buckets[0].end, date("2024-09-30"));
        assert_eq!(buckets[5].start, date("2025-02-01"));
        assert_eq!(buckets[5].end, date("2025-02-28"));
        assert_eq!(buckets[0].label, "Sep 2024");
        assert_eq!(buckets[5].label, "Feb 2025");
    }
}
