use std::collections::HashMap;

use anyhow::Result;
use chrono::NaiveDate;

use crate::model::entry::TimeEntry;
use crate::model::project::Project;
use crate::model::report::{Granularity, ProjectTimeSummary, TimeRange, TrendPeriod};
use crate::repository::KeyValueStore;
use crate::service::recorder::ENTRIES_KEY;
use crate::time::{self, Bucket};

/// Snapshot breakdown: hours and share per project, roster order,
/// zero-hour projects dropped. Entries for ids outside the roster are
/// ignored and don't count towards the total, so the shares of what is
/// shown still sum to 100.
pub fn summarize_by_project(entries: &[TimeEntry], roster: &[Project]) -> Vec<ProjectTimeSummary> {
    let mut hours_by_project: HashMap<&str, f64> = HashMap::new();
    for entry in entries {
        *hours_by_project.entry(entry.project_id.as_str()).or_insert(0.0) += entry.hours;
    }

    let total: f64 = roster
        .iter()
        .filter_map(|p| hours_by_project.get(p.id.as_str()))
        .sum();

    let mut summaries = Vec::new();
    for project in roster {
        let hours = hours_by_project
            .get(project.id.as_str())
            .copied()
            .unwrap_or(0.0);
        if hours <= 0.0 {
            continue;
        }
        summaries.push(ProjectTimeSummary {
            project_id: project.id.clone(),
            project_name: project.name.clone(),
            color: project.color.clone(),
            hours,
            percentage: if total > 0.0 { hours / total * 100.0 } else { 0.0 },
        });
    }
    summaries
}

/// Trend series: one bucket per trailing week (8) or month (6), the last
/// bucket containing `window_end`. Every bucket carries all roster
/// projects, zeros included, so an empty entry list still yields the full
/// run of buckets.
pub fn summarize_by_period(
    entries: &[TimeEntry],
    roster: &[Project],
    granularity: Granularity,
    window_end: NaiveDate,
) -> Vec<TrendPeriod> {
    let count = granularity.bucket_count();
    let buckets = match granularity {
        Granularity::Week => time::trailing_weeks(window_end, count),
        Granularity::Month => time::trailing_months(window_end, count),
    };
    buckets
        .into_iter()
        .map(|bucket| bucket_summary(entries, roster, bucket))
        .collect()
}

fn bucket_summary(entries: &[TimeEntry], roster: &[Project], bucket: Bucket) -> TrendPeriod {
    let mut hours: HashMap<String, f64> =
        roster.iter().map(|p| (p.id.clone(), 0.0)).collect();
    let mut total = 0.0;

    for entry in entries {
        // Both bounds inclusive
        if entry.date < bucket.start || entry.date > bucket.end {
            continue;
        }
        if let Some(slot) = hours.get_mut(entry.project_id.as_str()) {
            *slot += entry.hours;
            total += entry.hours;
        }
    }

    TrendPeriod {
        label: bucket.label,
        start: bucket.start,
        end: bucket.end,
        hours,
        total,
    }
}

/// Reads the persisted entry list and runs the aggregations over it.
/// A missing key or a payload that doesn't parse both read as "no
/// entries"; reporting never fails on bad data.
pub struct ReportService<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> ReportService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn load_entries(&self) -> Result<Vec<TimeEntry>> {
        let entries = match self.store.get(ENTRIES_KEY)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            None => Vec::new(),
        };
        Ok(entries)
    }

    /// Breakdown over the whole entry list, or over the calendar range
    /// containing `anchor` when one is given.
    pub fn project_summary(
        &self,
        roster: &[Project],
        range: Option<TimeRange>,
        anchor: NaiveDate,
    ) -> Result<Vec<ProjectTimeSummary>> {
        let mut entries = self.load_entries()?;
        if let Some(range) = range {
            let (start, end) = range.bounds(anchor);
            entries.retain(|e| e.date >= start && e.date <= end);
        }
        Ok(summarize_by_project(&entries, roster))
    }

    pub fn trend(
        &self,
        roster: &[Project],
        granularity: Granularity,
        window_end: NaiveDate,
    ) -> Result<Vec<TrendPeriod>> {
        let entries = self.load_entries()?;
        Ok(summarize_by_period(&entries, roster, granularity, window_end))
    }
}
