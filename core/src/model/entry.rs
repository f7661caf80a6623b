use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One recorded (project, date, hours) triple.
/// Entries are immutable; editing a day replaces the cell in the grid
/// and a fresh list is flattened out on the next commit.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TimeEntry {
    pub project_id: String,
    pub date: NaiveDate,
    pub hours: f64,
}

/// The editable timesheet: project id -> date string -> raw cell text.
///
/// Cell values are whatever the user typed. Nothing is validated until
/// `flatten`, where bad text just counts as zero hours. Dates are kept as
/// strings so the persisted shape stays a plain string-to-string map.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TimesheetGrid(BTreeMap<String, BTreeMap<String, String>>);

impl TimesheetGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, project_id: &str, date: NaiveDate, raw: &str) {
        let key = date.format(DATE_FORMAT).to_string();
        if raw.trim().is_empty() {
            // Blanking a cell removes it from the sparse grid entirely
            if let Some(row) = self.0.get_mut(project_id) {
                row.remove(&key);
                if row.is_empty() {
                    self.0.remove(project_id);
                }
            }
            return;
        }
        self.0
            .entry(project_id.to_string())
            .or_default()
            .insert(key, raw.to_string());
    }

    pub fn get(&self, project_id: &str, date: NaiveDate) -> Option<&str> {
        self.0
            .get(project_id)?
            .get(&date.format(DATE_FORMAT).to_string())
            .map(|s| s.as_str())
    }

    /// Parsed hours for one cell, zero when the cell is empty or junk.
    pub fn hours_at(&self, project_id: &str, date: NaiveDate) -> f64 {
        self.get(project_id, date).map(parse_hours).unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Validation boundary: turn the raw grid into clean entries.
    /// Non-numeric cells become 0 and are dropped (only hours > 0 survive);
    /// a date key that doesn't parse means the cell is skipped.
    pub fn flatten(&self) -> Vec<TimeEntry> {
        let mut entries = Vec::new();
        for (project_id, days) in &self.0 {
            for (date_key, raw) in days {
                let Ok(date) = NaiveDate::parse_from_str(date_key, DATE_FORMAT) else {
                    continue;
                };
                let hours = parse_hours(raw);
                if hours > 0.0 {
                    entries.push(TimeEntry {
                        project_id: project_id.clone(),
                        date,
                        hours,
                    });
                }
            }
        }
        entries
    }
}

/// Raw cell text to hours. Anything that isn't a positive finite number
/// counts as zero, never as an error.
pub fn parse_hours(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(h) if h.is_finite() && h > 0.0 => h,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_parse_hours_fallback() {
        assert_eq!(parse_hours("3.5"), 3.5);
        assert_eq!(parse_hours(" 8 "), 8.0);
        assert_eq!(parse_hours("abc"), 0.0);
        assert_eq!(parse_hours(""), 0.0);
        assert_eq!(parse_hours("-2"), 0.0);
        assert_eq!(parse_hours("NaN"), 0.0);
    }

    #[test]
    fn test_flatten_drops_zero_and_junk_cells() {
        let mut grid = TimesheetGrid::new();
        grid.set("proj-1", date("2025-05-01"), "5");
        grid.set("proj-1", date("2025-05-02"), "oops");
        grid.set("proj-2", date("2025-05-01"), "0");

        let entries = grid.flatten();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].project_id, "proj-1");
        assert_eq!(entries[0].date, date("2025-05-01"));
        assert_eq!(entries[0].hours, 5.0);
    }

    #[test]
    fn test_set_replaces_and_blank_clears() {
        let mut grid = TimesheetGrid::new();
        grid.set("proj-1", date("2025-05-01"), "2");
        grid.set("proj-1", date("2025-05-01"), "4");
        assert_eq!(grid.hours_at("proj-1", date("2025-05-01")), 4.0);

        grid.set("proj-1", date("2025-05-01"), "");
        assert_eq!(grid.get("proj-1", date("2025-05-01")), None);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_grid_round_trips_through_json() {
        let mut grid = TimesheetGrid::new();
        grid.set("proj-1", date("2025-05-01"), "5");
        grid.set("proj-1", date("2025-05-02"), "1.5");

        let json = serde_json::to_string(&grid).unwrap();
        let back: TimesheetGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(grid, back);
    }
}
