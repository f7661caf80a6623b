use anyhow::Result;
use chrono::NaiveDate;

use crate::model::entry::{TimeEntry, TimesheetGrid};
use crate::repository::KeyValueStore;

/// Key A: the raw grid, kept around so the editor can prefill itself.
pub const GRID_KEY: &str = "time_grid";
/// Key B: the flattened nonzero entries. This is the contract the
/// report side reads; it never looks at the grid.
pub const ENTRIES_KEY: &str = "time_entries";

/// Captures hours per (project, day) into an in-memory grid and persists
/// on commit. Commit is the only write; edits that never reach commit are
/// simply lost, which is fine for a lightweight timesheet.
pub struct TimeRecorder<S: KeyValueStore> {
    store: S,
    grid: TimesheetGrid,
}

impl<S: KeyValueStore> TimeRecorder<S> {
    /// Prefills the grid from the store. A missing or corrupt payload
    /// degrades to an empty grid rather than an error.
    pub fn new(store: S) -> Result<Self> {
        let grid = match store.get(GRID_KEY)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            None => TimesheetGrid::new(),
        };
        Ok(Self { store, grid })
    }

    pub fn grid(&self) -> &TimesheetGrid {
        &self.grid
    }

    /// Stores the cell text verbatim. No validation here; junk input
    /// counts as zero hours when the grid is flattened.
    pub fn set_hours(&mut self, project_id: &str, date: NaiveDate, raw: &str) {
        self.grid.set(project_id, date, raw);
    }

    /// Persists the grid and, separately, the flattened entry list.
    pub fn commit(&self) -> Result<()> {
        self.store
            .set(GRID_KEY, &serde_json::to_string_pretty(&self.grid)?)?;
        let entries = self.grid.flatten();
        self.store
            .set(ENTRIES_KEY, &serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryStore;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_commit_writes_grid_and_entries() {
        let store = MemoryStore::new();
        let mut recorder = TimeRecorder::new(&store).unwrap();
        recorder.set_hours("proj-1", date("2025-05-01"), "5");
        recorder.set_hours("proj-2", date("2025-05-01"), "not a number");
        recorder.commit().unwrap();

        let entries: Vec<TimeEntry> =
            serde_json::from_str(&store.get(ENTRIES_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].project_id, "proj-1");
        assert_eq!(entries[0].hours, 5.0);

        // The grid keeps the junk text verbatim for the editor
        let grid: TimesheetGrid =
            serde_json::from_str(&store.get(GRID_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(grid.get("proj-2", date("2025-05-01")), Some("not a number"));
    }

    #[test]
    fn test_nothing_persisted_without_commit() {
        let store = MemoryStore::new();
        let mut recorder = TimeRecorder::new(&store).unwrap();
        recorder.set_hours("proj-1", date("2025-05-01"), "3");
        drop(recorder);
        assert_eq!(store.get(GRID_KEY).unwrap(), None);
        assert_eq!(store.get(ENTRIES_KEY).unwrap(), None);
    }

    #[test]
    fn test_prefill_from_previous_commit() {
        let store = MemoryStore::new();
        let mut recorder = TimeRecorder::new(&store).unwrap();
        recorder.set_hours("proj-1", date("2025-05-01"), "2.5");
        recorder.commit().unwrap();

        let reopened = TimeRecorder::new(&store).unwrap();
        assert_eq!(reopened.grid().hours_at("proj-1", date("2025-05-01")), 2.5);
    }

    #[test]
    fn test_corrupt_grid_payload_reads_as_empty() {
        let store = MemoryStore::new();
        store.set(GRID_KEY, "{not json").unwrap();
        let recorder = TimeRecorder::new(&store).unwrap();
        assert!(recorder.grid().is_empty());
    }

    #[test]
    fn test_recommit_replaces_entry_list() {
        let store = MemoryStore::new();
        let mut recorder = TimeRecorder::new(&store).unwrap();
        recorder.set_hours("proj-1", date("2025-05-01"), "5");
        recorder.commit().unwrap();

        recorder.set_hours("proj-1", date("2025-05-01"), "2");
        recorder.commit().unwrap();

        let entries: Vec<TimeEntry> =
            serde_json::from_str(&store.get(ENTRIES_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].hours, 2.0);
    }
}
