use anyhow::Result;
use chrono::{Duration, NaiveDate};
use worklog_core::time::start_of_week;
use worklog_core::{KeyValueStore, Project, TimeRecorder};

pub enum InputMode {
    Normal,
    Editing,
}

/// Interactive weekly timesheet. Cell edits go into the recorder's
/// in-memory grid; nothing touches the store until `save`.
pub struct App<S: KeyValueStore> {
    pub recorder: TimeRecorder<S>,
    pub roster: Vec<Project>,
    pub week_start: NaiveDate,
    pub row: usize,
    pub col: usize,
    pub input: String,
    pub input_mode: InputMode,
    pub dirty: bool,
    pub status: Option<String>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(recorder: TimeRecorder<S>, roster: Vec<Project>, anchor: NaiveDate) -> Self {
        Self {
            recorder,
            roster,
            week_start: start_of_week(anchor),
            row: 0,
            col: 0,
            input: String::new(),
            input_mode: InputMode::Normal,
            dirty: false,
            status: None,
        }
    }

    pub fn days(&self) -> Vec<NaiveDate> {
        (0..7).map(|i| self.week_start + Duration::days(i)).collect()
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.week_start + Duration::days(self.col as i64)
    }

    pub fn selected_project_id(&self) -> String {
        self.roster[self.row].id.clone()
    }

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.roster.len() {
            self.row += 1;
        }
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        }
    }

    pub fn move_right(&mut self) {
        if self.col < 6 {
            self.col += 1;
        }
    }

    pub fn previous_week(&mut self) {
        self.week_start -= Duration::days(7);
    }

    pub fn next_week(&mut self) {
        self.week_start += Duration::days(7);
    }

    pub fn begin_edit(&mut self) {
        self.input = self
            .recorder
            .grid()
            .get(&self.selected_project_id(), self.selected_date())
            .unwrap_or("")
            .to_string();
        self.input_mode = InputMode::Editing;
        self.status = None;
    }

    pub fn push_char(&mut self, c: char) {
        // Free-form text is allowed in cells, but the editor only takes
        // number-ish input; anything else comes from old saved data
        if c.is_ascii_digit() || c == '.' {
            self.input.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    pub fn confirm_edit(&mut self) {
        let project_id = self.selected_project_id();
        let date = self.selected_date();
        let input = self.input.clone();
        self.recorder.set_hours(&project_id, date, &input);
        self.input.clear();
        self.input_mode = InputMode::Normal;
        self.dirty = true;
    }

    pub fn cancel_edit(&mut self) {
        self.input.clear();
        self.input_mode = InputMode::Normal;
    }

    pub fn clear_cell(&mut self) {
        let project_id = self.selected_project_id();
        let date = self.selected_date();
        self.recorder.set_hours(&project_id, date, "");
        self.dirty = true;
    }

    pub fn save(&mut self) -> Result<()> {
        self.recorder.commit()?;
        self.dirty = false;
        self.status = Some("Saved".to_string());
        Ok(())
    }

    pub fn cell_text(&self, row: usize, col: usize) -> String {
        let date = self.week_start + Duration::days(col as i64);
        self.recorder
            .grid()
            .get(&self.roster[row].id, date)
            .unwrap_or("")
            .to_string()
    }

    pub fn row_total(&self, row: usize) -> f64 {
        self.days()
            .iter()
            .map(|d| self.recorder.grid().hours_at(&self.roster[row].id, *d))
            .sum()
    }

    pub fn day_total(&self, col: usize) -> f64 {
        let date = self.week_start + Duration::days(col as i64);
        self.roster
            .iter()
            .map(|p| self.recorder.grid().hours_at(&p.id, date))
            .sum()
    }

    pub fn grand_total(&self) -> f64 {
        (0..self.roster.len()).map(|row| self.row_total(row)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use worklog_core::MemoryStore;

    fn app() -> App<MemoryStore> {
        let store = MemoryStore::new();
        let recorder = TimeRecorder::new(store).unwrap();
        let anchor = NaiveDate::from_ymd_opt(2025, 5, 7).unwrap();
        App::new(recorder, Project::default_roster(), anchor)
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut app = app();
        app.move_up();
        app.move_left();
        assert_eq!((app.row, app.col), (0, 0));
        for _ in 0..20 {
            app.move_down();
            app.move_right();
        }
        assert_eq!((app.row, app.col), (3, 6));
    }

    #[test]
    fn test_edit_cycle_updates_totals() {
        let mut app = app();
        // Week of the anchor starts Monday 2025-05-05
        assert_eq!(app.week_start, NaiveDate::from_ymd_opt(2025, 5, 5).unwrap());

        app.begin_edit();
        app.push_char('3');
        app.push_char('.');
        app.push_char('5');
        app.push_char('x'); // ignored
        app.confirm_edit();

        assert_eq!(app.cell_text(0, 0), "3.5");
        assert_eq!(app.row_total(0), 3.5);
        assert_eq!(app.day_total(0), 3.5);
        assert_eq!(app.grand_total(), 3.5);
        assert!(app.dirty);

        app.clear_cell();
        assert_eq!(app.cell_text(0, 0), "");
        assert_eq!(app.grand_total(), 0.0);
    }

    #[test]
    fn test_cancel_edit_leaves_cell_alone() {
        let mut app = app();
        app.begin_edit();
        app.push_char('9');
        app.cancel_edit();
        assert_eq!(app.cell_text(0, 0), "");
        assert!(!app.dirty);
    }

    #[test]
    fn test_week_paging_keeps_cells_on_their_days() {
        let mut app = app();
        app.begin_edit();
        app.push_char('2');
        app.confirm_edit();

        app.next_week();
        assert_eq!(app.cell_text(0, 0), "");
        app.previous_week();
        assert_eq!(app.cell_text(0, 0), "2");
    }
}
