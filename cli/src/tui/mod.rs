pub mod app;
pub mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use worklog_core::{KeyValueStore, Project, TimeRecorder};

use crate::tui::app::{App, InputMode};

pub fn run<S: KeyValueStore>(store: S, roster: Vec<Project>, anchor: NaiveDate) -> Result<()> {
    let recorder = TimeRecorder::new(store)?;

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(recorder, roster, anchor);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: Backend, S: KeyValueStore>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match app.input_mode {
                InputMode::Normal => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Left | KeyCode::Char('h') => app.move_left(),
                    KeyCode::Right | KeyCode::Char('l') => app.move_right(),
                    KeyCode::Up | KeyCode::Char('k') => app.move_up(),
                    KeyCode::Down | KeyCode::Char('j') => app.move_down(),
                    KeyCode::Char('[') | KeyCode::Char('p') => app.previous_week(),
                    KeyCode::Char(']') | KeyCode::Char('n') => app.next_week(),
                    KeyCode::Enter | KeyCode::Char('i') => app.begin_edit(),
                    KeyCode::Char('x') => app.clear_cell(),
                    KeyCode::Char('s') => {
                        if let Err(err) = app.save() {
                            app.status = Some(format!("Save failed: {}", err));
                        }
                    }
                    _ => {}
                },
                InputMode::Editing => match key.code {
                    KeyCode::Enter => app.confirm_edit(),
                    KeyCode::Esc => app.cancel_edit(),
                    KeyCode::Backspace => app.pop_char(),
                    KeyCode::Char(c) => app.push_char(c),
                    _ => {}
                },
            }
        }
    }
    Ok(())
}
