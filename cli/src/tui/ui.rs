use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Cell, Padding, Paragraph, Row, Table},
};
use worklog_core::KeyValueStore;

use crate::tui::app::{App, InputMode};

// --- THEME ---
struct Theme {
    primary: Color,
    muted: Color,
    text: Color,
    total: Color,
    edit: Color,
}

const THEME: Theme = Theme {
    primary: Color::Cyan,
    muted: Color::DarkGray,
    text: Color::White,
    total: Color::Green,
    edit: Color::Yellow,
};

pub fn draw<S: KeyValueStore>(frame: &mut Frame, app: &App<S>) {
    let size = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Grid
            Constraint::Length(1), // Footer / Help
        ])
        .split(size);

    draw_header(frame, app, main_layout[0]);
    draw_grid(frame, app, main_layout[1]);
    draw_footer(frame, app, main_layout[2]);
}

fn draw_header<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let header_block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(THEME.muted));

    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20),
            Constraint::Min(1),
            Constraint::Length(36),
        ])
        .split(area);

    let app_title = Paragraph::new(Span::styled(
        "WORKLOG TIMESHEET",
        Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD),
    ))
    .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    frame.render_widget(app_title, header_layout[0]);

    let days = app.days();
    let week_label = format!(
        " {} - {}{} ",
        days[0].format("%b %-d"),
        days[6].format("%b %-d, %Y"),
        if app.dirty { " *" } else { "" }
    );
    let nav_text = Line::from(vec![
        Span::styled(" < ", Style::default().fg(THEME.text)),
        Span::styled(
            week_label,
            Style::default().fg(THEME.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" > ", Style::default().fg(THEME.text)),
    ]);
    let nav = Paragraph::new(nav_text)
        .alignment(Alignment::Right)
        .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    frame.render_widget(nav, header_layout[2]);

    frame.render_widget(header_block, area);
}

fn draw_grid<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let days = app.days();

    let mut header_cells = vec![Cell::from("Project")];
    for day in &days {
        header_cells.push(Cell::from(format!(
            "{}\n{}",
            day.format("%a"),
            day.format("%b %-d")
        )));
    }
    header_cells.push(Cell::from("Total"));
    let header = Row::new(header_cells)
        .height(2)
        .style(Style::default().fg(THEME.muted).add_modifier(Modifier::BOLD));

    let mut rows: Vec<Row> = Vec::new();
    for (row_idx, project) in app.roster.iter().enumerate() {
        let mut cells = vec![Cell::from(project.name.clone())];
        for col_idx in 0..7 {
            let selected = row_idx == app.row && col_idx == app.col;
            let editing = selected && matches!(app.input_mode, InputMode::Editing);

            let text = if editing {
                format!("{}_", app.input)
            } else {
                let raw = app.cell_text(row_idx, col_idx);
                if raw.is_empty() {
                    "-".to_string()
                } else {
                    raw
                }
            };

            let style = if editing {
                Style::default().fg(THEME.edit).add_modifier(Modifier::BOLD)
            } else if selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(THEME.primary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(THEME.text)
            };
            cells.push(Cell::from(text).style(style));
        }
        cells.push(
            Cell::from(format!("{:.1}h", app.row_total(row_idx)))
                .style(Style::default().fg(THEME.total)),
        );
        rows.push(Row::new(cells));
    }

    let mut total_cells = vec![Cell::from("Daily Total")];
    for col_idx in 0..7 {
        total_cells.push(Cell::from(format!("{:.1}h", app.day_total(col_idx))));
    }
    total_cells.push(Cell::from(format!("{:.1}h", app.grand_total())));
    rows.push(
        Row::new(total_cells).style(Style::default().fg(THEME.total).add_modifier(Modifier::BOLD)),
    );

    let mut widths = vec![Constraint::Length(24)];
    widths.extend(std::iter::repeat(Constraint::Length(9)).take(7));
    widths.push(Constraint::Length(8));

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(THEME.muted))
            .title(" Weekly Hours "),
    );

    frame.render_widget(table, area);
}

fn draw_footer<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let help = match app.input_mode {
        InputMode::Normal => Line::from(vec![
            Span::styled("MOVE: ", Style::default().fg(THEME.muted)),
            Span::styled("←↓↑→/hjkl ", Style::default().fg(THEME.text)),
            Span::styled("WEEK: ", Style::default().fg(THEME.muted)),
            Span::styled("[ ] ", Style::default().fg(THEME.text)),
            Span::styled("EDIT: ", Style::default().fg(THEME.muted)),
            Span::styled("enter ", Style::default().fg(THEME.text)),
            Span::styled("CLEAR: ", Style::default().fg(THEME.muted)),
            Span::styled("x ", Style::default().fg(THEME.text)),
            Span::styled("SAVE: ", Style::default().fg(THEME.muted)),
            Span::styled("s ", Style::default().fg(THEME.text)),
            Span::styled("QUIT: ", Style::default().fg(THEME.muted)),
            Span::styled("q", Style::default().fg(THEME.text)),
            Span::styled(
                match &app.status {
                    Some(message) => format!("   {}", message),
                    None => String::new(),
                },
                Style::default().fg(THEME.total),
            ),
        ]),
        InputMode::Editing => Line::from(vec![
            Span::styled("TYPE HOURS  ", Style::default().fg(THEME.edit)),
            Span::styled("CONFIRM: ", Style::default().fg(THEME.muted)),
            Span::styled("enter ", Style::default().fg(THEME.text)),
            Span::styled("CANCEL: ", Style::default().fg(THEME.muted)),
            Span::styled("esc", Style::default().fg(THEME.text)),
        ]),
    };

    let footer = Paragraph::new(help)
        .alignment(Alignment::Center)
        .style(Style::default().fg(THEME.muted));
    frame.render_widget(footer, area);
}
