use anyhow::Result;
use chrono::{Duration, NaiveDate};
use tabled::builder::Builder;
use tabled::settings::Style;
use worklog_core::time::{end_of_week, start_of_week};
use worklog_core::{KeyValueStore, Project, TimeRecorder};

/// The weekly grid: one row per roster project, one column per day
/// (Monday first), plus row/column totals. Cells show the raw text as
/// committed; totals use the parsed values.
pub fn show_sheet<S: KeyValueStore>(store: S, roster: &[Project], anchor: NaiveDate) -> Result<()> {
    let recorder = TimeRecorder::new(store)?;
    let grid = recorder.grid();
    let week_start = start_of_week(anchor);
    let days: Vec<NaiveDate> = (0..7).map(|i| week_start + Duration::days(i)).collect();

    println!(
        "Week of {} - {}",
        week_start.format("%b %-d"),
        end_of_week(anchor).format("%b %-d, %Y")
    );

    let mut builder = Builder::default();

    let mut header = vec!["Project".to_string()];
    for day in &days {
        header.push(format!("{}\n{}", day.format("%a"), day.format("%b %-d")));
    }
    header.push("Total".to_string());
    builder.push_record(header);

    for project in roster {
        let mut row = vec![project.name.clone()];
        let mut weekly_total = 0.0;
        for day in &days {
            row.push(
                grid.get(&project.id, *day)
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            );
            weekly_total += grid.hours_at(&project.id, *day);
        }
        row.push(format!("{:.1}h", weekly_total));
        builder.push_record(row);
    }

    let mut totals = vec!["Daily Total".to_string()];
    let mut grand_total = 0.0;
    for day in &days {
        let daily: f64 = roster.iter().map(|p| grid.hours_at(&p.id, *day)).sum();
        grand_total += daily;
        totals.push(format!("{:.1}h", daily));
    }
    totals.push(format!("{:.1}h", grand_total));
    builder.push_record(totals);

    let mut table = builder.build();
    table.with(Style::modern());
    println!("{}", table);
    Ok(())
}
