use anyhow::Result;
use chrono::NaiveDate;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use worklog_core::{Granularity, KeyValueStore, Project, ReportService, TimeRange};

#[derive(Tabled)]
struct BreakdownRow {
    #[tabled(rename = "Project")]
    project: String,
    #[tabled(rename = "Hours")]
    hours: String,
    #[tabled(rename = "Share")]
    share: String,
}

/// Snapshot breakdown, the terminal version of the time distribution
/// view: hours and percentage per project plus a total line.
pub fn show_breakdown<S: KeyValueStore>(
    store: S,
    roster: &[Project],
    range: Option<TimeRange>,
    today: NaiveDate,
) -> Result<()> {
    let service = ReportService::new(store);
    let summaries = service.project_summary(roster, range, today)?;

    let scope = match range {
        Some(TimeRange::Week) => "this week",
        Some(TimeRange::Month) => "this month",
        Some(TimeRange::Quarter) => "this quarter",
        Some(TimeRange::Year) => "this year",
        None => "overall",
    };

    if summaries.is_empty() {
        println!("No time recorded {}.", scope);
        return Ok(());
    }

    let rows: Vec<BreakdownRow> = summaries
        .iter()
        .map(|s| BreakdownRow {
            project: s.project_name.clone(),
            hours: format!("{:.1}h", s.hours),
            share: format!("{:.1}%", s.percentage),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::modern());

    let total: f64 = summaries.iter().map(|s| s.hours).sum();
    println!("Time distribution ({})", scope);
    println!("{}", table);
    println!("Total: {:.1}h", total);
    Ok(())
}

/// Trend table: trailing buckets down the side, projects across the top.
pub fn show_trends<S: KeyValueStore>(
    store: S,
    roster: &[Project],
    granularity: Granularity,
    today: NaiveDate,
) -> Result<()> {
    let service = ReportService::new(store);
    let periods = service.trend(roster, granularity, today)?;

    let mut builder = Builder::default();
    let mut header = vec!["Period".to_string()];
    for project in roster {
        header.push(project.name.clone());
    }
    header.push("Total".to_string());
    builder.push_record(header);

    for period in &periods {
        let mut row = vec![period.label.clone()];
        for project in roster {
            row.push(format!("{:.1}h", period.project_hours(&project.id)));
        }
        row.push(format!("{:.1}h", period.total));
        builder.push_record(row);
    }

    let mut table = builder.build();
    table.with(Style::modern());
    println!("{}", table);

    if periods.iter().all(|p| p.total == 0.0) {
        println!("No trend data yet. Log hours with `worklog log` or the timesheet editor.");
    }
    Ok(())
}
