mod report;
mod sheet;
mod tasks;
mod tui;

use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use worklog_core::{
    parse_hours, FileStore, FileTaskRepository, Granularity, Project, TaskService, TimeRange,
    TimeRecorder,
};

#[derive(Parser)]
#[command(name = "worklog")]
#[command(about = "Track project hours and see where the time went", long_about = None)]
struct Cli {
    /// Data directory (default: ~/.worklog)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record hours for a project (usage: log proj-1 3.5 --date 2025-05-01)
    Log {
        /// Project id from the roster (see `worklog projects`)
        project: String,
        /// Hours as typed; junk input is kept but reports read it as 0
        hours: String,
        /// Day to log against (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Show the weekly timesheet grid
    Sheet {
        /// Any date inside the week to show (default: this week)
        #[arg(long)]
        week: Option<NaiveDate>,
    },
    /// Hours and share per project over a calendar range
    Report {
        #[arg(long, value_enum, default_value_t = RangeArg::Week)]
        range: RangeArg,
    },
    /// Hours per project across trailing weeks or months
    Trends {
        #[arg(long, value_enum, default_value_t = TrendRangeArg::Month)]
        range: TrendRangeArg,
    },
    /// Manage tasks and bugs
    Tasks {
        #[command(subcommand)]
        action: Option<tasks::TaskCommands>,
    },
    /// List the project roster
    Projects,
    /// Open the interactive timesheet editor
    Tui,
}

#[derive(Clone, Copy, ValueEnum)]
enum RangeArg {
    Week,
    Month,
    Quarter,
    Year,
    All,
}

impl RangeArg {
    fn to_range(self) -> Option<TimeRange> {
        match self {
            RangeArg::Week => Some(TimeRange::Week),
            RangeArg::Month => Some(TimeRange::Month),
            RangeArg::Quarter => Some(TimeRange::Quarter),
            RangeArg::Year => Some(TimeRange::Year),
            RangeArg::All => None,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum TrendRangeArg {
    Week,
    Month,
}

impl TrendRangeArg {
    fn to_granularity(self) -> Granularity {
        match self {
            TrendRangeArg::Week => Granularity::Week,
            TrendRangeArg::Month => Granularity::Month,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let store = FileStore::new(cli.data_dir.clone())?;
    let roster = Project::default_roster();
    let today = Local::now().date_naive();

    match cli.command {
        Some(Commands::Log {
            project,
            hours,
            date,
        }) => {
            let date = date.unwrap_or(today);
            if !roster.iter().any(|p| p.id == project) {
                println!(
                    "Warning: '{}' is not in the roster; it will not show up in reports.",
                    project
                );
            }
            if parse_hours(&hours) == 0.0 {
                println!("Warning: '{}' reads as 0 hours.", hours);
            }

            let mut recorder = TimeRecorder::new(&store)?;
            recorder.set_hours(&project, date, &hours);
            recorder.commit()?;
            println!("Logged {} for {} on {}", hours, project, date);
        }
        Some(Commands::Sheet { week }) => {
            sheet::show_sheet(&store, &roster, week.unwrap_or(today))?;
        }
        Some(Commands::Report { range }) => {
            report::show_breakdown(&store, &roster, range.to_range(), today)?;
        }
        Some(Commands::Trends { range }) => {
            report::show_trends(&store, &roster, range.to_granularity(), today)?;
        }
        Some(Commands::Tasks { action }) => {
            let repo = FileTaskRepository::new(cli.data_dir.clone())?;
            let service = TaskService::new(repo);
            tasks::run(&service, action)?;
        }
        Some(Commands::Projects) => {
            for project in &roster {
                println!("{:<10} {:<26} {}", project.id, project.name, project.color);
            }
        }
        Some(Commands::Tui) | None => {
            tui::run(&store, roster, today)?;
        }
    }
    Ok(())
}
