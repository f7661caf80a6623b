use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use worklog_core::{
    Priority, Task, TaskFilter, TaskKind, TaskRepository, TaskService, TaskStatus,
};

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task or bug
    Add(TaskAddArgs),
    /// List tasks (default)
    List(TaskListArgs),
    /// Mark a task done (id may be a unique prefix)
    Done { id: String },
    /// Delete a task
    Rm { id: String },
}

#[derive(Args)]
pub struct TaskAddArgs {
    pub title: String,
    /// File it as a bug instead of a task
    #[arg(long)]
    pub bug: bool,
    #[arg(long)]
    pub project: Option<String>,
    /// low / medium / high
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long)]
    pub assignee: Option<String>,
    #[arg(long)]
    pub due: Option<NaiveDate>,
    /// External tracker reference, e.g. PROJ-123
    #[arg(long)]
    pub ticket: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Args, Default)]
pub struct TaskListArgs {
    /// todo / in-progress / in-review / done
    #[arg(long)]
    pub status: Option<String>,
    /// task / bug
    #[arg(long)]
    pub kind: Option<String>,
    /// low / medium / high
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long)]
    pub project: Option<String>,
    /// Free text over title and description
    #[arg(long)]
    pub search: Option<String>,
}

pub fn run<R: TaskRepository>(service: &TaskService<R>, action: Option<TaskCommands>) -> Result<()> {
    match action.unwrap_or(TaskCommands::List(TaskListArgs::default())) {
        TaskCommands::Add(args) => {
            let mut task = Task::new(args.title, args.project);
            if args.bug {
                task.kind = TaskKind::Bug;
            }
            if let Some(p) = args.priority.as_deref() {
                task.priority = parse_priority(p);
            }
            task.assignee = args.assignee;
            task.due = args.due;
            task.ticket_id = args.ticket;
            task.description = args.description;

            let created = service.create_task(task)?;
            println!("Added: {} (ID: {})", created.title, short_id(&created));
        }
        TaskCommands::List(args) => {
            let unfiltered = args.status.is_none()
                && args.kind.is_none()
                && args.priority.is_none()
                && args.project.is_none()
                && args.search.is_none();
            let filter = TaskFilter {
                status: args.status.as_deref().map(parse_status).transpose()?,
                kind: args.kind.as_deref().map(parse_kind).transpose()?,
                priority: args.priority.as_deref().map(parse_priority),
                project_id: args.project,
                search: args.search,
            };
            show_tasks(service.list_tasks(&filter)?);

            if unfiltered {
                let counts = service.status_counts()?;
                let line: Vec<String> = [
                    TaskStatus::Todo,
                    TaskStatus::InProgress,
                    TaskStatus::InReview,
                    TaskStatus::Done,
                ]
                .iter()
                .filter_map(|s| counts.get(s).map(|n| format!("{} {}", n, s.label())))
                .collect();
                if !line.is_empty() {
                    println!("{}", line.join(", "));
                }
            }
        }
        TaskCommands::Done { id } => {
            let task = service.find_by_id_prefix(&id)?;
            let updated = service.set_status(&task.id, TaskStatus::Done)?;
            println!("Done: {}", updated.title);
        }
        TaskCommands::Rm { id } => {
            let task = service.find_by_id_prefix(&id)?;
            service.delete_task(&task.id)?;
            println!("Deleted: {}", task.title);
        }
    }
    Ok(())
}

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Pri")]
    priority: String,
    #[tabled(rename = "Project")]
    project: String,
    #[tabled(rename = "Due")]
    due: String,
}

fn show_tasks(tasks: Vec<Task>) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let rows: Vec<TaskRow> = tasks
        .iter()
        .map(|task| TaskRow {
            id: short_id(task),
            kind: match task.kind {
                TaskKind::Task => "task".to_string(),
                TaskKind::Bug => "bug".to_string(),
            },
            title: task.title.clone(),
            status: task.status.label().to_string(),
            priority: format!("{:?}", task.priority),
            project: task.project_id.clone().unwrap_or_else(|| "-".to_string()),
            due: task
                .due
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::modern());
    println!("{}", table);
}

fn short_id(task: &Task) -> String {
    let id = task.id.to_string();
    id[..8].to_string()
}

fn parse_priority(raw: &str) -> Priority {
    match raw.to_lowercase().as_str() {
        "h" | "high" => Priority::High,
        "l" | "low" => Priority::Low,
        _ => Priority::Medium,
    }
}

fn parse_status(raw: &str) -> Result<TaskStatus> {
    match raw.to_lowercase().as_str() {
        "todo" => Ok(TaskStatus::Todo),
        "in-progress" | "progress" | "doing" => Ok(TaskStatus::InProgress),
        "in-review" | "review" => Ok(TaskStatus::InReview),
        "done" => Ok(TaskStatus::Done),
        other => Err(anyhow::anyhow!("Unknown status '{}'", other)),
    }
}

fn parse_kind(raw: &str) -> Result<TaskKind> {
    match raw.to_lowercase().as_str() {
        "task" => Ok(TaskKind::Task),
        "bug" => Ok(TaskKind::Bug),
        other => Err(anyhow::anyhow!("Unknown kind '{}'", other)),
    }
}
