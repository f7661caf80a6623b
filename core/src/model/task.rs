use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    Todo,
    InProgress,
    InReview,
    Done,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Todo
    }
}

impl TaskStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "Todo",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::InReview => "In Review",
            TaskStatus::Done => "Done",
        }
    }
}

/// Bugs share the task shape; the kind only drives filtering and display.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Task,
    Bug,
}

impl Default for TaskKind {
    fn default() -> Self {
        TaskKind::Task
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub kind: TaskKind,
    pub priority: Priority,
    pub assignee: Option<String>,
    pub due: Option<NaiveDate>,
    // External tracker reference (e.g. "PROJ-123"), free-form
    pub ticket_id: Option<String>,
    pub project_id: Option<String>,
}

impl Task {
    pub fn new(title: String, project_id: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description: None,
            status: TaskStatus::default(),
            kind: TaskKind::default(),
            priority: Priority::default(),
            assignee: None,
            due: None,
            ticket_id: None,
            project_id,
        }
    }
}
