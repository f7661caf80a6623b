pub mod model;
pub mod repository;
pub mod service;
pub mod time;

pub use model::entry::{parse_hours, TimeEntry, TimesheetGrid};
pub use model::project::Project;
pub use model::report::{Granularity, ProjectTimeSummary, TimeRange, TrendPeriod};
pub use model::task::{Priority, Task, TaskKind, TaskStatus};
pub use repository::{FileStore, FileTaskRepository, KeyValueStore, MemoryStore, TaskRepository};
pub use service::recorder::{TimeRecorder, ENTRIES_KEY, GRID_KEY};
pub use service::report::{summarize_by_period, summarize_by_project, ReportService};
pub use service::task_service::{TaskFilter, TaskService};
