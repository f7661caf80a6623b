pub mod entry;
pub mod project;
pub mod report;
pub mod task;

pub use entry::{TimeEntry, TimesheetGrid};
pub use project::Project;
pub use report::{Granularity, ProjectTimeSummary, TimeRange, TrendPeriod};
pub use task::{Priority, Task, TaskKind, TaskStatus};
