pub mod recorder;
pub mod report;
pub mod task_service;
