use std::collections::HashMap;

use anyhow::Result;
use uuid::Uuid;

use crate::model::task::{Priority, Task, TaskKind, TaskStatus};
use crate::repository::TaskRepository;

/// Listing filter; every field is optional and they AND together.
/// `search` matches case-insensitively over title and description.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub kind: Option<TaskKind>,
    pub priority: Option<Priority>,
    pub project_id: Option<String>,
    pub search: Option<String>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(status) = self.status {
            if task.status != status {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if task.kind != kind {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }
        if let Some(project_id) = &self.project_id {
            if task.project_id.as_deref() != Some(project_id.as_str()) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let in_title = task.title.to_lowercase().contains(&needle);
            let in_description = task
                .description
                .as_deref()
                .map(|d| d.to_lowercase().contains(&needle))
                .unwrap_or(false);
            if !in_title && !in_description {
                return false;
            }
        }
        true
    }
}

pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_task(&self, task: Task) -> Result<Task> {
        self.repo.create(task)
    }

    pub fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        let tasks = self.repo.list()?;
        Ok(tasks.into_iter().filter(|t| filter.matches(t)).collect())
    }

    /// Resolve a task from a (possibly shortened) id, the way the CLI
    /// shows ids. An ambiguous prefix is an error, not a guess.
    pub fn find_by_id_prefix(&self, prefix: &str) -> Result<Task> {
        let prefix = prefix.to_lowercase();
        let matches: Vec<Task> = self
            .repo
            .list()?
            .into_iter()
            .filter(|t| t.id.to_string().starts_with(&prefix))
            .collect();
        match matches.len() {
            0 => Err(anyhow::anyhow!("No task matches id '{}'", prefix)),
            1 => Ok(matches.into_iter().next().unwrap()),
            n => Err(anyhow::anyhow!("Id '{}' is ambiguous ({} matches)", prefix, n)),
        }
    }

    pub fn set_status(&self, id: &Uuid, status: TaskStatus) -> Result<Task> {
        let tasks = self.repo.list()?;
        let mut task = tasks
            .into_iter()
            .find(|t| t.id == *id)
            .ok_or_else(|| anyhow::anyhow!("Task with ID {} not found", id))?;
        task.status = status;
        self.repo.update(&task)?;
        Ok(task)
    }

    pub fn delete_task(&self, id: &Uuid) -> Result<()> {
        self.repo.delete(id)
    }

    /// How many tasks sit in each status, for the overview line.
    pub fn status_counts(&self) -> Result<HashMap<TaskStatus, usize>> {
        let mut counts = HashMap::new();
        for task in self.repo.list()? {
            *counts.entry(task.status).or_insert(0) += 1;
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    struct MockTaskRepo {
        tasks: std::cell::RefCell<Vec<Task>>,
    }

    impl MockTaskRepo {
        fn with(tasks: Vec<Task>) -> Self {
            Self {
                tasks: std::cell::RefCell::new(tasks),
            }
        }
    }

    impl TaskRepository for MockTaskRepo {
        fn create(&self, task: Task) -> Result<Task> {
            self.tasks.borrow_mut().push(task.clone());
            Ok(task)
        }

        fn list(&self) -> Result<Vec<Task>> {
            Ok(self.tasks.borrow().clone())
        }

        fn update(&self, task: &Task) -> Result<()> {
            let mut tasks = self.tasks.borrow_mut();
            let pos = tasks
                .iter()
                .position(|t| t.id == task.id)
                .ok_or_else(|| anyhow::anyhow!("not found"))?;
            tasks[pos] = task.clone();
            Ok(())
        }

        fn delete(&self, id: &Uuid) -> Result<()> {
            self.tasks.borrow_mut().retain(|t| t.id != *id);
            Ok(())
        }
    }

    fn sample_tasks() -> Vec<Task> {
        let mut auth = Task::new(
            "Implement authentication flow".to_string(),
            Some("proj-1".to_string()),
        );
        auth.status = TaskStatus::InProgress;
        auth.priority = Priority::High;

        let mut nav_bug = Task::new(
            "Fix navigation responsiveness".to_string(),
            Some("proj-1".to_string()),
        );
        nav_bug.kind = TaskKind::Bug;
        nav_bug.description = Some("Sidebar breaks on mobile devices".to_string());

        let mut settings = Task::new(
            "User profile settings page".to_string(),
            Some("proj-2".to_string()),
        );
        settings.status = TaskStatus::Done;

        vec![auth, nav_bug, settings]
    }

    #[test]
    fn test_filters_and_together() {
        let service = TaskService::new(MockTaskRepo::with(sample_tasks()));

        let bugs = service
            .list_tasks(&TaskFilter {
                kind: Some(TaskKind::Bug),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(bugs.len(), 1);
        assert_eq!(bugs[0].title, "Fix navigation responsiveness");

        let none = service
            .list_tasks(&TaskFilter {
                kind: Some(TaskKind::Bug),
                project_id: Some("proj-2".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_search_covers_title_and_description() {
        let service = TaskService::new(MockTaskRepo::with(sample_tasks()));

        let by_title = service
            .list_tasks(&TaskFilter {
                search: Some("AUTH".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_title.len(), 1);

        let by_description = service
            .list_tasks(&TaskFilter {
                search: Some("sidebar".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_description.len(), 1);
        assert_eq!(by_description[0].title, "Fix navigation responsiveness");
    }

    #[test]
    fn test_status_counts() {
        let service = TaskService::new(MockTaskRepo::with(sample_tasks()));
        let counts = service.status_counts().unwrap();
        assert_eq!(counts.get(&TaskStatus::InProgress), Some(&1));
        assert_eq!(counts.get(&TaskStatus::Todo), Some(&1));
        assert_eq!(counts.get(&TaskStatus::Done), Some(&1));
    }

    #[test]
    fn test_find_by_id_prefix() {
        let tasks = sample_tasks();
        let full_id = tasks[0].id.to_string();
        let service = TaskService::new(MockTaskRepo::with(tasks));

        let found = service.find_by_id_prefix(&full_id[..8]).unwrap();
        assert_eq!(found.id.to_string(), full_id);

        assert!(service.find_by_id_prefix("ffffffff").is_err());
    }

    #[test]
    fn test_set_status() {
        let tasks = sample_tasks();
        let id = tasks[1].id;
        let service = TaskService::new(MockTaskRepo::with(tasks));

        let updated = service.set_status(&id, TaskStatus::Done).unwrap();
        assert_eq!(updated.status, TaskStatus::Done);
        let counts = service.status_counts().unwrap();
        assert_eq!(counts.get(&TaskStatus::Done), Some(&2));
    }
}
