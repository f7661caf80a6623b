use serde::{Deserialize, Serialize};

/// A roster project. Ids are external identifiers (not validated against
/// anything at this layer); color is display-only and carried through
/// to summaries unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub color: String,
    pub description: Option<String>,
}

impl Project {
    pub fn new(id: &str, name: &str, color: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
            description: None,
        }
    }

    /// The built-in roster. Summaries follow this order.
    pub fn default_roster() -> Vec<Project> {
        vec![
            Project::new("proj-1", "Website Redesign", "#8884d8"),
            Project::new("proj-2", "Mobile App Development", "#82ca9d"),
            Project::new("proj-3", "API Integration", "#ffc658"),
            Project::new("proj-4", "Analytics Dashboard", "#ff8042"),
        ]
    }
}
