//! In-memory project collection.
//!
//! # Responsibility
//! - Own the ordered project list (most recently created first).
//! - Funnel every section edit through `apply_update`.
//!
//! # Invariants
//! - New projects are prepended.
//! - `apply_update` never moves `updated_at` backwards.
//! - Blank titles never reach the collection through `create`/`update`.

use crate::model::is_blank;
use crate::model::project::{Project, ProjectSummary};
use crate::service::backup::{export_json, ExportError};
use crate::service::EditOutcome;

/// Ordered collection of projects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectStore {
    projects: Vec<Project>,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_projects(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    pub fn list(&self) -> &[Project] {
        &self.projects
    }

    pub fn summaries(&self) -> Vec<ProjectSummary> {
        self.projects.iter().map(Project::summary).collect()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Creates a project and puts it at the front of the collection.
    ///
    /// Returns `None` without touching the collection when `title` is blank.
    pub fn create(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Option<&Project> {
        let title = title.into();
        if is_blank(&title) {
            return None;
        }
        self.projects.insert(0, Project::new(title, description));
        self.projects.first()
    }

    /// Rewrites title and description of an existing project.
    pub fn update(
        &mut self,
        id: &str,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> bool {
        let title = title.into();
        if is_blank(&title) {
            return false;
        }
        let description = description.into();
        self.apply_update(id, |project| {
            project.title = title;
            project.description = description;
            true
        })
        .unwrap_or(false)
    }

    /// Removes a project immediately. Returns whether it existed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != id);
        self.projects.len() != before
    }

    /// Replaces the whole collection, as done by import.
    pub fn replace_all(&mut self, projects: Vec<Project>) {
        self.projects = projects;
    }

    /// Applies `edit` to one project and stamps `updated_at` on change.
    ///
    /// Returns `None` when `id` does not resolve; otherwise the edit's own
    /// result.
    pub fn apply_update<R, F>(&mut self, id: &str, edit: F) -> Option<R>
    where
        R: EditOutcome,
        F: FnOnce(&mut Project) -> R,
    {
        let project = self.projects.iter_mut().find(|p| p.id == id)?;
        let outcome = edit(project);
        if outcome.changed() {
            project.touch();
        }
        Some(outcome)
    }

    /// Serializes the whole collection as pretty-printed JSON.
    pub fn export(&self) -> Result<String, ExportError> {
        export_json(&self.projects)
    }
}
