//! Application state persistence over a key-value store.
//!
//! # Responsibility
//! - Load and save the full project collection under `PROJECTS_KEY`.
//! - Load and save the theme flag under `THEME_KEY`.
//!
//! # Invariants
//! - Loading never fails: malformed or unreadable state yields an empty
//!   collection and a logged error.
//! - Logged errors carry serde categories and positions only, never stored
//!   text.

use crate::model::project::Project;
use crate::model::theme::Theme;
use crate::repo::kv_repo::{KeyValueStore, StorageResult};
use log::{error, info};

/// Storage key holding the JSON array of projects.
pub const PROJECTS_KEY: &str = "storycraft_projects";
/// Storage key holding the theme flag.
pub const THEME_KEY: &str = "storycraft_theme";

/// State repository over a key-value backend.
pub struct StateRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> StateRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Loads the stored project collection.
    ///
    /// Absent key, storage failure, invalid JSON and non-array JSON all
    /// produce an empty collection.
    pub fn load_projects(&self) -> Vec<Project> {
        let raw = match self.store.get(PROJECTS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                error!(
                    "event=state_load module=repo status=error key={PROJECTS_KEY} error_code=storage_read_failed error={err}"
                );
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Project>>(&raw) {
            Ok(projects) => {
                info!(
                    "event=state_load module=repo status=ok key={PROJECTS_KEY} projects={}",
                    projects.len()
                );
                projects
            }
            Err(err) => {
                error!(
                    "event=state_load module=repo status=error key={PROJECTS_KEY} error_code=malformed_state category={:?} line={} column={}",
                    err.classify(),
                    err.line(),
                    err.column()
                );
                Vec::new()
            }
        }
    }

    /// Writes the whole collection, replacing any previous value.
    pub fn save_projects(&mut self, projects: &[Project]) -> StorageResult<()> {
        let raw = serde_json::to_string(projects)?;
        self.store.set(PROJECTS_KEY, &raw)
    }

    /// Loads the theme flag, defaulting to light.
    pub fn load_theme(&self) -> Theme {
        match self.store.get(THEME_KEY) {
            Ok(value) => Theme::from_stored(value.as_deref()),
            Err(err) => {
                error!(
                    "event=state_load module=repo status=error key={THEME_KEY} error_code=storage_read_failed error={err}"
                );
                Theme::Light
            }
        }
    }

    pub fn save_theme(&mut self, theme: Theme) -> StorageResult<()> {
        self.store.set(THEME_KEY, theme.as_stored())
    }
}

#[cfg(test)]
mod tests {
    use super::{StateRepository, PROJECTS_KEY, THEME_KEY};
    use crate::model::project::Project;
    use crate::model::theme::Theme;
    use crate::repo::kv_repo::{KeyValueStore, MemoryKvStore};

    #[test]
    fn missing_state_loads_empty_defaults() {
        let repo = StateRepository::new(MemoryKvStore::new());
        assert!(repo.load_projects().is_empty());
        assert_eq!(repo.load_theme(), Theme::Light);
    }

    #[test]
    fn malformed_state_loads_empty_collection() {
        let mut store = MemoryKvStore::new();
        store.set(PROJECTS_KEY, "{not json").unwrap();
        assert!(StateRepository::new(store.clone()).load_projects().is_empty());

        store.set(PROJECTS_KEY, r#"{"id":"p1"}"#).unwrap();
        assert!(StateRepository::new(store).load_projects().is_empty());
    }

    #[test]
    fn saved_state_loads_back() {
        let mut repo = StateRepository::new(MemoryKvStore::new());
        let project = Project::new("Novel A", "draft");
        repo.save_projects(std::slice::from_ref(&project)).unwrap();
        repo.save_theme(Theme::Dark).unwrap();

        assert_eq!(repo.load_projects(), vec![project]);
        assert_eq!(repo.load_theme(), Theme::Dark);
        assert_eq!(
            repo.store().get(THEME_KEY).unwrap().as_deref(),
            Some("dark")
        );
    }
}
