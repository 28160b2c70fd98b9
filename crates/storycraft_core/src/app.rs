//! Application state owned by the shell.
//!
//! # Responsibility
//! - Hold the project collection, theme, open-project selection, staged
//!   deletion and drag gesture in one explicit object.
//! - Persist the collection (or theme) after every change.
//!
//! # Invariants
//! - Every successful mutation is followed by exactly one save.
//! - Save failures are logged and never undo or fail the edit.
//! - A failed import leaves every piece of state untouched.

use crate::config::AppConfig;
use crate::model::project::{EntityId, Project, ProjectSummary};
use crate::model::theme::Theme;
use crate::repo::kv_repo::{KeyValueStore, SqliteKvStore, StorageError, StorageResult};
use crate::repo::state_repo::StateRepository;
use crate::service::backup::{
    export_to_dir, import_from_path, parse_import, ExportError, ImportError,
};
use crate::service::chapter_service::ChapterPlanner;
use crate::service::character_service::CharacterRegistry;
use crate::service::deletion::{DeletionTarget, StagedDeletion};
use crate::service::project_store::ProjectStore;
use crate::service::reorder::DragSession;
use crate::service::world_service::WorldNotebook;
use crate::service::EditOutcome;
use chrono::Utc;
use log::{error, info};
use std::path::{Path, PathBuf};

/// StoryCraft application state over a key-value backend.
pub struct StoryCraft<S: KeyValueStore> {
    repo: StateRepository<S>,
    store: ProjectStore,
    theme: Theme,
    open_project_id: Option<EntityId>,
    deletion: StagedDeletion,
    drag: DragSession,
    drag_project_id: Option<EntityId>,
}

impl StoryCraft<SqliteKvStore> {
    /// Opens the SQLite store under `config` and loads saved state.
    pub fn open(config: &AppConfig) -> StorageResult<Self> {
        let data_dir = config.data_dir();
        std::fs::create_dir_all(data_dir).map_err(|source| StorageError::DataDir {
            path: data_dir.to_path_buf(),
            source,
        })?;
        Ok(Self::load(SqliteKvStore::open(config.db_path())?))
    }
}

impl<S: KeyValueStore> StoryCraft<S> {
    /// Loads state from `storage`. Malformed stored data yields an empty
    /// collection.
    pub fn load(storage: S) -> Self {
        let repo = StateRepository::new(storage);
        let projects = repo.load_projects();
        let theme = repo.load_theme();
        Self {
            repo,
            store: ProjectStore::from_projects(projects),
            theme,
            open_project_id: None,
            deletion: StagedDeletion::new(),
            drag: DragSession::new(),
            drag_project_id: None,
        }
    }

    pub fn storage(&self) -> &S {
        self.repo.store()
    }

    pub fn into_storage(self) -> S {
        self.repo.into_store()
    }

    pub fn projects(&self) -> &[Project] {
        self.store.list()
    }

    pub fn project_summaries(&self) -> Vec<ProjectSummary> {
        self.store.summaries()
    }

    pub fn project(&self, project_id: &str) -> Option<&Project> {
        self.store.get(project_id)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        if let Err(err) = self.repo.save_theme(theme) {
            error!(
                "event=state_save module=app status=error key=theme error_code={} error={err}",
                err.code()
            );
        }
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.set_theme(self.theme.toggled());
        self.theme
    }

    pub fn open_project_id(&self) -> Option<&str> {
        self.open_project_id.as_deref()
    }

    /// Selects the project shown in the editor. Unknown ids are ignored.
    pub fn open_project(&mut self, project_id: &str) -> bool {
        if !self.store.contains(project_id) {
            return false;
        }
        self.open_project_id = Some(project_id.to_string());
        true
    }

    pub fn close_project(&mut self) {
        self.open_project_id = None;
    }

    pub fn current_project(&self) -> Option<&Project> {
        self.store.get(self.open_project_id.as_deref()?)
    }

    /// Creates a project at the front of the gallery.
    pub fn create_project(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Option<EntityId> {
        let id = self.store.create(title, description)?.id.clone();
        info!("event=project_create module=app status=ok project_id={id}");
        self.persist();
        Some(id)
    }

    pub fn update_project_details(
        &mut self,
        project_id: &str,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> bool {
        let changed = self.store.update(project_id, title, description);
        if changed {
            self.persist();
        }
        changed
    }

    /// Applies a section edit to one project and saves on change.
    ///
    /// Deletions go through `request_delete` and `confirm_delete`; the
    /// section editors below do not expose removal.
    pub fn update_project<R, F>(&mut self, project_id: &str, edit: F) -> Option<R>
    where
        R: EditOutcome,
        F: FnOnce(&mut Project) -> R,
    {
        let outcome = self.store.apply_update(project_id, edit)?;
        if outcome.changed() {
            self.persist();
        }
        Some(outcome)
    }

    pub fn edit_characters<R, F>(&mut self, project_id: &str, edit: F) -> Option<R>
    where
        R: EditOutcome,
        F: FnOnce(&mut CharacterRegistry<'_>) -> R,
    {
        self.update_project(project_id, |project| {
            edit(&mut CharacterRegistry::new(project))
        })
    }

    pub fn edit_chapters<R, F>(&mut self, project_id: &str, edit: F) -> Option<R>
    where
        R: EditOutcome,
        F: FnOnce(&mut ChapterPlanner<'_>) -> R,
    {
        self.update_project(project_id, |project| edit(&mut ChapterPlanner::new(project)))
    }

    pub fn edit_world<R, F>(&mut self, project_id: &str, edit: F) -> Option<R>
    where
        R: EditOutcome,
        F: FnOnce(&mut WorldNotebook<'_>) -> R,
    {
        self.update_project(project_id, |project| edit(&mut WorldNotebook::new(project)))
    }

    pub fn pending_delete(&self) -> Option<&DeletionTarget> {
        self.deletion.pending()
    }

    /// Stages a deletion for confirmation. Targets in unknown projects are
    /// not staged.
    pub fn request_delete(&mut self, target: DeletionTarget) -> bool {
        if !self.store.contains(target.project_id()) {
            return false;
        }
        self.deletion.stage(target);
        true
    }

    pub fn cancel_delete(&mut self) {
        self.deletion.cancel();
    }

    /// Applies the staged deletion. Returns whether anything was removed.
    pub fn confirm_delete(&mut self) -> bool {
        let Some(target) = self.deletion.take() else {
            return false;
        };
        let kind = target.kind();

        let removed = match target {
            DeletionTarget::Project { project_id } => {
                let removed = self.store.delete(&project_id);
                if removed && self.open_project_id.as_deref() == Some(project_id.as_str()) {
                    self.open_project_id = None;
                }
                if removed {
                    self.persist();
                }
                removed
            }
            DeletionTarget::Character {
                project_id,
                character_id,
            } => self
                .edit_characters(&project_id, |registry| registry.remove(&character_id))
                .unwrap_or(false),
            DeletionTarget::Chapter {
                project_id,
                chapter_id,
            } => self
                .edit_chapters(&project_id, |planner| planner.remove_chapter(&chapter_id))
                .unwrap_or(false),
            DeletionTarget::Scene {
                project_id,
                chapter_id,
                scene_id,
            } => self
                .edit_chapters(&project_id, |planner| {
                    planner.remove_scene(&chapter_id, &scene_id)
                })
                .unwrap_or(false),
            DeletionTarget::WorldBlock {
                project_id,
                block_id,
            } => self
                .edit_world(&project_id, |notebook| notebook.remove(&block_id))
                .unwrap_or(false),
        };

        info!("event=delete_confirm module=app status=ok kind={kind} removed={removed}");
        removed
    }

    /// Starts dragging the chapter at `index` within `project_id`.
    pub fn begin_chapter_drag(&mut self, project_id: &str, index: usize) -> bool {
        let Some(project) = self.store.get(project_id) else {
            return false;
        };
        if index >= project.chapters.len() {
            return false;
        }
        self.drag_project_id = Some(project_id.to_string());
        self.drag.begin(index);
        true
    }

    /// Pointer moved over chapter `index` during a drag.
    pub fn drag_chapter_over(&mut self, index: usize) -> bool {
        let Some(project_id) = self.drag_project_id.clone() else {
            return false;
        };
        let drag = &mut self.drag;
        let moved = self
            .store
            .apply_update(&project_id, |project| drag.hover(&mut project.chapters, index))
            .unwrap_or(false);
        if moved {
            self.persist();
        }
        moved
    }

    /// Drop: the order is already applied.
    pub fn end_chapter_drag(&mut self) {
        self.drag.end();
        self.drag_project_id = None;
    }

    pub fn dragged_chapter_index(&self) -> Option<usize> {
        self.drag.dragged_index()
    }

    pub fn export_json(&self) -> Result<String, ExportError> {
        self.store.export()
    }

    /// Writes today's backup file into `dir`.
    pub fn export_backup(&self, dir: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        export_to_dir(self.store.list(), dir, Utc::now().date_naive())
    }

    /// Replaces every project with the parsed backup.
    ///
    /// Returns the number of imported projects.
    pub fn import_json(&mut self, text: &str) -> Result<usize, ImportError> {
        let projects = parse_import(text)?;
        Ok(self.replace_projects(projects))
    }

    pub fn import_file(&mut self, path: impl AsRef<Path>) -> Result<usize, ImportError> {
        let projects = import_from_path(path)?;
        Ok(self.replace_projects(projects))
    }

    fn replace_projects(&mut self, projects: Vec<Project>) -> usize {
        let count = projects.len();
        self.store.replace_all(projects);
        if let Some(open_id) = self.open_project_id.as_deref() {
            if !self.store.contains(open_id) {
                self.open_project_id = None;
            }
        }
        self.deletion.cancel();
        self.end_chapter_drag();
        self.persist();
        count
    }

    fn persist(&mut self) {
        if let Err(err) = self.repo.save_projects(self.store.list()) {
            error!(
                "event=state_save module=app status=error key=projects projects={} error_code={} error={err}",
                self.store.len(),
                err.code()
            );
        }
    }
}
