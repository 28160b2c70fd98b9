//! Core domain logic for StoryCraft.
//! This crate owns the story data model, its edit operations and their
//! persistence; presentation lives elsewhere.

pub mod app;
pub mod config;
pub mod db;
pub mod id;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use app::StoryCraft;
pub use config::{AppConfig, ConfigError};
pub use id::generate_id;
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LoggingError,
};
pub use model::project::{
    Chapter, Character, EntityId, Project, ProjectSummary, Scene, SceneStatus, WorldBlock,
    DEFAULT_GOAL_CHARS,
};
pub use model::theme::Theme;
pub use repo::kv_repo::{KeyValueStore, MemoryKvStore, SqliteKvStore, StorageError, StorageResult};
pub use repo::state_repo::{StateRepository, PROJECTS_KEY, THEME_KEY};
pub use service::backup::{
    backup_file_name, export_json, export_to_dir, import_from_path, parse_import, ExportError,
    ImportError,
};
pub use service::chapter_service::{ChapterPatch, ChapterPlanner, SceneDraft};
pub use service::character_service::{CharacterPatch, CharacterRegistry};
pub use service::deletion::{DeletionTarget, StagedDeletion};
pub use service::project_store::ProjectStore;
pub use service::reorder::{move_element, DragSession};
pub use service::world_service::{WorldBlockPatch, WorldNotebook};
pub use service::EditOutcome;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
