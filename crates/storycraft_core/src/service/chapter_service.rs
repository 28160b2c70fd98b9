//! Chapter and scene planner for one project.
//!
//! # Responsibility
//! - CRUD over chapters and their nested scenes.
//! - Manual chapter ordering and scene-to-character linking.
//!
//! # Invariants
//! - Removing a chapter removes all of its scenes.
//! - Chapter edits never touch `scenes`.
//! - Blank chapter or scene titles are silent no-ops.
//! - Removal is crate-internal; it only runs from a confirmed staged deletion.

use crate::model::is_blank;
use crate::model::project::{toggle_link, Chapter, EntityId, Project, Scene, SceneStatus};
use crate::service::reorder::move_element;

/// Partial chapter update. `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChapterPatch {
    pub title: Option<String>,
    pub goal_chars: Option<u32>,
    pub current_chars: Option<u32>,
}

/// Scene form state, used for both creating and editing.
///
/// Drafts from `new` create a scene. Drafts from `from_scene` update that
/// scene and start from its stored links, so toggles apply to the stored set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneDraft {
    id: Option<EntityId>,
    pub title: String,
    pub description: Option<String>,
    pub status: Option<SceneStatus>,
    pub character_ids: Option<Vec<EntityId>>,
}

impl SceneDraft {
    /// Draft for a new scene.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Draft pre-filled from an existing scene, for editing.
    pub fn from_scene(scene: &Scene) -> Self {
        Self {
            id: Some(scene.id.clone()),
            title: scene.title.clone(),
            description: Some(scene.description.clone()),
            status: Some(scene.status),
            character_ids: Some(scene.character_ids.clone()),
        }
    }

    /// Scene being edited, if any.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: SceneStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Links or unlinks `character_id` on the draft.
    ///
    /// Returns `true` when the character is linked after the call.
    pub fn toggle_character(&mut self, character_id: &str) -> bool {
        toggle_link(self.character_ids.get_or_insert_with(Vec::new), character_id)
    }
}

/// Chapter/scene CRUD scoped to one project.
pub struct ChapterPlanner<'a> {
    project: &'a mut Project,
}

impl<'a> ChapterPlanner<'a> {
    pub fn new(project: &'a mut Project) -> Self {
        Self { project }
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.project.chapters
    }

    pub fn chapter(&self, chapter_id: &str) -> Option<&Chapter> {
        self.project.chapter(chapter_id)
    }

    pub fn scene(&self, chapter_id: &str, scene_id: &str) -> Option<&Scene> {
        self.chapter(chapter_id)?.scene(scene_id)
    }

    /// Appends a chapter with no scenes. Blank titles are ignored.
    pub fn add_chapter(
        &mut self,
        title: impl Into<String>,
        goal_chars: u32,
        current_chars: u32,
    ) -> Option<EntityId> {
        let title = title.into();
        if is_blank(&title) {
            return None;
        }
        let chapter = Chapter::new(title, goal_chars, current_chars);
        let id = chapter.id.clone();
        self.project.chapters.push(chapter);
        Some(id)
    }

    pub fn edit_chapter(&mut self, chapter_id: &str, patch: ChapterPatch) -> bool {
        if patch.title.as_deref().is_some_and(is_blank) {
            return false;
        }
        let Some(chapter) = self.project.chapter_mut(chapter_id) else {
            return false;
        };

        if let Some(title) = patch.title {
            chapter.title = title;
        }
        if let Some(goal_chars) = patch.goal_chars {
            chapter.goal_chars = goal_chars;
        }
        if let Some(current_chars) = patch.current_chars {
            chapter.current_chars = current_chars;
        }
        true
    }

    /// Removes a chapter together with its scenes.
    pub(crate) fn remove_chapter(&mut self, chapter_id: &str) -> bool {
        let before = self.project.chapters.len();
        self.project.chapters.retain(|c| c.id != chapter_id);
        self.project.chapters.len() != before
    }

    /// Moves the chapter at `from` to `to`.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        move_element(&mut self.project.chapters, from, to)
    }

    /// Creates or updates a scene inside `chapter_id`.
    ///
    /// Returns the scene id, or `None` when the title is blank, the chapter
    /// does not resolve, or the draft names a scene that does not exist.
    pub fn save_scene(&mut self, chapter_id: &str, draft: SceneDraft) -> Option<EntityId> {
        if is_blank(&draft.title) {
            return None;
        }
        let chapter = self.project.chapter_mut(chapter_id)?;

        match draft.id {
            Some(scene_id) => {
                let scene = chapter.scene_mut(&scene_id)?;
                scene.title = draft.title;
                if let Some(description) = draft.description {
                    scene.description = description;
                }
                if let Some(status) = draft.status {
                    scene.status = status;
                }
                if let Some(character_ids) = draft.character_ids {
                    scene.character_ids = character_ids;
                }
                Some(scene_id)
            }
            None => {
                let mut scene = Scene::new(draft.title);
                scene.description = draft.description.unwrap_or_default();
                scene.status = draft.status.unwrap_or_default();
                scene.character_ids = draft.character_ids.unwrap_or_default();
                let id = scene.id.clone();
                chapter.scenes.push(scene);
                Some(id)
            }
        }
    }

    pub(crate) fn remove_scene(&mut self, chapter_id: &str, scene_id: &str) -> bool {
        let Some(chapter) = self.project.chapter_mut(chapter_id) else {
            return false;
        };
        let before = chapter.scenes.len();
        chapter.scenes.retain(|s| s.id != scene_id);
        chapter.scenes.len() != before
    }

    /// Toggles a character link on a stored scene.
    ///
    /// Returns the link state after the call, or `None` when the scene does
    /// not resolve. The character id is not checked against the cast.
    pub fn toggle_scene_character(
        &mut self,
        chapter_id: &str,
        scene_id: &str,
        character_id: &str,
    ) -> Option<bool> {
        let scene = self.project.chapter_mut(chapter_id)?.scene_mut(scene_id)?;
        Some(scene.toggle_character(character_id))
    }
}

#[cfg(test)]
mod tests {
    use super::{ChapterPatch, ChapterPlanner, SceneDraft};
    use crate::model::project::{Project, SceneStatus};

    fn project_with_chapter() -> (Project, String) {
        let mut project = Project::new("Novel", "");
        let id = ChapterPlanner::new(&mut project)
            .add_chapter("Ch.1", 2000, 0)
            .unwrap();
        (project, id)
    }

    #[test]
    fn add_chapter_ignores_blank_titles() {
        let mut project = Project::new("Novel", "");
        let mut planner = ChapterPlanner::new(&mut project);
        assert!(planner.add_chapter(" \n", 2000, 0).is_none());
        assert!(planner.chapters().is_empty());
    }

    #[test]
    fn edit_chapter_keeps_scenes() {
        let (mut project, chapter_id) = project_with_chapter();
        let mut planner = ChapterPlanner::new(&mut project);
        planner
            .save_scene(&chapter_id, SceneDraft::new("Opening"))
            .unwrap();

        let patch = ChapterPatch {
            title: Some("Chapter One".to_string()),
            current_chars: Some(1500),
            ..ChapterPatch::default()
        };
        assert!(planner.edit_chapter(&chapter_id, patch));

        let chapter = planner.chapter(&chapter_id).unwrap();
        assert_eq!(chapter.title, "Chapter One");
        assert_eq!(chapter.goal_chars, 2000);
        assert_eq!(chapter.current_chars, 1500);
        assert_eq!(chapter.scenes.len(), 1);
    }

    #[test]
    fn new_scene_gets_defaults() {
        let (mut project, chapter_id) = project_with_chapter();
        let mut planner = ChapterPlanner::new(&mut project);

        let scene_id = planner
            .save_scene(&chapter_id, SceneDraft::new("Opening"))
            .unwrap();
        let scene = planner.scene(&chapter_id, &scene_id).unwrap();
        assert_eq!(scene.status, SceneStatus::Planning);
        assert!(scene.character_ids.is_empty());
        assert!(scene.description.is_empty());
    }

    #[test]
    fn save_scene_rejects_blank_title_and_unknown_targets() {
        let (mut project, chapter_id) = project_with_chapter();
        let mut planner = ChapterPlanner::new(&mut project);

        assert!(planner.save_scene(&chapter_id, SceneDraft::new("  ")).is_none());
        assert!(planner.save_scene("missing", SceneDraft::new("Opening")).is_none());

        let mut ghost = SceneDraft::new("Ghost");
        ghost.id = Some("missing".to_string());
        assert!(planner.save_scene(&chapter_id, ghost).is_none());
        assert!(planner.chapter(&chapter_id).unwrap().scenes.is_empty());
    }

    #[test]
    fn save_scene_with_id_merges_fields() {
        let (mut project, chapter_id) = project_with_chapter();
        let mut planner = ChapterPlanner::new(&mut project);
        let scene_id = planner
            .save_scene(
                &chapter_id,
                SceneDraft::new("Opening").with_description("storm at sea"),
            )
            .unwrap();

        let mut draft = SceneDraft::from_scene(planner.scene(&chapter_id, &scene_id).unwrap())
            .with_status(SceneStatus::Done);
        draft.title = "Opening, revised".to_string();
        draft.description = None;
        assert_eq!(planner.save_scene(&chapter_id, draft), Some(scene_id.clone()));

        let scene = planner.scene(&chapter_id, &scene_id).unwrap();
        assert_eq!(scene.title, "Opening, revised");
        assert_eq!(scene.description, "storm at sea");
        assert_eq!(scene.status, SceneStatus::Done);
        assert_eq!(planner.chapter(&chapter_id).unwrap().scenes.len(), 1);
    }

    #[test]
    fn draft_toggle_links_before_save() {
        let (mut project, chapter_id) = project_with_chapter();
        let mut planner = ChapterPlanner::new(&mut project);

        let mut draft = SceneDraft::new("Opening");
        assert!(draft.toggle_character("mira"));
        assert!(draft.toggle_character("oren"));
        assert!(!draft.toggle_character("mira"));
        let scene_id = planner.save_scene(&chapter_id, draft).unwrap();

        let scene = planner.scene(&chapter_id, &scene_id).unwrap();
        assert_eq!(scene.character_ids, vec!["oren".to_string()]);
    }

    #[test]
    fn edit_draft_toggles_against_stored_links() {
        let (mut project, chapter_id) = project_with_chapter();
        let mut planner = ChapterPlanner::new(&mut project);
        let mut draft = SceneDraft::new("Opening");
        draft.toggle_character("mira");
        let scene_id = planner.save_scene(&chapter_id, draft).unwrap();

        let mut edit = SceneDraft::from_scene(planner.scene(&chapter_id, &scene_id).unwrap());
        assert_eq!(edit.id(), Some(scene_id.as_str()));
        assert!(edit.toggle_character("oren"));
        planner.save_scene(&chapter_id, edit).unwrap();
        let scene = planner.scene(&chapter_id, &scene_id).unwrap();
        assert_eq!(scene.character_ids, vec!["mira".to_string(), "oren".to_string()]);

        let mut edit = SceneDraft::from_scene(scene);
        assert!(!edit.toggle_character("mira"));
        planner.save_scene(&chapter_id, edit).unwrap();
        let scene = planner.scene(&chapter_id, &scene_id).unwrap();
        assert_eq!(scene.character_ids, vec!["oren".to_string()]);
    }

    #[test]
    fn new_drafts_never_overwrite_existing_scenes() {
        let (mut project, chapter_id) = project_with_chapter();
        let mut planner = ChapterPlanner::new(&mut project);
        let first = planner.save_scene(&chapter_id, SceneDraft::new("Opening")).unwrap();

        let draft = SceneDraft::new("Opening");
        assert_eq!(draft.id(), None);
        let second = planner.save_scene(&chapter_id, draft).unwrap();

        assert_ne!(first, second);
        assert_eq!(planner.chapter(&chapter_id).unwrap().scenes.len(), 2);
    }

    #[test]
    fn toggle_scene_character_on_stored_scene() {
        let (mut project, chapter_id) = project_with_chapter();
        let mut planner = ChapterPlanner::new(&mut project);
        let scene_id = planner
            .save_scene(&chapter_id, SceneDraft::new("Opening"))
            .unwrap();

        assert_eq!(
            planner.toggle_scene_character(&chapter_id, &scene_id, "mira"),
            Some(true)
        );
        assert_eq!(
            planner.toggle_scene_character(&chapter_id, &scene_id, "mira"),
            Some(false)
        );
        assert_eq!(
            planner.toggle_scene_character(&chapter_id, "missing", "mira"),
            None
        );
    }

    #[test]
    fn remove_chapter_cascades_to_scenes() {
        let (mut project, chapter_id) = project_with_chapter();
        let mut planner = ChapterPlanner::new(&mut project);
        planner.save_scene(&chapter_id, SceneDraft::new("A")).unwrap();
        planner.save_scene(&chapter_id, SceneDraft::new("B")).unwrap();

        assert!(planner.remove_chapter(&chapter_id));
        assert!(!planner.remove_chapter(&chapter_id));
        assert!(project.chapters.is_empty());
    }

    #[test]
    fn remove_scene_leaves_siblings() {
        let (mut project, chapter_id) = project_with_chapter();
        let mut planner = ChapterPlanner::new(&mut project);
        let a = planner.save_scene(&chapter_id, SceneDraft::new("A")).unwrap();
        let b = planner.save_scene(&chapter_id, SceneDraft::new("B")).unwrap();

        assert!(planner.remove_scene(&chapter_id, &a));
        assert!(!planner.remove_scene("missing", &b));
        let remaining: Vec<&str> = planner
            .chapter(&chapter_id)
            .unwrap()
            .scenes
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(remaining, vec![b.as_str()]);
    }

    #[test]
    fn reorder_preserves_chapter_set() {
        let mut project = Project::new("Novel", "");
        let mut planner = ChapterPlanner::new(&mut project);
        let ids: Vec<String> = ["One", "Two", "Three"]
            .iter()
            .map(|title| planner.add_chapter(*title, 2000, 0).unwrap())
            .collect();

        assert!(planner.reorder(2, 0));
        assert!(!planner.reorder(0, 5));
        let order: Vec<&str> = planner.chapters().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(order, vec![ids[2].as_str(), ids[0].as_str(), ids[1].as_str()]);
    }
}
