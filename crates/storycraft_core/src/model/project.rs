//! Project tree records.
//!
//! # Responsibility
//! - Define `Project` and the records nested under it.
//! - Provide read-side helpers used by gallery and planner views.
//!
//! # Invariants
//! - `characters`, `chapters` and `world_blocks` are always present; missing
//!   arrays in stored JSON decode as empty.
//! - `goal_chars` defaults to `DEFAULT_GOAL_CHARS` when absent.
//! - Character counts are never negative; negative stored counts decode as 0.
//! - `updated_at` is Unix epoch milliseconds.

use crate::id::generate_id;
use crate::model::now_epoch_ms;
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque entity identifier shared by every record kind.
pub type EntityId = String;

/// Default character-count goal for a new chapter.
pub const DEFAULT_GOAL_CHARS: u32 = 2000;

fn default_goal_chars() -> u32 {
    DEFAULT_GOAL_CHARS
}

/// Older backups can hold negative counts typed into the chapter form.
fn non_negative_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let count = i64::deserialize(deserializer)?;
    Ok(u32::try_from(count.max(0)).unwrap_or(u32::MAX))
}

/// Writing state of one scene. Display-only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SceneStatus {
    #[default]
    Planning,
    InProgress,
    Done,
}

impl SceneStatus {
    /// Stable human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Planning => "Planning",
            Self::InProgress => "In progress",
            Self::Done => "Done",
        }
    }
}

/// A member of the project's cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: EntityId,
    pub name: String,
    /// Portrait location. Unresolvable URLs are a presentation concern.
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub description: String,
}

impl Character {
    pub fn new(
        name: impl Into<String>,
        image_url: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            image_url: image_url.into(),
            description: description.into(),
        }
    }
}

/// A sub-unit of a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: SceneStatus,
    /// Weak references into the owning project's `characters`.
    #[serde(default)]
    pub character_ids: Vec<EntityId>,
}

impl Scene {
    /// Creates a `Planning` scene with no linked characters.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            title: title.into(),
            description: String::new(),
            status: SceneStatus::Planning,
            character_ids: Vec::new(),
        }
    }

    /// Whether `character_id` is linked to this scene.
    pub fn has_character(&self, character_id: &str) -> bool {
        self.character_ids.iter().any(|id| id == character_id)
    }

    /// Links `character_id` if absent, unlinks it if present.
    ///
    /// Returns `true` when the character is linked after the call.
    pub fn toggle_character(&mut self, character_id: &str) -> bool {
        toggle_link(&mut self.character_ids, character_id)
    }
}

pub(crate) fn toggle_link(ids: &mut Vec<EntityId>, character_id: &str) -> bool {
    let before = ids.len();
    ids.retain(|id| id != character_id);
    if ids.len() == before {
        ids.push(character_id.to_string());
        return true;
    }
    false
}

/// An ordered narrative unit with a character-count goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: EntityId,
    pub title: String,
    #[serde(
        default = "default_goal_chars",
        deserialize_with = "non_negative_count"
    )]
    pub goal_chars: u32,
    #[serde(default, deserialize_with = "non_negative_count")]
    pub current_chars: u32,
    #[serde(default)]
    pub scenes: Vec<Scene>,
}

impl Chapter {
    pub fn new(title: impl Into<String>, goal_chars: u32, current_chars: u32) -> Self {
        Self {
            id: generate_id(),
            title: title.into(),
            goal_chars,
            current_chars,
            scenes: Vec::new(),
        }
    }

    /// Writing progress in percent, clamped to `0.0..=100.0`.
    ///
    /// A zero goal counts as a goal of one character, so any written text
    /// completes it.
    pub fn progress_percent(&self) -> f64 {
        let goal = f64::from(self.goal_chars.max(1));
        (f64::from(self.current_chars) / goal * 100.0).clamp(0.0, 100.0)
    }

    pub fn scene(&self, scene_id: &str) -> Option<&Scene> {
        self.scenes.iter().find(|scene| scene.id == scene_id)
    }

    pub fn scene_mut(&mut self, scene_id: &str) -> Option<&mut Scene> {
        self.scenes.iter_mut().find(|scene| scene.id == scene_id)
    }
}

/// A freeform setting/lore note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldBlock {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl WorldBlock {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Top-level container for one story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub characters: Vec<Character>,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
    #[serde(default)]
    pub world_blocks: Vec<WorldBlock>,
    /// Unix epoch milliseconds of the last mutation.
    #[serde(default)]
    pub updated_at: i64,
}

/// Gallery-card projection of a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub character_count: usize,
    pub chapter_count: usize,
    pub updated_at: i64,
}

impl Project {
    /// Creates an empty project stamped with the current time.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            title: title.into(),
            description: description.into(),
            characters: Vec::new(),
            chapters: Vec::new(),
            world_blocks: Vec::new(),
            updated_at: now_epoch_ms(),
        }
    }

    /// Advances `updated_at` to now, never moving it backwards.
    pub fn touch(&mut self) {
        self.updated_at = self.updated_at.max(now_epoch_ms());
    }

    pub fn summary(&self) -> ProjectSummary {
        ProjectSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            character_count: self.characters.len(),
            chapter_count: self.chapters.len(),
            updated_at: self.updated_at,
        }
    }

    pub fn character(&self, character_id: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == character_id)
    }

    pub fn chapter(&self, chapter_id: &str) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.id == chapter_id)
    }

    pub fn chapter_mut(&mut self, chapter_id: &str) -> Option<&mut Chapter> {
        self.chapters.iter_mut().find(|c| c.id == chapter_id)
    }

    pub fn world_block(&self, block_id: &str) -> Option<&WorldBlock> {
        self.world_blocks.iter().find(|b| b.id == block_id)
    }

    /// Resolves a scene's linked characters, skipping ids with no match.
    pub fn scene_characters(&self, scene: &Scene) -> Vec<&Character> {
        scene
            .character_ids
            .iter()
            .filter_map(|id| self.character(id))
            .collect()
    }
}
