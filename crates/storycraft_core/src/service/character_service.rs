//! Character registry for one project.
//!
//! # Invariants
//! - Characters keep insertion order; duplicate names are allowed.
//! - Removing a character leaves scene `character_ids` untouched.
//! - Removal is crate-internal; it only runs from a confirmed staged deletion.

use crate::model::is_blank;
use crate::model::project::{Character, EntityId, Project};

/// Partial character update. `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterPatch {
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

/// Character CRUD scoped to one project.
pub struct CharacterRegistry<'a> {
    project: &'a mut Project,
}

impl<'a> CharacterRegistry<'a> {
    pub fn new(project: &'a mut Project) -> Self {
        Self { project }
    }

    pub fn list(&self) -> &[Character] {
        &self.project.characters
    }

    pub fn get(&self, character_id: &str) -> Option<&Character> {
        self.project.character(character_id)
    }

    /// Appends a character. Blank names are ignored.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        image_url: impl Into<String>,
        description: impl Into<String>,
    ) -> Option<EntityId> {
        let name = name.into();
        if is_blank(&name) {
            return None;
        }
        let character = Character::new(name, image_url, description);
        let id = character.id.clone();
        self.project.characters.push(character);
        Some(id)
    }

    /// Merges `patch` into an existing character.
    ///
    /// Returns `false` for unknown ids and for a blank replacement name.
    pub fn edit(&mut self, character_id: &str, patch: CharacterPatch) -> bool {
        if patch.name.as_deref().is_some_and(is_blank) {
            return false;
        }
        let Some(character) = self
            .project
            .characters
            .iter_mut()
            .find(|c| c.id == character_id)
        else {
            return false;
        };

        if let Some(name) = patch.name {
            character.name = name;
        }
        if let Some(image_url) = patch.image_url {
            character.image_url = image_url;
        }
        if let Some(description) = patch.description {
            character.description = description;
        }
        true
    }

    pub(crate) fn remove(&mut self, character_id: &str) -> bool {
        let before = self.project.characters.len();
        self.project.characters.retain(|c| c.id != character_id);
        self.project.characters.len() != before
    }
}
