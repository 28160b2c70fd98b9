//! World notebook for one project.

use crate::model::is_blank;
use crate::model::project::{EntityId, Project, WorldBlock};

/// Partial world block update. `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorldBlockPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Freeform setting/lore notes scoped to one project.
pub struct WorldNotebook<'a> {
    project: &'a mut Project,
}

impl<'a> WorldNotebook<'a> {
    pub fn new(project: &'a mut Project) -> Self {
        Self { project }
    }

    pub fn blocks(&self) -> &[WorldBlock] {
        &self.project.world_blocks
    }

    pub fn get(&self, block_id: &str) -> Option<&WorldBlock> {
        self.project.world_block(block_id)
    }

    pub fn add(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Option<EntityId> {
        let title = title.into();
        if is_blank(&title) {
            return None;
        }
        let block = WorldBlock::new(title, content);
        let id = block.id.clone();
        self.project.world_blocks.push(block);
        Some(id)
    }

    pub fn edit(&mut self, block_id: &str, patch: WorldBlockPatch) -> bool {
        if patch.title.as_deref().is_some_and(is_blank) {
            return false;
        }
        let Some(block) = self
            .project
            .world_blocks
            .iter_mut()
            .find(|b| b.id == block_id)
        else {
            return false;
        };

        if let Some(title) = patch.title {
            block.title = title;
        }
        if let Some(content) = patch.content {
            block.content = content;
        }
        true
    }

    /// Reached only from a confirmed `DeletionTarget::WorldBlock`.
    pub(crate) fn remove(&mut self, block_id: &str) -> bool {
        let before = self.project.world_blocks.len();
        self.project.world_blocks.retain(|b| b.id != block_id);
        self.project.world_blocks.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::{WorldBlockPatch, WorldNotebook};
    use crate::model::project::Project;

    #[test]
    fn world_blocks_support_crud() {
        let mut project = Project::new("Novel", "");
        let mut notebook = WorldNotebook::new(&mut project);

        assert!(notebook.add("", "ignored").is_none());
        let id = notebook.add("Harbor city", "Salt and rope.").unwrap();

        let patch = WorldBlockPatch {
            content: Some("Salt, rope and gulls.".to_string()),
            ..WorldBlockPatch::default()
        };
        assert!(notebook.edit(&id, patch));
        assert!(!notebook.edit(
            &id,
            WorldBlockPatch {
                title: Some("   ".to_string()),
                content: None,
            }
        ));
        assert_eq!(notebook.get(&id).unwrap().title, "Harbor city");
        assert_eq!(notebook.get(&id).unwrap().content, "Salt, rope and gulls.");

        assert!(notebook.remove(&id));
        assert!(notebook.blocks().is_empty());
    }
}
