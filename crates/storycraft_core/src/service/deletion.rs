//! Two-phase (stage → confirm/cancel) deletion.
//!
//! # Invariants
//! - At most one deletion is staged at a time; staging replaces the previous.
//! - Nothing is removed until the staged target is confirmed.

use crate::model::project::EntityId;

/// Entity selected for deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionTarget {
    Project {
        project_id: EntityId,
    },
    Character {
        project_id: EntityId,
        character_id: EntityId,
    },
    /// Confirming removes every scene of the chapter as well.
    Chapter {
        project_id: EntityId,
        chapter_id: EntityId,
    },
    Scene {
        project_id: EntityId,
        chapter_id: EntityId,
        scene_id: EntityId,
    },
    WorldBlock {
        project_id: EntityId,
        block_id: EntityId,
    },
}

impl DeletionTarget {
    /// Project that owns the target (or is the target).
    pub fn project_id(&self) -> &str {
        match self {
            Self::Project { project_id }
            | Self::Character { project_id, .. }
            | Self::Chapter { project_id, .. }
            | Self::Scene { project_id, .. }
            | Self::WorldBlock { project_id, .. } => project_id,
        }
    }

    /// Short kind name used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Project { .. } => "project",
            Self::Character { .. } => "character",
            Self::Chapter { .. } => "chapter",
            Self::Scene { .. } => "scene",
            Self::WorldBlock { .. } => "world_block",
        }
    }

    /// Confirmation prompt as `(title, message)`.
    pub fn prompt(&self) -> (&'static str, &'static str) {
        match self {
            Self::Project { .. } => (
                "Delete project?",
                "This project will be deleted permanently. This cannot be undone.",
            ),
            Self::Character { .. } => (
                "Delete character?",
                "This character profile will be deleted permanently.",
            ),
            Self::Chapter { .. } => (
                "Delete chapter?",
                "This deletes the chapter and every scene in it permanently.",
            ),
            Self::Scene { .. } => ("Delete scene?", "Are you sure you want to delete this scene?"),
            Self::WorldBlock { .. } => (
                "Delete note?",
                "This world note will be deleted permanently.",
            ),
        }
    }
}

/// Holder for the single pending deletion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagedDeletion {
    pending: Option<DeletionTarget>,
}

impl StagedDeletion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&mut self, target: DeletionTarget) {
        self.pending = Some(target);
    }

    pub fn pending(&self) -> Option<&DeletionTarget> {
        self.pending.as_ref()
    }

    /// Takes the staged target for confirmation, leaving nothing staged.
    pub fn take(&mut self) -> Option<DeletionTarget> {
        self.pending.take()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{DeletionTarget, StagedDeletion};

    #[test]
    fn staging_replaces_and_take_clears() {
        let mut staged = StagedDeletion::new();
        staged.stage(DeletionTarget::Project {
            project_id: "p1".to_string(),
        });
        let scene = DeletionTarget::Scene {
            project_id: "p1".to_string(),
            chapter_id: "c1".to_string(),
            scene_id: "s1".to_string(),
        };
        staged.stage(scene.clone());

        assert_eq!(staged.pending(), Some(&scene));
        assert_eq!(staged.take(), Some(scene));
        assert_eq!(staged.take(), None);
    }

    #[test]
    fn target_metadata() {
        let target = DeletionTarget::Chapter {
            project_id: "p1".to_string(),
            chapter_id: "c1".to_string(),
        };
        assert_eq!(target.project_id(), "p1");
        assert_eq!(target.kind(), "chapter");
        assert!(target.prompt().1.contains("every scene"));
    }
}
