//! Story use-case services.
//!
//! # Responsibility
//! - Provide CRUD, reordering and linking over the project tree.
//! - Keep persistence and presentation out of edit logic.
//!
//! # Invariants
//! - Blank required titles/names are silent no-ops, never errors.
//! - Section edits reach the project collection only through
//!   `ProjectStore::apply_update`.

pub mod backup;
pub mod chapter_service;
pub mod character_service;
pub mod deletion;
pub mod project_store;
pub mod reorder;
pub mod world_service;

/// Result of a section edit that may have been a no-op.
///
/// `ProjectStore::apply_update` only stamps `updated_at` when the edit
/// reports a change.
pub trait EditOutcome {
    fn changed(&self) -> bool;
}

impl EditOutcome for bool {
    fn changed(&self) -> bool {
        *self
    }
}

impl<T> EditOutcome for Option<T> {
    fn changed(&self) -> bool {
        self.is_some()
    }
}
