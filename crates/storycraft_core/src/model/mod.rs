//! Story domain model.
//!
//! # Responsibility
//! - Define the project tree persisted and exported by core.
//! - Keep wire naming compatible with existing `storycraft_backup_*.json` files.
//!
//! # Invariants
//! - Every entity is identified by an opaque string id.
//! - Projects own characters, chapters and world blocks; chapters own scenes.
//! - Scenes reference characters by id only and may hold dangling ids.

pub mod project;
pub mod theme;

use chrono::Utc;

/// Returns the current wall-clock time in Unix epoch milliseconds.
pub(crate) fn now_epoch_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Whether a required title/name is empty after trimming.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
