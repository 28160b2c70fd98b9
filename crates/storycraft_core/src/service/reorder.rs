//! Manual reordering primitives.
//!
//! # Responsibility
//! - Move one element inside a sequence (`move_element`).
//! - Track a live drag gesture that reorders on every hover.
//!
//! # Invariants
//! - A move is a permutation: length and element set never change.
//! - Out-of-range indices and `from == to` leave the sequence untouched.

/// Removes the element at `from` and reinserts it at `to`.
///
/// Returns `true` when the sequence changed.
pub fn move_element<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from == to || from >= items.len() || to >= items.len() {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}

/// State of one drag-and-drop gesture.
///
/// The dragged element is reinserted at each hovered index immediately, so
/// dropping needs no commit step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragSession {
    dragged: Option<usize>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts dragging the element currently at `index`.
    pub fn begin(&mut self, index: usize) {
        self.dragged = Some(index);
    }

    /// Current index of the dragged element, if a gesture is active.
    pub fn dragged_index(&self) -> Option<usize> {
        self.dragged
    }

    pub fn is_active(&self) -> bool {
        self.dragged.is_some()
    }

    /// Handles the pointer moving over `index`.
    ///
    /// Moves the dragged element there and follows it. Hovering its current
    /// index, or hovering with no active gesture, is a no-op.
    pub fn hover<T>(&mut self, items: &mut Vec<T>, index: usize) -> bool {
        let Some(from) = self.dragged else {
            return false;
        };
        if !move_element(items, from, index) {
            return false;
        }
        self.dragged = Some(index);
        true
    }

    /// Ends the gesture.
    pub fn end(&mut self) {
        self.dragged = None;
    }
}
