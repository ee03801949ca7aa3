//! Editor command model.

use crate::recipe::TransformStep;

/// A single step-list mutation, as submitted by the outer layer.
///
/// Positions are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEdit {
    /// Push a step at the end.
    Append {
        /// Step to add.
        step: TransformStep,
    },
    /// Remove the step at `position`.
    Delete {
        /// Position to remove.
        position: usize,
    },
    /// Remove the step at `from` and reinsert it at `to`, where `to` is
    /// measured against the list after removal.
    Move {
        /// Current position.
        from: usize,
        /// Target position after removal.
        to: usize,
    },
}

impl StepEdit {
    /// Short verb used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            StepEdit::Append { .. } => "append",
            StepEdit::Delete { .. } => "delete",
            StepEdit::Move { .. } => "move",
        }
    }
}
