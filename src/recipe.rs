//! Recipe aggregate and pipeline step types.

use crate::{
    catalog::{self, Transform},
    error::TransformError,
    types::{Direction, RecipeName, TransformId},
};

/// One pipeline stage: a catalog transform run in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransformStep {
    /// Catalog entry to run.
    pub transform: TransformId,
    /// Half of the pair to run.
    pub direction: Direction,
}

impl TransformStep {
    /// Builds a step.
    pub fn new(transform: TransformId, direction: Direction) -> Self {
        Self {
            transform,
            direction,
        }
    }

    /// Shorthand for a forward step.
    pub fn forward(transform: TransformId) -> Self {
        Self::new(transform, Direction::Forward)
    }

    /// Shorthand for an inverse step.
    pub fn inverse(transform: TransformId) -> Self {
        Self::new(transform, Direction::Inverse)
    }

    /// Catalog entry this step refers to.
    pub fn entry(&self) -> &'static Transform {
        catalog::lookup(self.transform)
    }

    /// Runs the step on `input`.
    pub fn apply(&self, input: &str) -> Result<String, TransformError> {
        self.entry().apply(self.direction, input)
    }

    /// Display label, e.g. `Hex - Decode`.
    pub fn label(&self) -> String {
        self.entry().step_label(self.direction)
    }
}

/// Persisted aggregate: a named base value and the ordered steps applied to
/// it.
///
/// `last_output` is derived state. It is never persisted and is refreshed by
/// [`crate::service::Cellar::evaluate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    /// Identity and storage key.
    pub name: RecipeName,
    /// Untransformed input, if any.
    pub base_value: Option<String>,
    /// Pipeline in application order. Duplicates are allowed.
    pub steps: Vec<TransformStep>,
    pub(crate) last_output: Option<String>,
}

impl Recipe {
    /// Fresh recipe with no base value and no steps.
    pub fn new(name: RecipeName) -> Self {
        Self {
            name,
            base_value: None,
            steps: Vec::new(),
            last_output: None,
        }
    }

    /// Output computed by the most recent evaluation.
    pub fn last_output(&self) -> Option<&str> {
        self.last_output.as_deref()
    }

    /// True when the persisted fields (name, base value, steps) match.
    pub fn same_contents(&self, other: &Recipe) -> bool {
        self.name == other.name && self.base_value == other.base_value && self.steps == other.steps
    }
}
