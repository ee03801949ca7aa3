//! Step editing and pipeline evaluation over a [`crate::recipe::Recipe`].

/// Append, delete and move operations on a step list.
pub mod editor;
/// Folds a step list over a base value.
pub mod evaluator;
