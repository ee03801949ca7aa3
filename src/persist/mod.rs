//! Durable recipe storage keyed by name.
//!
//! Stores hold encoded records as opaque bytes; decoding (and therefore
//! validation) happens in [`crate::service::Cellar`] on every read.

/// One file per recipe in a directory.
pub mod fs;
/// In-memory store for tests and embedding.
pub mod memory;
/// SQLite table with one row per recipe.
pub mod sqlite;

pub use crate::error::{PersistError, PersistResult};
use crate::types::RecipeName;

/// Last-writer-wins byte store addressed by [`RecipeName`].
pub trait RecipeStore {
    /// Returns the record for `name`, or `None` when there is none.
    fn read(&self, name: &RecipeName) -> PersistResult<Option<Vec<u8>>>;

    /// Durably replaces the record for `name`.
    fn write(&mut self, name: &RecipeName, payload: &[u8]) -> PersistResult<()>;

    /// Removes the record for `name`. Returns whether one existed; removing
    /// a missing record is not an error.
    fn remove(&mut self, name: &RecipeName) -> PersistResult<bool>;

    /// Names of all stored records, sorted.
    fn names(&self) -> PersistResult<Vec<RecipeName>>;
}
