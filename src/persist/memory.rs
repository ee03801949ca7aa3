use hashbrown::HashMap;

use crate::types::RecipeName;

use super::{PersistResult, RecipeStore};

/// [`RecipeStore`] backed by a hash map. Nothing survives the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryRecipeStore {
    records: HashMap<RecipeName, Vec<u8>>,
}

impl MemoryRecipeStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecipeStore for MemoryRecipeStore {
    fn read(&self, name: &RecipeName) -> PersistResult<Option<Vec<u8>>> {
        Ok(self.records.get(name).cloned())
    }

    fn write(&mut self, name: &RecipeName, payload: &[u8]) -> PersistResult<()> {
        self.records.insert(name.clone(), payload.to_vec());
        Ok(())
    }

    fn remove(&mut self, name: &RecipeName) -> PersistResult<bool> {
        Ok(self.records.remove(name).is_some())
    }

    fn names(&self) -> PersistResult<Vec<RecipeName>> {
        let mut names: Vec<RecipeName> = self.records.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}
