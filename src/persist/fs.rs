//! Directory-backed store: `<dir>/<name>.<extension>` per recipe.

use std::{
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::types::RecipeName;

use super::{PersistResult, RecipeStore};

/// [`RecipeStore`] writing one file per recipe.
///
/// Paths are only ever built from a validated [`RecipeName`], which cannot
/// contain a separator, so every record lives directly inside `dir`.
#[derive(Debug, Clone)]
pub struct FsRecipeStore {
    dir: PathBuf,
    extension: String,
}

impl FsRecipeStore {
    /// Opens (creating if needed) the store rooted at `dir`. `extension` is
    /// given without the leading dot.
    pub fn open(dir: impl AsRef<Path>, extension: impl Into<String>) -> PersistResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            extension: extension.into(),
        })
    }

    /// Directory holding the records.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds (or would hold) the record for `name`.
    pub fn path_for(&self, name: &RecipeName) -> PathBuf {
        self.dir.join(format!("{name}.{}", self.extension))
    }
}

impl RecipeStore for FsRecipeStore {
    fn read(&self, name: &RecipeName) -> PersistResult<Option<Vec<u8>>> {
        match fs::read(self.path_for(name)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, name: &RecipeName, payload: &[u8]) -> PersistResult<()> {
        let path = self.path_for(name);
        // Write-then-rename so a crash never leaves a half-written record.
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(payload)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path)?;
        debug!(path = %path.display(), bytes = payload.len(), "recipe written");
        Ok(())
    }

    fn remove(&mut self, name: &RecipeName) -> PersistResult<bool> {
        match fs::remove_file(self.path_for(name)) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    fn names(&self) -> PersistResult<Vec<RecipeName>> {
        let suffix = format!(".{}", self.extension);
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(stem) = file_name
                .to_str()
                .and_then(|s| s.strip_suffix(suffix.as_str()))
            else {
                continue;
            };
            match RecipeName::new(stem) {
                Ok(name) => names.push(name),
                Err(err) => debug!(file = stem, %err, "skipping file with invalid recipe name"),
            }
        }
        names.sort();
        Ok(names)
    }
}
