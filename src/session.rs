//! Caller-owned session state.

use serde::{Deserialize, Serialize};

use crate::{
    error::{CellarError, CellarResult},
    types::RecipeName,
};

/// Per-visitor state kept by the outer layer (typically in a cookie) and
/// handed to the [`crate::service::Cellar`] calls that need it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    recipes: Vec<String>,
    flagged: bool,
}

impl Session {
    /// Fresh, unflagged session with no known recipes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Names this session has viewed, oldest first.
    pub fn recipes(&self) -> &[String] {
        &self.recipes
    }

    /// Records `name` as known, once.
    pub fn remember(&mut self, name: &RecipeName) {
        if !self.recipes.iter().any(|n| n == name.as_str()) {
            self.recipes.push(name.as_str().to_string());
        }
    }

    /// Drops `name` from the known list.
    pub fn forget(&mut self, name: &RecipeName) {
        self.recipes.retain(|n| n != name.as_str());
    }

    /// Marks the session as having submitted a rejected import.
    pub fn flag(&mut self) {
        self.flagged = true;
    }

    /// True once [`Session::flag`] has been called.
    pub fn is_flagged(&self) -> bool {
        self.flagged
    }

    /// Fails with [`CellarError::Flagged`] for flagged sessions.
    pub fn guard(&self) -> CellarResult<()> {
        if self.flagged {
            return Err(CellarError::Flagged);
        }
        Ok(())
    }
}
