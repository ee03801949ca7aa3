//! The cellar: recipe operations exposed to the outer (web or CLI) layer.
//!
//! Every mutation is persisted before it returns, and the caller's
//! [`Recipe`] is only updated once the store accepted the new state, so a
//! failed write leaves both sides as they were. Reads always go through the
//! trust-boundary decoder, even for records this process wrote.

use tracing::{debug, info, warn};

use crate::{
    codec,
    config::CellarConfig,
    core::evaluator::{self, Evaluation},
    error::{CellarError, CellarResult, PersistError},
    naming::NameGenerator,
    op::StepEdit,
    persist::{RecipeStore, fs::FsRecipeStore},
    recipe::{Recipe, TransformStep},
    session::Session,
    types::RecipeName,
};

/// A recipe together with its freshly computed evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeView {
    /// The recipe, with `last_output` refreshed.
    pub recipe: Recipe,
    /// Result of evaluating it.
    pub evaluation: Evaluation,
}

impl RecipeView {
    /// Display labels of the steps, in order.
    pub fn step_labels(&self) -> Vec<String> {
        self.recipe.steps.iter().map(TransformStep::label).collect()
    }
}

/// Recipe facade over a [`RecipeStore`].
pub struct Cellar<S: RecipeStore> {
    store: S,
    config: CellarConfig,
}

impl Cellar<FsRecipeStore> {
    /// Filesystem cellar rooted at `config.recipe_dir`.
    pub fn open_dir(config: CellarConfig) -> CellarResult<Self> {
        let store = FsRecipeStore::open(&config.recipe_dir, config.extension.clone())?;
        Ok(Self::new(store, config))
    }
}

impl<S: RecipeStore> Cellar<S> {
    /// Wraps `store`.
    pub fn new(store: S, config: CellarConfig) -> Self {
        Self { store, config }
    }

    /// Active configuration.
    pub fn config(&self) -> &CellarConfig {
        &self.config
    }

    /// Underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Name generator using the configured length bounds. `None` seeds it
    /// from OS entropy.
    pub fn name_generator(&self, seed: Option<u64>) -> NameGenerator {
        let (min, max) = self.config.generated_name_range();
        match seed {
            Some(seed) => NameGenerator::from_seed(seed, min, max),
            None => NameGenerator::from_entropy(min, max),
        }
    }

    /// Validates a requested name, or draws one from `names` when the
    /// request is absent or empty. Nothing is persisted.
    pub fn create(
        &self,
        requested: Option<&str>,
        names: &mut NameGenerator,
    ) -> CellarResult<RecipeName> {
        match requested.filter(|r| !r.is_empty()) {
            Some(requested) => Ok(RecipeName::new(requested)?),
            None => {
                let name = names.generate();
                debug!(%name, "generated recipe name");
                Ok(name)
            }
        }
    }

    /// Loads the stored recipe for `name`; `Ok(None)` when none exists.
    pub fn find(&self, name: &RecipeName) -> CellarResult<Option<Recipe>> {
        let Some(bytes) = self.store.read(name)? else {
            return Ok(None);
        };
        match codec::decode(&bytes, name.as_str()) {
            Ok(recipe) => Ok(Some(recipe)),
            Err(reason) => {
                warn!(%name, %reason, "stored recipe failed validation");
                Err(CellarError::Corrupt {
                    name: name.to_string(),
                    reason,
                })
            }
        }
    }

    /// Stored recipe for `name`, or a fresh empty one (not yet persisted).
    pub fn get_or_create(&self, name: &RecipeName) -> CellarResult<Recipe> {
        Ok(self
            .find(name)?
            .unwrap_or_else(|| Recipe::new(name.clone())))
    }

    /// Names of every stored recipe.
    pub fn names(&self) -> CellarResult<Vec<RecipeName>> {
        Ok(self.store.names()?)
    }

    /// Replaces the base value. An empty string counts as absent.
    pub fn set_base_value(
        &mut self,
        recipe: &mut Recipe,
        value: Option<String>,
    ) -> CellarResult<()> {
        let mut next = recipe.clone();
        next.base_value = value.filter(|v| !v.is_empty());
        next.last_output = None;
        self.save(&next)?;
        info!(name = %next.name, has_value = next.base_value.is_some(), "base value set");
        *recipe = next;
        Ok(())
    }

    /// Appends `step` and persists.
    pub fn append_step(&mut self, recipe: &mut Recipe, step: TransformStep) -> CellarResult<()> {
        self.edit(recipe, StepEdit::Append { step })
    }

    /// Deletes the step at 1-based `position` and persists.
    pub fn delete_step(&mut self, recipe: &mut Recipe, position: usize) -> CellarResult<()> {
        self.edit(recipe, StepEdit::Delete { position })
    }

    /// Moves a step (see [`Recipe::move_step`]) and persists.
    pub fn move_step(&mut self, recipe: &mut Recipe, from: usize, to: usize) -> CellarResult<()> {
        self.edit(recipe, StepEdit::Move { from, to })
    }

    /// Applies `edit` and persists. On error `recipe` is unchanged.
    pub fn edit(&mut self, recipe: &mut Recipe, edit: StepEdit) -> CellarResult<()> {
        let mut next = recipe.clone();
        next.apply_edit(&edit)?;
        next.last_output = None;
        self.save(&next)?;
        info!(name = %next.name, op = edit.kind(), steps = next.steps.len(), "recipe edited");
        *recipe = next;
        Ok(())
    }

    /// Recomputes the output of `recipe` and stores it in `last_output`.
    pub fn evaluate(&self, recipe: &mut Recipe) -> Evaluation {
        let evaluation = evaluator::evaluate(recipe.base_value.as_deref(), &recipe.steps);
        if let Some(failure) = &evaluation.failure {
            debug!(
                name = %recipe.name,
                step = failure.position,
                error = %failure.source,
                "pipeline stopped early"
            );
        }
        recipe.last_output = evaluation.output.clone();
        evaluation
    }

    /// Portable encoding of `recipe`.
    pub fn export_bytes(&self, recipe: &Recipe) -> CellarResult<Vec<u8>> {
        Ok(codec::encode(recipe).map_err(PersistError::from)?)
    }

    /// File name an export of `name` should be offered under.
    pub fn export_file_name(&self, name: &RecipeName) -> String {
        format!("{name}.{}", self.config.extension)
    }

    /// Validates untrusted `bytes` as a recipe named `claimed_name` and
    /// persists it, replacing any recipe of that name.
    ///
    /// Trust-boundary failures come back as [`CellarError::Rejected`] and
    /// nothing is written.
    pub fn import_bytes(&mut self, bytes: &[u8], claimed_name: &str) -> CellarResult<Recipe> {
        let max = self.config.max_import_bytes;
        if bytes.len() > max {
            return Err(CellarError::TooLarge {
                len: bytes.len(),
                max,
            });
        }
        let recipe = codec::decode(bytes, claimed_name).map_err(|reason| {
            warn!(claimed = claimed_name, %reason, "import rejected");
            CellarError::Rejected(reason)
        })?;
        self.save(&recipe)?;
        info!(name = %recipe.name, steps = recipe.steps.len(), "recipe imported");
        Ok(recipe)
    }

    /// Imports an uploaded file. The recipe name is the filename without
    /// its extension. A rejected record flags `session`.
    pub fn import_file(
        &mut self,
        session: &mut Session,
        filename: &str,
        bytes: &[u8],
    ) -> CellarResult<Recipe> {
        session.guard()?;
        let claimed = self.claimed_name(filename)?;
        match self.import_bytes(bytes, claimed) {
            Err(err) if err.is_rejection() => {
                session.flag();
                warn!(filename, "session flagged after rejected import");
                Err(err)
            }
            other => other,
        }
    }

    /// Removes the durable record for `name`. Returns whether one existed;
    /// deleting twice is not an error.
    pub fn delete(&mut self, name: &RecipeName) -> CellarResult<bool> {
        let existed = self.store.remove(name)?;
        info!(%name, existed, "recipe deleted");
        Ok(existed)
    }

    /// Loads (or starts) `name`, evaluates it and remembers it in `session`.
    pub fn show(&self, session: &mut Session, name: &RecipeName) -> CellarResult<RecipeView> {
        session.guard()?;
        let mut recipe = self.get_or_create(name)?;
        session.remember(name);
        let evaluation = self.evaluate(&mut recipe);
        Ok(RecipeView { recipe, evaluation })
    }

    /// Forgets `name` in `session` and deletes its record.
    pub fn discard(&mut self, session: &mut Session, name: &RecipeName) -> CellarResult<bool> {
        session.guard()?;
        session.forget(name);
        self.delete(name)
    }

    fn claimed_name<'a>(&self, filename: &'a str) -> CellarResult<&'a str> {
        if filename.is_empty() || filename.contains('/') {
            return Err(CellarError::BadFilename(filename.to_string()));
        }
        let (stem, extension) = filename
            .rsplit_once('.')
            .ok_or_else(|| CellarError::BadFilename(filename.to_string()))?;
        if extension != self.config.extension {
            return Err(CellarError::WrongExtension {
                expected: self.config.extension.clone(),
                found: extension.to_string(),
            });
        }
        Ok(stem)
    }

    fn save(&mut self, recipe: &Recipe) -> CellarResult<()> {
        let bytes = codec::encode(recipe).map_err(PersistError::from)?;
        self.store.write(&recipe.name, &bytes)?;
        Ok(())
    }
}
