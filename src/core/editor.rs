use crate::{error::EditError, op::StepEdit, recipe::Recipe, recipe::TransformStep};

impl Recipe {
    /// Pushes `step` at the end of the pipeline.
    ///
    /// Never fails: whether the step can run on the data before it is only
    /// known at evaluation time.
    pub fn append_step(&mut self, step: TransformStep) {
        self.steps.push(step);
    }

    /// Removes and returns the step at 1-based `position`.
    pub fn delete_step(&mut self, position: usize) -> Result<TransformStep, EditError> {
        let idx = step_index(position, self.steps.len())?;
        Ok(self.steps.remove(idx))
    }

    /// Moves the step at `from` so it ends up at `to`.
    ///
    /// `to` is checked against the list after the step has been taken out,
    /// so both positions range over `1..=len`. On error the list is left
    /// untouched.
    pub fn move_step(&mut self, from: usize, to: usize) -> Result<(), EditError> {
        let len = self.steps.len();
        let from_idx = step_index(from, len)?;
        // Inserting at the end of the shortened list is allowed.
        let to_idx = step_index(to, len)?;
        let step = self.steps.remove(from_idx);
        self.steps.insert(to_idx, step);
        Ok(())
    }

    /// Applies one editor command.
    pub fn apply_edit(&mut self, edit: &StepEdit) -> Result<(), EditError> {
        match *edit {
            StepEdit::Append { step } => {
                self.append_step(step);
                Ok(())
            }
            StepEdit::Delete { position } => self.delete_step(position).map(|_| ()),
            StepEdit::Move { from, to } => self.move_step(from, to),
        }
    }
}

fn step_index(position: usize, len: usize) -> Result<usize, EditError> {
    if position == 0 || position > len {
        return Err(EditError::OutOfRange { position, len });
    }
    Ok(position - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RecipeName, TransformId};

    fn recipe_with(ids: &[TransformId]) -> Recipe {
        let mut recipe = Recipe::new(RecipeName::new("editor").unwrap());
        for id in ids {
            recipe.append_step(TransformStep::forward(*id));
        }
        recipe
    }

    fn ids(recipe: &Recipe) -> Vec<TransformId> {
        recipe.steps.iter().map(|s| s.transform).collect()
    }

    use TransformId::{Base64, Hex, Unicode, Url};

    #[test]
    fn delete_is_one_based() {
        let mut recipe = recipe_with(&[Base64, Hex, Url]);
        let removed = recipe.delete_step(1).unwrap();
        assert_eq!(removed.transform, Base64);
        assert_eq!(ids(&recipe), vec![Hex, Url]);
    }

    #[test]
    fn delete_out_of_range_leaves_steps() {
        let mut recipe = recipe_with(&[Base64, Hex, Url]);
        assert_eq!(
            recipe.delete_step(5),
            Err(EditError::OutOfRange {
                position: 5,
                len: 3
            })
        );
        assert_eq!(
            recipe.delete_step(0),
            Err(EditError::OutOfRange {
                position: 0,
                len: 3
            })
        );
        assert_eq!(ids(&recipe), vec![Base64, Hex, Url]);
    }

    #[test]
    fn move_uses_splice_semantics() {
        let mut recipe = recipe_with(&[Base64, Hex, Url, Unicode]);
        recipe.move_step(1, 3).unwrap();
        assert_eq!(ids(&recipe), vec![Hex, Url, Base64, Unicode]);

        recipe.move_step(4, 1).unwrap();
        assert_eq!(ids(&recipe), vec![Unicode, Hex, Url, Base64]);

        recipe.move_step(2, 4).unwrap();
        assert_eq!(ids(&recipe), vec![Unicode, Url, Base64, Hex]);
    }

    #[test]
    fn move_rejects_either_bad_position() {
        let mut recipe = recipe_with(&[Base64, Hex]);
        assert!(recipe.move_step(3, 1).is_err());
        assert!(recipe.move_step(1, 3).is_err());
        assert!(recipe.move_step(0, 1).is_err());
        assert_eq!(ids(&recipe), vec![Base64, Hex]);
    }

    #[test]
    fn apply_edit_dispatches() {
        let mut recipe = recipe_with(&[]);
        recipe
            .apply_edit(&StepEdit::Append {
                step: TransformStep::inverse(Hex),
            })
            .unwrap();
        assert_eq!(recipe.steps, vec![TransformStep::inverse(Hex)]);
        assert!(
            recipe
                .apply_edit(&StepEdit::Move { from: 1, to: 2 })
                .is_err()
        );
        recipe
            .apply_edit(&StepEdit::Delete { position: 1 })
            .unwrap();
        assert!(recipe.steps.is_empty());
    }
}
