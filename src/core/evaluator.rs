use crate::{error::StepFailure, recipe::TransformStep};

/// Outcome of folding a pipeline over a base value.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Value after the last step that succeeded; `None` when there was no
    /// base value.
    pub output: Option<String>,
    /// First failing step, if evaluation stopped early.
    pub failure: Option<StepFailure>,
}

impl Evaluation {
    /// 1-based index of the failing step.
    pub fn failed_step(&self) -> Option<usize> {
        self.failure.as_ref().map(|f| f.position)
    }

    /// True when every step ran.
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// Applies `steps` in order to `base_value`.
///
/// Stops at the first step whose function refuses its input and reports it
/// by position, keeping the output of the last step that succeeded. Pure:
/// the same arguments always produce the same [`Evaluation`].
pub fn evaluate(base_value: Option<&str>, steps: &[TransformStep]) -> Evaluation {
    let Some(base) = base_value else {
        return Evaluation {
            output: None,
            failure: None,
        };
    };

    let mut current = base.to_string();
    for (idx, step) in steps.iter().enumerate() {
        match step.apply(&current) {
            Ok(next) => current = next,
            Err(source) => {
                return Evaluation {
                    output: Some(current),
                    failure: Some(StepFailure {
                        position: idx + 1,
                        transform: step.transform,
                        direction: step.direction,
                        source,
                    }),
                };
            }
        }
    }

    Evaluation {
        output: Some(current),
        failure: None,
    }
}
