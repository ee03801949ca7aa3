//! Recipe record encoding and the trust-boundary decoder.
//!
//! Records are JSON objects wrapped in a versioned envelope:
//!
//! ```json
//! {"format_version":1,"recipe":{"name":"n","base_value":"v",
//!   "steps":[{"transform":"base64","direction":"forward"}],"last_output":null}}
//! ```
//!
//! The schema is closed. Only strings, catalog slugs, directions and
//! sequences of those can be expressed, every field is required, and any
//! unknown or duplicated field fails the whole record. Stored records and
//! imported files go through the same [`decode`].

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::error::Category;

use crate::{
    error::{RejectionReason, UnknownTransform},
    recipe::{Recipe, TransformStep},
    types::{Direction, RecipeName, TransformId},
};

/// Version written into every [`encode`]d envelope.
pub const RECIPE_FORMAT_VERSION: u16 = 1;

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RecipeEnvelope {
    format_version: u16,
    recipe: RecipeRecord,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RecipeRecord {
    name: String,
    #[serde(deserialize_with = "required")]
    base_value: Option<String>,
    steps: Vec<StepRecord>,
    #[serde(deserialize_with = "required")]
    last_output: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct StepRecord {
    transform: String,
    direction: Direction,
}

// Nullable but never omitted.
fn required<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

/// Serializes the persisted fields of `recipe`. `last_output` is always
/// written as `null`.
pub fn encode(recipe: &Recipe) -> Result<Vec<u8>, serde_json::Error> {
    let envelope = RecipeEnvelope {
        format_version: RECIPE_FORMAT_VERSION,
        recipe: RecipeRecord {
            name: recipe.name.as_str().to_string(),
            base_value: recipe.base_value.clone(),
            steps: recipe
                .steps
                .iter()
                .map(|step| StepRecord {
                    transform: step.transform.slug().to_string(),
                    direction: step.direction,
                })
                .collect(),
            last_output: None,
        },
    };
    serde_json::to_vec(&envelope)
}

/// Decodes untrusted bytes into a recipe that must be named `claimed`.
///
/// Any failure rejects the whole record; nothing is partially applied.
/// A `last_output` present in the record is discarded.
pub fn decode(bytes: &[u8], claimed: &str) -> Result<Recipe, RejectionReason> {
    let envelope: RecipeEnvelope = serde_json::from_slice(bytes).map_err(classify)?;
    if envelope.format_version != RECIPE_FORMAT_VERSION {
        return Err(RejectionReason::UnsupportedVersion(envelope.format_version));
    }
    let record = envelope.recipe;

    let steps = record
        .steps
        .into_iter()
        .map(|step| {
            let transform = step.transform.parse::<TransformId>()?;
            Ok(TransformStep::new(transform, step.direction))
        })
        .collect::<Result<Vec<_>, UnknownTransform>>()?;

    if record.name != claimed {
        return Err(RejectionReason::IdentityMismatch {
            claimed: claimed.to_string(),
            embedded: record.name,
        });
    }
    let name = RecipeName::new(record.name)?;

    Ok(Recipe {
        name,
        base_value: record.base_value,
        steps,
        last_output: None,
    })
}

fn classify(err: serde_json::Error) -> RejectionReason {
    match err.classify() {
        Category::Data => RejectionReason::SchemaViolation(err.to_string()),
        Category::Syntax | Category::Eof | Category::Io => {
            RejectionReason::Malformed(err.to_string())
        }
    }
}
