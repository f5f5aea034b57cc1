use tracing::debug;

use super::types::{FlagDefinition, Variation};
use crate::error::EvaluationError;

/// The flag's declared default variation, or its first variation when the
/// declared id does not exist. Fails only when the flag has no variations.
pub fn select_default(flag: &FlagDefinition) -> Result<&Variation, EvaluationError> {
    if let Some(variation) = flag.variation(&flag.default_variation_id) {
        return Ok(variation);
    }

    match flag.variations.first() {
        Some(first) => {
            debug!(
                flag_key = %flag.key,
                default_variation_id = %flag.default_variation_id,
                fallback = %first.id,
                "default variation missing, using first variation"
            );
            Ok(first)
        }
        None => Err(EvaluationError::NoVariationsAvailable {
            flag_key: flag.key.clone(),
        }),
    }
}
