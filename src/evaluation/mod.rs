pub mod bucketing;
pub mod matcher;
pub mod rules;
pub mod types;
pub mod variation;

pub use bucketing::bucket;
pub use rules::{find_match, RuleMatch};
pub use types::{
    AttributeRule, EvaluationContext, EvaluationResult, FlagDefinition, FlagValue, Operator,
    Percentage, PercentageRule, Reason, Rule, UserRule, Variation,
};
pub use variation::select_default;

use crate::error::EvaluationError;

/// Evaluate a flag snapshot for a caller.
///
/// A disabled flag answers with its default variation. Otherwise the first rule
/// that applies overrides the default; when none applies the default stands.
/// Pure: no I/O, no shared state, safe to call from any number of threads.
pub fn evaluate(
    flag: &FlagDefinition,
    context: &EvaluationContext,
) -> Result<EvaluationResult, EvaluationError> {
    let default = select_default(flag)?;

    if !flag.enabled {
        return Ok(EvaluationResult::new(flag, default, Reason::FlagDisabled));
    }

    let result = match find_match(&flag.rules, &flag.variations, context) {
        Some(RuleMatch { rule, variation }) => {
            EvaluationResult::new(flag, variation, Reason::RuleMatch(rule.id().to_string()))
        }
        None => EvaluationResult::new(flag, default, Reason::DefaultRule),
    };

    Ok(result)
}
