use serde_json::Value;
use tracing::debug;

use super::bucketing::bucket;
use super::matcher::matches;
use super::types::{EvaluationContext, Rule, Variation};

/// First rule that applied, together with the variation it selects.
#[derive(Debug, Clone, Copy)]
pub struct RuleMatch<'a> {
    pub rule: &'a Rule,
    pub variation: &'a Variation,
}

impl Rule {
    /// Whether the rule's predicate holds for `context`. A missing user id or
    /// attribute is a plain non-match.
    pub fn applies_to(&self, context: &EvaluationContext) -> bool {
        match self {
            Rule::User(rule) => context
                .user_id
                .as_deref()
                .is_some_and(|user_id| rule.user_ids.contains(user_id)),
            Rule::Percentage(rule) => context
                .user_id
                .as_deref()
                .is_some_and(|user_id| bucket(user_id, &rule.id) <= rule.percentage.get()),
            Rule::Attribute(rule) => match context.attributes.get(&rule.attribute) {
                None | Some(Value::Null) => false,
                Some(user_value) => matches(user_value, rule.operator, &rule.value),
            },
        }
    }
}

/// Scans `rules` in stored order and returns the first one that applies.
///
/// A rule pointing at a variation that does not exist is skipped, and the scan
/// goes on to the next rule.
pub fn find_match<'a>(
    rules: &'a [Rule],
    variations: &'a [Variation],
    context: &EvaluationContext,
) -> Option<RuleMatch<'a>> {
    for rule in rules {
        if !rule.applies_to(context) {
            continue;
        }

        match variations.iter().find(|v| v.id == rule.variation_id()) {
            Some(variation) => return Some(RuleMatch { rule, variation }),
            None => debug!(
                rule_id = rule.id(),
                variation_id = rule.variation_id(),
                "rule references a missing variation, skipping"
            ),
        }
    }

    None
}
