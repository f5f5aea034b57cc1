use serde_json::json;

use super::{Environment, EnvironmentRepository, FlagRepository, RepositoryError};
use crate::evaluation::{
    AttributeRule, FlagDefinition, FlagValue, Operator, Percentage, PercentageRule, Rule, UserRule,
    Variation,
};

/// The demo data set: a `prod` environment plus `new-checkout` and `discount-percentage`.
pub fn load(
    flags: &dyn FlagRepository,
    environments: &dyn EnvironmentRepository,
) -> Result<(), RepositoryError> {
    environments.put_environment(Environment {
        id: "prod".to_string(),
        name: "Production".to_string(),
        description: None,
    })?;

    for flag in sample_flags() {
        flags.put_flag(flag)?;
    }
    Ok(())
}

const CHECKOUT_ROLLOUT: Percentage = match Percentage::new(10) {
    Ok(percentage) => percentage,
    Err(_) => panic!("rollout percentage out of range"),
};

pub fn sample_flags() -> Vec<FlagDefinition> {
    vec![new_checkout(), discount_percentage()]
}

fn new_checkout() -> FlagDefinition {
    FlagDefinition {
        id: "flag-1".to_string(),
        key: "new-checkout".to_string(),
        name: "New Checkout Experience".to_string(),
        description: Some("Enable the new checkout flow".to_string()),
        enabled: true,
        variations: vec![
            Variation::new("var-1", "On", FlagValue::Boolean(true)),
            Variation::new("var-2", "Off", FlagValue::Boolean(false)),
        ],
        default_variation_id: "var-2".to_string(),
        rules: vec![
            Rule::User(UserRule {
                id: "rule-1".to_string(),
                user_ids: ["user-123", "user-456"].into_iter().map(String::from).collect(),
                variation_id: "var-1".to_string(),
            }),
            Rule::Percentage(PercentageRule {
                id: "rule-2".to_string(),
                percentage: CHECKOUT_ROLLOUT,
                variation_id: "var-1".to_string(),
            }),
        ],
    }
}

fn discount_percentage() -> FlagDefinition {
    let tier_rule = |id: &str, tier: &str, variation_id: &str| {
        Rule::Attribute(AttributeRule {
            id: id.to_string(),
            attribute: "loyalty_tier".to_string(),
            operator: Operator::Equals,
            value: json!(tier),
            variation_id: variation_id.to_string(),
        })
    };

    FlagDefinition {
        id: "flag-2".to_string(),
        key: "discount-percentage".to_string(),
        name: "Discount Percentage".to_string(),
        description: Some("Configure the discount percentage for sales".to_string()),
        enabled: true,
        variations: vec![
            Variation::new("var-1", "No Discount", FlagValue::Number(0.into())),
            Variation::new("var-2", "Small Discount", FlagValue::Number(5.into())),
            Variation::new("var-3", "Medium Discount", FlagValue::Number(10.into())),
            Variation::new("var-4", "Large Discount", FlagValue::Number(20.into())),
        ],
        default_variation_id: "var-1".to_string(),
        rules: vec![
            tier_rule("rule-1", "gold", "var-4"),
            tier_rule("rule-2", "silver", "var-3"),
        ],
    }
}
