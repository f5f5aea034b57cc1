use serde_json::Value;
use std::cmp::Ordering;
use tracing::debug;

use super::types::Operator;
use crate::error::AttributeTypeMismatch;

/// Whether a present attribute satisfies `operator` against the rule's value.
/// Operands the operator is not defined for never match.
pub fn matches(user_value: &Value, operator: Operator, rule_value: &Value) -> bool {
    match try_match(user_value, operator, rule_value) {
        Ok(matched) => matched,
        Err(mismatch) => {
            debug!(%mismatch, "attribute predicate does not apply");
            false
        }
    }
}

pub fn try_match(
    user_value: &Value,
    operator: Operator,
    rule_value: &Value,
) -> Result<bool, AttributeTypeMismatch> {
    let mismatch = || AttributeTypeMismatch {
        operator,
        user_type: json_type(user_value),
        rule_type: json_type(rule_value),
    };

    match operator {
        Operator::Equals => Ok(values_equal(user_value, rule_value)),
        Operator::Contains => match (user_value, rule_value) {
            (Value::String(haystack), Value::String(needle)) => Ok(haystack.contains(needle.as_str())),
            (Value::Array(items), needle) => Ok(items.iter().any(|item| values_equal(item, needle))),
            (Value::Object(map), Value::String(key)) => Ok(map.contains_key(key)),
            _ => Err(mismatch()),
        },
        Operator::GreaterThan => compare(user_value, rule_value)
            .map(|ord| ord == Ordering::Greater)
            .ok_or_else(mismatch),
        Operator::LessThan => compare(user_value, rule_value)
            .map(|ord| ord == Ordering::Less)
            .ok_or_else(mismatch),
    }
}

// Numbers compare by value at any depth, so 5 and 5.0 are equal and so are
// [5] and [5.0].
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}

fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_equals_is_type_aware() {
        assert!(matches(&json!("gold"), Operator::Equals, &json!("gold")));
        assert!(!matches(&json!("gold"), Operator::Equals, &json!("silver")));
        assert!(matches(&json!(5), Operator::Equals, &json!(5.0)));
        assert!(!matches(&json!("5"), Operator::Equals, &json!(5)));
        assert!(!matches(&json!(true), Operator::Equals, &json!(1)));
        assert!(!matches(&json!(true), Operator::Equals, &json!("true")));
    }

    #[test]
    fn test_equals_compares_nested_numbers() {
        assert!(matches(&json!([5]), Operator::Equals, &json!([5.0])));
        assert!(matches(&json!({"seats": 10, "tags": [1]}), Operator::Equals, &json!({"tags": [1.0], "seats": 10.0})));
        assert!(!matches(&json!([5]), Operator::Equals, &json!([5, 5])));
        assert!(!matches(&json!({"seats": 10}), Operator::Equals, &json!({"users": 10})));
        assert!(matches(&json!([[1, 2], [3]]), Operator::Contains, &json!([3.0])));
    }

    #[test]
    fn test_contains() {
        assert!(matches(&json!("john@company.com"), Operator::Contains, &json!("@company.com")));
        assert!(!matches(&json!("john@other.com"), Operator::Contains, &json!("@company.com")));
        assert!(matches(&json!(["beta", "staff"]), Operator::Contains, &json!("staff")));
        assert!(matches(&json!([1, 2, 3]), Operator::Contains, &json!(2.0)));
        assert!(matches(&json!({"beta": true}), Operator::Contains, &json!("beta")));
    }

    #[test]
    fn test_contains_on_scalar_is_a_mismatch() {
        let err = try_match(&json!(42), Operator::Contains, &json!(4)).unwrap_err();
        assert_eq!(err.user_type, "number");
        assert_eq!(err.rule_type, "number");
        assert!(!matches(&json!(42), Operator::Contains, &json!(4)));
        assert!(!matches(&json!("abc"), Operator::Contains, &json!(1)));
    }

    #[test]
    fn test_ordering_comparisons() {
        assert!(matches(&json!(10), Operator::GreaterThan, &json!(5)));
        assert!(!matches(&json!(5), Operator::GreaterThan, &json!(5)));
        assert!(matches(&json!(2.5), Operator::LessThan, &json!(3)));
        assert!(matches(&json!("b"), Operator::GreaterThan, &json!("a")));
        assert!(matches(&json!("apple"), Operator::LessThan, &json!("banana")));
    }

    #[test]
    fn test_incomparable_types_do_not_match() {
        assert!(try_match(&json!("10"), Operator::GreaterThan, &json!(5)).is_err());
        assert!(!matches(&json!("10"), Operator::GreaterThan, &json!(5)));
        assert!(!matches(&json!(true), Operator::LessThan, &json!(false)));
        assert!(!matches(&json!([1]), Operator::LessThan, &json!([2])));
    }
}
