use thiserror::Error;

use crate::evaluation::Operator;

/// Fatal outcome of an evaluation call. Everything else degrades to a fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("no variations available for flag '{flag_key}'")]
    NoVariationsAvailable { flag_key: String },
}

/// An attribute predicate whose operator is undefined for the operand types.
/// Never crosses the engine boundary; the rule is treated as a non-match.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{operator}' is not defined between {user_type} and {rule_type}")]
pub struct AttributeTypeMismatch {
    pub operator: Operator,
    pub user_type: &'static str,
    pub rule_type: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("percentage must be between 0 and 100, got {0}")]
pub struct InvalidPercentage(pub u8);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown reason code '{0}'")]
pub struct InvalidReason(pub String);
