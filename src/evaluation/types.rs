use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::error::{InvalidPercentage, InvalidReason};

/// Flag snapshot handed to the engine for a single evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagDefinition {
    #[serde(default)]
    pub id: String,
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    pub variations: Vec<Variation>,
    pub default_variation_id: String,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

fn enabled_by_default() -> bool {
    true
}

impl FlagDefinition {
    pub fn variation(&self, id: &str) -> Option<&Variation> {
        self.variations.iter().find(|v| v.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variation {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub value: FlagValue,
}

impl Variation {
    pub fn new(id: impl Into<String>, name: impl Into<String>, value: FlagValue) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            value,
        }
    }
}

/// Value of a variation. The type tag is serialized next to the value
/// (`{"type": "number", "value": 20}`) so it survives a JSON round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum FlagValue {
    Boolean(bool),
    Number(serde_json::Number),
    String(String),
    Json(serde_json::Value),
}

/// Targeting rule. Rules are evaluated in the order the flag stores them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Rule {
    User(UserRule),
    Percentage(PercentageRule),
    Attribute(AttributeRule),
}

impl Rule {
    pub fn id(&self) -> &str {
        match self {
            Self::User(r) => &r.id,
            Self::Percentage(r) => &r.id,
            Self::Attribute(r) => &r.id,
        }
    }

    pub fn variation_id(&self) -> &str {
        match self {
            Self::User(r) => &r.variation_id,
            Self::Percentage(r) => &r.variation_id,
            Self::Attribute(r) => &r.variation_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRule {
    pub id: String,
    pub user_ids: BTreeSet<String>,
    pub variation_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentageRule {
    pub id: String,
    pub percentage: Percentage,
    pub variation_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeRule {
    pub id: String,
    pub attribute: String,
    pub operator: Operator,
    pub value: serde_json::Value,
    pub variation_id: String,
}

/// Rollout share in whole percent, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Percentage(u8);

impl Percentage {
    /// Const counterpart of `TryFrom<u8>`.
    pub const fn new(value: u8) -> Result<Self, InvalidPercentage> {
        if value > 100 {
            return Err(InvalidPercentage(value));
        }
        Ok(Self(value))
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Percentage {
    type Error = InvalidPercentage;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percentage> for u8 {
    fn from(p: Percentage) -> Self {
        p.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Equals,
    Contains,
    GreaterThan,
    LessThan,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::Contains => "contains",
            Self::GreaterThan => "greater_than",
            Self::LessThan => "less_than",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller identity and attributes for one evaluation call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationContext {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub attributes: HashMap<String, serde_json::Value>,
}

impl EvaluationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

/// Why a variation was chosen. Serialized as `FLAG_DISABLED`, `DEFAULT_RULE`
/// or `RULE_MATCH:<rule id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Reason {
    FlagDisabled,
    DefaultRule,
    RuleMatch(String),
}

const FLAG_DISABLED: &str = "FLAG_DISABLED";
const DEFAULT_RULE: &str = "DEFAULT_RULE";
const RULE_MATCH_PREFIX: &str = "RULE_MATCH:";

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FlagDisabled => f.write_str(FLAG_DISABLED),
            Self::DefaultRule => f.write_str(DEFAULT_RULE),
            Self::RuleMatch(rule_id) => write!(f, "{RULE_MATCH_PREFIX}{rule_id}"),
        }
    }
}

impl FromStr for Reason {
    type Err = InvalidReason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            FLAG_DISABLED => Ok(Self::FlagDisabled),
            DEFAULT_RULE => Ok(Self::DefaultRule),
            _ => s
                .strip_prefix(RULE_MATCH_PREFIX)
                .map(|rule_id| Self::RuleMatch(rule_id.to_string()))
                .ok_or_else(|| InvalidReason(s.to_string())),
        }
    }
}

impl From<Reason> for String {
    fn from(reason: Reason) -> Self {
        reason.to_string()
    }
}

impl TryFrom<String> for Reason {
    type Error = InvalidReason;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub flag_key: String,
    pub variation_id: String,
    pub value: FlagValue,
    pub reason: Reason,
}

impl EvaluationResult {
    pub(crate) fn new(flag: &FlagDefinition, variation: &Variation, reason: Reason) -> Self {
        Self {
            flag_key: flag.key.clone(),
            variation_id: variation.id.clone(),
            value: variation.value.clone(),
            reason,
        }
    }
}
