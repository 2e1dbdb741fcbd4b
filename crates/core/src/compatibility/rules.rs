//! Compatibility rule, configuration, and issue types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::value::SpecValue;

/// Whether a triggered rule blocks a build or is only surfaced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }

    /// Parse a stored severity name. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "error" => Some(Self::Error),
            "warning" => Some(Self::Warning),
            _ => None,
        }
    }
}

/// Names of the recognized rule types, in documentation order.
pub const RULE_TYPES: [&str; 6] = [
    "field_match",
    "field_lte",
    "array_contains",
    "array_contains_formatted",
    "sum_gte",
    "pair_mismatch",
];

/// Two part/field references compared against each other.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldPair {
    pub part_a: String,
    pub field_a: String,
    pub part_b: String,
    pub field_b: String,
}

/// One `{part, field}` contributor to a `sum_gte` total.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SumField {
    pub part: String,
    pub field: String,
}

/// A forbidden value combination for `pair_mismatch`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForbiddenPair {
    pub a: SpecValue,
    pub b: SpecValue,
    /// Literal issue text; the rule's template is used when absent.
    #[serde(default)]
    pub msg: Option<String>,
}

/// The check a rule performs, one variant per recognized `type`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleCheck {
    FieldMatch(FieldPair),
    FieldLte(FieldPair),
    ArrayContains(FieldPair),
    ArrayContainsFormatted {
        #[serde(flatten)]
        fields: FieldPair,
        format: String,
    },
    SumGte {
        target_part: String,
        target_field: String,
        sum_fields: Vec<SumField>,
        #[serde(default)]
        multiplier: Option<f64>,
    },
    PairMismatch {
        #[serde(flatten)]
        fields: FieldPair,
        pairs: Vec<ForbiddenPair>,
    },
}

/// Precondition limiting when a rule applies.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Condition {
    pub part: String,
    pub field: String,
    pub equals: SpecValue,
}

/// A parsed `rule_config` document.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleConfig {
    /// A config with a recognized type and well-formed fields.
    Recognized {
        condition: Option<Condition>,
        check: RuleCheck,
    },
    /// Unknown type, missing fields, or undecodable text. Never triggers.
    Unrecognized,
}

impl RuleConfig {
    /// Parse a stored config, which may be a JSON object or a JSON-encoded
    /// string. Never fails: anything that does not parse is
    /// [`RuleConfig::Unrecognized`].
    pub fn parse(raw: &Value) -> Self {
        let decoded;
        let value = match raw {
            Value::String(encoded) => match serde_json::from_str::<Value>(encoded) {
                Ok(v) => {
                    decoded = v;
                    &decoded
                }
                Err(_) => return Self::Unrecognized,
            },
            other => other,
        };

        let condition = match value.get("condition") {
            None | Some(Value::Null) => None,
            Some(c) => match Condition::deserialize(c) {
                Ok(c) => Some(c),
                Err(_) => return Self::Unrecognized,
            },
        };

        match RuleCheck::deserialize(value) {
            Ok(check) => Self::Recognized { condition, check },
            Err(_) => Self::Unrecognized,
        }
    }

    pub fn is_recognized(&self) -> bool {
        matches!(self, Self::Recognized { .. })
    }
}

/// A compatibility rule ready for evaluation.
#[derive(Debug, Clone)]
pub struct CompatibilityRule {
    pub rule_number: i32,
    pub severity: Severity,
    pub config: RuleConfig,
    pub message_template: String,
    pub is_active: bool,
}

/// One triggered rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityIssue {
    pub rule: i32,
    pub severity: Severity,
    pub message: String,
}

impl CompatibilityIssue {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// True when any issue has `error` severity.
pub fn has_blocking_issues(issues: &[CompatibilityIssue]) -> bool {
    issues.iter().any(CompatibilityIssue::is_error)
}

/// The `warning`-severity subset, in order.
pub fn warnings_only(issues: &[CompatibilityIssue]) -> Vec<CompatibilityIssue> {
    issues.iter().filter(|i| !i.is_error()).cloned().collect()
}
