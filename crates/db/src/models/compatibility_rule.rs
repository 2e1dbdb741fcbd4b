//! Compatibility rule model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use buildboard_core::compatibility::{CompatibilityRule, RuleConfig, Severity};
use buildboard_core::types::{DbId, Timestamp};

/// A row from the `compatibility_rules` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CompatibilityRuleRow {
    pub id: DbId,
    pub rule_number: i32,
    pub name: String,
    pub description: Option<String>,
    pub severity: String,
    pub rule_config: serde_json::Value,
    pub message_template: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CompatibilityRuleRow {
    /// Convert the stored row into the engine's rule representation.
    ///
    /// The severity column is constrained to `error`/`warning`; anything
    /// else is treated as blocking.
    pub fn to_engine_rule(&self) -> CompatibilityRule {
        CompatibilityRule {
            rule_number: self.rule_number,
            severity: Severity::parse(&self.severity).unwrap_or(Severity::Error),
            config: RuleConfig::parse(&self.rule_config),
            message_template: self.message_template.clone(),
            is_active: self.is_active,
        }
    }
}

/// DTO for creating a compatibility rule.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCompatibilityRule {
    pub rule_number: i32,
    pub name: String,
    pub description: Option<String>,
    pub severity: String,
    pub rule_config: serde_json::Value,
    pub message_template: String,
    pub is_active: Option<bool>,
}

/// DTO for updating a compatibility rule. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCompatibilityRule {
    pub is_active: Option<bool>,
    pub severity: Option<String>,
    pub rule_config: Option<serde_json::Value>,
    pub message_template: Option<String>,
}

impl UpdateCompatibilityRule {
    /// `true` when the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.is_active.is_none()
            && self.severity.is_none()
            && self.rule_config.is_none()
            && self.message_template.is_none()
    }
}
