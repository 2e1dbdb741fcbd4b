//! Compatibility rule engine.
//!
//! Evaluates administrator-authored rules against a build's selected parts
//! and reports errors and warnings. Everything here is pure: callers load
//! parts and rules, the engine returns issues.

pub mod evaluator;
pub mod handlers;
pub mod message;
pub mod rules;
pub mod selection;
pub mod value;

pub use evaluator::evaluate_rules;
pub use rules::{CompatibilityIssue, CompatibilityRule, RuleConfig, Severity};
pub use selection::{PartSlots, SelectedPart, SelectedParts};
pub use value::SpecValue;
