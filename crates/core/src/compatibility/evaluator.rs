//! Rule evaluator. Pure logic, no database access.

use super::handlers::check_rule;
use super::message::format_message;
use super::rules::{CompatibilityIssue, CompatibilityRule, Condition, RuleConfig};
use super::selection::{spec_field, SelectedParts};

/// Evaluate every active rule against the selected parts.
///
/// Rules are visited in the order given (callers sort by `rule_number`);
/// issues come back in that same order. Inactive rules, unrecognized
/// configs, unmet guard conditions, and unresolvable parts or fields all
/// contribute nothing.
pub fn evaluate_rules(
    rules: &[CompatibilityRule],
    parts: &SelectedParts,
) -> Vec<CompatibilityIssue> {
    rules
        .iter()
        .filter(|rule| rule.is_active)
        .filter_map(|rule| evaluate_single_rule(rule, parts))
        .collect()
}

fn evaluate_single_rule(
    rule: &CompatibilityRule,
    parts: &SelectedParts,
) -> Option<CompatibilityIssue> {
    let RuleConfig::Recognized { condition, check } = &rule.config else {
        return None;
    };

    if let Some(condition) = condition {
        if !condition_holds(condition, parts) {
            return None;
        }
    }

    let violation = check_rule(check, parts)?;
    let message = violation.message.unwrap_or_else(|| {
        format_message(
            &rule.message_template,
            Some(&violation.a),
            Some(&violation.b),
        )
    });

    Some(CompatibilityIssue {
        rule: rule.rule_number,
        severity: rule.severity,
        message,
    })
}

fn condition_holds(condition: &Condition, parts: &SelectedParts) -> bool {
    let Some(part) = parts.get(&condition.part) else {
        return false;
    };
    spec_field(Some(part), &condition.field)
        .is_some_and(|value| value.loosely_equals(&condition.equals))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compatibility::rules::Severity;
    use crate::compatibility::selection::SelectedPart;
    use serde_json::{json, Value};

    fn make_rule(rule_number: i32, severity: Severity, config: Value, template: &str) -> CompatibilityRule {
        CompatibilityRule {
            rule_number,
            severity,
            config: RuleConfig::parse(&config),
            message_template: template.to_string(),
            is_active: true,
        }
    }

    fn socket_rule(rule_number: i32) -> CompatibilityRule {
        make_rule(
            rule_number,
            Severity::Error,
            json!({
                "type": "field_match",
                "part_a": "cpu", "field_a": "socket",
                "part_b": "motherboard", "field_b": "socket"
            }),
            "CPU socket {a} does not match motherboard socket {b}",
        )
    }

    fn ram_rule(rule_number: i32) -> CompatibilityRule {
        make_rule(
            rule_number,
            Severity::Warning,
            json!({
                "type": "array_contains",
                "part_a": "ram", "field_a": "type",
                "part_b": "motherboard", "field_b": "supported_ram_types"
            }),
            "{a} memory is not supported (supports {b})",
        )
    }

    fn parts(entries: &[(&str, Value)]) -> SelectedParts {
        entries
            .iter()
            .enumerate()
            .map(|(i, (slot, specs))| {
                (
                    slot.to_string(),
                    SelectedPart {
                        id: i as i64 + 1,
                        category_slug: slot.to_string(),
                        specifications: specs.clone(),
                    },
                )
            })
            .collect()
    }

    fn mismatched_build() -> SelectedParts {
        parts(&[
            ("cpu", json!({"socket": "AM4"})),
            ("motherboard", json!({"socket": "LGA1700", "supported_ram_types": ["DDR4"]})),
            ("ram", json!({"type": "DDR5"})),
        ])
    }

    #[test]
    fn renders_template_with_violation_values() {
        let issues = evaluate_rules(&[socket_rule(1)], &mismatched_build());
        assert_eq!(
            issues,
            vec![CompatibilityIssue {
                rule: 1,
                severity: Severity::Error,
                message: "CPU socket AM4 does not match motherboard socket LGA1700".into(),
            }]
        );
    }

    #[test]
    fn compatible_selection_yields_no_issues() {
        let p = parts(&[
            ("cpu", json!({"socket": "AM4"})),
            ("motherboard", json!({"socket": "AM4", "supported_ram_types": ["DDR4"]})),
            ("ram", json!({"type": "DDR4"})),
        ]);
        assert!(evaluate_rules(&[socket_rule(1), ram_rule(2)], &p).is_empty());
    }

    #[test]
    fn issues_follow_rule_order_and_accumulate_severities() {
        let issues = evaluate_rules(&[ram_rule(7), socket_rule(3)], &mismatched_build());
        let numbers: Vec<i32> = issues.iter().map(|i| i.rule).collect();
        assert_eq!(numbers, vec![7, 3]);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(issues[0].message, "DDR5 memory is not supported (supports DDR4)");
        assert_eq!(issues[1].severity, Severity::Error);
    }

    #[test]
    fn evaluation_is_deterministic() {
        let rules = [socket_rule(1), ram_rule(2)];
        let p = mismatched_build();
        assert_eq!(evaluate_rules(&rules, &p), evaluate_rules(&rules, &p));
    }

    #[test]
    fn inactive_rules_never_trigger() {
        let mut rule = socket_rule(1);
        rule.is_active = false;
        assert!(evaluate_rules(&[rule], &mismatched_build()).is_empty());
    }

    #[test]
    fn unknown_rule_type_is_skipped() {
        let bogus = make_rule(1, Severity::Error, json!({"type": "bogus"}), "{a}{b}");
        let issues = evaluate_rules(&[bogus, socket_rule(2)], &mismatched_build());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule, 2);
    }

    #[test]
    fn encoded_config_is_parsed() {
        let encoded = make_rule(
            4,
            Severity::Error,
            json!(r#"{"type":"field_match","part_a":"cpu","field_a":"socket","part_b":"motherboard","field_b":"socket"}"#),
            "{a}/{b}",
        );
        let issues = evaluate_rules(&[encoded], &mismatched_build());
        assert_eq!(issues[0].message, "AM4/LGA1700");
    }

    fn guarded_rule(equals: &str) -> CompatibilityRule {
        make_rule(
            5,
            Severity::Warning,
            json!({
                "type": "field_lte",
                "condition": {"part": "case", "field": "form_factor", "equals": equals},
                "part_a": "gpu", "field_a": "length_mm",
                "part_b": "case", "field_b": "max_gpu_length_mm"
            }),
            "GPU is {a}mm but case fits {b}mm",
        )
    }

    #[test]
    fn guard_condition_met_allows_rule() {
        let p = parts(&[
            ("case", json!({"form_factor": "ITX", "max_gpu_length_mm": 280})),
            ("gpu", json!({"length_mm": 310})),
        ]);
        let issues = evaluate_rules(&[guarded_rule("ITX")], &p);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "GPU is 310mm but case fits 280mm");
    }

    #[test]
    fn guard_condition_unmet_skips_rule() {
        let p = parts(&[
            ("case", json!({"form_factor": "ATX", "max_gpu_length_mm": 280})),
            ("gpu", json!({"length_mm": 310})),
        ]);
        assert!(evaluate_rules(&[guarded_rule("ITX")], &p).is_empty());
    }

    #[test]
    fn guard_on_absent_part_skips_rule() {
        let rule = make_rule(
            6,
            Severity::Error,
            json!({
                "type": "field_match",
                "condition": {"part": "cooler", "field": "type", "equals": "air"},
                "part_a": "cpu", "field_a": "socket",
                "part_b": "motherboard", "field_b": "socket"
            }),
            "{a} {b}",
        );
        assert!(evaluate_rules(&[rule], &mismatched_build()).is_empty());
    }

    #[test]
    fn pair_mismatch_message_overrides_template() {
        let rule = make_rule(
            8,
            Severity::Error,
            json!({
                "type": "pair_mismatch",
                "part_a": "motherboard", "field_a": "form_factor",
                "part_b": "case", "field_b": "form_factor",
                "pairs": [{"a": "ATX", "b": "Mini-ITX", "msg": "case too small"}]
            }),
            "template {a} {b} should not be used",
        );
        let p = parts(&[
            ("case", json!({"form_factor": "Mini-ITX"})),
            ("motherboard", json!({"form_factor": "ATX"})),
        ]);
        let issues = evaluate_rules(&[rule], &p);
        assert_eq!(issues[0].message, "case too small");
    }

    #[test]
    fn pair_without_message_renders_template() {
        let rule = make_rule(
            8,
            Severity::Error,
            json!({
                "type": "pair_mismatch",
                "part_a": "a", "field_a": "x",
                "part_b": "b", "field_b": "y",
                "pairs": [{"a": "ATX", "b": "ITX"}]
            }),
            "{a}/{b}",
        );
        let p = parts(&[("a", json!({"x": "ATX"})), ("b", json!({"y": "ITX"}))]);
        let issues = evaluate_rules(&[rule], &p);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "ATX/ITX");
    }

    #[test]
    fn removing_non_matching_rules_keeps_remaining_issues() {
        let p = mismatched_build();
        let mut inactive = ram_rule(2);
        inactive.is_active = false;
        let bogus = make_rule(9, Severity::Error, json!({"type": "bogus"}), "");

        let with_noise = evaluate_rules(&[bogus, socket_rule(1), inactive], &p);
        let without_noise = evaluate_rules(&[socket_rule(1)], &p);
        assert_eq!(with_noise, without_noise);
    }
}
