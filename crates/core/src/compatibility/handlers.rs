//! One predicate per rule type.
//!
//! Each handler resolves its inputs through [`spec_field`] and returns
//! `None` whenever a referenced part or field cannot be resolved: incomplete
//! data produces no issue rather than a false positive.

use super::rules::{FieldPair, ForbiddenPair, RuleCheck, SumField};
use super::selection::{spec_field, SelectedParts};
use super::value::SpecValue;

/// Sentinel `field_a` for `field_lte`: the left side counts as one device.
pub const M2_COUNT_SENTINEL: &str = "_m2_count";

/// The two representative values of a violation, plus an optional literal
/// message that overrides the rule's template.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub a: SpecValue,
    pub b: SpecValue,
    pub message: Option<String>,
}

impl Violation {
    fn new(a: SpecValue, b: SpecValue) -> Self {
        Self { a, b, message: None }
    }
}

/// Run the handler for `check` against the selection.
pub fn check_rule(check: &RuleCheck, parts: &SelectedParts) -> Option<Violation> {
    match check {
        RuleCheck::FieldMatch(fields) => field_match(fields, parts),
        RuleCheck::FieldLte(fields) => field_lte(fields, parts),
        RuleCheck::ArrayContains(fields) => array_contains(fields, parts),
        RuleCheck::ArrayContainsFormatted { fields, format } => {
            array_contains_formatted(fields, format, parts)
        }
        RuleCheck::SumGte {
            target_part,
            target_field,
            sum_fields,
            multiplier,
        } => sum_gte(target_part, target_field, sum_fields, *multiplier, parts),
        RuleCheck::PairMismatch { fields, pairs } => pair_mismatch(fields, pairs, parts),
    }
}

/// Resolve both sides of a pair. `None` if either part is not selected.
fn resolve_pair(
    fields: &FieldPair,
    parts: &SelectedParts,
) -> Option<(Option<SpecValue>, Option<SpecValue>)> {
    let part_a = parts.get(&fields.part_a)?;
    let part_b = parts.get(&fields.part_b)?;
    Some((
        spec_field(Some(part_a), &fields.field_a),
        spec_field(Some(part_b), &fields.field_b),
    ))
}

fn field_match(fields: &FieldPair, parts: &SelectedParts) -> Option<Violation> {
    let (a, b) = resolve_pair(fields, parts)?;
    let (a, b) = (a?, b?);
    if a.loosely_equals(&b) {
        None
    } else {
        Some(Violation::new(a, b))
    }
}

fn field_lte(fields: &FieldPair, parts: &SelectedParts) -> Option<Violation> {
    let (a, b) = resolve_pair(fields, parts)?;
    let a = if fields.field_a == M2_COUNT_SENTINEL {
        SpecValue::Number(1.0)
    } else {
        a.filter(|v| !v.is_null())?
    };
    let b = b.filter(|v| !v.is_null())?;

    if a.as_number()? > b.as_number()? {
        Some(Violation::new(a, b))
    } else {
        None
    }
}

fn array_contains(fields: &FieldPair, parts: &SelectedParts) -> Option<Violation> {
    let (a, b) = resolve_pair(fields, parts)?;
    let a = a?;
    let list = b?;
    let items = list.as_list()?;

    if SpecValue::list_contains(items, &a) {
        None
    } else {
        Some(Violation::new(a, SpecValue::Text(SpecValue::join(items, ", "))))
    }
}

fn array_contains_formatted(
    fields: &FieldPair,
    format: &str,
    parts: &SelectedParts,
) -> Option<Violation> {
    let (a, b) = resolve_pair(fields, parts)?;
    let raw = a.filter(|v| !v.is_null())?;
    let list = b?;
    let items = list.as_list()?;

    let formatted = SpecValue::Text(format.replacen("{value}", &raw.to_string(), 1));
    if SpecValue::list_contains(items, &formatted) {
        None
    } else {
        Some(Violation::new(
            formatted,
            SpecValue::Text(SpecValue::join(items, ", ")),
        ))
    }
}

fn sum_gte(
    target_part: &str,
    target_field: &str,
    sum_fields: &[SumField],
    multiplier: Option<f64>,
    parts: &SelectedParts,
) -> Option<Violation> {
    let target = spec_field(Some(parts.get(target_part)?), target_field)?;

    let mut sum = 0.0;
    let mut resolved_any = false;
    for field in sum_fields {
        let value = spec_field(parts.get(&field.part), &field.field);
        if let Some(n) = value.as_ref().and_then(SpecValue::as_number) {
            sum += n;
            resolved_any = true;
        }
    }
    if !resolved_any || sum == 0.0 {
        return None;
    }

    let multiplier = multiplier
        .filter(|m| *m != 0.0 && m.is_finite())
        .unwrap_or(1.0);
    let recommended = (sum * multiplier).ceil();

    if target.as_number()? < recommended {
        Some(Violation::new(target, SpecValue::Number(recommended)))
    } else {
        None
    }
}

fn pair_mismatch(
    fields: &FieldPair,
    pairs: &[ForbiddenPair],
    parts: &SelectedParts,
) -> Option<Violation> {
    let (a, b) = resolve_pair(fields, parts)?;
    let (a, b) = (a?, b?);

    let hit = pairs
        .iter()
        .find(|pair| a.loosely_equals(&pair.a) && b.loosely_equals(&pair.b))?;
    Some(Violation {
        a,
        b,
        message: hit.msg.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compatibility::selection::SelectedPart;
    use serde_json::{json, Value};

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

    fn pair(part_a: &str, field_a: &str, part_b: &str, field_b: &str) -> FieldPair {
        FieldPair {
            part_a: part_a.into(),
            field_a: field_a.into(),
            part_b: part_b.into(),
            field_b: field_b.into(),
        }
    }

    #[test]
    fn field_match_equal_sockets_pass() {
        let p = parts(&[
            ("cpu", json!({"socket": "AM4"})),
            ("motherboard", json!({"socket": "AM4"})),
        ]);
        let check = RuleCheck::FieldMatch(pair("cpu", "socket", "motherboard", "socket"));
        assert_eq!(check_rule(&check, &p), None);
    }

    #[test]
    fn field_match_reports_both_values() {
        let p = parts(&[
            ("cpu", json!({"socket": "AM4"})),
            ("motherboard", json!({"socket": "LGA1700"})),
        ]);
        let check = RuleCheck::FieldMatch(pair("cpu", "socket", "motherboard", "socket"));
        let v = check_rule(&check, &p).expect("sockets differ");
        assert_eq!(v.a, "AM4".into());
        assert_eq!(v.b, "LGA1700".into());
        assert_eq!(v.message, None);
    }

    #[test]
    fn field_match_missing_field_is_inapplicable() {
        let p = parts(&[("cpu", json!({"socket": "AM4"})), ("motherboard", json!({}))]);
        let check = RuleCheck::FieldMatch(pair("cpu", "socket", "motherboard", "socket"));
        assert_eq!(check_rule(&check, &p), None);
    }

    #[test]
    fn field_lte_load_above_supply() {
        let p = parts(&[
            ("gpu", json!({"required_psu_watts": 500})),
            ("psu", json!({"wattage": 450})),
        ]);
        let check = RuleCheck::FieldLte(pair("gpu", "required_psu_watts", "psu", "wattage"));
        let v = check_rule(&check, &p).expect("load exceeds supply");
        assert_eq!(v.a, SpecValue::Number(500.0));
        assert_eq!(v.b, SpecValue::Number(450.0));
    }

    #[test]
    fn field_lte_within_supply() {
        let p = parts(&[
            ("gpu", json!({"required_psu_watts": 500})),
            ("psu", json!({"wattage": 650})),
        ]);
        let check = RuleCheck::FieldLte(pair("gpu", "required_psu_watts", "psu", "wattage"));
        assert_eq!(check_rule(&check, &p), None);
    }

    #[test]
    fn field_lte_coerces_numeric_strings() {
        let p = parts(&[
            ("gpu", json!({"length_mm": "320"})),
            ("case", json!({"max_gpu_length_mm": 300})),
        ]);
        let check = RuleCheck::FieldLte(pair("gpu", "length_mm", "case", "max_gpu_length_mm"));
        assert!(check_rule(&check, &p).is_some());
    }

    #[test]
    fn field_lte_non_numeric_is_inapplicable() {
        let p = parts(&[
            ("gpu", json!({"length_mm": "long"})),
            ("case", json!({"max_gpu_length_mm": 300})),
        ]);
        let check = RuleCheck::FieldLte(pair("gpu", "length_mm", "case", "max_gpu_length_mm"));
        assert_eq!(check_rule(&check, &p), None);
    }

    #[test]
    fn field_lte_m2_sentinel_counts_one() {
        let check = RuleCheck::FieldLte(pair("storage", M2_COUNT_SENTINEL, "motherboard", "m2_slots"));

        let none_free = parts(&[("storage", json!({})), ("motherboard", json!({"m2_slots": 0}))]);
        let v = check_rule(&check, &none_free).expect("no M.2 slots");
        assert_eq!(v.a, SpecValue::Number(1.0));

        let one_free = parts(&[("storage", json!({"_m2_count": 4})), ("motherboard", json!({"m2_slots": 1}))]);
        assert_eq!(check_rule(&check, &one_free), None);
    }

    #[test]
    fn field_lte_null_is_inapplicable() {
        let p = parts(&[("gpu", json!({"length_mm": null})), ("case", json!({"max_gpu_length_mm": 1}))]);
        let check = RuleCheck::FieldLte(pair("gpu", "length_mm", "case", "max_gpu_length_mm"));
        assert_eq!(check_rule(&check, &p), None);
    }

    #[test]
    fn array_contains_reports_joined_list() {
        let p = parts(&[
            ("ram", json!({"type": "DDR5"})),
            ("motherboard", json!({"supported_ram_types": ["DDR4"]})),
        ]);
        let check = RuleCheck::ArrayContains(pair("ram", "type", "motherboard", "supported_ram_types"));
        let v = check_rule(&check, &p).expect("DDR5 unsupported");
        assert_eq!(v.a, "DDR5".into());
        assert_eq!(v.b, "DDR4".into());

        let p = parts(&[
            ("ram", json!({"type": "DDR4"})),
            ("motherboard", json!({"supported_ram_types": ["DDR4", "DDR5"]})),
        ]);
        assert_eq!(check_rule(&check, &p), None);
    }

    #[test]
    fn array_contains_joins_with_comma_space() {
        let p = parts(&[
            ("ram", json!({"type": "DDR3"})),
            ("motherboard", json!({"supported_ram_types": ["DDR4", "DDR5"]})),
        ]);
        let check = RuleCheck::ArrayContains(pair("ram", "type", "motherboard", "supported_ram_types"));
        assert_eq!(check_rule(&check, &p).map(|v| v.b), Some("DDR4, DDR5".into()));
    }

    #[test]
    fn array_contains_requires_an_array() {
        let p = parts(&[
            ("ram", json!({"type": "DDR5"})),
            ("motherboard", json!({"supported_ram_types": "DDR4"})),
        ]);
        let check = RuleCheck::ArrayContains(pair("ram", "type", "motherboard", "supported_ram_types"));
        assert_eq!(check_rule(&check, &p), None);
    }

    #[test]
    fn array_contains_formatted_checks_rendered_value() {
        let check = RuleCheck::ArrayContainsFormatted {
            fields: pair("cpu", "socket", "cooler", "compatible_sockets"),
            format: "Socket {value}".into(),
        };
        let p = parts(&[
            ("cpu", json!({"socket": "AM5"})),
            ("cooler", json!({"compatible_sockets": ["Socket AM4", "Socket LGA1700"]})),
        ]);
        let v = check_rule(&check, &p).expect("AM5 not listed");
        assert_eq!(v.a, "Socket AM5".into());
        assert_eq!(v.b, "Socket AM4, Socket LGA1700".into());

        let p = parts(&[
            ("cpu", json!({"socket": "AM4"})),
            ("cooler", json!({"compatible_sockets": ["Socket AM4"]})),
        ]);
        assert_eq!(check_rule(&check, &p), None);
    }

    #[test]
    fn array_contains_formatted_renders_numbers_plainly() {
        let check = RuleCheck::ArrayContainsFormatted {
            fields: pair("case", "fan_size", "cooler", "radiator_sizes"),
            format: "{value}mm".into(),
        };
        let p = parts(&[
            ("case", json!({"fan_size": 240})),
            ("cooler", json!({"radiator_sizes": ["240mm", "360mm"]})),
        ]);
        assert_eq!(check_rule(&check, &p), None);
    }

    fn ram_power_check(multiplier: Option<f64>) -> RuleCheck {
        RuleCheck::SumGte {
            target_part: "psu".into(),
            target_field: "wattage".into(),
            sum_fields: vec![
                SumField { part: "ram".into(), field: "watts".into() },
                SumField { part: "ram_2".into(), field: "watts".into() },
            ],
            multiplier,
        }
    }

    #[test]
    fn sum_gte_reports_target_and_recommended() {
        let p = parts(&[
            ("ram", json!({"watts": 5})),
            ("ram_2", json!({"watts": 5})),
            ("psu", json!({"wattage": 80})),
        ]);
        let v = check_rule(&ram_power_check(Some(10.0)), &p).expect("80 < 100");
        assert_eq!(v.a, SpecValue::Number(80.0));
        assert_eq!(v.b, SpecValue::Number(100.0));
    }

    #[test]
    fn sum_gte_boundary_is_not_a_violation() {
        let p = parts(&[
            ("ram", json!({"watts": 5})),
            ("ram_2", json!({"watts": 5})),
            ("psu", json!({"wattage": 100})),
        ]);
        assert_eq!(check_rule(&ram_power_check(Some(10.0)), &p), None);
    }

    #[test]
    fn sum_gte_rounds_recommended_up() {
        let p = parts(&[("ram", json!({"watts": 3})), ("psu", json!({"wattage": 4}))]);
        let v = check_rule(&ram_power_check(Some(1.5)), &p).expect("4 < ceil(4.5)");
        assert_eq!(v.b, SpecValue::Number(5.0));
    }

    #[test]
    fn sum_gte_skips_unresolved_fields() {
        let p = parts(&[("ram", json!({"watts": 5})), ("psu", json!({"wattage": 4}))]);
        let v = check_rule(&ram_power_check(None), &p).expect("4 < 5");
        assert_eq!(v.b, SpecValue::Number(5.0));
    }

    #[test]
    fn sum_gte_inapplicable_without_contributors_or_zero_sum() {
        let nothing = parts(&[("psu", json!({"wattage": 10}))]);
        assert_eq!(check_rule(&ram_power_check(None), &nothing), None);

        let zero = parts(&[("ram", json!({"watts": 0})), ("psu", json!({"wattage": -1}))]);
        assert_eq!(check_rule(&ram_power_check(None), &zero), None);
    }

    #[test]
    fn sum_gte_zero_multiplier_defaults_to_one() {
        let p = parts(&[("ram", json!({"watts": 50})), ("psu", json!({"wattage": 40}))]);
        let v = check_rule(&ram_power_check(Some(0.0)), &p).expect("40 < 50");
        assert_eq!(v.b, SpecValue::Number(50.0));
    }

    #[test]
    fn sum_gte_requires_target() {
        let p = parts(&[("ram", json!({"watts": 5}))]);
        assert_eq!(check_rule(&ram_power_check(None), &p), None);
    }

    #[test]
    fn pair_mismatch_uses_pair_message() {
        let check = RuleCheck::PairMismatch {
            fields: pair("motherboard", "form_factor", "case", "form_factor"),
            pairs: vec![ForbiddenPair {
                a: "ATX".into(),
                b: "Mini-ITX".into(),
                msg: Some("case too small".into()),
            }],
        };
        let p = parts(&[
            ("case", json!({"form_factor": "Mini-ITX"})),
            ("motherboard", json!({"form_factor": "ATX"})),
        ]);
        let v = check_rule(&check, &p).expect("forbidden combination");
        assert_eq!(v.message.as_deref(), Some("case too small"));

        let p = parts(&[
            ("case", json!({"form_factor": "ATX"})),
            ("motherboard", json!({"form_factor": "ATX"})),
        ]);
        assert_eq!(check_rule(&check, &p), None);
    }

    #[test]
    fn missing_part_is_inapplicable_for_every_pair_rule() {
        let p = parts(&[("cpu", json!({"socket": "AM4"}))]);
        let fields = pair("cpu", "socket", "motherboard", "socket");
        for check in [
            RuleCheck::FieldMatch(fields.clone()),
            RuleCheck::FieldLte(fields.clone()),
            RuleCheck::ArrayContains(fields.clone()),
            RuleCheck::PairMismatch { fields, pairs: Vec::new() },
        ] {
            assert_eq!(check_rule(&check, &p), None);
        }
    }
}
