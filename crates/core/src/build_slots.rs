//! Minimum part requirements for a saved build.

use crate::compatibility::PartSlots;

/// Slots every build must fill before it can be saved.
pub const REQUIRED_SLOTS: [&str; 5] = ["cpu", "motherboard", "ram", "psu", "case"];

/// Required slots that are absent or null, in [`REQUIRED_SLOTS`] order.
pub fn missing_required_slots(slots: &PartSlots) -> Vec<String> {
    REQUIRED_SLOTS
        .iter()
        .filter(|slot| !matches!(slots.get(**slot), Some(Some(_))))
        .map(|slot| slot.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(entries: &[(&str, Option<i64>)]) -> PartSlots {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn empty_selection_misses_everything() {
        assert_eq!(missing_required_slots(&PartSlots::new()), REQUIRED_SLOTS.to_vec());
    }

    #[test]
    fn null_entries_count_as_missing() {
        let s = slots(&[
            ("cpu", Some(1)),
            ("motherboard", Some(2)),
            ("ram", None),
            ("psu", Some(4)),
            ("case", Some(5)),
            ("gpu", None),
        ]);
        assert_eq!(missing_required_slots(&s), vec!["ram".to_string()]);
    }

    #[test]
    fn complete_selection_has_nothing_missing() {
        let s = slots(&[
            ("cpu", Some(1)),
            ("motherboard", Some(2)),
            ("ram", Some(3)),
            ("psu", Some(4)),
            ("case", Some(5)),
        ]);
        assert!(missing_required_slots(&s).is_empty());
    }
}
