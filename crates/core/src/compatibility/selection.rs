//! Part selections and the specification field accessor.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use super::value::SpecValue;
use crate::types::DbId;

/// A catalog part as seen by the evaluator: identity plus its raw
/// specification document.
///
/// `specifications` may be an object or a JSON-encoded string holding an
/// object; the accessor handles both.
#[derive(Debug, Clone)]
pub struct SelectedPart {
    pub id: DbId,
    pub category_slug: String,
    pub specifications: Value,
}

/// Slot name (category slug) to the single part chosen for it.
pub type SelectedParts = HashMap<String, SelectedPart>;

/// Slot name to the requested part id, as submitted by a client.
///
/// `None` entries are allowed in requests and never take part in evaluation.
pub type PartSlots = BTreeMap<String, Option<DbId>>;

/// Resolve `field` from a part's specification document.
///
/// Returns `None` when the part is absent, has no document, the document is
/// malformed, or the field is missing.
pub fn spec_field(part: Option<&SelectedPart>, field: &str) -> Option<SpecValue> {
    let part = part?;
    let document: Cow<'_, Value> = match &part.specifications {
        Value::Null => return None,
        Value::String(encoded) => Cow::Owned(serde_json::from_str(encoded).ok()?),
        other => Cow::Borrowed(other),
    };
    document.as_object()?.get(field).and_then(SpecValue::from_json)
}

/// Distinct non-null part ids referenced by a slot map, in slot order.
pub fn selected_part_ids(slots: &PartSlots) -> Vec<DbId> {
    let mut ids: Vec<DbId> = Vec::new();
    for id in slots.values().flatten() {
        if !ids.contains(id) {
            ids.push(*id);
        }
    }
    ids
}

/// Build the evaluator's selection from requested slots and the parts that
/// were found in the catalog.
///
/// Slots whose id is null or unknown are left out, so they read as missing
/// keys rather than null entries.
pub fn assemble_selection(slots: &PartSlots, catalog: &[SelectedPart]) -> SelectedParts {
    slots
        .iter()
        .filter_map(|(slot, id)| {
            let id = (*id)?;
            let part = catalog.iter().find(|p| p.id == id)?;
            Some((slot.clone(), part.clone()))
        })
        .collect()
}
