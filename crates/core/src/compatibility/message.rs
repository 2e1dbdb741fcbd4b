//! Issue message rendering.

use super::value::SpecValue;

/// Substitute `{a}` and `{b}` in `template`.
///
/// Every `{a}` is replaced first, then every `{b}`. Absent values render as
/// the empty string. No other placeholders are recognized.
pub fn format_message(template: &str, a: Option<&SpecValue>, b: Option<&SpecValue>) -> String {
    let a = a.map(ToString::to_string).unwrap_or_default();
    let b = b.map(ToString::to_string).unwrap_or_default();
    template.replace("{a}", &a).replace("{b}", &b)
}
