//! Display formatting for slot location tokens
//!
//! A raw token such as `General2-Slot10` is split into a base location (`General`),
//! a base slot (`2`), an optional sub-location (`Slot`) and a sub-slot (`10`), then
//! rendered in fixed-width columns so that rows line up in a monospace listing:
//!
//! ```text
//! General     2, Slot 10
//! Bank       14
//! SharedBank  1, Slot  3
//! Primary
//! ```

use std::sync::LazyLock;

use regex::Regex;

/// Column width of the base location label
pub const BASE_LABEL_WIDTH: usize = 10;
/// Column width of slot numbers
pub const SLOT_WIDTH: usize = 2;

static LOCATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z]+)([0-9]*)(?:-([A-Za-z]+)([0-9]*))?$")
        .expect("Invalid location regex")
});

/// Render a location token as a column-aligned label
///
/// Tokens that don't follow the `Letters[Digits][-Letters[Digits]]` layout are
/// returned unchanged. The same token always produces the same label.
///
/// # Examples
///
/// ```
/// use eq_inventory_search::utils::format_location;
///
/// assert_eq!(format_location("General2-Slot10"), "General     2, Slot 10");
/// assert_eq!(format_location("Bank14"), "Bank       14");
/// assert_eq!(format_location("Primary"), "Primary");
/// ```
pub fn format_location(token: &str) -> String {
    let Some(caps) = LOCATION_RE.captures(token) else {
        return token.to_string();
    };

    let base = &caps[1];
    let slot = &caps[2];
    let sub = caps.get(3).map(|m| m.as_str());
    let sub_slot = caps.get(4).map_or("", |m| m.as_str());

    if slot.is_empty() && sub.is_none() {
        return base.to_string();
    }

    let mut label = format!("{base:<BASE_LABEL_WIDTH$} {slot:>SLOT_WIDTH$}");
    if let Some(sub) = sub {
        label.push_str(", ");
        label.push_str(sub);
        if !sub_slot.is_empty() {
            label.push_str(&format!(" {sub_slot:>SLOT_WIDTH$}"));
        }
    }
    label
}
