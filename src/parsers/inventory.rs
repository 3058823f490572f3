use std::sync::LazyLock;

use regex::Regex;

use crate::models::{COIN_ITEM_ID, COIN_ITEM_NAME, ItemRecord};

/// Location marker for storage shared by every character on an account
pub const SHARED_BANK_MARKER: &str = "SharedBank";

const COIN_LOCATION_SUFFIX: &str = "-Coin";
const EMPTY_ITEM_ID: &str = "0";
const COPPER_PER_PLAT: u64 = 1000;

/// `location \t name \t id \t count \t slots`
///
/// No field may contain a tab and the name may not span lines, so a match never
/// leaves its own row even though the whole text is scanned at once.
static RECORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([\w-]+)\t([^\t\n]+)\t([0-9]+)\t([0-9]+)\t([0-9]+)")
        .expect("Invalid inventory record regex")
});

/// Parse the text of an inventory export into item records
///
/// Records are produced lazily; calling this again re-scans the text from the
/// start. Rows that don't fit the five-field layout (including the header row)
/// are skipped, as are rows whose numbers don't fit in a `u64`.
///
/// # Examples
///
/// ```
/// use eq_inventory_search::parsers::parse_inventory;
///
/// let text = "Location\tName\tID\tCount\tSlots\nGeneral1\tBread Cakes\t13078\t20\t0\n";
/// let records: Vec<_> = parse_inventory(text).collect();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].name, "Bread Cakes");
/// assert_eq!(records[0].count, 20);
/// ```
pub fn parse_inventory(text: &str) -> impl Iterator<Item = ItemRecord> + '_ {
    RECORD_RE.captures_iter(text).filter_map(|caps| {
        Some(ItemRecord {
            location: caps[1].to_string(),
            name: caps[2].to_string(),
            item_id: caps[3].to_string(),
            count: caps[4].parse().ok()?,
            slots: caps[5].parse().ok()?,
        })
    })
}

/// Apply empty-slot and currency rules to a parsed record
///
/// Item ID `0` marks either an empty slot or a coin row. Empty slots and
/// unrecognized ID `0` rows yield `None`. Coin rows (`General-Coin`,
/// `Bank-Coin`, `SharedBank-Coin`) become a `Coins` record under
/// [`COIN_ITEM_ID`] with the copper count converted to whole platinum and the
/// `-Coin` suffix removed from the location. Less than one platinum yields
/// `None`.
pub fn normalize_record(record: ItemRecord) -> Option<ItemRecord> {
    if record.item_id != EMPTY_ITEM_ID {
        return Some(record);
    }
    if record.count == 0 {
        return None;
    }

    let location = record.location.strip_suffix(COIN_LOCATION_SUFFIX)?;
    let plat = record.count / COPPER_PER_PLAT;
    if plat == 0 {
        return None;
    }

    Some(ItemRecord {
        location: location.to_string(),
        name: COIN_ITEM_NAME.to_string(),
        item_id: COIN_ITEM_ID.to_string(),
        count: plat,
        slots: record.slots,
    })
}

/// Whether a location token refers to the shared bank
pub fn is_shared_bank(location: &str) -> bool {
    location.contains(SHARED_BANK_MARKER)
}
