use serde::{Deserialize, Serialize};

/// Item ID used for normalized currency rows
pub const COIN_ITEM_ID: &str = "in Plat";
/// Display name used for normalized currency rows
pub const COIN_ITEM_NAME: &str = "Coins";

/// One matched row of an inventory export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub location: String,
    pub name: String,
    pub item_id: String,
    pub count: u64,
    pub slots: u64,
}

/// Quantity held in a single slot location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationCount {
    pub location: String,
    pub count: u64,
}

/// Quantity of one item held by a character or an account
///
/// `count` is always the sum of `locations`, saturating at `u64::MAX` like every
/// other quantity here. Locations keep the order in which they were first
/// accumulated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterEntry {
    pub label: String,
    pub count: u64,
    pub locations: Vec<LocationCount>,
}

impl CharacterEntry {
    fn new(label: &str) -> Self {
        Self { label: label.to_string(), count: 0, locations: Vec::new() }
    }

    fn add(&mut self, location: &str, count: u64) {
        self.count = self.count.saturating_add(count);
        match self.locations.iter_mut().find(|l| l.location == location) {
            Some(existing) => existing.count = existing.count.saturating_add(count),
            None => self.locations.push(LocationCount { location: location.to_string(), count }),
        }
    }

    /// Remove up to `count` from `location`, returning how much was actually removed
    fn retract(&mut self, location: &str, count: u64) -> u64 {
        let Some(pos) = self.locations.iter().position(|l| l.location == location) else {
            return 0;
        };
        let removed = count.min(self.locations[pos].count);
        self.locations[pos].count -= removed;
        if self.locations[pos].count == 0 {
            self.locations.remove(pos);
        }
        self.count = self.count.saturating_sub(removed);
        removed
    }
}

/// Aggregated totals for one item ID across every holder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemEntry {
    pub item_id: String,
    pub name: String,
    pub total_count: u64,
    pub characters: Vec<CharacterEntry>,
}

impl ItemEntry {
    pub fn new(item_id: &str, name: &str) -> Self {
        Self {
            item_id: item_id.to_string(),
            name: name.to_string(),
            total_count: 0,
            characters: Vec::new(),
        }
    }

    /// Accumulate `count` for `holder` at `location`
    pub fn add(&mut self, holder: &str, location: &str, count: u64) {
        self.total_count = self.total_count.saturating_add(count);
        let entry = match self.characters.iter().position(|c| c.label == holder) {
            Some(pos) => &mut self.characters[pos],
            None => {
                self.characters.push(CharacterEntry::new(holder));
                let last = self.characters.len() - 1;
                &mut self.characters[last]
            }
        };
        entry.add(location, count);
    }

    /// Undo a previous [`ItemEntry::add`]
    ///
    /// Empty locations and holders are dropped so that a retracted holder
    /// disappears from the item entirely.
    pub fn retract(&mut self, holder: &str, location: &str, count: u64) {
        let Some(pos) = self.characters.iter().position(|c| c.label == holder) else {
            return;
        };
        let removed = self.characters[pos].retract(location, count);
        self.total_count = self.total_count.saturating_sub(removed);
        if self.characters[pos].count == 0 {
            self.characters.remove(pos);
        }
    }

    pub fn holder(&self, label: &str) -> Option<&CharacterEntry> {
        self.characters.iter().find(|c| c.label == label)
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

/// Aggregated inventory, ordered by natural item ID order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryIndex {
    pub items: Vec<ItemEntry>,
}

impl InventoryIndex {
    pub fn get(&self, item_id: &str) -> Option<&ItemEntry> {
        self.items.iter().find(|item| item.item_id == item_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemEntry> {
        self.items.iter()
    }

    /// Total quantity of every item held by `label`
    pub fn holder_total(&self, label: &str) -> u64 {
        self.items
            .iter()
            .filter_map(|item| item.holder(label))
            .fold(0u64, |total, c| total.saturating_add(c.count))
    }
}
