/// Edge case integration tests
///
/// These tests cover filesystem quirks, malformed exports, and other unusual scenarios
mod common;

use std::fs;

use eq_inventory_search::{LoadOutcome, LoadedInventory, Scope, rebuild_index, search};
use common::{HEADER, InventoryDirBuilder, RowBuilder, account, settings_for};

fn loaded(outcome: LoadOutcome) -> LoadedInventory {
    match outcome {
        LoadOutcome::Loaded(inventory) => inventory,
        LoadOutcome::NoInventory { reason, .. } => panic!("Expected inventory, got: {}", reason),
    }
}

#[test]
fn test_edge_case_header_only_file() {
    let dir = InventoryDirBuilder::new().with_raw("Alice", HEADER).build();

    let inventory = loaded(rebuild_index(&settings_for(&[dir.path()])));

    assert!(inventory.index.is_empty());
    // The character is still known even with nothing to show
    assert_eq!(inventory.characters, vec!["All", "Alice"]);
}

#[test]
fn test_edge_case_empty_file() {
    let dir = InventoryDirBuilder::new().with_raw("Alice", "").build();

    let inventory = loaded(rebuild_index(&settings_for(&[dir.path()])));

    assert!(inventory.index.is_empty());
    assert!(inventory.warnings.is_empty());
}

#[test]
fn test_edge_case_crlf_line_endings() {
    let content = format!("{}\r\nGeneral1\tCloth Cap\t1001\t3\t0\r\n", HEADER);
    let dir = InventoryDirBuilder::new().with_raw("Alice", &content).build();

    let inventory = loaded(rebuild_index(&settings_for(&[dir.path()])));

    assert_eq!(inventory.index.get("1001").unwrap().total_count, 3);
}

#[test]
fn test_edge_case_no_trailing_newline() {
    let content = format!("{}\nGeneral1\tCloth Cap\t1001\t3\t0", HEADER);
    let dir = InventoryDirBuilder::new().with_raw("Alice", &content).build();

    let inventory = loaded(rebuild_index(&settings_for(&[dir.path()])));

    assert_eq!(inventory.index.get("1001").unwrap().total_count, 3);
}

#[test]
fn test_edge_case_malformed_rows_are_skipped() {
    let content = format!(
        "{}\nGeneral1\tCloth Cap\t1001\t3\t0\nGeneral2\tBroken Row\n\nGeneral3\tBad Count\t1002\tmany\t0\n",
        HEADER
    );
    let dir = InventoryDirBuilder::new().with_raw("Alice", &content).build();

    let inventory = loaded(rebuild_index(&settings_for(&[dir.path()])));

    assert_eq!(inventory.index.len(), 1);
    assert_eq!(inventory.sources[0].records, 1);
}

#[test]
fn test_edge_case_empty_slots_are_dropped() {
    let dir = InventoryDirBuilder::new()
        .with_inventory(
            "Alice",
            &[
                RowBuilder::new("General1", "Empty", "0", 0),
                RowBuilder::new("General2", "Cloth Cap", "1001", 1),
            ],
        )
        .build();

    let inventory = loaded(rebuild_index(&settings_for(&[dir.path()])));

    assert_eq!(inventory.index.len(), 1);
    assert!(search("empty", &inventory.index, &Scope::All, false).is_no_results());
}

#[test]
fn test_edge_case_less_than_one_platinum() {
    let dir = InventoryDirBuilder::new()
        .with_inventory("Alice", &[RowBuilder::coins("General", 999)])
        .build();

    let inventory = loaded(rebuild_index(&settings_for(&[dir.path()])));

    assert!(inventory.index.is_empty());
}

#[test]
fn test_edge_case_coins_in_several_locations() {
    let dir = InventoryDirBuilder::new()
        .with_inventory(
            "Alice",
            &[RowBuilder::coins("General", 5000), RowBuilder::coins("Bank", 2500)],
        )
        .build();

    let inventory = loaded(rebuild_index(&settings_for(&[dir.path()])));

    let results = search("coins", &inventory.index, &Scope::All, false);
    assert_eq!(results.rows[0].count, Some(7));
    let locations: Vec<&str> =
        results.rows[0].children[0].children.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(locations, vec!["General", "Bank"]);
}

#[test]
fn test_edge_case_unicode_item_names() {
    let dir = InventoryDirBuilder::new()
        .with_inventory("Alice", &[RowBuilder::new("General1", "Élixir of Ñight", "2001", 1)])
        .build();

    let inventory = loaded(rebuild_index(&settings_for(&[dir.path()])));

    assert_eq!(search("élixir", &inventory.index, &Scope::All, false).item_count(), 1);
}

#[test]
fn test_edge_case_invalid_utf8_bytes() {
    let dir = InventoryDirBuilder::new().build();
    let mut bytes = format!("{}\nGeneral1\tCloth Cap\t1001\t1\t0\n", HEADER).into_bytes();
    bytes.extend_from_slice(b"General2\tBad \xff Name\t1002\t1\t0\n");
    fs::write(dir.path().join("Alice-Inventory.txt"), bytes).unwrap();

    let inventory = loaded(rebuild_index(&settings_for(&[dir.path()])));

    assert_eq!(inventory.index.len(), 2);
    assert!(inventory.warnings.is_empty());
}

#[test]
fn test_edge_case_non_inventory_files_ignored() {
    let dir = InventoryDirBuilder::new()
        .with_inventory("Alice", &[RowBuilder::new("General1", "Cloth Cap", "1001", 1)])
        .with_other_file("eqclient.ini", "[Defaults]")
        .with_other_file("Alice-Spellbook.txt", "1\tMinor Healing\n")
        .with_other_file("-Inventory.txt", HEADER)
        .build();

    let inventory = loaded(rebuild_index(&settings_for(&[dir.path()])));

    assert_eq!(inventory.characters, vec!["All", "Alice"]);
}

#[test]
fn test_edge_case_subdirectories_not_scanned() {
    let dir = InventoryDirBuilder::new()
        .with_inventory("Alice", &[RowBuilder::new("General1", "Cloth Cap", "1001", 1)])
        .build();
    let nested = dir.path().join("backup");
    fs::create_dir(&nested).unwrap();
    fs::write(nested.join("Bob-Inventory.txt"), format!("{}\nGeneral1\tCloth Cap\t1001\t5\t0\n", HEADER))
        .unwrap();

    let inventory = loaded(rebuild_index(&settings_for(&[dir.path()])));

    assert_eq!(inventory.index.get("1001").unwrap().total_count, 1);
}

#[test]
fn test_edge_case_missing_directory_is_a_warning() {
    let dir = InventoryDirBuilder::new()
        .with_inventory("Alice", &[RowBuilder::new("General1", "Cloth Cap", "1001", 1)])
        .build();
    let missing = dir.path().join("does-not-exist");

    let inventory = loaded(rebuild_index(&settings_for(&[missing.as_path(), dir.path()])));

    assert_eq!(inventory.warnings.len(), 1);
    assert_eq!(inventory.warnings[0].path, missing);
    assert_eq!(inventory.index.len(), 1);
}

#[test]
fn test_edge_case_same_directory_listed_twice() {
    let dir = InventoryDirBuilder::new()
        .with_inventory("Alice", &[RowBuilder::new("General1", "Cloth Cap", "1001", 1)])
        .build();

    let inventory = loaded(rebuild_index(&settings_for(&[dir.path(), dir.path()])));

    assert_eq!(inventory.index.get("1001").unwrap().total_count, 1);
}

#[test]
fn test_edge_case_same_character_in_two_directories() {
    let first = InventoryDirBuilder::new()
        .with_inventory("Alice", &[RowBuilder::new("General1", "Cloth Cap", "1001", 1)])
        .build();
    let second = InventoryDirBuilder::new()
        .with_inventory("Alice", &[RowBuilder::new("General1", "Cloth Cap", "1001", 2)])
        .build();

    let inventory = loaded(rebuild_index(&settings_for(&[first.path(), second.path()])));

    // Both exports are aggregated under the one label
    assert_eq!(inventory.characters, vec!["All", "Alice"]);
    assert_eq!(inventory.index.get("1001").unwrap().total_count, 3);
}

#[test]
fn test_edge_case_shared_bank_only_account_member() {
    let dir = InventoryDirBuilder::new()
        .with_inventory(
            "Alice",
            &[
                RowBuilder::new("SharedBank1", "Gem", "2001", 1),
                RowBuilder::new("SharedBank2-Slot4", "Gem", "2001", 2),
            ],
        )
        .build();
    let mut settings = settings_for(&[dir.path()]);
    settings.accounts = vec![account("Main", &["Alice"])];

    let inventory = loaded(rebuild_index(&settings));

    let gem = inventory.index.get("2001").unwrap();
    assert_eq!(gem.total_count, 3);
    assert_eq!(gem.characters.len(), 1);
    assert_eq!(gem.characters[0].label, "Main (Account)");
    assert_eq!(inventory.index.holder_total("Alice"), 0);
}

#[test]
fn test_edge_case_regex_metacharacters_in_query() {
    let dir = InventoryDirBuilder::new()
        .with_inventory("Alice", &[RowBuilder::new("General1", "Cloth Cap", "1001", 1)])
        .build();
    let inventory = loaded(rebuild_index(&settings_for(&[dir.path()])));

    // An unbalanced pattern is not an error; it just matches nothing by name
    let results = search("cap(", &inventory.index, &Scope::All, false);
    assert!(results.is_no_results());
}

#[test]
fn test_edge_case_apostrophe_variants() {
    let dir = InventoryDirBuilder::new()
        .with_inventory("Alice", &[RowBuilder::new("General1", "Innoruuk`s Curse", "3001", 1)])
        .build();
    let inventory = loaded(rebuild_index(&settings_for(&[dir.path()])));

    let results = search("innoruuk's", &inventory.index, &Scope::All, false);
    assert_eq!(results.item_count(), 1);
}
