//! History persistence through the file-backed store

use proptest::prelude::*;
use rusty_curs::currency::CurrencyCode;
use rusty_curs::history::{HistoryEntry, HistoryManager, HISTORY_KEY, MAX_HISTORY};
use rusty_curs::storage::{FileStore, KeyValueStore, MemoryStore};

fn entry(amount: &str, from: &str, to: &str) -> HistoryEntry {
    HistoryEntry::new(
        amount,
        &CurrencyCode::new(from).unwrap(),
        &CurrencyCode::new(to).unwrap(),
        "0.00",
    )
}

#[test]
fn test_history_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let mut manager = HistoryManager::open(FileStore::new(dir.path()));
    manager.append(entry("100", "eur", "usd"));
    manager.append(entry("50", "usd", "mdl"));
    drop(manager);

    let reopened = HistoryManager::open(FileStore::new(dir.path()));
    assert_eq!(reopened.len(), 2);
    assert_eq!(reopened.entries()[0].amount, "50");
    assert_eq!(reopened.entries()[1].from, "EUR");
}

#[test]
fn test_eleven_distinct_entries_keep_ten_most_recent() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = HistoryManager::open(FileStore::new(dir.path()));
    for i in 1..=11 {
        assert!(manager.append(entry(&i.to_string(), "eur", "mdl")));
    }

    let reopened = HistoryManager::open(FileStore::new(dir.path()));
    let amounts: Vec<&str> = reopened.entries().iter().map(|e| e.amount.as_str()).collect();
    assert_eq!(amounts, vec!["11", "10", "9", "8", "7", "6", "5", "4", "3", "2"]);
}

#[test]
fn test_clear_then_load_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = HistoryManager::open(FileStore::new(dir.path()));
    manager.append(entry("1", "eur", "mdl"));
    assert!(dir.path().join(format!("{}.json", HISTORY_KEY)).exists());

    manager.clear();
    assert!(!dir.path().join(format!("{}.json", HISTORY_KEY)).exists());

    let store = FileStore::new(dir.path());
    assert_eq!(store.get(HISTORY_KEY).unwrap(), None);
    assert!(HistoryManager::open(store).is_empty());
}

#[test]
fn test_remove_persists() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = HistoryManager::open(FileStore::new(dir.path()));
    manager.append(entry("1", "eur", "mdl"));
    manager.append(entry("2", "eur", "mdl"));
    manager.append(entry("3", "eur", "mdl"));

    manager.remove(1).unwrap();
    assert!(manager.remove(2).is_err());

    let reopened = HistoryManager::open(FileStore::new(dir.path()));
    let amounts: Vec<&str> = reopened.entries().iter().map(|e| e.amount.as_str()).collect();
    assert_eq!(amounts, vec!["3", "1"]);
}

#[test]
fn test_stored_format_is_json_array() {
    let mut store = MemoryStore::new();
    store
        .set(
            HISTORY_KEY,
            r#"[{"amount":"100","from":"EUR","to":"USD","result":"109.55","timestamp":"02.02.2026, 10:00:00"}]"#,
        )
        .unwrap();

    let manager = HistoryManager::open(store);
    assert_eq!(manager.len(), 1);
    assert_eq!(manager.entries()[0].result, "109.55");
}

fn arb_entry() -> impl Strategy<Value = (String, String, String)> {
    (
        "[1-9][0-9]{0,4}",
        prop_oneof![Just("eur"), Just("usd"), Just("mdl"), Just("ron")],
        prop_oneof![Just("eur"), Just("usd"), Just("mdl"), Just("ron")],
    )
        .prop_map(|(a, f, t)| (a, f.to_string(), t.to_string()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn history_never_exceeds_cap_and_has_no_adjacent_duplicates(
        entries in proptest::collection::vec(arb_entry(), 0..40),
    ) {
        let mut manager = HistoryManager::new(MemoryStore::new());
        for (amount, from, to) in &entries {
            let before = manager.len();
            let added = manager.append(entry(amount, from, to));
            if !added {
                prop_assert_eq!(manager.len(), before);
            }
            prop_assert!(manager.len() <= MAX_HISTORY);
        }

        for pair in manager.entries().windows(2) {
            prop_assert!(!pair[0].is_same_conversion(&pair[1]));
        }
    }
}
