//! Test utilities and module declarations for storage tests.

use recordkit_core::Record;
use tempfile::TempDir;

use crate::SqliteStore;

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_store() -> (SqliteStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let store = SqliteStore::new(&db_path).unwrap();
    (store, temp_dir)
}

pub fn create_test_todos() -> Vec<Record> {
    vec![
        Record::builder("1").field("text", "Buy milk").field("completed", false).build(),
        Record::builder("2").field("text", "Walk dog").field("completed", true).build(),
        Record::builder("3").field("text", "Ünïcode ✓").field("completed", false).build(),
    ]
}

/// Amounts whose shortest decimal form needs all 17 significant digits.
pub fn create_test_amounts() -> Vec<Record> {
    let mut amounts = vec![0.095_900_000_000_000_01, 1.071_566_039_146_582_6e-75, f64::MAX, f64::MIN_POSITIVE];
    amounts.extend((0..2000_i32).map(|i| f64::from(i) / 100.0 * 1.37));
    amounts
        .into_iter()
        .enumerate()
        .map(|(i, amount)| {
            Record::builder(i.to_string()).field("description", "Line item").field("amount", amount).build()
        })
        .collect()
}
