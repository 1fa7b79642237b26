#![expect(clippy::unwrap_used, reason = "test code")]

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use recordkit_core::{App, CoreError, FieldValue, Fields, IdStrategy, Record, Theme};
use recordkit_search::{CategoryFilter, ViewQuery};
use recordkit_storage::{KeyValueStore, LoadSource, MemoryStore, RecordStore, SqliteStore, StorageError};

use crate::{RecordService, ServiceError, ThemeService};

/// Memory store whose writes can be switched off.
#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    broken: AtomicBool,
}

impl FlakyStore {
    fn break_writes(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(StorageError::Io(io::Error::other("disk full")));
        }
        self.inner.put(key, value)
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        self.inner.remove(key)
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        self.inner.keys()
    }
}

fn open_todos(store: &MemoryStore) -> RecordService {
    RecordService::open_app(Arc::new(store.clone()), App::Todo)
        .unwrap()
        .with_id_strategy(IdStrategy::Counter)
}

fn ids(records: &[Record]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

#[test]
fn todo_session_end_to_end() {
    let store = MemoryStore::new();
    let mut todos = open_todos(&store);

    // Given the seeded list
    assert_eq!(todos.source(), LoadSource::Seeded);
    assert_eq!(ids(todos.records()), vec!["1"]);
    assert_eq!(todos.records()[0].text("text"), Some("Buy milk"));

    // When a task is added and completed
    let walk = todos.add_from_input([("text", "Walk dog")]).unwrap();
    assert_eq!(walk.id, "2");
    assert_eq!(walk.flag("completed"), Some(false));
    let walk = todos.toggle("2", "completed").unwrap();
    assert_eq!(walk.flag("completed"), Some(true));

    // Then the search only finds it
    let found = todos.view(&ViewQuery::new().text("DOG")).unwrap();
    assert_eq!(ids(&found), vec!["2"]);

    // And deleting the seed leaves it alone, across a reopen
    let removed = todos.remove("1").unwrap();
    assert_eq!(removed.text("text"), Some("Buy milk"));
    let reopened = open_todos(&store);
    assert_eq!(reopened.source(), LoadSource::Stored);
    assert_eq!(reopened.records(), todos.records());
    assert_eq!(ids(reopened.records()), vec!["2"]);
}

#[test]
fn failed_write_leaves_list_unchanged() {
    let store = Arc::new(FlakyStore::default());
    let mut todos = RecordService::open_app(store.clone(), App::Todo).unwrap();
    let before = todos.records().to_vec();

    store.break_writes();

    let err = todos.add_from_input([("text", "Walk dog")]).unwrap_err();
    assert!(matches!(err, ServiceError::Storage(StorageError::Io(_))));
    assert!(todos.toggle("1", "completed").is_err());
    assert!(todos.remove("1").is_err());

    assert_eq!(todos.records(), before.as_slice());
    assert_eq!(store.load_records("todos").unwrap(), None);
}

#[test]
fn unknown_ids_are_not_found() {
    let store = MemoryStore::new();
    let mut todos = open_todos(&store);

    let mut fields = Fields::new();
    fields.insert("text".to_owned(), FieldValue::from("x"));

    assert!(todos.update("404", fields).unwrap_err().is_not_found());
    assert!(todos.toggle("404", "completed").unwrap_err().is_not_found());
    assert!(todos.remove("404").unwrap_err().is_not_found());
    assert!(todos.edit_from_input("404", [("text", "y")]).unwrap_err().is_not_found());
    assert_eq!(store.keys().unwrap(), Vec::<String>::new());
}

#[test]
fn toggle_rejects_non_bool_fields() {
    let store = MemoryStore::new();
    let mut todos = open_todos(&store);

    let err = todos.toggle("1", "text").unwrap_err();
    assert!(matches!(err, ServiceError::NotABoolField { ref field } if field == "text"));
    assert!(err.is_invalid_input());
}

#[test]
fn malformed_number_is_rejected_not_coerced() {
    let store = MemoryStore::new();
    let mut expenses = RecordService::open_app(Arc::new(store.clone()), App::Expenses).unwrap();

    let err = expenses
        .add_from_input([("description", "Taxi"), ("amount", "twelve"), ("date", "2024-05-03")])
        .unwrap_err();

    assert!(matches!(err, ServiceError::Core(ref e) if e.is_validation()));
    assert_eq!(expenses.records().len(), 2);
    assert_eq!(store.get("expenses").unwrap(), None);
}

#[test]
fn missing_required_field_is_rejected() {
    let store = MemoryStore::new();
    let mut expenses = RecordService::open_app(Arc::new(store), App::Expenses).unwrap();

    let err = expenses.add_from_input([("amount", "3")]).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Core(CoreError::Validation { ref field, .. }) if field == "description"
    ));
}

#[test]
fn edit_merges_into_existing_fields() {
    let store = MemoryStore::new();
    let mut expenses = RecordService::open_app(Arc::new(store), App::Expenses).unwrap();

    let edited = expenses.edit_from_input("1", [("amount", "12.5")]).unwrap();

    assert_eq!(edited.number("amount"), Some(12.5));
    assert_eq!(edited.text("description"), Some("Groceries"));
    assert_eq!(edited.text("category"), Some("Food"));
    assert_eq!(expenses.get("1"), Some(&edited));
}

#[test]
fn update_replaces_every_field() {
    let store = MemoryStore::new();
    let mut todos = open_todos(&store);

    let mut fields = Fields::new();
    fields.insert("text".to_owned(), FieldValue::from("Buy oat milk"));
    let updated = todos.update("1", fields).unwrap();

    assert_eq!(updated.id, "1");
    assert_eq!(updated.text("text"), Some("Buy oat milk"));
    // defaults fill the omitted flag
    assert_eq!(updated.flag("completed"), Some(false));
}

#[test]
fn counter_ids_skip_stored_ids() {
    let stored = vec![
        Record::builder("1").field("text", "a").build(),
        Record::builder("7").field("text", "b").build(),
    ];
    let store = MemoryStore::new();
    store.save_records("todos", &stored).unwrap();

    let mut todos = open_todos(&store);
    let added = todos.add_from_input([("text", "c")]).unwrap();
    assert_eq!(added.id, "8");
}

#[test]
fn counter_ids_survive_a_maximal_stored_id() {
    let stored = vec![Record::builder(u64::MAX.to_string()).field("text", "last").build()];
    let store = MemoryStore::new();
    store.save_records("todos", &stored).unwrap();

    let mut todos = open_todos(&store);
    let added = todos.add_from_input([("text", "next")]).unwrap();
    assert_ne!(added.id, u64::MAX.to_string().as_str());
    assert_eq!(todos.records().len(), 2);
}

#[test]
fn uuid_ids_are_unique() {
    let store = MemoryStore::new();
    let mut todos = RecordService::open_app(Arc::new(store), App::Todo)
        .unwrap()
        .with_id_strategy(IdStrategy::Uuid);

    for i in 0..25 {
        todos.add_from_input([("text", format!("task {i}").as_str())]).unwrap();
    }

    let mut seen = ids(todos.records());
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), 26);
}

#[test]
fn corrupt_snapshot_recovers_with_seed() {
    let store = MemoryStore::with_entries([("orders", "{not json")]);
    let orders = RecordService::open_app(Arc::new(store), App::Orders).unwrap();

    assert_eq!(orders.source(), LoadSource::Recovered);
    assert_eq!(orders.records(), App::Orders.seed().as_slice());
}

#[test]
fn view_and_summary_go_through_the_schema() {
    let store = MemoryStore::new();
    let expenses = RecordService::open_app(Arc::new(store), App::Expenses).unwrap();

    let food = expenses
        .view(&ViewQuery::new().category(CategoryFilter::parse("Food")))
        .unwrap();
    assert_eq!(ids(&food), vec!["1"]);

    let summary = expenses.summary("amount").unwrap();
    assert_eq!(summary.overall.count, 2);
    assert!((summary.overall.total - 84.3).abs() < 1e-9);
    assert_eq!(summary.by_category.len(), 2);

    assert!(matches!(expenses.summary("description"), Err(ServiceError::Search(_))));
}

#[test]
fn sqlite_backed_service_persists() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("records.db");

    {
        let store = Arc::new(SqliteStore::new(&db_path).unwrap());
        let mut students = RecordService::open_app(store, App::Students).unwrap();
        students
            .add_from_input([
                ("name", "Grace Hopper"),
                ("email", "grace@example.edu"),
                ("grade", "99"),
                ("course", "Computer Science"),
            ])
            .unwrap();
    }

    let store = Arc::new(SqliteStore::new(&db_path).unwrap());
    let students = RecordService::open_app(store, App::Students).unwrap();
    assert_eq!(students.source(), LoadSource::Stored);
    assert_eq!(students.records().len(), 3);
    assert!(students.records().iter().any(|r| r.text("name") == Some("Grace Hopper")));
}

#[test]
fn theme_resolution_and_toggle() {
    let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::new());

    let theme = ThemeService::with_system_preference(Arc::clone(&store), None);
    assert_eq!(theme.current().unwrap(), Theme::Light);

    let theme = ThemeService::with_system_preference(Arc::clone(&store), Some(true));
    assert_eq!(theme.current().unwrap(), Theme::Dark);

    // stored preference wins over the system one
    assert_eq!(theme.toggle().unwrap(), Theme::Light);
    assert_eq!(store.get_raw("darkMode").unwrap().as_deref(), Some("false"));
    assert_eq!(theme.current().unwrap(), Theme::Light);

    assert_eq!(theme.set(Theme::Dark).unwrap(), Theme::Dark);
    assert_eq!(store.get_raw("darkMode").unwrap().as_deref(), Some("true"));
}
