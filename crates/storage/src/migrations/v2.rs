//! Migration v2: last-write timestamp on entries

pub(super) const INDEX_SQL: &str = "
CREATE INDEX IF NOT EXISTS idx_kv_entries_updated_at ON kv_entries(updated_at);
";
