//! Shared constants for recordkit.

/// Storage key holding the dark-mode preference.
pub const THEME_STORAGE_KEY: &str = "darkMode";

/// Environment variable standing in for the `prefers-color-scheme` media query.
pub const PREFERS_DARK_ENV: &str = "RECORDKIT_PREFERS_DARK";

/// Environment variable overriding the SQLite database path.
pub const DB_PATH_ENV: &str = "RECORDKIT_DB_PATH";

/// Environment variable sizing the SQLite connection pool.
pub const DB_POOL_SIZE_ENV: &str = "RECORDKIT_DB_POOL_SIZE";

/// Default SQLite connection pool size.
pub const DEFAULT_DB_POOL_SIZE: u32 = 4;

/// Environment variable selecting the id strategy (`uuid` or `counter`).
pub const ID_STRATEGY_ENV: &str = "RECORDKIT_ID_STRATEGY";

/// Sentinel category value that disables the category filter.
pub const ALL_CATEGORIES: &str = "All";

/// Number of evaluations the calculator keeps in its history.
pub const CALC_HISTORY_LIMIT: usize = 50;
