//! SQL DDL for initializing the credential storage.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema with:
/// - `id` INTEGER PRIMARY KEY AUTOINCREMENT
/// - `email` UNIQUE: exactly one row per identity, enforced by the engine
/// - Token bundle columns all nullable; the bundle is stored verbatim
/// - `expiry_date` as epoch milliseconds
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL UNIQUE,
    access_token TEXT NULL,
    refresh_token TEXT NULL,
    scope TEXT NULL,
    token_type TEXT NULL,
    expiry_date INTEGER NULL
);

CREATE INDEX IF NOT EXISTS idx_users_email ON users(email);
"#;
