use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};

use crate::db::models::UserRecord;
use crate::db::schema::SQLITE_INIT;
use crate::error::BridgeError;
use crate::google_oauth::credentials::TokenBundle;

pub type SqlitePool = Pool<Sqlite>;

/// Credential record store, keyed uniquely by identity email.
///
/// Deliberately narrow surface: upsert and point lookup only. No delete and
/// no list-all; nothing else in the system needs them.
#[derive(Clone)]
pub struct UserStorage {
    pool: SqlitePool,
}

impl UserStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database and run the bundled DDL.
    pub async fn connect(database_url: &str) -> Result<Self, BridgeError> {
        let connect_opts =
            SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
        let storage = Self::new(pool);
        storage.init_schema().await?;
        Ok(storage)
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), BridgeError> {
        // execute multiple statements safely (SQLite supports multi-commands but sqlx::query doesn't)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Upsert by unique email: insert on first sight, otherwise replace the
    /// entire token bundle (absent fields become NULL, never merged).
    /// Uses SQLite `INSERT ... ON CONFLICT(email) DO UPDATE` so concurrent
    /// exchanges for the same identity resolve to last-writer-wins inside
    /// the engine, with no read-then-write window.
    pub async fn upsert(&self, email: &str, bundle: &TokenBundle) -> Result<UserRecord, BridgeError> {
        sqlx::query(
            r#"
            INSERT INTO users (
                email, access_token, refresh_token, scope, token_type, expiry_date
            ) VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(email) DO UPDATE SET
                access_token=excluded.access_token,
                refresh_token=excluded.refresh_token,
                scope=excluded.scope,
                token_type=excluded.token_type,
                expiry_date=excluded.expiry_date
            "#,
        )
        .bind(email)
        .bind(bundle.access_token.as_deref())
        .bind(bundle.refresh_token.as_deref())
        .bind(bundle.scope.as_deref())
        .bind(bundle.token_type.as_deref())
        .bind(bundle.expiry_date)
        .execute(&self.pool)
        .await?;

        // Fetch the stored row after upsert
        let row = sqlx::query(
            r#"SELECT id, email, access_token, refresh_token, scope, token_type, expiry_date
               FROM users WHERE email = ?"#,
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Self::row_to_model(row)
    }

    /// Point lookup by the exact identity string. `None` is a distinct
    /// outcome the handlers map to 404, not an error.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, BridgeError> {
        let row = sqlx::query(
            r#"SELECT id, email, access_token, refresh_token, scope, token_type, expiry_date
               FROM users WHERE email = ?"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::row_to_model).transpose()
    }

    fn row_to_model(row: SqliteRow) -> Result<UserRecord, BridgeError> {
        let id: i64 = row.try_get("id")?;
        let email: String = row.try_get("email")?;
        let access_token: Option<String> = row.try_get("access_token")?;
        let refresh_token: Option<String> = row.try_get("refresh_token")?;
        let scope: Option<String> = row.try_get("scope")?;
        let token_type: Option<String> = row.try_get("token_type")?;
        let expiry_date: Option<i64> = row.try_get("expiry_date")?;

        Ok(UserRecord {
            id,
            email,
            bundle: TokenBundle {
                access_token,
                refresh_token,
                scope,
                token_type,
                expiry_date,
            },
        })
    }
}
