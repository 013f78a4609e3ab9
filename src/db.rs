//! Record store: durable persistence of tabulation records.
//!
//! Records live in a single append-only SQLite table behind an r2d2 pool.
//! Each insert is one atomic transaction; `list_all` re-reads the full table
//! on every call, ordered most recent first, and never caches.

use std::fs;
use std::path::Path;
use std::time::Instant;

use chrono::{Local, NaiveDateTime};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection, Row};
use tracing::debug;

use crate::error::{Result, TabulationError};
use crate::metrics::MetricsCollector;
use crate::models::{NewTabulation, TabulationRecord};
use crate::schema::tabulations;
use crate::validation::InputValidator;

/// Type alias for the database connection pool
pub type DbPool = Pool<SqliteConnectionManager>;
/// Type alias for a pooled database connection
pub type DbConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Database manager for handling connections and operations
pub struct Database {
    pool: DbPool,
    collector: MetricsCollector,
}

impl Database {
    /// Create a new database connection pool and run migrations.
    ///
    /// Accepts a plain file path or a `sqlite:`/`sqlite://` prefixed URL.
    pub fn new(database_path: &str) -> Result<Self> {
        let path = database_path
            .trim_start_matches("sqlite://")
            .trim_start_matches("sqlite:");

        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder()
            .build(manager)
            .map_err(|e| TabulationError::Pool(e.to_string()))?;

        let conn = pool.get()?;
        Self::run_migrations(&conn)?;

        Ok(Self {
            pool,
            collector: MetricsCollector::default(),
        })
    }

    /// Run database migrations
    fn run_migrations(conn: &Connection) -> Result<()> {
        conn.execute_batch(include_str!(
            "../migrations/2026-07-20-000000_create_tabulations/up.sql"
        ))?;

        Ok(())
    }

    /// Get a connection from the pool
    pub fn get_connection(&self) -> Result<DbConnection> {
        Ok(self.pool.get()?)
    }

    /// Insert a new tabulation record.
    ///
    /// Validates the input, stamps `created_at`/`date_only` from the clock and
    /// performs one atomic insert. A failed insert leaves the store unchanged;
    /// the caller surfaces the error to the operator and does not retry.
    pub fn insert(&self, new: NewTabulation) -> Result<TabulationRecord> {
        self.insert_at(new, Local::now().naive_local())
    }

    /// Insert a record with an explicit `created_at`, used for seeding.
    ///
    /// Same validation and atomicity as `insert`.
    pub fn insert_at(
        &self,
        new: NewTabulation,
        created_at: NaiveDateTime,
    ) -> Result<TabulationRecord> {
        InputValidator::validate_new_tabulation(&new)?;

        let started = Instant::now();
        let date_only = created_at.date();

        let result = self.get_connection().and_then(|conn| {
            conn.execute(
                &format!(
                    "INSERT INTO {} ({}, {}, {}, {}, {}, {}, {}, {}, {}, {}) \
                     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                    tabulations::TABLE,
                    tabulations::TIMESTAMP,
                    tabulations::CLIENT_NAME,
                    tabulations::SOCIAL_NETWORK,
                    tabulations::MESSAGE_TEXT,
                    tabulations::LINK,
                    tabulations::RATING,
                    tabulations::REASON,
                    tabulations::DESTINATION_CENTER,
                    tabulations::SENTIMENT,
                    tabulations::DATE_ONLY,
                ),
                params![
                    created_at,
                    new.client_name,
                    new.social_network.as_str(),
                    new.message_text,
                    new.link,
                    new.rating.map(|r| r.to_string()),
                    new.reason.as_str(),
                    new.destination_center,
                    new.sentiment.as_str(),
                    date_only,
                ],
            )?;

            Ok(conn.last_insert_rowid())
        });

        let id = match result {
            Ok(id) => id,
            Err(e) => {
                self.collector.record_insert(false, started.elapsed());
                return Err(e);
            }
        };

        self.collector.record_insert(true, started.elapsed());
        debug!(id, network = %new.social_network, "Tabulation record inserted");

        Ok(TabulationRecord {
            id,
            created_at,
            date_only,
            client_name: new.client_name,
            social_network: new.social_network,
            message_text: new.message_text,
            link: new.link,
            rating: new.rating,
            reason: new.reason,
            sentiment: new.sentiment,
            destination_center: new.destination_center,
        })
    }

    /// Read all committed records, most recent first.
    ///
    /// Re-executed on every call; reflects everything committed at call time.
    pub fn list_all(&self) -> Result<Vec<TabulationRecord>> {
        let started = Instant::now();
        let conn = self.get_connection()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT * FROM {} ORDER BY {} DESC, {} DESC",
            tabulations::TABLE,
            tabulations::TIMESTAMP,
            tabulations::ID,
        ))?;

        let record_iter = stmt.query_map(params![], Self::map_record)?;

        let mut results = Vec::new();
        for record in record_iter {
            results.push(record?);
        }

        self.collector.record_list(started.elapsed(), results.len());
        Ok(results)
    }

    /// Number of committed records
    pub fn count(&self) -> Result<usize> {
        let conn = self.get_connection()?;

        let count: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", tabulations::TABLE),
            params![],
            |row| row.get(0),
        )?;

        Ok(count as usize)
    }

    /// Map a database row to a `TabulationRecord`
    fn map_record(row: &Row) -> rusqlite::Result<TabulationRecord> {
        let network: String = row.get(tabulations::SOCIAL_NETWORK)?;
        let reason: String = row.get(tabulations::REASON)?;
        let sentiment: String = row.get(tabulations::SENTIMENT)?;
        let created_at: NaiveDateTime = row.get(tabulations::TIMESTAMP)?;

        Ok(TabulationRecord {
            id: row.get(tabulations::ID)?,
            created_at,
            date_only: created_at.date(),
            client_name: row.get(tabulations::CLIENT_NAME)?,
            social_network: parse_column(&network, 3)?,
            message_text: non_empty(row.get(tabulations::MESSAGE_TEXT)?),
            link: non_empty(row.get(tabulations::LINK)?),
            rating: parse_rating(row.get(tabulations::RATING)?),
            reason: parse_column(&reason, 7)?,
            sentiment: parse_column(&sentiment, 9)?,
            destination_center: row
                .get::<_, Option<String>>(tabulations::DESTINATION_CENTER)?
                .unwrap_or_default(),
        })
    }
}

/// Parse a stored enum column, surfacing unknown values as conversion errors
fn parse_column<T>(raw: &str, column: usize) -> rusqlite::Result<T>
where
    T: std::str::FromStr<Err = TabulationError>,
{
    raw.parse::<T>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(
            column,
            rusqlite::types::Type::Text,
            Box::new(e),
        ))
}

/// Treat NULL and empty-string text columns the same way
fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.trim().is_empty())
}

/// Parse a stored rating.
///
/// Pre-existing rows hold star strings such as `"4⭐"`; new rows hold plain
/// digits. Anything outside 1-5 reads back as no rating.
fn parse_rating(raw: Option<String>) -> Option<u8> {
    let raw = raw?;
    let digits: String = raw
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();

    digits.parse::<u8>().ok().filter(|r| (1..=5).contains(r))
}

/// Open the database configured for this process.
///
/// The path comes from `DATABASE_URL` when set, falling back to the default
/// location under `data/`.
pub fn establish_connection() -> Result<Database> {
    let database_path =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "data/social_metrics.db".to_string());

    Database::new(&database_path)
}
