use std::fs;
use std::path::{Path, PathBuf};

use jiff::Timestamp;
use jiff::civil::DateTime;
use jiff::tz::TimeZone;
use rusqlite::{Connection, params};
use tracing::info;

use crate::error::StorageError;
use crate::password::hash_password;

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_ADMIN_DISPLAY_NAME: &str = "Administrator";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE,
    display_name TEXT,
    password_hash TEXT,
    role TEXT,
    created_at TEXT
);
CREATE TABLE IF NOT EXISTS patients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT,
    age INTEGER,
    gender TEXT,
    contact TEXT,
    created_at TEXT
);
CREATE TABLE IF NOT EXISTS assessments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_id INTEGER,
    assessor TEXT,
    data_json TEXT,
    created_at TEXT,
    FOREIGN KEY(patient_id) REFERENCES patients(id)
);
";

/// The application database. Holds a single connection.
pub struct Database {
    pub(crate) conn: Connection,
    path: Option<PathBuf>,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").field("path", &self.path).finish()
    }
}

impl Database {
    /// Open (creating if needed) the database file, ensure the tables and
    /// seed the default admin on an empty users table.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        let db = Self {
            conn,
            path: Some(path.to_path_buf()),
        };
        db.initialize()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        let db = Self {
            conn: Connection::open_in_memory()?,
            path: None,
        };
        db.initialize()?;
        Ok(db)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn initialize(&self) -> Result<(), StorageError> {
        self.conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        self.conn.execute_batch(SCHEMA)?;
        self.seed_admin()?;
        Ok(())
    }

    /// Insert the default admin account when no user exists at all.
    /// Returns whether a row was written.
    fn seed_admin(&self) -> Result<bool, StorageError> {
        let users: i64 = self
            .conn
            .query_row("SELECT COUNT(1) FROM users", [], |row| row.get(0))?;
        if users > 0 {
            return Ok(false);
        }
        self.conn.execute(
            "INSERT INTO users (username, display_name, password_hash, role, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                DEFAULT_ADMIN_USERNAME,
                DEFAULT_ADMIN_DISPLAY_NAME,
                hash_password(DEFAULT_ADMIN_PASSWORD),
                "admin",
                now_text(),
            ],
        )?;
        info!(username = DEFAULT_ADMIN_USERNAME, "Seeded default admin account");
        Ok(true)
    }
}

/// Raw bytes of a database file, for download or backup.
pub fn export_bytes(path: &Path) -> Result<Vec<u8>, StorageError> {
    Ok(fs::read(path)?)
}

/// Fixed microsecond precision so that text order matches time order.
pub(crate) fn timestamp_text(ts: Timestamp) -> String {
    format!("{ts:.6}")
}

pub(crate) fn now_text() -> String {
    timestamp_text(Timestamp::now())
}

/// Parse a stored timestamp. Rows written by older versions carry naive
/// local ISO strings; those are read as UTC.
pub(crate) fn parse_timestamp(value: &str) -> Result<Timestamp, StorageError> {
    if let Ok(ts) = value.parse::<Timestamp>() {
        return Ok(ts);
    }
    let invalid = |message: String| StorageError::InvalidTimestamp {
        value: value.to_string(),
        message,
    };
    let naive: DateTime = value.parse().map_err(|e: jiff::Error| invalid(e.to_string()))?;
    naive
        .to_zoned(TimeZone::UTC)
        .map(|z| z.timestamp())
        .map_err(|e| invalid(e.to_string()))
}
