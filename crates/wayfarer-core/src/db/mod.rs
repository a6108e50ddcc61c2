//! SQLite mirror of plan documents.
//!
//! This module keeps query tables (destinations, processes, cascade markers,
//! chosen offers) in sync with the JSON plan document so other tools can
//! query plan state with SQL. The mirror is write-only from the engine's
//! point of view; the cascade never reads it.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod migrations;
pub mod mirror_queries;

pub use mirror_queries::{MarkerRow, ProcessRow};

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
