//! Database schema initialization and migrations.

use crate::error::{DatabaseResultExt, Result};

const SCHEMA_SQL: &str = include_str!("../../assets/schema.sql");

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Enable foreign keys for this connection
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        self.connection
            .execute_batch(SCHEMA_SQL)
            .db_context("Failed to initialize database schema")?;

        // Apply migrations for existing databases
        self.apply_migrations()?;

        Ok(())
    }

    fn has_column(&self, table: &str, column: &str) -> Result<bool> {
        self.connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2",
                [table, column],
                |row| row.get(0),
            )
            .map(|count: i64| count > 0)
            .db_context("Failed to inspect table columns")
    }

    /// Apply database migrations for existing databases
    fn apply_migrations(&self) -> Result<()> {
        // Mirrors created before provenance was tracked lack the column
        if !self.has_column("processes", "set_source")? {
            self.connection
                .execute("ALTER TABLE processes ADD COLUMN set_source TEXT", [])
                .db_context("Failed to add set_source column to processes table")?;
        }

        // Older views sorted processes by name
        if !self.has_column("dirty_processes", "process_rank")? {
            self.connection
                .execute("DROP VIEW IF EXISTS dirty_processes", [])
                .db_context("Failed to drop dirty_processes view")?;
            self.connection
                .execute_batch(SCHEMA_SQL)
                .db_context("Failed to recreate dirty_processes view")?;
        }

        Ok(())
    }
}
