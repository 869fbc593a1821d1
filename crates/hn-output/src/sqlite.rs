//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! three tables: `energy_samples`, `attachments` and `diagnostics`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{AttachmentRow, DiagnosticRow, EnergySampleRow, OutputResult};

/// Writes run output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS energy_samples (
                 terminal_id       INTEGER NOT NULL,
                 interval          INTEGER NOT NULL,
                 processing_energy REAL    NOT NULL,
                 migration_energy  REAL    NOT NULL,
                 PRIMARY KEY (terminal_id, interval)
             );
             CREATE TABLE IF NOT EXISTS attachments (
                 interval    INTEGER NOT NULL,
                 terminal_id INTEGER NOT NULL,
                 rat         TEXT    NOT NULL,
                 cell_id     INTEGER NOT NULL,
                 distance_m  REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS diagnostics (
                 kind        TEXT    NOT NULL,
                 terminal_id INTEGER NOT NULL,
                 interval    INTEGER,
                 detail      TEXT    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_samples(&mut self, rows: &[EnergySampleRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO energy_samples \
                 (terminal_id, interval, processing_energy, migration_energy) \
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.terminal_id,
                    row.interval,
                    row.processing_energy,
                    row.migration_energy,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_attachments(&mut self, rows: &[AttachmentRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO attachments (interval, terminal_id, rat, cell_id, distance_m) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.interval,
                    row.terminal_id,
                    row.rat,
                    row.cell_id,
                    row.distance_m,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_diagnostic(&mut self, row: &DiagnosticRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO diagnostics (kind, terminal_id, interval, detail) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![row.kind, row.terminal_id, row.interval, row.detail],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        self.finished = true;
        Ok(())
    }
}
