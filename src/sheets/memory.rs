use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use super::{BackendError, TableBackend};

/// In-memory table backend for tests, with per-table failure injection.
#[derive(Debug, Default)]
pub struct MemoryTables {
    rows: Mutex<HashMap<String, Vec<Vec<String>>>>,
    failing: Mutex<HashSet<String>>,
}

impl MemoryTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a table with initial rows.
    pub fn with_table(self, table: &str, rows: Vec<Vec<String>>) -> Self {
        self.rows.lock().unwrap().insert(table.to_string(), rows);
        self
    }

    /// Make every operation on the given table fail until restored.
    pub fn fail_table(&self, table: &str) {
        self.failing.lock().unwrap().insert(table.to_string());
    }

    pub fn restore_table(&self, table: &str) {
        self.failing.lock().unwrap().remove(table);
    }

    /// Snapshot of a table's rows.
    pub fn rows(&self, table: &str) -> Vec<Vec<String>> {
        self.rows
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    fn check_available(&self, table: &str) -> Result<(), BackendError> {
        if self.failing.lock().unwrap().contains(table) {
            Err(BackendError::Unavailable)
        } else {
            Ok(())
        }
    }
}

#[rocket::async_trait]
impl TableBackend for MemoryTables {
    async fn read_rows(&self, table: &str) -> Result<Vec<Vec<String>>, BackendError> {
        self.check_available(table)?;
        Ok(self.rows(table))
    }

    async fn append_row(&self, table: &str, row: Vec<String>) -> Result<(), BackendError> {
        self.check_available(table)?;
        self.rows
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .push(row);
        Ok(())
    }
}
