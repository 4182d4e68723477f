//! The table backend layer: a remote append-oriented tabular store with
//! two operations (read all rows, append a row), plus the two wrappers
//! that give it domain meaning.

use std::ops::Deref;
use std::sync::Arc;

use thiserror::Error;

mod client;
#[cfg(test)]
mod memory;
mod registry;
mod store;

pub use client::{SheetsClient, SheetsConfig};
#[cfg(test)]
pub use memory::MemoryTables;
pub use registry::VoterRegistry;
pub use store::BallotStore;

/// Name of the voter-attendance table: header plus one name per row.
pub const VOTERS_TABLE: &str = "Voters";

/// Name of the anonymous votes table: header `P, C1..Ck` plus one row per
/// finalized vote.
pub const VOTES_TABLE: &str = "Votes";

/// Transport or auth failure talking to the table backend. Surfaced to the
/// user as a generic connection error; no partial writes are assumed
/// committed.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("table backend rejected the request with status {0}")]
    Status(u16),
    #[cfg(test)]
    #[error("simulated backend failure")]
    Unavailable,
}

/// A remote append-oriented tabular store.
#[rocket::async_trait]
pub trait TableBackend: Send + Sync {
    /// Read the full table, header row included.
    async fn read_rows(&self, table: &str) -> Result<Vec<Vec<String>>, BackendError>;

    /// Append one row to the table.
    async fn append_row(&self, table: &str, row: Vec<String>) -> Result<(), BackendError>;
}

/// Shared handle on the table backend, kept in Rocket managed state.
#[derive(Clone)]
pub struct Tables(Arc<dyn TableBackend>);

impl Tables {
    pub fn new(backend: Arc<dyn TableBackend>) -> Self {
        Self(backend)
    }
}

impl Deref for Tables {
    type Target = dyn TableBackend;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}
