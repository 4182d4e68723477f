use serde::{Deserialize, Serialize};

/// The column header of the votes table: `P, C1..Ck`.
pub fn votes_header(seats: usize) -> Vec<String> {
    let mut header = Vec::with_capacity(1 + seats);
    header.push("P".to_string());
    header.extend((1..=seats).map(|i| format!("C{i}")));
    header
}

/// One persisted, anonymized vote: the president pick plus the board picks
/// in slot order. Created exactly once per successful submission and never
/// linked to a voter identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub president: String,
    pub board: Vec<String>,
}

impl VoteRecord {
    /// Flatten into a table row in fixed column order.
    pub fn to_row(&self) -> Vec<String> {
        let mut row = Vec::with_capacity(1 + self.board.len());
        row.push(self.president.clone());
        row.extend(self.board.iter().cloned());
        row
    }

    /// Read back from a table row. The row width determines how many board
    /// fields there are; an empty row reads as all-empty fields.
    pub fn from_row(row: Vec<String>) -> Self {
        let mut fields = row.into_iter();
        Self {
            president: fields.next().unwrap_or_default(),
            board: fields.collect(),
        }
    }
}

/// An in-progress vote under construction: the president pick is nullable
/// until chosen, and the board picks fill up to the configured seat count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotSelection {
    pub president: Option<String>,
    pub board: Vec<String>,
}

impl From<VoteRecord> for BallotSelection {
    /// Reopen a captured draft for editing.
    fn from(record: VoteRecord) -> Self {
        Self {
            president: Some(record.president),
            board: record.board,
        }
    }
}
