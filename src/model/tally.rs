use serde::{Deserialize, Serialize};

use crate::model::ballot::{votes_header, VoteRecord};

/// One line of a race result: candidate name and number of votes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateCount {
    pub name: String,
    pub votes: u64,
}

/// Descending per-candidate counts for both races. Derived, never
/// persisted; recomputed on demand from the full record set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub president: Vec<CandidateCount>,
    pub board: Vec<CandidateCount>,
}

/// Count votes per candidate for both races. Empty fields are ignored.
/// Output is sorted descending by count; ties keep first-seen input order.
pub fn tally(records: &[VoteRecord]) -> Tally {
    let mut president = Counts::default();
    let mut board = Counts::default();
    for record in records {
        president.add(&record.president);
        for pick in &record.board {
            board.add(pick);
        }
    }
    Tally {
        president: president.descending(),
        board: board.descending(),
    }
}

/// First-seen-ordered counter.
#[derive(Default)]
struct Counts(Vec<CandidateCount>);

impl Counts {
    fn add(&mut self, name: &str) {
        if name.is_empty() {
            return;
        }
        match self.0.iter_mut().find(|c| c.name == name) {
            Some(count) => count.votes += 1,
            None => self.0.push(CandidateCount {
                name: name.to_string(),
                votes: 1,
            }),
        }
    }

    fn descending(mut self) -> Vec<CandidateCount> {
        // Stable sort keeps first-seen order within equal counts.
        self.0.sort_by(|a, b| b.votes.cmp(&a.votes));
        self.0
    }
}

/// Flatten the raw record sequence (not the tally) into CSV with header
/// `P,C1..Ck`. Pure and deterministic given the same input ordering.
pub fn export_csv(records: &[VoteRecord], seats: usize) -> String {
    let mut out = String::new();
    write_row(&mut out, &votes_header(seats));
    for record in records {
        let mut row = record.to_row();
        row.resize(1 + seats, String::new());
        write_row(&mut out, &row);
    }
    out
}

fn write_row(out: &mut String, fields: &[String]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if field.contains([',', '"', '\n']) {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out.push_str("\r\n");
}
