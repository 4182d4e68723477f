use serde::{Deserialize, Serialize};

/// A candidate as presented to the voter: display name plus portrait asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub portrait: String,
}

/// Static election configuration: who may vote, who may be voted for, and
/// how many board seats are contested. Never mutated at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Election {
    authorized_voters: Vec<String>,
    president_candidates: Vec<Candidate>,
    board_candidates: Vec<Candidate>,
    board_seats: usize,
}

impl Election {
    /// Number of distinct board picks a complete ballot must contain,
    /// bounded by the number of configured board candidates.
    pub fn seats(&self) -> usize {
        self.board_seats.min(self.board_candidates.len())
    }

    pub fn authorized_voters(&self) -> &[String] {
        &self.authorized_voters
    }

    pub fn president_candidates(&self) -> &[Candidate] {
        &self.president_candidates
    }

    pub fn board_candidates(&self) -> &[Candidate] {
        &self.board_candidates
    }

    pub fn is_authorized(&self, name: &str) -> bool {
        self.authorized_voters.iter().any(|n| n == name)
    }

    pub fn is_president_candidate(&self, name: &str) -> bool {
        self.president_candidates.iter().any(|c| c.name == name)
    }

    pub fn is_board_candidate(&self, name: &str) -> bool {
        self.board_candidates.iter().any(|c| c.name == name)
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl Candidate {
        fn named(name: &str) -> Self {
            Self {
                name: name.to_string(),
                portrait: format!("img/{name}.jpg"),
            }
        }
    }

    impl Election {
        /// One president candidate, four board candidates for four seats.
        pub fn example() -> Self {
            Self {
                authorized_voters: ["alice", "bob", "carol", "dave", "erin"]
                    .map(String::from)
                    .to_vec(),
                president_candidates: vec![Candidate::named("Paula Prime")],
                board_candidates: vec![
                    Candidate::named("Astrid Berg"),
                    Candidate::named("Bruno Keller"),
                    Candidate::named("Clara Voss"),
                    Candidate::named("Dario Mancini"),
                ],
                board_seats: 4,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seats_bounded_by_candidate_count() {
        let mut election = Election::example();
        assert_eq!(election.seats(), 4);

        // A target above the candidate count collapses to the count.
        election.board_seats = 9;
        assert_eq!(election.seats(), 4);

        election.board_seats = 2;
        assert_eq!(election.seats(), 2);
    }

    #[test]
    fn membership_checks() {
        let election = Election::example();
        assert!(election.is_authorized("alice"));
        assert!(!election.is_authorized("mallory"));
        assert!(election.is_president_candidate("Paula Prime"));
        assert!(!election.is_president_candidate("Astrid Berg"));
        assert!(election.is_board_candidate("Astrid Berg"));
        assert!(!election.is_board_candidate("Paula Prime"));
    }
}
