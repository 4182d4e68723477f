use rocket::{
    request::{self, FromRequest, Request},
    State,
};

use super::{BackendError, Tables, VOTERS_TABLE};

/// Wraps the remote `Voters` table: answers "has this name voted" and
/// records a name as having voted.
pub struct VoterRegistry {
    tables: Tables,
}

impl VoterRegistry {
    pub fn new(tables: Tables) -> Self {
        Self { tables }
    }

    /// All names already recorded as having voted, header row skipped.
    pub async fn list_voters(&self) -> Result<Vec<String>, BackendError> {
        let rows = self.tables.read_rows(VOTERS_TABLE).await?;
        Ok(rows
            .into_iter()
            .skip(1)
            .filter_map(|row| row.into_iter().next())
            .filter(|name| !name.is_empty())
            .collect())
    }

    pub async fn has_voted(&self, name: &str) -> Result<bool, BackendError> {
        Ok(self.list_voters().await?.iter().any(|n| n == name))
    }

    /// Append the name as a new row. No uniqueness enforcement at this
    /// layer: duplicate suppression is the caller's check-before-append.
    pub async fn record_voted(&self, name: &str) -> Result<(), BackendError> {
        self.tables
            .append_row(VOTERS_TABLE, vec![name.to_string()])
            .await
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for VoterRegistry {
    type Error = ();

    /// Get the backend handle from the managed state and wrap it.
    ///
    /// Panics iff [`Tables`] is not managed by [`rocket::Rocket`].
    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let tables = req.guard::<&State<Tables>>().await.unwrap();
        request::Outcome::Success(VoterRegistry::new(tables.inner().clone()))
    }
}
