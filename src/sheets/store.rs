use rocket::{
    request::{self, FromRequest, Request},
    State,
};

use crate::model::ballot::VoteRecord;

use super::{BackendError, Tables, VOTES_TABLE};

/// Wraps the remote `Votes` table: appends one anonymous vote record and
/// reads the full record set for tallying.
pub struct BallotStore {
    tables: Tables,
}

impl BallotStore {
    pub fn new(tables: Tables) -> Self {
        Self { tables }
    }

    /// Append one row in fixed column order: president, then the board
    /// picks. Nothing in the row links back to a voter identity.
    pub async fn append_vote(&self, record: &VoteRecord) -> Result<(), BackendError> {
        self.tables.append_row(VOTES_TABLE, record.to_row()).await
    }

    /// Read the full table. Used only by the admin/reporting path.
    pub async fn all_votes(&self) -> Result<Vec<VoteRecord>, BackendError> {
        let rows = self.tables.read_rows(VOTES_TABLE).await?;
        Ok(rows.into_iter().skip(1).map(VoteRecord::from_row).collect())
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for BallotStore {
    type Error = ();

    /// Get the backend handle from the managed state and wrap it.
    ///
    /// Panics iff [`Tables`] is not managed by [`rocket::Rocket`].
    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let tables = req.guard::<&State<Tables>>().await.unwrap();
        request::Outcome::Success(BallotStore::new(tables.inner().clone()))
    }
}
