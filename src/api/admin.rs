use rocket::{
    http::{ContentType, Status},
    request::{self, FromRequest},
    serde::json::Json,
    Request, Route, State,
};
use serde::Serialize;

use crate::{
    config::Config,
    error::{Error, Result},
    model::{
        ballot::VoteRecord,
        election::Election,
        tally::{self, Tally},
    },
    sheets::{BallotStore, VoterRegistry},
};

pub fn routes() -> Vec<Route> {
    routes![get_report, export_votes]
}

pub const ADMIN_PASSWORD_HEADER: &str = "X-Admin-Password";

/// Request guard proving the shared admin password was supplied.
pub struct AdminAuth;

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AdminAuth {
    type Error = Error;

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let config = req.guard::<&State<Config>>().await.unwrap(); // Valid as `Config` is always managed
        match req.headers().get_one(ADMIN_PASSWORD_HEADER) {
            Some(password) if password == config.admin_password() => {
                request::Outcome::Success(AdminAuth)
            }
            _ => request::Outcome::Error((
                Status::Unauthorized,
                Error::Unauthorized("missing or wrong admin password".to_string()),
            )),
        }
    }
}

/// The admin view: headline count, attendance, tallies, and raw records.
#[derive(Debug, Serialize)]
struct Report {
    total_votes: usize,
    voters: Vec<String>,
    tally: Tally,
    records: Vec<VoteRecord>,
}

#[get("/admin/report")]
async fn get_report(
    _auth: AdminAuth,
    registry: VoterRegistry,
    store: BallotStore,
) -> Result<Json<Report>> {
    let voters = registry.list_voters().await?;
    let records = store.all_votes().await?;
    let tally = tally::tally(&records);
    Ok(Json(Report {
        total_votes: records.len(),
        voters,
        tally,
        records,
    }))
}

#[get("/admin/export")]
async fn export_votes(
    _auth: AdminAuth,
    election: &State<Election>,
    store: BallotStore,
) -> Result<(ContentType, String)> {
    let records = store.all_votes().await?;
    Ok((ContentType::CSV, tally::export_csv(&records, election.seats())))
}
