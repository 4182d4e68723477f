use log::{info, warn};
use rocket::{
    http::{CookieJar, Status},
    serde::json::Json,
    Route, State,
};
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    error::{Error, Result},
    model::{
        ballot::BallotSelection,
        election::{Candidate, Election},
        session::BallotSession,
    },
    sheets::{BallotStore, VoterRegistry},
};

pub fn routes() -> Vec<Route> {
    routes![
        get_election,
        get_session,
        login,
        submit_ballot,
        back,
        confirm,
        logout,
    ]
}

/// Everything the presentation layer needs to render the ballot form.
#[derive(Debug, Serialize)]
struct ElectionDescription {
    authorized_voters: Vec<String>,
    president_candidates: Vec<Candidate>,
    board_candidates: Vec<Candidate>,
    seats: usize,
}

#[get("/election")]
fn get_election(election: &State<Election>) -> Json<ElectionDescription> {
    Json(ElectionDescription {
        authorized_voters: election.authorized_voters().to_vec(),
        president_candidates: election.president_candidates().to_vec(),
        board_candidates: election.board_candidates().to_vec(),
        seats: election.seats(),
    })
}

/// Which screen the UI should show, plus any held selection.
#[get("/session")]
fn get_session(session: BallotSession) -> Json<BallotSession> {
    Json(session)
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    name: String,
}

#[post("/session/login", data = "<request>", format = "json")]
async fn login(
    session: BallotSession,
    request: Json<LoginRequest>,
    election: &State<Election>,
    registry: VoterRegistry,
    cookies: &CookieJar<'_>,
    config: &State<Config>,
) -> Result<Json<BallotSession>> {
    if !matches!(session, BallotSession::Anonymous) {
        return Err(Error::BadRequest("already logged in".to_string()));
    }

    // Authorization is checked against the configured set before the voter
    // table is ever read.
    let name = request.0.name;
    let session = BallotSession::login(election, &name)?;

    // Fail-open on read: an unreachable voters table must not lock the
    // whole electorate out of the login screen.
    let voted = registry.has_voted(&name).await.unwrap_or_else(|err| {
        warn!("Could not read the voters table, treating it as empty: {err}");
        false
    });
    if voted {
        return Err(Error::AlreadyVoted);
    }

    session.clone().store(cookies, config);
    Ok(Json(session))
}

#[post("/ballot", data = "<selection>", format = "json")]
fn submit_ballot(
    session: BallotSession,
    selection: Json<BallotSelection>,
    election: &State<Election>,
    cookies: &CookieJar<'_>,
    config: &State<Config>,
) -> Result<Json<BallotSession>> {
    // On a validation error the cookie is untouched, so the session stays
    // in `Voting`.
    let next = session.submit(selection.0, election)?;
    next.clone().store(cookies, config);
    Ok(Json(next))
}

#[post("/ballot/back")]
fn back(
    session: BallotSession,
    cookies: &CookieJar<'_>,
    config: &State<Config>,
) -> Result<Json<BallotSession>> {
    let next = session.back()?;
    next.clone().store(cookies, config);
    Ok(Json(next))
}

#[post("/ballot/confirm")]
async fn confirm(
    session: BallotSession,
    registry: VoterRegistry,
    store: BallotStore,
    cookies: &CookieJar<'_>,
) -> Result<()> {
    let (voter, record) = match session {
        BallotSession::Confirming { voter, record } => (voter, record),
        _ => {
            return Err(Error::BadRequest(
                "there is no vote awaiting confirmation".to_string(),
            ))
        }
    };

    // Ordered writes: the anonymous vote first, the attendance row only
    // once the vote is safely appended. On failure the cookie is untouched
    // and the session stays in `Confirming`, so confirm can be re-issued.
    // A failure between the two writes can leave an extra vote row on
    // retry; the reverse order could lose a vote entirely.
    store
        .append_vote(&record)
        .await
        .map_err(Error::SubmissionFailed)?;
    registry
        .record_voted(&voter)
        .await
        .map_err(Error::SubmissionFailed)?;

    info!("A vote was registered");

    // Submitted is terminal: reset straight back to Anonymous.
    BallotSession::clear(cookies);
    Ok(())
}

#[delete("/session")]
fn logout(cookies: &CookieJar<'_>) -> Status {
    BallotSession::clear(cookies);
    Status::Ok
}
