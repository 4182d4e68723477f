use chrono::{serde::ts_seconds, DateTime, Utc};
use jsonwebtoken::{
    errors::Error as JwtError, DecodingKey, EncodingKey, Header, TokenData, Validation,
};
use rocket::{
    http::{Cookie, CookieJar, SameSite},
    request::{self, FromRequest},
    time::Duration,
    Request, State,
};
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    error::Error,
    model::{
        ballot::{BallotSelection, VoteRecord},
        election::Election,
    },
};

pub const SESSION_COOKIE: &str = "ballot_session";

/// The per-voter interaction state machine.
///
/// `Anonymous` → `Voting` → `Confirming` → submitted, which immediately
/// resets to `Anonymous`. The value round-trips through a signed cookie
/// between requests; a missing or invalid cookie reads as `Anonymous`.
/// The session exclusively owns the in-progress selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BallotSession {
    Anonymous,
    Voting {
        voter: String,
        selection: BallotSelection,
    },
    Confirming {
        voter: String,
        record: VoteRecord,
    },
}

impl BallotSession {
    /// Start a voting session for the named voter. Names outside the
    /// authorized set are rejected before the voter table is ever
    /// consulted; the has-voted check happens at the endpoint against
    /// [`crate::sheets::VoterRegistry`].
    pub fn login(election: &Election, name: &str) -> Result<Self, Error> {
        if !election.is_authorized(name) {
            return Err(Error::Unauthorized(format!(
                "{name} is not an authorized voter"
            )));
        }
        Ok(Self::Voting {
            voter: name.to_string(),
            selection: BallotSelection::default(),
        })
    }

    /// `Voting` → `Confirming`: validate the selection and capture the
    /// draft record immutably.
    pub fn submit(&self, selection: BallotSelection, election: &Election) -> Result<Self, Error> {
        let voter = match self {
            Self::Voting { voter, .. } => voter.clone(),
            _ => return Err(Error::BadRequest("no ballot is being filled in".to_string())),
        };
        let record = validate_selection(selection, election)?;
        Ok(Self::Confirming { voter, record })
    }

    /// `Confirming` → `Voting`, retaining the selections for re-editing.
    pub fn back(&self) -> Result<Self, Error> {
        match self {
            Self::Confirming { voter, record } => Ok(Self::Voting {
                voter: voter.clone(),
                selection: record.clone().into(),
            }),
            _ => Err(Error::BadRequest(
                "there is no vote to go back from".to_string(),
            )),
        }
    }

    // Session serialization never fails.
    #[allow(clippy::missing_panics_doc)]
    /// Store this session in the cookie jar as a signed token.
    pub fn store(self, cookies: &CookieJar<'_>, config: &Config) {
        let claims = Claims {
            session: self,
            expire_at: Utc::now() + config.session_ttl(),
        };
        let cookie = Cookie::build((
            SESSION_COOKIE,
            jsonwebtoken::encode(
                &Header::default(),
                &claims,
                &EncodingKey::from_secret(config.jwt_secret()),
            )
            .unwrap(),
        ))
        .max_age(Duration::seconds(config.session_ttl().num_seconds()))
        .http_only(true)
        .same_site(SameSite::Strict)
        .build();
        cookies.add(cookie);
    }

    /// Drop all session state: any state → `Anonymous`, persisting nothing.
    pub fn clear(cookies: &CookieJar<'_>) {
        cookies.remove(SESSION_COOKIE);
    }

    /// Deserialize a session from a cookie.
    fn from_cookie(cookie: &Cookie<'static>, config: &Config) -> Result<Self, JwtError> {
        jsonwebtoken::decode(
            cookie.value(),
            &DecodingKey::from_secret(config.jwt_secret()),
            &Validation::default(),
        )
        .map(|data: TokenData<Claims>| data.claims.session)
    }
}

/// Validation for `Voting` → `Confirming`, in order: president pick set,
/// exactly K board picks, distinctness, candidate-set membership.
fn validate_selection(
    selection: BallotSelection,
    election: &Election,
) -> Result<VoteRecord, Error> {
    let BallotSelection { president, board } = selection;
    let seats = election.seats();

    let president = president
        .filter(|p| !p.is_empty())
        .ok_or_else(|| Error::IncompleteSelection("no president selected".to_string()))?;
    if board.len() != seats {
        return Err(Error::IncompleteSelection(format!(
            "expected {seats} board picks, got {}",
            board.len()
        )));
    }
    // The selection UI removes already-picked candidates from subsequent
    // slots, so duplicates should be impossible; re-check anyway.
    for (i, pick) in board.iter().enumerate() {
        if board[..i].contains(pick) {
            return Err(Error::DuplicateSelection);
        }
    }
    if !election.is_president_candidate(&president) {
        return Err(Error::BadRequest(format!(
            "unknown president candidate {president}"
        )));
    }
    if let Some(pick) = board.iter().find(|p| !election.is_board_candidate(p)) {
        return Err(Error::BadRequest(format!("unknown board candidate {pick}")));
    }

    Ok(VoteRecord { president, board })
}

/// Cookie claims: the session itself plus an expiry datetime.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(flatten)]
    session: BallotSession,
    #[serde(rename = "exp", with = "ts_seconds")]
    expire_at: DateTime<Utc>,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for BallotSession {
    type Error = std::convert::Infallible;

    /// Read the session from the cookie; absent, expired, or tampered
    /// cookies read as `Anonymous`.
    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let config = req.guard::<&State<Config>>().await.unwrap(); // Valid as `Config` is always managed
        let session = req
            .cookies()
            .get(SESSION_COOKIE)
            .and_then(|cookie| Self::from_cookie(cookie, config).ok())
            .unwrap_or(Self::Anonymous);
        request::Outcome::Success(session)
    }
}
