use log::warn;
use rocket::{http::Status, response::Responder};
use thiserror::Error;

use crate::sheets::BackendError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Table backend unavailable: {0}")]
    Backend(#[from] BackendError),
    #[error("This voter has already voted")]
    AlreadyVoted,
    #[error("Incomplete selection: {0}")]
    IncompleteSelection(String),
    #[error("The same candidate was selected more than once")]
    DuplicateSelection,
    #[error("Vote submission failed, safe to retry: {0}")]
    SubmissionFailed(#[source] BackendError),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, _: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        warn!("{self}");
        Err(match self {
            Self::Backend(_) | Self::SubmissionFailed(_) => Status::ServiceUnavailable,
            Self::AlreadyVoted => Status::Conflict,
            Self::IncompleteSelection(_) | Self::DuplicateSelection => Status::UnprocessableEntity,
            Self::BadRequest(_) => Status::BadRequest,
            Self::Unauthorized(_) => Status::Unauthorized,
        })
    }
}
