use axum::{http::StatusCode, response::IntoResponse};
use surrealdb::Error as SError;

use thiserror::Error;
use tracing::{error, warn};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("SurrealDb Error: {0}")]
    StorageError(#[from] SError),

    #[error("Io Error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Validator Error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Json Rejection Error: {0}")]
    AxumJsonRejection(#[from] axum::extract::rejection::JsonRejection),

    // ! Beacons
    #[error("Beacon with key `{0}` already exists")]
    DuplicateKey(String),

    #[error("Key `{0}` matches more than one record")]
    AmbiguousResult(String),

    #[error("No beacon found with key `{0}`")]
    BeaconNotFound(String),

    #[error("No rendezvous found with id `{0}`")]
    RendezvousNotFound(String),

    #[error("Beacon creation failed after {attempts} attempts")]
    BeaconCreationFailed { attempts: u32 },

    #[error("Beacon key must not be empty")]
    InvalidKey,

    #[error("Invalid date `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Unable to determine request origin")]
    UnknownOrigin,

    #[error("Rendezvous payload `{0}` is unavailable")]
    PayloadUnavailable(String),

    #[error("Internal Server Error")]
    InternalServerError,
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let internal = || {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Error".to_string(),
            )
        };
        let (status, message) = match self {
            Error::StorageError(error) => {
                error!("Surreal Error:{:#?}", error);
                internal()
            }
            Error::IoError(error) => {
                error!("Io Error:{:#?}", error);
                internal()
            }
            Error::ValidationError(error) => {
                let message = format!("Input validation error: [{}]", error).replace('\n', ", ");
                warn!("Validation Error:{:#?}", error);
                (StatusCode::BAD_REQUEST, message)
            }
            Error::AxumJsonRejection(error) => {
                warn!("Axum Json Rejection Error:{:#?}", error);
                (StatusCode::BAD_REQUEST, error.to_string())
            }
            Error::DuplicateKey(_) | Error::AmbiguousResult(_) => {
                (StatusCode::CONFLICT, self.to_string())
            }
            Error::BeaconNotFound(_) | Error::RendezvousNotFound(_) => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            Error::BeaconCreationFailed { attempts } => {
                error!("Beacon creation failed after {} attempts", attempts);
                internal()
            }
            Error::PayloadUnavailable(path) => {
                error!("Rendezvous payload missing at {}", path);
                internal()
            }
            Error::InternalServerError => internal(),
            Error::InvalidKey | Error::InvalidDate(_) | Error::UnknownOrigin => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
        };
        (status, message).into_response()
    }
}
