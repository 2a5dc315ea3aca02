use std::{fmt, io, num::ParseIntError, result};

#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    ParseInt(ParseIntError),
    Json(serde_json::Error),
    InvalidTuning(String),
}

pub type Result<T> = result::Result<T, Error>;

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::ParseInt(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::InvalidTuning(_) => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::ParseInt(err) => write!(f, "not an integer: {}", err),
            Error::Json(err) => write!(f, "invalid JSON: {}", err),
            Error::InvalidTuning(reason) => write!(f, "invalid tuning: {}", reason),
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<ParseIntError> for Error {
    fn from(e: ParseIntError) -> Self {
        Error::ParseInt(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}
