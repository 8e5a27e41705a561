use anyhow::Error;
use std::fmt;
use tracing::{debug, error};

pub type FsResult<T> = Result<T, FsError>;

#[derive(Debug)]
pub enum FsError {
    PathNotFound(String),
    NotADirectory(String),
    AlreadyExists(String),
    InvalidName(String),
    NotFound(String),
    InvalidDestination(String),
    UnknownCommand(String),
    WrongArgumentCount(&'static str),
    Other(Error),
}

impl FsError {
    /// Logs the error and returns the message that ends up in the history.
    pub fn log_and_describe(&self) -> String {
        match self {
            FsError::Other(err) => error!("... {:?}", err),
            _ => debug!("... {}", self),
        }

        self.to_string()
    }

    pub fn kind(&self) -> FsErrorKind {
        match self {
            FsError::PathNotFound(_) => FsErrorKind::PathNotFound,
            FsError::NotADirectory(_) => FsErrorKind::NotADirectory,
            FsError::AlreadyExists(_) => FsErrorKind::AlreadyExists,
            FsError::InvalidName(_) => FsErrorKind::InvalidName,
            FsError::NotFound(_) => FsErrorKind::NotFound,
            FsError::InvalidDestination(_) => FsErrorKind::InvalidDestination,
            FsError::UnknownCommand(_) => FsErrorKind::UnknownCommand,
            FsError::WrongArgumentCount(_) => FsErrorKind::WrongArgumentCount,
            FsError::Other(_) => FsErrorKind::Other,
        }
    }
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FsError::PathNotFound(path) => write!(f, "no such file or directory: {}", path),
            FsError::NotADirectory(path) => write!(f, "not a directory: {}", path),
            FsError::AlreadyExists(path) => write!(f, "already exists: {}", path),
            FsError::InvalidName(name) => write!(f, "invalid name: {}", name),
            FsError::NotFound(path) => write!(f, "no such file or directory: {}", path),
            FsError::InvalidDestination(path) => write!(f, "invalid destination: {}", path),
            FsError::UnknownCommand(cmd) if cmd.is_empty() => write!(f, "please enter a command"),
            FsError::UnknownCommand(cmd) => write!(f, "unknown command: {}", cmd),
            FsError::WrongArgumentCount(usage) => write!(f, "usage: {}", usage),
            FsError::Other(err) => write!(f, "internal error: {}", err),
        }
    }
}

impl From<Error> for FsError {
    fn from(err: Error) -> Self {
        FsError::Other(err)
    }
}

/// Payload-free mirror of [`FsError`], recorded alongside history entries so
/// that callers can branch on the failure without parsing messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FsErrorKind {
    PathNotFound,
    NotADirectory,
    AlreadyExists,
    InvalidName,
    NotFound,
    InvalidDestination,
    UnknownCommand,
    WrongArgumentCount,
    Other,
}
