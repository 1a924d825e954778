use std::path::PathBuf;

use crate::hash_svc;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    IOError(std::io::Error),
    ChecksumError(hash_svc::error::Error),
    ChecksumMismatch { path: PathBuf, expected: String, found: String },
}

impl From<tokio::io::Error> for Error {
    fn from(value: tokio::io::Error) -> Self {
        Error::IOError(value)
    }
}

impl From<hash_svc::error::Error> for Error {
    fn from(value: hash_svc::error::Error) -> Self {
        Error::ChecksumError(value)
    }
}
