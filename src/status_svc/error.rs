use crate::hash_svc;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    ChecksumError(hash_svc::error::Error),
    IOError(std::io::Error),
}

impl From<hash_svc::error::Error> for Error {
    fn from(value: hash_svc::error::Error) -> Self {
        Error::ChecksumError(value)
    }
}

impl From<tokio::io::Error> for Error {
    fn from(value: tokio::io::Error) -> Self {
        Error::IOError(value)
    }
}
