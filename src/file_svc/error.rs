use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    GlobPatternError(glob::PatternError),
    GlobError(glob::GlobError),
    NonUnicodePath(PathBuf),
}

impl From<glob::PatternError> for Error {
    fn from(value: glob::PatternError) -> Self {
        Error::GlobPatternError(value)
    }
}

impl From<glob::GlobError> for Error {
    fn from(value: glob::GlobError) -> Self {
        Error::GlobError(value)
    }
}
