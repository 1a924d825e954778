pub mod error;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::hash_svc;

use self::error::*;

#[derive(Clone, Debug, PartialEq)]
pub enum FileStatus {
    /// No destination copy exists yet
    Missing,
    /// A destination copy exists, but its checksum differs from the source
    Stale,
    /// The destination copy matches the source checksum
    UpToDate,
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait StatusService : Send + Sync {
    ///
    /// Retrieves the transfer status of the file at `rel_path`, given the
    /// checksum `hsh` of its source copy. A file either still needs to be
    /// transferred (whether missing from the destination or already
    /// existing, but with a different checksum), or has a matching
    /// destination checksum, in which case no copy is required.
    ///
    async fn file_status(&self, rel_path: &Path, hsh: &str) -> Result<FileStatus>;
}

pub struct DestStatusService {
    dest_root: PathBuf,
}

impl DestStatusService {
    pub fn new(dest_root: PathBuf) -> Self {
        Self { dest_root }
    }
}

#[async_trait]
impl StatusService for DestStatusService {
    async fn file_status(&self, rel_path: &Path, hsh: &str) -> Result<FileStatus> {
        let dest_path = self.dest_root.join(rel_path);
        if !tokio::fs::try_exists(&dest_path).await? {
            return Ok(FileStatus::Missing);
        }

        let dest_hsh = hash_svc::checksum_file(&dest_path).await?;
        if dest_hsh == hsh {
            Ok(FileStatus::UpToDate)
        } else {
            Ok(FileStatus::Stale)
        }
    }
}
