pub mod error;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio_util::bytes::BytesMut;

use crate::hash_svc;

use self::error::*;

/// Suffix carried by in-flight destination files until they verify
const TMP_SUFFIX: &str = ".mrpart";

#[cfg_attr(test, automock)]
#[async_trait]
pub trait TransferService : Send {
    ///
    /// Copies the source file at `src_path` into the destination tree at
    /// `rel_path`. The data lands at a temporary path first and is only
    /// renamed into place once its checksum matches `hsh`; a mismatch
    /// removes the temporary file and fails the transfer.
    ///
    async fn transfer_data(&mut self, src_path: &Path, rel_path: &Path, hsh: &str) -> Result<()>;
}

pub struct FileTransferService {
    dest_root: PathBuf,
}

impl FileTransferService {
    pub fn new(dest_root: PathBuf) -> Self {
        Self { dest_root }
    }
}

#[async_trait]
impl TransferService for FileTransferService {
    async fn transfer_data(&mut self, src_path: &Path, rel_path: &Path, hsh: &str) -> Result<()> {
        let from_file = tokio::fs::OpenOptions::new().read(true).open(src_path).await?;
        let mut from_file = BufReader::new(from_file);

        let dest_path = self.dest_root.join(rel_path);
        if let Some(parent) = dest_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut tmp_path = dest_path.clone().into_os_string();
        tmp_path.push(TMP_SUFFIX);
        let tmp_path = PathBuf::from(tmp_path);

        let to_file = tokio::fs::OpenOptions::new()
            .write(true).create(true).truncate(true)
            .open(&tmp_path).await?;
        let mut to_file = BufWriter::new(to_file);

        let mut bytes = BytesMut::with_capacity(8192);
        let copied = async {
            while from_file.read_buf(&mut bytes).await? > 0 {
                to_file.write_all(&bytes[..]).await?;
                bytes.clear();
            }
            to_file.flush().await
        }.await;

        // Close the write handle before checksumming and renaming
        drop(to_file);

        if let Err(e) = copied {
            remove_tmp(&tmp_path).await;
            return Err(e.into());
        }

        let found = match hash_svc::checksum_file(&tmp_path).await {
            Ok(found) => found,
            Err(e) => {
                remove_tmp(&tmp_path).await;
                return Err(e.into());
            }
        };
        if found != hsh {
            remove_tmp(&tmp_path).await;
            return Err(Error::ChecksumMismatch {
                path: dest_path,
                expected: hsh.to_string(),
                found,
            });
        }

        Ok(tokio::fs::rename(&tmp_path, &dest_path).await?)
    }
}

async fn remove_tmp(tmp_path: &Path) {
    if let Err(e) = tokio::fs::remove_file(tmp_path).await {
        tracing::warn!("failed to remove {}: {:?}", tmp_path.display(), e);
    }
}
