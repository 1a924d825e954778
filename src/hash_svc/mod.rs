pub mod error;

use std::path::Path;

use async_stream::stream;
use base64::{engine::general_purpose::STANDARD, Engine};
use futures_util::Stream;
use lazy_static::lazy_static;
use tokio::{io::AsyncReadExt, sync::Semaphore, task::JoinSet};

use crate::file_svc::SourceFile;

use error::*;

lazy_static! {
    static ref POOL: Semaphore = Semaphore::new(num_cpus::get());
}

///
/// Generates MD5 checksums for all the provided source files, with
/// concurrency bounded by the CPU count. Yields each file paired with
/// its checksum, in completion order.
///
pub fn gen_checksums(files: impl IntoIterator<Item = SourceFile>) -> impl Stream<Item = (SourceFile, Result<String>)> {
    // Create an async Stream
    stream! {
        // All tasks joined together at the end of the process
        let mut tasks = JoinSet::new();
        // For every source file found, generate a new task to compute
        // its MD5 checksum, to be returned
        for file in files {
            tasks.spawn(async move {
                let res = checksum_file(&file.abs_path).await;
                (file, res)
            });
        }

        // Yield each file/checksum pair generated from the tasks spawned above
        while let Some(cx) = tasks.join_next().await {
            yield cx.expect("checksum task panicked");
        }
    }
}

///
/// Computes the MD5 checksum, base64-encoded, of the file found at the
/// given path
///
pub async fn checksum_file(path: &Path) -> Result<String> {
    // Get a lock on the static semaphore
    let _permit = POOL.acquire().await.unwrap();

    // The MD5 hash, generated over time while the file is being
    // asynchronously processed
    let mut md5_ctx = md5::Context::new();
    // Buffer for the current bytes being read from the file
    let mut bytes = [0u8; 8192];

    // Open the file, and create a buffered reader to read the contents
    let file = tokio::fs::File::open(path).await?;
    let mut file_reader = tokio::io::BufReader::new(file);

    // Loop until the end of the file has been reached, adding the read
    // bytes to the MD5 hash
    loop {
        match file_reader.read(&mut bytes).await? {
            0 => break,
            n => md5_ctx.consume(&bytes[..n]),
        }
    }

    Ok(STANDARD.encode(md5_ctx.compute().0))
}

#[cfg(test)]
mod tests {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use futures_util::{pin_mut, StreamExt};

    use crate::file_svc::SourceFile;

    use super::{checksum_file, gen_checksums};

    #[tokio::test]
    async fn test_checksum_file_matches_whole_file_digest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("MR0001");
        std::fs::write(&path, b"not really dicom data").unwrap();

        let hsh = checksum_file(&path).await.unwrap();
        let expected = STANDARD.encode(md5::compute(b"not really dicom data").0);
        assert_eq!(hsh, expected);
    }

    #[tokio::test]
    async fn test_checksum_file_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(checksum_file(&dir.path().join("absent")).await.is_err());
    }

    #[tokio::test]
    async fn test_gen_checksums_yields_every_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut files = Vec::new();
        for name in ["MR0001", "MR0002", "MR0003"] {
            let abs_path = dir.path().join(name);
            std::fs::write(&abs_path, name).unwrap();
            files.push(SourceFile { abs_path, rel_path: name.into() });
        }

        let checksums = gen_checksums(files);
        pin_mut!(checksums);

        let mut yielded = Vec::new();
        while let Some((file, res)) = checksums.next().await {
            let expected = STANDARD.encode(md5::compute(std::fs::read(&file.abs_path).unwrap()).0);
            assert_eq!(res.unwrap(), expected);
            yielded.push(file.rel_path);
        }
        yielded.sort();
        assert_eq!(yielded, vec!["MR0001", "MR0002", "MR0003"].into_iter().map(Into::into).collect::<Vec<std::path::PathBuf>>());
    }

    #[tokio::test]
    async fn test_gen_checksums_reports_unreadable_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = SourceFile {
            abs_path: dir.path().join("vanished"),
            rel_path: "vanished".into(),
        };

        let checksums = gen_checksums(vec![file]);
        pin_mut!(checksums);

        let (file, res) = checksums.next().await.unwrap();
        assert_eq!(file.rel_path, std::path::Path::new("vanished"));
        assert!(res.is_err());
    }
}
