use futures_util::{pin_mut, StreamExt};
use tracing::{info, warn};

use crate::{
    file_svc::SourceFile,
    hash_svc,
    status_svc::{FileStatus, StatusService},
    summary::{RunSummary, TransferOutcome},
    time_provider::TimeProvider,
    transfer_service::TransferService,
};

///
/// Drives one transfer job end to end: checksums every source file,
/// asks the `StatusService` whether the destination copy is current,
/// and hands the files that need copying to the `TransferService`.
/// Per-file errors are recorded in the summary and the batch keeps
/// going.
///
pub struct TransferRunner<'a> {
    status_svc: &'a dyn StatusService,
    transfer_svc: &'a mut dyn TransferService,
    time_provider: &'a dyn TimeProvider,
}

impl<'a> TransferRunner<'a> {
    pub fn new(
        status_svc: &'a dyn StatusService,
        transfer_svc: &'a mut dyn TransferService,
        time_provider: &'a dyn TimeProvider,
    ) -> Self {
        Self { status_svc, transfer_svc, time_provider }
    }

    pub async fn run(&mut self, files: Vec<SourceFile>) -> RunSummary {
        let mut summary = RunSummary::new(self.time_provider.utc_start());
        info!("starting transfer run over {} files", files.len());

        let checksums = hash_svc::gen_checksums(files);
        pin_mut!(checksums);
        while let Some((file, cx)) = checksums.next().await {
            let hsh = match cx {
                Ok(hsh) => hsh,
                Err(e) => {
                    warn!("failed to checksum source {}: {:?}", file.rel_path.display(), e);
                    summary.record(file.rel_path, TransferOutcome::Failed(format!("source checksum: {:?}", e)));
                    continue;
                }
            };

            match self.status_svc.file_status(&file.rel_path, &hsh).await {
                Ok(FileStatus::UpToDate) => {
                    info!("{} already transferred, skipping", file.rel_path.display());
                    summary.record(file.rel_path, TransferOutcome::Skipped);
                }
                Ok(status) => {
                    if status == FileStatus::Stale {
                        info!("{} is stale at the destination, recopying", file.rel_path.display());
                    }
                    match self.transfer_svc.transfer_data(&file.abs_path, &file.rel_path, &hsh).await {
                        Ok(()) => {
                            info!("transferred {}", file.rel_path.display());
                            summary.record(file.rel_path, TransferOutcome::Copied);
                        }
                        Err(e) => {
                            warn!("failed to transfer {}: {:?}", file.rel_path.display(), e);
                            summary.record(file.rel_path, TransferOutcome::Failed(format!("{:?}", e)));
                        }
                    }
                }
                Err(e) => {
                    warn!("failed to check status of {}: {:?}", file.rel_path.display(), e);
                    summary.record(file.rel_path, TransferOutcome::Failed(format!("status check: {:?}", e)));
                }
            }
        }

        info!(
            "transfer run complete: {} copied, {} skipped, {} failed",
            summary.copied(), summary.skipped(), summary.failed()
        );
        summary
    }
}
