use std::path::PathBuf;

use chrono::NaiveDateTime;

use crate::collections::GroupBy;

///
/// The per-file outcome of one transfer attempt
///
#[derive(Clone, Debug, PartialEq)]
pub enum TransferOutcome {
    /// Copied to the destination and verified by checksum
    Copied,
    /// The destination already held an identical copy
    Skipped,
    /// The copy, or its verification, failed
    Failed(String),
}

#[derive(Clone, Debug)]
pub struct TransferResult {
    pub rel_path: PathBuf,
    pub outcome: TransferOutcome,
}

///
/// Aggregate of every `TransferResult` produced by one run
///
#[derive(Debug)]
pub struct RunSummary {
    pub started: NaiveDateTime,
    results: Vec<TransferResult>,
}

impl RunSummary {
    pub fn new(started: NaiveDateTime) -> Self {
        Self { started, results: Vec::new() }
    }

    pub fn record(&mut self, rel_path: PathBuf, outcome: TransferOutcome) {
        self.results.push(TransferResult { rel_path, outcome });
    }

    pub fn copied(&self) -> usize {
        self.count(|o| matches!(o, TransferOutcome::Copied))
    }
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, TransferOutcome::Skipped))
    }
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, TransferOutcome::Failed(_)))
    }

    /// The run succeeded only if no file failed to copy or verify
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn results(&self) -> &[TransferResult] {
        &self.results
    }

    fn count(&self, whr: fn(&TransferOutcome) -> bool) -> usize {
        self.results.iter().filter(|r| whr(&r.outcome)).count()
    }

    ///
    /// Renders the end-of-run report: the outcome counts, then every
    /// failure with its reason, grouped by parent directory
    ///
    pub fn render(&self) -> String {
        let mut report = format!(
            "run started {} | {} copied, {} skipped, {} failed",
            self.started, self.copied(), self.skipped(), self.failed()
        );

        let failures = self.results.iter()
            .filter_map(|r| match &r.outcome {
                TransferOutcome::Failed(reason) => Some((r.rel_path.clone(), reason.clone())),
                _ => None,
            })
            .group_by(|(path, _)| path.parent().map(|p| p.to_path_buf()).unwrap_or_default());

        let mut dirs: Vec<_> = failures.into_iter().collect();
        dirs.sort_by(|a, b| a.0.cmp(&b.0));
        for (dir, mut files) in dirs {
            report.push_str(&format!("\nfailed under {}/:", dir.display()));
            files.sort_by(|a, b| a.0.cmp(&b.0));
            for (path, reason) in files {
                report.push_str(&format!("\n  {} - {}", path.display(), reason));
            }
        }

        report
    }
}
