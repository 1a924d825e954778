use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mr_transfer::{
    config::Config,
    file_svc::get_source_files,
    runner::TransferRunner,
    status_svc::DestStatusService,
    study,
    time_provider::CoreTimeProvider,
    transfer_service::FileTransferService,
};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

///
/// Transfers MR scan data from the MRRC mount into the PET data tree,
/// copying only files that are missing or stale at the destination and
/// verifying every copy by checksum.
///
#[derive(Debug, Parser)]
#[command(name = "mr_transfer")]
struct Cli {
    /// Source directory holding the MR scan files
    source: PathBuf,
    /// Destination directory the scans are mirrored into
    dest: PathBuf,
    /// Glob patterns, relative to the source root, selecting the files to
    /// transfer; overrides the configured patterns
    #[arg(short, long)]
    pattern: Vec<String>,
    /// Study name; with --subject and --scan, the destination becomes
    /// `<dest>/<study>_mr/<mr_date>_<subject>/3d_dicom`
    #[arg(long, requires = "subject", requires = "scan")]
    study: Option<String>,
    /// Subject PET ID
    #[arg(long, requires = "study")]
    subject: Option<String>,
    /// Scan directory name on the MR server, `<scanner>_<date>_<id>`
    #[arg(long, requires = "study")]
    scan: Option<String>,
    /// Path to the JSON config file
    #[arg(long, default_value = "config.json")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let config_path = std::env::var("MR_TRANSFER_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| cli.config.clone());
    let config = match load_config(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("invalid config {}: {}", config_path.display(), e);
            return ExitCode::from(2);
        }
    };

    if !cli.source.is_dir() {
        error!("source directory not found: {}", cli.source.display());
        return ExitCode::from(2);
    }

    let dest_root = match resolve_dest_root(&cli) {
        Ok(dest_root) => dest_root,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(2);
        }
    };
    warn_on_existing_mr_files(&dest_root);

    let patterns = if cli.pattern.is_empty() { config.transfer_globs } else { cli.pattern };
    let files = match get_source_files(&cli.source, &patterns) {
        Ok(files) => files,
        Err(e) => {
            error!("failed to enumerate source files: {:?}", e);
            return ExitCode::from(2);
        }
    };

    let status_svc = DestStatusService::new(dest_root.clone());
    let mut transfer_svc = FileTransferService::new(dest_root);
    let time_provider = CoreTimeProvider::new();

    let mut runner = TransferRunner::new(&status_svc, &mut transfer_svc, &time_provider);
    let summary = runner.run(files).await;

    println!("{}", summary.render());
    if summary.is_success() { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn load_config(path: &PathBuf) -> Result<Config, String> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&contents).map_err(|e| e.to_string())
}

///
/// The destination root is either the directory given on the command
/// line, or the PET data layout beneath it when a study is named.
///
fn resolve_dest_root(cli: &Cli) -> Result<PathBuf, String> {
    let (study, subject, scan) = match (&cli.study, &cli.subject, &cli.scan) {
        (Some(study), Some(subject), Some(scan)) => (study, subject, scan),
        _ => return Ok(cli.dest.clone()),
    };

    if study::pi_for_study(study).is_none() {
        return Err(format!("no matching PI found for the study: {}", study));
    }
    study::pet_scan_dir(&cli.dest, study, scan, subject)
        .ok_or_else(|| format!("scan name {:?} has no date component", scan))
}

///
/// The original workflow asked before writing into a scan directory
/// that already holds MR files; running unattended, we log it instead.
///
fn warn_on_existing_mr_files(dest_root: &PathBuf) {
    let Some(ptn) = dest_root.join("[MS]R*").to_str().map(str::to_string) else { return };
    let Ok(paths) = glob::glob(&ptn) else { return };

    let existing = paths.filter_map(|p| p.ok()).count();
    if existing > 1 {
        warn!("{} already contains {} MR files", dest_root.display(), existing);
    }
}
