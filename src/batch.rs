use crate::archive::{self, ArchiveRequest};
use crate::args::Args;
use crate::clock::Clock;
use crate::resolve;
use crate::result::Result;
use crate::utils;
use std::path::PathBuf;

/// Aggregated results of one batch run.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Paths of archives created, one per successful source
    pub created: Vec<PathBuf>,
    /// Sources whose archive attempt failed
    pub failed: Vec<PathBuf>,
}

impl BatchOutcome {
    /// Process exit status: success as long as at least one archive was
    /// created, total failure otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.created.is_empty() { 2 } else { 0 }
    }
}

/// Run the whole batch: destination setup and source validation are
/// fatal, per-source archive failures are reported and skipped.
pub fn run(args: &Args, clock: &dyn Clock) -> Result<BatchOutcome> {
    utils::ensure_dir(&args.dest)?;

    let sources = resolve::resolve_all(&args.sources)?;

    let mut outcome = BatchOutcome::default();

    for source in sources {
        if args.verbose {
            println!("Archiving {} as {}...", source.display(), args.format);
        }

        let request = ArchiveRequest {
            source: source.clone(),
            dest_dir: args.dest.clone(),
            format: args.format,
            prefix: args.prefix.clone(),
            timestamp_format: args.timestamp_format.clone(),
        };

        match archive::build(&request, clock) {
            Ok(archive_path) => {
                println!("[ok] {} -> {}", source.display(), archive_path.display());
                outcome.created.push(archive_path);
            }
            Err(e) => {
                eprintln!("[error] Failed to archive {}: {}", source.display(), e);
                outcome.failed.push(source);
            }
        }
    }

    Ok(outcome)
}
