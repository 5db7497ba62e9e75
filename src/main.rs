mod archive;
mod args;
mod batch;
mod clock;
mod error;
mod format;
mod resolve;
mod result;
mod utils;

use args::Args;
use batch::BatchOutcome;
use clock::SystemClock;

fn main() {
    match run() {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(e) => {
            eprintln!("[error] {}", e);
            std::process::exit(1);
        }
    }
}

fn run() -> result::Result<BatchOutcome> {
    // Parse command-line arguments; the format set is validated here
    let args = Args::parse()?;

    // Reject a bad timestamp pattern before touching the filesystem
    clock::validate_pattern(&args.timestamp_format)?;

    batch::run(&args, &SystemClock)
}
