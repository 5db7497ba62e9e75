use crate::format::Format;
use crate::result::Result;
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;

const DEFAULT_DEST: &str = "backups";
const DEFAULT_FORMAT: &str = "zip";
const DEFAULT_PREFIX: &str = "backup";
const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Command-line arguments for the packup tool
#[derive(Debug)]
pub struct Args {
    /// Files or directories to archive, in input order
    pub sources: Vec<String>,

    /// Output directory for the archives
    pub dest: PathBuf,

    /// Archive format
    pub format: Format,

    /// Filename prefix for generated archives
    pub prefix: String,

    /// strftime pattern for timestamps appended to filenames
    pub timestamp_format: String,

    /// Enable verbose output
    pub verbose: bool,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse() -> Result<Self> {
        let matches = Command::new("packup")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Create timestamped archives for the provided sources")
            .arg(
                Arg::new("sources")
                    .value_name("SOURCE")
                    .num_args(1..)
                    .required(true)
                    .help("Files or directories to archive")
            )
            .arg(
                Arg::new("dest")
                    .short('d')
                    .long("dest")
                    .value_name("PATH")
                    .default_value(DEFAULT_DEST)
                    .help("Output directory for the archives")
            )
            .arg(
                Arg::new("format")
                    .short('f')
                    .long("format")
                    .value_name("FMT")
                    .value_parser(Format::TOKENS)
                    .default_value(DEFAULT_FORMAT)
                    .help("Archive format")
            )
            .arg(
                Arg::new("prefix")
                    .short('p')
                    .long("prefix")
                    .value_name("NAME")
                    .default_value(DEFAULT_PREFIX)
                    .help("Filename prefix for generated archives")
            )
            .arg(
                Arg::new("timestamp-format")
                    .short('t')
                    .long("timestamp-format")
                    .value_name("PATTERN")
                    .default_value(DEFAULT_TIMESTAMP_FORMAT)
                    .help("strftime pattern for timestamps appended to filenames")
            )
            .arg(
                Arg::new("verbose")
                    .short('v')
                    .long("verbose")
                    .action(ArgAction::SetTrue)
                    .help("Enable verbose output")
            )
            .get_matches();

        Ok(Self {
            sources: matches
                .get_many::<String>("sources")
                .map(|values| values.cloned().collect())
                .unwrap_or_default(),
            dest: matches
                .get_one::<String>("dest")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DEST)),
            format: matches
                .get_one::<String>("format")
                .map(String::as_str)
                .unwrap_or(DEFAULT_FORMAT)
                .parse()?,
            prefix: matches
                .get_one::<String>("prefix")
                .cloned()
                .unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
            timestamp_format: matches
                .get_one::<String>("timestamp-format")
                .cloned()
                .unwrap_or_else(|| DEFAULT_TIMESTAMP_FORMAT.to_string()),
            verbose: matches.get_flag("verbose"),
        })
    }
}
