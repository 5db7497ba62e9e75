use crate::error::Error;
use std::str::FromStr;

/// Supported archive formats. Validated at the command-line boundary,
/// never inside the archiving step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Zip,
    Tar,
    GzTar,
    BzTar,
    XzTar,
}

impl Format {
    /// Accepted `--format` tokens, in help-text order.
    pub const TOKENS: [&'static str; 5] = ["zip", "tar", "gztar", "bztar", "xztar"];

    /// Get the format token as used on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Zip => "zip",
            Format::Tar => "tar",
            Format::GzTar => "gztar",
            Format::BzTar => "bztar",
            Format::XzTar => "xztar",
        }
    }

    /// Canonical filename extension for archives of this format
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Zip => "zip",
            Format::Tar => "tar",
            Format::GzTar => "tar.gz",
            Format::BzTar => "tar.bz2",
            Format::XzTar => "tar.xz",
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zip" => Ok(Format::Zip),
            "tar" => Ok(Format::Tar),
            "gztar" => Ok(Format::GzTar),
            "bztar" => Ok(Format::BzTar),
            "xztar" => Ok(Format::XzTar),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
