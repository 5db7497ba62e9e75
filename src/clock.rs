use crate::error::Error;
use crate::result::Result;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};

/// Source of the current local time, injectable so tests can pin a
/// fixed timestamp instead of depending on the wall clock.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Check a strftime pattern before any archiving starts. An unknown
/// specifier would otherwise surface mid-batch while formatting.
pub fn validate_pattern(pattern: &str) -> Result<()> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(Error::TimestampFormat(pattern.to_string()));
    }
    Ok(())
}

#[cfg(test)]
pub struct FixedClock(pub DateTime<Local>);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}
