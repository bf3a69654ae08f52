use crate::stats::GasStats;
use thiserror::Error;

mod terminal;
pub use terminal::TerminalReporter;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Statistics for one benchmark group, ready for display.
#[derive(Debug, Clone)]
pub struct GroupReport {
    pub name: String,
    pub stats: GasStats,
}

impl GroupReport {
    pub fn new(name: impl Into<String>, stats: GasStats) -> Self {
        Self {
            name: name.into(),
            stats,
        }
    }
}

pub trait Reporter: Send + Sync {
    fn report(&self, results: &[GroupReport]) -> Result<(), ReportError>;
}
