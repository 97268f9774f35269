//! Error taxonomy for the diversion core.
//!
//! Only configuration and input errors live here. "No usable alternate" is an
//! operational outcome and is reported through `RankingResult`, never as an error.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DivertError {
    #[error("unknown failure kind '{0}'")]
    UnknownFailureKind(String),
    #[error("unknown aircraft type '{0}'")]
    UnknownAircraftType(String),
    #[error("failed to read table '{}': {source}", path.display())]
    TableIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse table: {0}")]
    TableParse(#[from] serde_json::Error),
    #[error("invalid table: {0}")]
    InvalidTable(String),
}

pub type Result<T> = std::result::Result<T, DivertError>;
