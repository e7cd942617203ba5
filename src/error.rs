// ⚠️ Error taxonomy for the SLCSP pipeline
//
// Unresolvable codes are NOT errors: they become an empty rate in the output.

use std::path::PathBuf;
use thiserror::Error;

/// Which input table a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Zips,
    Plans,
    Queries,
}

impl Table {
    pub fn name(&self) -> &str {
        match self {
            Table::Zips => "zips",
            Table::Plans => "plans",
            Table::Queries => "slcsp",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Error)]
pub enum SlcspError {
    /// An input table could not be opened or read
    #[error("Check if file is accessible: {}: {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A requested postal code is not exactly 5 digits
    #[error("Please check to make sure zipcode is of 5 digits. This zipcode is invalid: {0}")]
    InvalidQueryFormat(String),

    /// A row failed the structural checks (column count, numeric rate)
    #[error("Malformed {table} record at line {line}: {reason}")]
    MalformedRecord {
        table: Table,
        line: usize,
        reason: String,
    },

    #[error("Failed to write results: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write CSV results: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to write JSON results: {0}")]
    Json(#[from] serde_json::Error),
}

impl SlcspError {
    pub fn source_unavailable(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        SlcspError::SourceUnavailable {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Process exit status for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            SlcspError::SourceUnavailable { .. } => 1,
            SlcspError::InvalidQueryFormat(_) => 2,
            SlcspError::MalformedRecord { .. } => 3,
            SlcspError::Io(_) | SlcspError::Csv(_) | SlcspError::Json(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, SlcspError>;
