use std::path::PathBuf;

use thiserror::Error;

/// Process-level failures mapped to exit codes. Per-query failures never
/// reach this type.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] tickchart_core::ValidationError),

    #[error("output directory '{}' does not exist or is not a directory", path.display())]
    OutputDir { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::OutputDir { .. } => 2,
            Self::Io(_) => 10,
        }
    }
}
