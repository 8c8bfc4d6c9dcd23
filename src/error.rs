//! Crate-level error type.

use thiserror::Error;

use crate::interp::InterpError;
use crate::report::ReportError;

/// Any failure between reading a document and rendering its grid
#[derive(Error, Debug)]
pub enum Error {
    #[error("report error: {0}")]
    Report(#[from] ReportError),

    #[error("interpolation error: {0}")]
    Interp(#[from] InterpError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Format error: {0}")]
    Format(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
