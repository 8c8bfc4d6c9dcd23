//! Scan report parsing.
//!
//! Turns the text layer of a Gaertner 2D ellipsometer report into a
//! [`ScanReport`]: the summary statistics plus three positionally aligned
//! per-site arrays (radius, angle, thickness).
//!
//! # Expected text
//!
//! ```text
//! ... StdDev 2.314 ...
//! ... Mean 1021.77 ...
//! R= 0.00, Theta= 0.00, Thick1= 1020.4, ...
//! R= 25.00, Theta= 90.00, No Solution ...
//! ```
//!
//! # Example
//!
//! ```rust
//! use ellipsomap::report::ScanReport;
//!
//! let text = "Mean 100.0 StdDev 1.5 \
//!     R= 0, Theta= 0, Thick1= 99.0, \
//!     R= 10, Theta= 90, No Solution \
//!     R= 10, Theta= 180, Thick1= 101.0,";
//! let report = ScanReport::parse(text).unwrap();
//! assert_eq!(report.len(), 3);
//! assert_eq!(report.thickness()[1], 100.0);
//! ```

pub mod extract;
pub mod repair;

use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

pub use extract::{extract_scalar, extract_series, extract_thickness_series, MISSING_MARKERS};
pub use repair::repair_missing;

use crate::source::SourceRouter;

/// Label of the thickness standard deviation in the summary table.
pub const STD_DEV_LABEL: &str = "StdDev";
/// Label of the mean thickness in the summary table.
pub const MEAN_LABEL: &str = "Mean";
/// Per-site radius label.
pub const RADIUS_LABEL: &str = "R";
/// Per-site angle label (degrees in the report).
pub const ANGLE_LABEL: &str = "Theta";
/// Per-site thickness label.
pub const THICKNESS_LABEL: &str = "Thick1";

/// Report parsing errors
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("field not found: {label}")]
    FieldNotFound { label: String },

    #[error("malformed number in {field}: {value:?}")]
    MalformedNumber { field: String, value: String },

    #[error(
        "series length mismatch: {radius} radius, {angle} angle, {thickness} thickness values"
    )]
    SeriesLengthMismatch {
        radius: usize,
        angle: usize,
        thickness: usize,
    },

    #[error("thickness series of {len} readings has no valid value to repair from")]
    UnrepairableSeries { len: usize },

    #[error("report has {found} measurement sites, at least 2 are required")]
    TooFewSamples { found: usize },

    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Source(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;

/// Parsed contents of one scan report.
///
/// Immutable once built: the per-site arrays always have equal length and
/// every thickness is a real number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanReport {
    mean_thickness: f64,
    std_dev_thickness: f64,
    radius: Vec<f64>,
    /// Radians.
    angle: Vec<f64>,
    thickness: Vec<f64>,
    /// Sites whose thickness was filled in by [`repair_missing`].
    repaired: Vec<usize>,
}

impl ScanReport {
    /// Parse a report from its concatenated text layer.
    pub fn parse(text: &str) -> Result<Self> {
        let std_dev_thickness = extract_scalar(text, STD_DEV_LABEL)?;
        let mean_thickness = extract_scalar(text, MEAN_LABEL)?;

        let radius = extract_series(text, RADIUS_LABEL)?
            .iter()
            .map(|raw| extract::parse_number(RADIUS_LABEL, raw))
            .collect::<Result<Vec<_>>>()?;
        let angle = extract_series(text, ANGLE_LABEL)?
            .iter()
            .map(|raw| extract::parse_number(ANGLE_LABEL, raw).map(f64::to_radians))
            .collect::<Result<Vec<_>>>()?;
        let raw_thickness = extract_thickness_series(text)?
            .into_iter()
            .map(|raw| {
                raw.map(|raw| extract::parse_number(THICKNESS_LABEL, &raw))
                    .transpose()
            })
            .collect::<Result<Vec<_>>>()?;

        if radius.len() != angle.len() || radius.len() != raw_thickness.len() {
            return Err(ReportError::SeriesLengthMismatch {
                radius: radius.len(),
                angle: angle.len(),
                thickness: raw_thickness.len(),
            });
        }
        if radius.len() < 2 {
            return Err(ReportError::TooFewSamples {
                found: radius.len(),
            });
        }

        let repaired: Vec<usize> = raw_thickness
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_none())
            .map(|(i, _)| i)
            .collect();
        let thickness = repair_missing(&raw_thickness)?;

        if !repaired.is_empty() {
            warn!(
                count = repaired.len(),
                sites = ?repaired,
                "interpolated thickness for unsolved sites"
            );
        }
        debug!(
            sites = radius.len(),
            mean = mean_thickness,
            std_dev = std_dev_thickness,
            "parsed scan report"
        );

        Ok(Self {
            mean_thickness,
            std_dev_thickness,
            radius,
            angle,
            thickness,
            repaired,
        })
    }

    /// Read a report document (PDF or extracted text) and parse it.
    pub fn from_document(path: &Path) -> Result<Self> {
        let text = SourceRouter::new().read(path)?;
        Self::parse(&text)
    }

    pub fn mean_thickness(&self) -> f64 {
        self.mean_thickness
    }

    pub fn std_dev_thickness(&self) -> f64 {
        self.std_dev_thickness
    }

    pub fn radius(&self) -> &[f64] {
        &self.radius
    }

    /// Site angles in radians.
    pub fn angle(&self) -> &[f64] {
        &self.angle
    }

    pub fn thickness(&self) -> &[f64] {
        &self.thickness
    }

    /// Indices of sites reported as "No Solution" and filled by interpolation.
    pub fn repaired(&self) -> &[usize] {
        &self.repaired
    }

    /// Number of measurement sites.
    pub fn len(&self) -> usize {
        self.radius.len()
    }

    /// `true` only for a report with no sites, which [`ScanReport::parse`] never returns.
    pub fn is_empty(&self) -> bool {
        self.radius.is_empty()
    }
}
