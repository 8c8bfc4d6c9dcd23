//! `ellipsomap` - film-thickness maps from ellipsometer scan reports
//!
//! # Features
//!
//! - **Report parsing**: summary statistics and per-site radius / angle /
//!   thickness from the text layer of a Gaertner 2D ellipsometer report
//! - **Gap filling**: "No Solution" sites are linearly interpolated from
//!   their neighbours
//! - **Interpolation**: cubic RBF fit in Cartesian space, evaluated on a
//!   P×P mesh returned as (x, y) or (r, θ)
//! - **PDF input**: pdfium-backed text extraction behind the `pdf` feature
//!
//! # Example
//!
//! ```rust
//! use ellipsomap::ScanReport;
//!
//! let text = "StdDev 1.2 Mean 1000.0 \
//!     R= 0, Theta= 0, Thick1= 1000.0, \
//!     R= 25, Theta= 0, Thick1= 1001.0, \
//!     R= 25, Theta= 90, Thick1= 1002.0, \
//!     R= 25, Theta= 180, No Solution \
//!     R= 25, Theta= 270, Thick1= 999.0,";
//!
//! let report = ScanReport::parse(text)?;
//! let grid = report.interp_grid(false, 50)?;
//! assert_eq!(grid.value().shape(), (50, 50));
//! # Ok::<(), ellipsomap::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod interp;
pub mod output;
pub mod report;
pub mod source;

pub use config::Config;
pub use error::{Error, Result};
pub use interp::{interp_grid, CoordinateMode, CubicRbf, InterpError, InterpolatedGrid};
pub use output::{GridFormat, ReportFormat};
pub use report::{ReportError, ScanReport};
pub use source::{SourceRouter, TextSource};

/// Version of ellipsomap
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
