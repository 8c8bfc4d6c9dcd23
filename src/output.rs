//! Rendering of parsed reports and interpolated grids.
//!
//! Grids go to an external contour plotter, so the formats are plain: JSON
//! with row-major nested arrays, or long-form CSV with one node per line.

use std::fmt::Write as FmtWrite;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::interp::{CoordinateMode, InterpolatedGrid};
use crate::report::ScanReport;

/// Grid output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridFormat {
    /// JSON (default, nested row-major arrays)
    #[default]
    Json,
    /// CSV, one mesh node per line
    Csv,
}

impl GridFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

/// Parse summary output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// JSON (default, full per-site arrays)
    #[default]
    Json,
    /// Markdown (human-readable summary)
    Markdown,
}

/// Serialized form of an [`InterpolatedGrid`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridDocument {
    pub mode: CoordinateMode,
    pub points: usize,
    pub axis1: Vec<Vec<f64>>,
    pub axis2: Vec<Vec<f64>>,
    pub value: Vec<Vec<f64>>,
}

impl From<&InterpolatedGrid> for GridDocument {
    fn from(grid: &InterpolatedGrid) -> Self {
        let rows = |m: &nalgebra::DMatrix<f64>| -> Vec<Vec<f64>> {
            m.row_iter().map(|row| row.iter().copied().collect()).collect()
        };
        Self {
            mode: grid.mode(),
            points: grid.points(),
            axis1: rows(grid.axis1()),
            axis2: rows(grid.axis2()),
            value: rows(grid.value()),
        }
    }
}

/// Render a grid in the requested format.
pub fn render_grid(grid: &InterpolatedGrid, format: GridFormat) -> Result<String> {
    match format {
        GridFormat::Json => Ok(serde_json::to_string_pretty(&GridDocument::from(grid))?),
        GridFormat::Csv => grid_to_csv(grid),
    }
}

/// Render a grid and write it to `path`.
pub fn save_grid(grid: &InterpolatedGrid, format: GridFormat, path: &Path) -> Result<()> {
    let content = render_grid(grid, format)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Render a parsed report in the requested format.
pub fn render_report(report: &ScanReport, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        ReportFormat::Markdown => report_to_markdown(report),
    }
}

fn grid_to_csv(grid: &InterpolatedGrid) -> Result<String> {
    let [a1, a2] = grid.mode().axis_names();
    let mut csv = String::new();
    writeln!(csv, "{a1},{a2},value")?;
    for (u, v, value) in grid.nodes() {
        writeln!(csv, "{u},{v},{value}")?;
    }
    Ok(csv)
}

fn report_to_markdown(report: &ScanReport) -> Result<String> {
    let mut md = String::new();

    writeln!(md, "# Ellipsometer Scan Report\n")?;
    writeln!(md, "## Summary\n")?;
    writeln!(md, "- **Sites**: {}", report.len())?;
    writeln!(md, "- **Mean Thickness**: {}", report.mean_thickness())?;
    writeln!(md, "- **Std Dev**: {}", report.std_dev_thickness())?;

    let (t_min, t_max) = min_max(report.thickness());
    writeln!(md, "- **Thickness Range**: {t_min} – {t_max}")?;
    let (_, r_max) = min_max(report.radius());
    writeln!(md, "- **Max Radius**: {r_max}")?;

    if !report.repaired().is_empty() {
        writeln!(md, "\n### Repaired Sites\n")?;
        writeln!(
            md,
            "{} site(s) reported \"No Solution\" and were interpolated:\n",
            report.repaired().len()
        )?;
        for &i in report.repaired() {
            writeln!(
                md,
                "- Site {} (R={}, Theta={:.2}°): {:.4}",
                i + 1,
                report.radius()[i],
                report.angle()[i].to_degrees(),
                report.thickness()[i]
            )?;
        }
    }

    Ok(md)
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}
