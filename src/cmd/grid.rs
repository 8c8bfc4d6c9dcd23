use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::debug;

use ellipsomap::output::{render_grid, save_grid};
use ellipsomap::{GridFormat, InterpolatedGrid, ScanReport};

use super::run_each;

pub struct GridOptions {
    pub points: usize,
    pub polar: bool,
    pub format: GridFormat,
    pub output: Option<PathBuf>,
}

/// Returns `false` if any document failed.
pub async fn cmd_grid(documents: Vec<PathBuf>, options: GridOptions) -> Result<bool> {
    let GridOptions {
        points,
        polar,
        format,
        output,
    } = options;

    // With several inputs, --output names a directory
    let output_dir = match &output {
        Some(dir) if documents.len() > 1 => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
            Some(dir.clone())
        }
        _ => None,
    };

    let start = Instant::now();
    let results = run_each(documents, move |path| grid_document(path, polar, points)).await?;
    debug!(
        documents = results.len(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "interpolation finished"
    );

    let mut ok = true;
    for (path, result) in results {
        let grid = match result {
            Ok(grid) => grid,
            Err(e) => {
                eprintln!("❌ {}: {e:#}", path.display());
                ok = false;
                continue;
            }
        };

        let target = match (&output_dir, &output) {
            (Some(dir), _) => Some(output_file(dir, &path, format)),
            (None, Some(file)) => Some(file.clone()),
            (None, None) => None,
        };

        match target {
            Some(target) => {
                if let Err(e) = save_grid(&grid, format, &target)
                    .with_context(|| format!("failed to write {}", target.display()))
                {
                    eprintln!("❌ {}: {e:#}", path.display());
                    ok = false;
                    continue;
                }
                eprintln!(
                    "✅ {}: {}×{} grid → {}",
                    path.display(),
                    grid.points(),
                    grid.points(),
                    target.display()
                );
            }
            None => {
                eprintln!("✅ {}: {}×{} grid", path.display(), grid.points(), grid.points());
                println!("{}", render_grid(&grid, format)?);
            }
        }
    }

    Ok(ok)
}

fn grid_document(path: &Path, polar: bool, points: usize) -> Result<InterpolatedGrid> {
    let report = ScanReport::from_document(path)?;
    Ok(report.interp_grid(polar, points)?)
}

fn output_file(dir: &Path, document: &Path, format: GridFormat) -> PathBuf {
    let stem = document
        .file_stem()
        .map_or_else(|| "grid".into(), |s| s.to_string_lossy());
    dir.join(format!("{stem}.{}", format.extension()))
}
