use std::path::PathBuf;

use anyhow::Result;

use ellipsomap::output::render_report;
use ellipsomap::{ReportFormat, ScanReport};

use super::run_each;

/// Returns `false` if any document failed.
pub async fn cmd_parse(documents: Vec<PathBuf>, format: ReportFormat) -> Result<bool> {
    let results = run_each(documents, |path| Ok(ScanReport::from_document(path)?)).await?;

    let mut ok = true;
    for (path, result) in results {
        match result {
            Ok(report) => {
                eprintln!(
                    "📄 {}: {} sites, {} repaired",
                    path.display(),
                    report.len(),
                    report.repaired().len()
                );
                println!("{}", render_report(&report, format)?);
            }
            Err(e) => {
                eprintln!("❌ {}: {e:#}", path.display());
                ok = false;
            }
        }
    }

    Ok(ok)
}
