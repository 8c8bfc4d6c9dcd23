pub mod grid;
pub mod parse;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

/// Run `job` for each document on the blocking pool.
///
/// Documents are processed concurrently; results come back in input order.
pub async fn run_each<T, F>(documents: Vec<PathBuf>, job: F) -> Result<Vec<(PathBuf, Result<T>)>>
where
    T: Send + 'static,
    F: Fn(&Path) -> Result<T> + Send + Sync + 'static,
{
    let job = Arc::new(job);
    let handles: Vec<_> = documents
        .into_iter()
        .map(|path| {
            let job = Arc::clone(&job);
            tokio::task::spawn_blocking(move || {
                let result = job(&path);
                (path, result)
            })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await?);
    }
    Ok(results)
}
