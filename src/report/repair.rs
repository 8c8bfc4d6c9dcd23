//! Gap filling for thickness readings the instrument could not solve.

use super::{ReportError, Result};

/// Replace every `None` with a value linearly interpolated from the nearest
/// valid neighbours, using the array index as the interpolation axis.
///
/// Gaps before the first or after the last valid reading are clamped to that
/// reading. An empty series is returned as-is; a non-empty series with no
/// valid reading cannot be repaired.
pub fn repair_missing(series: &[Option<f64>]) -> Result<Vec<f64>> {
    if series.is_empty() {
        return Ok(Vec::new());
    }

    let anchors: Vec<(usize, f64)> = series
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i, v)))
        .collect();

    let (Some(&first), Some(&last)) = (anchors.first(), anchors.last()) else {
        return Err(ReportError::UnrepairableSeries { len: series.len() });
    };

    // Index into `anchors` of the last anchor at or before the current position.
    let mut left = 0;
    let repaired = series
        .iter()
        .enumerate()
        .map(|(i, v)| {
            if let Some(v) = v {
                return *v;
            }
            if i < first.0 {
                return first.1;
            }
            if i > last.0 {
                return last.1;
            }
            while anchors[left + 1].0 < i {
                left += 1;
            }
            let (x0, y0) = anchors[left];
            let (x1, y1) = anchors[left + 1];
            let t = (i - x0) as f64 / (x1 - x0) as f64;
            y0 + t * (y1 - y0)
        })
        .collect();

    Ok(repaired)
}
