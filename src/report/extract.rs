//! Regex extraction of labelled fields from report text.
//!
//! Every function here is a pure scan over the text blob. The report layout
//! has no nesting, so there is no parser state: a scalar is the first match of
//! its label, a series is every match in document order.

use std::sync::LazyLock;

use regex::Regex;

use super::{ReportError, Result};

/// Markers the instrument prints in place of a `Thick1=` value when the
/// ellipsometry model did not converge. The misspelt variant is what some
/// firmware revisions actually emit.
pub const MISSING_MARKERS: [&str; 2] = ["No Solution", "No Soution"];

/// `Thick1=<value>,` or a bare missing marker, in a single alternation so that
/// a left-to-right scan keeps both kinds of hit in document order.
static THICKNESS_PATTERN: LazyLock<std::result::Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"Thick1=\s*([^,]*?),|No Sol?ution"));

/// Find the first `<label> <value>` pair and parse the value as a float.
///
/// The value is the whitespace-delimited token after the label, which is how
/// the summary table prints `StdDev` and `Mean`.
pub fn extract_scalar(text: &str, label: &str) -> Result<f64> {
    let pattern = Regex::new(&format!(r"{}\s*(\S+)\s", regex::escape(label)))?;
    let raw = pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| ReportError::FieldNotFound {
            label: label.to_string(),
        })?;

    parse_number(label, raw.as_str())
}

/// Collect every `<label>=<value>,` capture in document order.
///
/// Surrounding whitespace is trimmed. Converting the captures is left to the
/// caller.
///
/// Text layers often glue a site number onto the label (`12R= 5.0,`), so a
/// digit or punctuation before the label is accepted. A letter is not, which
/// keeps `R=` from matching the tail of another label such as `HR=`.
pub fn extract_series(text: &str, label: &str) -> Result<Vec<String>> {
    let pattern = Regex::new(&format!(r"{}=\s*([^,]*?),", regex::escape(label)))?;

    Ok(pattern
        .captures_iter(text)
        .filter(|caps| {
            let start = caps.get(0).map_or(0, |m| m.start());
            !text[..start]
                .chars()
                .next_back()
                .is_some_and(char::is_alphabetic)
        })
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .collect())
}

/// Collect the thickness readings in document order, `None` for a reading the
/// instrument reported as a missing marker.
pub fn extract_thickness_series(text: &str) -> Result<Vec<Option<String>>> {
    let pattern = THICKNESS_PATTERN.as_ref().map_err(Clone::clone)?;

    Ok(pattern
        .captures_iter(text)
        .map(|caps| {
            caps.get(1)
                .map(|m| m.as_str().trim())
                .filter(|value| !is_missing_marker(value))
                .map(str::to_string)
        })
        .collect())
}

/// Parse a captured token as a finite float, naming the field on failure.
pub fn parse_number(field: &str, raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ReportError::MalformedNumber {
            field: field.to_string(),
            value: trimmed.to_string(),
        })
}

fn is_missing_marker(value: &str) -> bool {
    value.is_empty() || MISSING_MARKERS.contains(&value)
}
