//! Numeric field parsing for results-table cells
//!
//! The source reports come from a decimal-comma locale: percentages appear
//! as "8,4", isolate counts may carry "." thousands grouping ("1.234"), and
//! some percentages are reported as a range ("8-10") that collapses to its
//! arithmetic mean.

use crate::app::models::Cell;
use crate::{Error, Result};

/// Parse a resistance percentage cell into a float
///
/// Numeric cells pass through unchanged. Text cells are trimmed, every
/// comma becomes a period, and a dash range of exactly two numbers yields
/// the mean of its bounds. The offending raw value is preserved in the
/// error on failure.
pub fn parse_resistance_value(cell: &Cell) -> Result<f64> {
    match cell {
        Cell::Number(value) => Ok(*value),
        Cell::Text(raw) => parse_resistance_text(raw),
        Cell::Empty => Err(Error::value_parse("", "cell is empty")),
    }
}

fn parse_resistance_text(raw: &str) -> Result<f64> {
    let normalized = raw.trim().replace(',', ".");

    if let Some((low, high)) = split_range(&normalized) {
        let low: f64 = low
            .parse()
            .map_err(|_| Error::value_parse(raw, "range bound is not a number"))?;
        let high: f64 = high
            .parse()
            .map_err(|_| Error::value_parse(raw, "range bound is not a number"))?;
        return Ok((low + high) / 2.0);
    }

    normalized
        .parse()
        .map_err(|_| Error::value_parse(raw, "not a number"))
}

/// Split a normalized string on its single interior dash
///
/// A dash at position 0 is a minus sign, not a separator, and both parts
/// must be non-empty with no further dash. Returns `None` when the string
/// is not a well-formed two-part range.
fn split_range(normalized: &str) -> Option<(&str, &str)> {
    let separator = normalized.get(1..)?.find('-').map(|offset| offset + 1)?;
    let (low, high) = (&normalized[..separator], &normalized[separator + 1..]);

    let (low, high) = (low.trim(), high.trim());
    if low.is_empty() || high.is_empty() || high.contains('-') {
        return None;
    }
    Some((low, high))
}

/// Parse an isolate-count cell into an unsigned integer
///
/// The cell is rendered as text, every "." (European thousands grouping)
/// is stripped, and the remainder parses as an unsigned integer.
pub fn parse_isolate_count(cell: &Cell) -> Result<u32> {
    let rendered = cell.display_value();
    let digits = rendered.replace('.', "");

    digits
        .trim()
        .parse()
        .map_err(|_| Error::value_parse(&rendered, "not an isolate count"))
}
