//! Parsing of the human-readable numbers shown on preview pages:
//! abbreviated counts ("1.2K", "3M", "217 094") and media durations.

use thiserror::Error;

use crate::model::GranularValue;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("not an abbreviated count: {0:?}")]
pub struct CountParseError(String);

/// Parses an abbreviated display count into a value plus the rounding unit
/// it implies. `"1.2K"` gives `(1200, 100)`, `"1.25K"` gives `(1250, 10)`,
/// a plain integer (embedded spaces allowed as thousands separators) gives
/// granularity 1.
pub fn parse_abbreviated_count(text: &str) -> Result<GranularValue, CountParseError> {
    let compact = text.replace(' ', "");
    let err = || CountParseError(text.to_string());

    if let Some(number) = compact.strip_suffix('M') {
        scaled(number, 6).ok_or_else(err)
    } else if let Some(number) = compact.strip_suffix('K') {
        scaled(number, 3).ok_or_else(err)
    } else {
        compact
            .parse::<u64>()
            .map(GranularValue::exact)
            .map_err(|_| err())
    }
}

fn scaled(number: &str, exponent: u32) -> Option<GranularValue> {
    let frac_digits = match number.split_once('.') {
        Some((_, frac)) => frac.len() as u32,
        None => 0,
    };
    // More decimal digits than the suffix provides would mean a granularity
    // below 1, which a rounded display count cannot express.
    if frac_digits > exponent {
        return None;
    }
    let number = number.parse::<f64>().ok()?;
    if !number.is_finite() || number < 0.0 {
        return None;
    }
    Some(GranularValue {
        value: (number * 10f64.powi(exponent as i32)).round() as u64,
        granularity: 10u64.pow(exponent - frac_digits),
    })
}

/// Converts a colon-separated duration label to seconds. The rightmost
/// field is seconds, then minutes, then hours ("1:05:30" is 3930).
pub fn duration_to_seconds(text: &str) -> u64 {
    text.split(':')
        .map(|field| field.trim().parse::<u64>().unwrap_or(0))
        .fold(0, |acc, x| acc * 60 + x)
}
