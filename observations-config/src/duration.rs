//! Signed, human-readable durations.
//!
//! Intervals are written in compact unit form (`"2s"`, `"1m30s"`, `"250ms"`)
//! with an optional leading sign, so that a negative interval survives a
//! load/serialize cycle and can be rejected by validation instead of by the
//! parser. Parsing also accepts humantime's spaced form (`"1m 30s"`).

use chrono::TimeDelta;
use thiserror::Error;

/// Failure to turn a duration string into a [`TimeDelta`].
#[derive(Debug, Error)]
pub enum DurationError {
    #[error(transparent)]
    Syntax(#[from] humantime::DurationError),

    #[error("duration is out of range")]
    OutOfRange(#[from] chrono::OutOfRangeError),
}

/// Parse a signed duration such as `"5s"`, `"-5s"` or `"1h 15m"`.
pub fn parse(input: &str) -> Result<TimeDelta, DurationError> {
    let input = input.trim();
    let (negative, magnitude) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };

    let magnitude = TimeDelta::from_std(humantime::parse_duration(magnitude.trim_start())?)?;
    Ok(if negative { -magnitude } else { magnitude })
}

/// Format a duration so that [`parse`] reads back the same value.
pub fn format(delta: TimeDelta) -> String {
    let (sign, magnitude) = if delta < TimeDelta::zero() {
        ("-", -delta)
    } else {
        ("", delta)
    };
    // A TimeDelta's magnitude always fits a std Duration.
    let magnitude = magnitude.to_std().unwrap_or_default();
    let units = humantime::format_duration(magnitude).to_string().replace(' ', "");
    format!("{sign}{units}")
}
