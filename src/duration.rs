//! Go-style duration strings, as accepted by `--nagios.timeout`.

use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Suffix to nanoseconds multiplier. Two-letter suffixes come before `s`
/// and `m` so that `ms` is not read as minutes or `ns` as seconds.
const UNITS: &[(&str, f64)] = &[
    ("ns", 1.0),
    ("µs", 1_000.0),
    ("us", 1_000.0),
    ("ms", 1_000_000.0),
    ("s", 1_000_000_000.0),
    ("m", 60_000_000_000.0),
    ("h", 3_600_000_000_000.0),
];

/// Parse duration strings like "5s", "1500ms", "2m", "0.5s".
///
/// Negative, non-finite and unit-less values are rejected.
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();

    for (suffix, multiplier) in UNITS {
        if let Some(val_str) = s.strip_suffix(suffix) {
            let val: f64 = val_str
                .trim()
                .parse()
                .with_context(|| format!("Invalid duration value: {s}"))?;
            if !val.is_finite() || val < 0.0 {
                bail!("Duration must be a non-negative number: {s}");
            }
            return Ok(Duration::from_nanos((val * multiplier) as u64));
        }
    }

    bail!("Unknown duration format: {s} (expected a unit such as ms, s or m)")
}

/// Format a duration for display
pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos == 0 {
        "0s".to_string()
    } else if nanos < 1_000 {
        format!("{nanos}ns")
    } else if nanos < 1_000_000 {
        format!("{:.2}µs", nanos as f64 / 1_000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.2}ms", nanos as f64 / 1_000_000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}
