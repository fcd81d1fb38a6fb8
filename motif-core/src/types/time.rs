//! Rational quarter-length durations
//!
//! Event durations and offsets are exact rationals so that window sums over
//! triplets and dotted values never drift.

use anyhow::{anyhow, Result};
use num_rational::Ratio;
use num_traits::Zero;

/// Exact duration or offset in quarter lengths.
/// Uses i64 for large numerator/denominator support
pub type Time = Ratio<i64>;

/// A time arc [start, end) covering a stretch of a line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arc {
    pub start: Time,
    pub end: Time,
}

impl Arc {
    /// Create a new arc from start to end
    pub fn new(start: Time, end: Time) -> Self {
        Self { start, end }
    }

    /// Duration of this arc
    pub fn duration(&self) -> Time {
        self.end - self.start
    }
}

/// Helper to create Time from a ratio n/d
#[inline]
pub fn time(n: i64, d: i64) -> Time {
    Ratio::new(n, d)
}

/// Create Time from a whole number of quarter notes
#[inline]
pub fn quarters(n: i64) -> Time {
    Ratio::from_integer(n)
}

/// Convert f64 to approximate Time.
/// Uses a fixed denominator for reasonable precision
pub fn from_f64(f: f64) -> Time {
    // 9600 covers the common musical divisions (24, 32, 48, ...)
    let denom = 9600i64;
    let numer = (f * denom as f64).round() as i64;
    Ratio::new(numer, denom)
}

/// Parse a quarter-length value: `2`, `3/2` or `0.75`.
///
/// Negative values and zero denominators are rejected.
pub fn parse_time(s: &str) -> Result<Time> {
    let s = s.trim();
    let t = if let Some((n, d)) = s.split_once('/') {
        let n: i64 = n
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid numerator: {}", n))?;
        let d: i64 = d
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid denominator: {}", d))?;
        if d == 0 {
            return Err(anyhow!("Zero denominator in duration: {}", s));
        }
        time(n, d)
    } else if s.contains('.') {
        let f: f64 = s.parse().map_err(|_| anyhow!("Invalid duration: {}", s))?;
        if !f.is_finite() {
            return Err(anyhow!("Invalid duration: {}", s));
        }
        from_f64(f)
    } else {
        let n: i64 = s.parse().map_err(|_| anyhow!("Invalid duration: {}", s))?;
        quarters(n)
    };

    if t < Time::zero() {
        return Err(anyhow!("Duration must not be negative: {}", s));
    }
    Ok(t)
}

/// Format a Time compactly: `2`, `3/2`
pub fn format_time(t: Time) -> String {
    if t.is_integer() {
        format!("{}", t.numer())
    } else {
        format!("{}/{}", t.numer(), t.denom())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_arithmetic() {
        let a = time(1, 3);
        let b = time(1, 6);
        assert_eq!(a + b, time(1, 2)); // 1/3 + 1/6 = 1/2
    }

    #[test]
    fn test_arc_duration() {
        let arc = Arc::new(time(1, 2), quarters(2));
        assert_eq!(arc.duration(), time(3, 2));
    }

    #[test]
    fn test_parse_time_forms() {
        assert_eq!(parse_time("2").unwrap(), quarters(2));
        assert_eq!(parse_time("3/2").unwrap(), time(3, 2));
        assert_eq!(parse_time("0.75").unwrap(), time(3, 4));
        assert_eq!(parse_time(" 1 / 3 ").unwrap(), time(1, 3));
    }

    #[test]
    fn test_parse_time_rejects_garbage() {
        assert!(parse_time("").is_err());
        assert!(parse_time("x").is_err());
        assert!(parse_time("1/0").is_err());
        assert!(parse_time("-1").is_err());
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(quarters(3)), "3");
        assert_eq!(format_time(time(6, 4)), "3/2");
    }
}
