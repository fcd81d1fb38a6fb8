//! Finder configuration
//!
//! Plain data with builder-style setters. `validate` is called by the finder
//! before any work happens.

use super::prominence::ProminencePolicy;
use crate::error::{DetectError, Result};
use crate::types::time::{format_time, Time};

/// Default lower bound on candidate length
pub const DEFAULT_MIN_LENGTH: usize = 1;

/// Default slack between aligned span lengths
pub const DEFAULT_MAX_LENGTH_DIFFERENCE: usize = 1;

/// Configuration of a pattern search.
///
/// - `min_length` / `max_length`: candidate span lengths (inclusive). `None`
///   for `max_length` means the full sequence length.
/// - `max_length_difference`: the slack `D` of the elastic alignment; also
///   the half-width of the similarity table's diagonal band.
/// - `min_duration` / `max_duration`: optional inclusive window on the summed
///   duration of a candidate, in quarter lengths. Either bound may be open.
/// - `policy`: how a span's similarity row is reduced to a ranking score.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FinderConfig {
    pub min_length: usize,
    pub max_length: Option<usize>,
    pub max_length_difference: usize,
    pub min_duration: Option<Time>,
    pub max_duration: Option<Time>,
    pub policy: ProminencePolicy,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            max_length: None,
            max_length_difference: DEFAULT_MAX_LENGTH_DIFFERENCE,
            min_duration: None,
            max_duration: None,
            policy: ProminencePolicy::default(),
        }
    }
}

impl FinderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn with_max_length_difference(mut self, slack: usize) -> Self {
        self.max_length_difference = slack;
        self
    }

    /// Restrict candidates to a summed duration in `[min, max]`
    pub fn with_duration_window(mut self, min: Time, max: Time) -> Self {
        self.min_duration = Some(min);
        self.max_duration = Some(max);
        self
    }

    pub fn with_policy(mut self, policy: ProminencePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Check the configuration on its own, independent of any input
    pub fn validate(&self) -> Result<()> {
        if self.min_length < 1 {
            return Err(DetectError::Configuration(format!(
                "min_length must be at least 1, got {}",
                self.min_length
            )));
        }
        if let Some(max_length) = self.max_length {
            if max_length < self.min_length {
                return Err(DetectError::Configuration(format!(
                    "max_length ({}) is smaller than min_length ({})",
                    max_length, self.min_length
                )));
            }
        }
        if let (Some(min), Some(max)) = (self.min_duration, self.max_duration) {
            if max < min {
                return Err(DetectError::Configuration(format!(
                    "max_duration ({}) is smaller than min_duration ({})",
                    format_time(max),
                    format_time(min)
                )));
            }
        }
        Ok(())
    }

    /// Whether a duration window is configured at all
    pub fn filters_duration(&self) -> bool {
        self.min_duration.is_some() || self.max_duration.is_some()
    }

    /// Whether `total` lies in the (possibly open) duration window
    pub fn admits_duration(&self, total: Time) -> bool {
        self.min_duration.map_or(true, |min| total >= min)
            && self.max_duration.map_or(true, |max| total <= max)
    }
}
