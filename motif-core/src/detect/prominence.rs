//! Prominence policies: reducing a span's similarity row to one score.

use super::graph::SimilarityGraph;
use crate::error::{DetectError, Result};
use crate::types::Span;
use std::fmt;
use std::str::FromStr;

/// Bonus factor of the weighted-mean policy; favors longer candidates
pub const WEIGHTED_MEAN_BONUS: f64 = 1.1;

/// Default similarity threshold of the overlap-excluding policy
pub const DEFAULT_THRESHOLD: u32 = 1;

/// How a span's similarity row is ranked.
///
/// The two policies rank materially differently: the weighted mean is
/// normalized by span length and counts every neighbor, the thresholded sum
/// is raw and ignores weak or self-overlapping repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProminencePolicy {
    /// `1.1 * sum(similarity) / length` over all stored neighbors
    #[default]
    WeightedMean,
    /// `sum(similarity)` over neighbors scoring above `threshold` whose
    /// index range is disjoint from the span
    ThresholdedOverlapExclusion { threshold: u32 },
}

impl ProminencePolicy {
    /// Overlap-excluding policy with the default threshold
    pub fn thresholded() -> Self {
        ProminencePolicy::ThresholdedOverlapExclusion {
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Score `span` from its row in `graph`.
    ///
    /// Zero-length spans score 0 under both policies.
    pub fn score(&self, graph: &SimilarityGraph, span: Span) -> f64 {
        match *self {
            ProminencePolicy::WeightedMean => {
                if span.length == 0 {
                    return 0.0;
                }
                let total: u64 = graph.row(span).map(|(_, s)| s as u64).sum();
                total as f64 * WEIGHTED_MEAN_BONUS / span.length as f64
            }
            ProminencePolicy::ThresholdedOverlapExclusion { threshold } => {
                let total: u64 = graph
                    .row(span)
                    .filter(|(neighbor, s)| *s > threshold && !span.overlaps(neighbor))
                    .map(|(_, s)| s as u64)
                    .sum();
                total as f64
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProminencePolicy::WeightedMean => "weighted",
            ProminencePolicy::ThresholdedOverlapExclusion { .. } => "thresholded",
        }
    }
}

impl FromStr for ProminencePolicy {
    type Err = DetectError;

    /// `weighted`, `thresholded` or `thresholded:<n>` (case-insensitive)
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_lowercase();
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name, Some(arg.trim())),
            None => (s.as_str(), None),
        };

        match (name, arg) {
            ("weighted" | "weighted-mean" | "mean", None) => Ok(ProminencePolicy::WeightedMean),
            ("thresholded" | "overlap", None) => Ok(ProminencePolicy::thresholded()),
            ("thresholded" | "overlap", Some(arg)) => {
                let threshold = arg.parse::<u32>().map_err(|_| {
                    DetectError::Configuration(format!(
                        "threshold must be a non-negative integer, got '{}'",
                        arg
                    ))
                })?;
                Ok(ProminencePolicy::ThresholdedOverlapExclusion { threshold })
            }
            _ => Err(DetectError::Configuration(format!(
                "unknown prominence policy '{}' (expected weighted or thresholded[:n])",
                s
            ))),
        }
    }
}

impl fmt::Display for ProminencePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProminencePolicy::WeightedMean => write!(f, "weighted"),
            ProminencePolicy::ThresholdedOverlapExclusion { threshold } => {
                write!(f, "thresholded:{}", threshold)
            }
        }
    }
}
