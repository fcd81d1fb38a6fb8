//! Repeated-pattern detection
//!
//! Finds the contiguous span of a melodic line that most saliently repeats
//! elsewhere in the line. The pipeline has three stages:
//!
//! - `graph`: banded similarity table between every pair of spans
//! - `prominence`: reduction of a span's similarity row to one score
//! - `finder`: candidate enumeration, duration filtering and selection

mod config;
mod finder;
mod graph;
mod prominence;


pub use config::{FinderConfig, DEFAULT_MAX_LENGTH_DIFFERENCE, DEFAULT_MIN_LENGTH};
pub use finder::{detect_melody, Candidate, PatternFinder};
pub use graph::{contribution, SimilarityGraph};
pub use prominence::{ProminencePolicy, DEFAULT_THRESHOLD, WEIGHTED_MEAN_BONUS};
