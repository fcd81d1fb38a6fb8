//! # Motif Core
//!
//! Repeated-pattern detection over melodic lines. Given an ordered sequence
//! of notes and rests, finds the contiguous span that most saliently repeats
//! elsewhere in the line: a motif candidate used as melodic context when the
//! line is harmonized.
//!
//! ## Features
//!
//! - **serde**: Serialize/Deserialize for events, spans and finder configuration
//!
//! ## Example
//!
//! ```
//! use motif_core::notation::parse_events;
//! use motif_core::{detect_melody, FinderConfig, Span};
//!
//! let events = parse_events("C4 D4 E4 C4 F5 C4 D4 E4 C4 G4 C3 D3 E3 C3").unwrap();
//! let config = FinderConfig::new().with_max_length_difference(2);
//! assert_eq!(detect_melody(&events, config).unwrap(), Some(Span::new(0, 4)));
//! ```

pub mod detect;
pub mod error;
pub mod harmonize;
pub mod notation;
pub mod segment;
pub mod types;

// Re-export commonly used types
pub use detect::{
    detect_melody, Candidate, FinderConfig, PatternFinder, ProminencePolicy, SimilarityGraph,
};
pub use error::{DetectError, Result};
pub use types::{Event, Note, Span, Time};
