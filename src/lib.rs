//! # Motif
//!
//! Interactive front end for the `motif-core` repeated-pattern detector.
//!
//! ## Modules
//!
//! - `commands`: REPL command registry and the session state handlers share.
//! - `repl`: Read-Eval-Print Loop with file watching; any line that is not a
//!   command is read as event notation and detected on.
//! - `report`: human-readable rendering of detection results, shared by the
//!   REPL and one-shot command line runs.

pub mod commands;
pub mod repl;
pub mod report;

pub use motif_core::{detect_melody, DetectError, Event, FinderConfig, ProminencePolicy, Span};
