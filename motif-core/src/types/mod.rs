// motif-core/src/types/mod.rs

pub mod event;
pub mod note;
pub mod span;
pub mod time;

pub use event::{total_duration, Event};
pub use note::Note;
pub use span::Span;
pub use time::{Arc, Time};
