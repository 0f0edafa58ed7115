//! Timeline trace synthesis: log rows -> categorized, string-interned instant
//! events ready for a profile viewer.

pub mod category;
pub mod document;
pub mod strings;
pub mod synth;

pub use category::{CATEGORIES, Category, category_index};
pub use document::{InstantEvent, LiveLogPayload, TraceDocument};
pub use strings::StringTable;
pub use synth::build_trace;
