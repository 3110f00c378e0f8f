//! Domain models for envstash
//!
//! Contains the value and template logic without any I/O concerns.

mod value;
mod template;

pub use value::Value;
pub use template::{Segment, SegmentKind, Template};
