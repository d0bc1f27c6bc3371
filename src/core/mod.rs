//! Core text handling: link extraction, front matter parsing, field mapping
//! and merging. Everything here is synchronous and free of I/O.

pub mod fields;
pub mod front_matter;
pub mod link;
pub mod merge;

pub use fields::{map_fields, FieldConfig, FieldSet, FieldUpdates};
pub use front_matter::{FieldValue, FrontMatterMap};
pub use link::{extract_video_id, find_link, VideoId, VideoLink};
