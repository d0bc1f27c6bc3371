//! tubematter: fill markdown front matter with YouTube video details
//!
//! Given a note that links a YouTube video, this library finds the first link,
//! fetches the video's details from the YouTube Data API and merges them into
//! the note's `---` front matter block. Keys it does not manage are left
//! exactly as they were, and re-running an update on its own output changes
//! nothing.
//!
//! # Quick Start
//!
//! ## Finding a video
//!
//! ```rust
//! use tubematter::core::extract_video_id;
//!
//! let id = extract_video_id("watch https://youtu.be/dQw4w9WgXcQ later").unwrap();
//! assert_eq!(id.as_str(), "dQw4w9WgXcQ");
//! ```
//!
//! ## Merging fields
//!
//! ```rust
//! use tubematter::core::{map_fields, merge, FieldConfig, FieldSet};
//!
//! let fields = FieldSet {
//!     channel: "Rick Astley".into(),
//!     title: "Never Gonna Give You Up".into(),
//!     ..FieldSet::default()
//! };
//! let updates = map_fields(&fields, &FieldConfig::default());
//! let note = merge::apply("---\nrating: 5\n---\nbody\n", updates);
//! assert_eq!(
//!     note,
//!     "---\nrating: 5\nchannel: Rick Astley\ntitle: Never Gonna Give You Up\n---\nbody\n"
//! );
//! ```
//!
//! ## Updating files
//!
//! ```rust,no_run
//! use tubematter::{Config, ConsoleNotifier, FileStore, Result, Updater, YouTubeClient};
//! use std::path::Path;
//!
//! # async fn example() -> Result<()> {
//! let config = Config::default().with_api_key(Some("AIza...".to_string()));
//! let updater = Updater::new(YouTubeClient::new()?, config);
//! let notice = updater
//!     .update_document(&FileStore, Path::new("note.md"), &ConsoleNotifier::new())
//!     .await;
//! println!("{notice}");
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`core`]: link extraction, front matter parsing, field mapping, merging
//! - [`fetch`]: the metadata service seam and its YouTube implementation
//! - [`io`]: document stores, notifiers and file helpers
//! - [`update`]: the pipeline tying them together
//! - [`config`] and [`error`]

// Public API exports
pub use crate::error::{FetchErrorKind, Result, TubeMatterError};

// Core types
pub use crate::core::{
    extract_video_id, find_link, map_fields, FieldConfig, FieldSet, FieldUpdates, FieldValue,
    FrontMatterMap, VideoId, VideoLink,
};

// Collaborators and pipeline
pub use config::Config;
pub use fetch::{MetadataFetcher, YouTubeClient};
pub use io::{
    ConsoleNotifier, DocumentStore, FileStore, MemoryStore, Notice, Notifier, RecordingNotifier,
};
pub use update::{UpdateOutcome, Updater};

pub mod args;
pub mod config;
pub mod core;
pub mod error;
pub mod fetch;
pub mod io;
pub mod update;
