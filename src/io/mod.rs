pub mod fs;
pub mod notify;
pub mod store;

pub use fs::{is_markdown, read_to_string, resolve_files, write_atomic};
pub use notify::{ConsoleNotifier, Notice, Notifier, RecordingNotifier};
pub use store::{DocumentStore, FileStore, MemoryStore};
