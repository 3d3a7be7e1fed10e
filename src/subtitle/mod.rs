pub mod document;
pub mod entry;
pub mod framerate;
pub mod span;
pub mod time;

pub use document::{EntryList, LineGroups};
pub use entry::Entry;
pub use framerate::Framerate;
pub use span::Span;
pub use time::{Delta, Time, TimeParts};
