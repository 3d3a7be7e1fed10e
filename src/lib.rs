pub mod config;
pub mod error;
pub mod pipeline;
pub mod subtitle;

pub use config::{Config, LineEnding};
pub use error::{Result, SrtfixError};
pub use pipeline::{
    convert, convert_text, log_summary, run, ConvertConfig, ConvertResult, ConvertStats, Sink,
    Source,
};
pub use subtitle::{Delta, Entry, EntryList, Framerate, Span, Time, TimeParts};
