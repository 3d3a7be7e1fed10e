use crate::config::LineEnding;
use crate::error::{Result, SrtfixError};
use crate::subtitle::{EntryList, Framerate, Time};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;
use tracing::info;

/// Transformations applied to every entry of a document.
#[derive(Debug, Clone, Default)]
pub struct ConvertConfig {
    /// Offset added to every span endpoint.
    pub shift: Option<Time>,
    /// Factor applied after the shift.
    pub framerate: Option<Framerate>,
    /// Line terminator for the output.
    pub line_ending: LineEnding,
}

/// Statistics from one conversion.
#[derive(Debug, Clone)]
pub struct ConvertStats {
    /// Number of entries written.
    pub entries: usize,
    /// Shift that was applied, if any.
    pub shift: Option<Time>,
    /// Framerate factor that was applied, if any.
    pub factor: Option<f64>,
    /// Time spent parsing, converting and formatting.
    pub elapsed: Duration,
}

/// Result of converting SRT text.
#[derive(Debug)]
pub struct ConvertResult {
    /// Serialized output document.
    pub output: String,
    /// Conversion statistics.
    pub stats: ConvertStats,
}

/// Where the SRT input is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

/// Where the SRT output is written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    Stdout,
    File(PathBuf),
}

impl Source {
    /// `-` selects standard input.
    pub fn from_arg(arg: &Path) -> Self {
        if arg.as_os_str() == "-" {
            Source::Stdin
        } else {
            Source::File(arg.to_path_buf())
        }
    }

    pub fn read(&self) -> Result<String> {
        match self {
            Source::Stdin => {
                let mut text = String::new();
                io::stdin().read_to_string(&mut text)?;
                Ok(text)
            }
            Source::File(path) => {
                if !path.exists() {
                    return Err(SrtfixError::FileNotFound(path.display().to_string()));
                }
                Ok(fs::read_to_string(path)?)
            }
        }
    }
}

impl Sink {
    /// `-` selects standard output.
    pub fn from_arg(arg: &Path) -> Self {
        if arg.as_os_str() == "-" {
            Sink::Stdout
        } else {
            Sink::File(arg.to_path_buf())
        }
    }

    /// Write `contents` in one go. Files are replaced atomically through a
    /// temporary file in the same directory.
    pub fn write(&self, contents: &str) -> Result<()> {
        match self {
            Sink::Stdout => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(contents.as_bytes())?;
                stdout.flush()?;
            }
            Sink::File(path) => {
                let dir = match path.parent() {
                    Some(parent) if !parent.as_os_str().is_empty() => parent,
                    _ => Path::new("."),
                };
                let mut file = NamedTempFile::new_in(dir)?;
                file.write_all(contents.as_bytes())?;
                file.persist(path).map_err(|e| e.error)?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Stdin => write!(f, "<stdin>"),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl std::fmt::Display for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sink::Stdout => write!(f, "<stdout>"),
            Sink::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Apply the shift, then the framerate factor.
pub fn convert(document: &EntryList, config: &ConvertConfig) -> EntryList {
    let shifted = match config.shift {
        Some(shift) => document.shift(shift),
        None => document.clone(),
    };
    match config.framerate {
        Some(framerate) if !framerate.is_identity() => shifted.scale(framerate.factor()),
        _ => shifted,
    }
}

/// Parse, convert and serialize a whole SRT document.
pub fn convert_text(input: &str, config: &ConvertConfig) -> Result<ConvertResult> {
    let start_time = Instant::now();

    let document = EntryList::parse(input)?;

    let converted = convert(&document, config);
    let output = converted.format(config.line_ending);

    let stats = ConvertStats {
        entries: converted.len(),
        shift: config.shift,
        factor: config.framerate.map(|f| f.factor()),
        elapsed: start_time.elapsed(),
    };

    Ok(ConvertResult { output, stats })
}

/// Read from `source`, convert, and write to `sink`. Nothing is written
/// unless the whole input converts successfully.
pub fn run(source: &Source, sink: &Sink, config: &ConvertConfig) -> Result<ConvertStats> {
    info!("Reading subtitles from {}", source);
    let input = source.read()?;

    let result = convert_text(&input, config)?;

    sink.write(&result.output)?;
    info!("Wrote {} entries to {}", result.stats.entries, sink);

    Ok(result.stats)
}

/// Log a summary of the conversion.
pub fn log_summary(stats: &ConvertStats) {
    info!("Entries:   {}", stats.entries);
    if let Some(shift) = stats.shift {
        info!("Shift:     {}", shift);
    }
    if let Some(factor) = stats.factor {
        info!("Factor:    {}", factor);
    }
    info!("Elapsed:   {:.3}s", stats.elapsed.as_secs_f64());
}
