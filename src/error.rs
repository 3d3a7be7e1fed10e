use thiserror::Error;

#[derive(Error, Debug)]
pub enum SrtfixError {
    #[error("Unparsable time: {0:?}")]
    TimeParse(String),

    #[error("Invalid span line: {0:?}")]
    SpanFormat(String),

    #[error("Invalid framerate: {0}")]
    FramerateFormat(String),

    #[error("Invalid subtitle index: {0}")]
    InvalidIndex(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SrtfixError>;
