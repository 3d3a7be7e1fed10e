use crate::error::{Result, SrtfixError};
use crate::subtitle::{Framerate, Time};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

/// Line terminator used when writing SRT output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Crlf,
    Lf,
}

impl std::fmt::Display for LineEnding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineEnding::Crlf => write!(f, "crlf"),
            LineEnding::Lf => write!(f, "lf"),
        }
    }
}

impl std::str::FromStr for LineEnding {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "crlf" => Ok(LineEnding::Crlf),
            "lf" => Ok(LineEnding::Lf),
            _ => Err(format!("Unknown line ending: {}. Use 'crlf' or 'lf'", s)),
        }
    }
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Crlf => "\r\n",
            LineEnding::Lf => "\n",
        }
    }
}

/// User defaults, read from `config.toml` and `SRTFIX_*` environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub shift: Option<String>,
    pub framerate: Option<String>,
    pub line_ending: LineEnding,
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_file_path() {
            Some(path) if path.exists() => {
                debug!("Loading configuration from {}", path.display());
                let contents = std::fs::read_to_string(&path)?;
                Self::from_toml(&contents)?
            }
            _ => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Override values from the environment. `lookup` stands in for
    /// `std::env::var` so tests don't touch the process environment.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(shift) = lookup("SRTFIX_SHIFT") {
            self.shift = Some(shift);
        }
        if let Some(framerate) = lookup("SRTFIX_FRAMERATE") {
            self.framerate = Some(framerate);
        }
        if let Some(line_ending) = lookup("SRTFIX_LINE_ENDING") {
            self.line_ending = line_ending.parse().map_err(SrtfixError::Config)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(ref shift) = self.shift {
            Time::parse(shift)
                .map_err(|e| SrtfixError::Config(format!("shift: {}", e)))?;
        }
        if let Some(ref framerate) = self.framerate {
            Framerate::parse(framerate)
                .map_err(|e| SrtfixError::Config(format!("framerate: {}", e)))?;
        }
        Ok(())
    }

    fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("srtfix").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_line_ending_parsing() {
        assert_eq!("crlf".parse::<LineEnding>().unwrap(), LineEnding::Crlf);
        assert_eq!("LF".parse::<LineEnding>().unwrap(), LineEnding::Lf);
        assert!("cr".parse::<LineEnding>().is_err());
    }

    #[test]
    fn test_line_ending_as_str() {
        assert_eq!(LineEnding::Crlf.as_str(), "\r\n");
        assert_eq!(LineEnding::Lf.as_str(), "\n");
        assert_eq!(LineEnding::default(), LineEnding::Crlf);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.shift.is_none());
        assert!(config.framerate.is_none());
        assert_eq!(config.line_ending, LineEnding::Crlf);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml() {
        let config = Config::from_toml("shift = \"-1500ms\"\nline_ending = \"lf\"\n").unwrap();
        assert_eq!(config.shift.as_deref(), Some("-1500ms"));
        assert!(config.framerate.is_none());
        assert_eq!(config.line_ending, LineEnding::Lf);

        assert!(matches!(
            Config::from_toml("line_ending = \"cr\""),
            Err(SrtfixError::Toml(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("SRTFIX_SHIFT", "2s"),
            ("SRTFIX_FRAMERATE", "25/24"),
            ("SRTFIX_LINE_ENDING", "lf"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.shift.as_deref(), Some("2s"));
        assert_eq!(config.framerate.as_deref(), Some("25/24"));
        assert_eq!(config.line_ending, LineEnding::Lf);
    }

    #[test]
    fn test_env_invalid_line_ending() {
        let mut config = Config::default();
        let result = config.apply_env(|key| {
            (key == "SRTFIX_LINE_ENDING").then(|| "cr".to_string())
        });
        assert!(matches!(result, Err(SrtfixError::Config(_))));
    }

    #[test]
    fn test_env_values_are_validated() {
        let mut config = Config::default();
        config
            .apply_env(|key| (key == "SRTFIX_FRAMERATE").then(|| "fast".to_string()))
            .unwrap();
        assert!(matches!(config.validate(), Err(SrtfixError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.shift = Some("later".to_string());
        assert!(config.validate().is_err());

        config.shift = Some("1h".to_string());
        config.framerate = Some("25/0".to_string());
        assert!(config.validate().is_err());

        config.framerate = Some("25/24".to_string());
        assert!(config.validate().is_ok());
    }
}
