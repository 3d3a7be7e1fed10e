use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SrtfixError};

/// Multiplicative timing factor used to convert between video frame rates.
///
/// Written either as a decimal (`0.96`) or as an `input/output` fraction
/// (`25/24`), in which case the factor is `input / output`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Framerate {
    factor: f64,
}

impl Framerate {
    pub fn new(factor: f64) -> Result<Self> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(SrtfixError::FramerateFormat(format!(
                "factor must be a positive number, got {}",
                factor
            )));
        }
        Ok(Self { factor })
    }

    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        let parts: Vec<&str> = text.split('/').collect();

        match parts.as_slice() {
            [decimal] => Self::new(parse_number(decimal, text)?),
            [input, output] => {
                let input = parse_number(input, text)?;
                let output = parse_number(output, text)?;
                if input == 0.0 || output == 0.0 {
                    return Err(SrtfixError::FramerateFormat(format!(
                        "{:?}: frame rates must be non-zero",
                        text
                    )));
                }
                Self::new(input / output)
            }
            _ => Err(SrtfixError::FramerateFormat(format!(
                "{:?}: expected a decimal or an input/output fraction",
                text
            ))),
        }
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn is_identity(&self) -> bool {
        self.factor == 1.0
    }
}

fn parse_number(part: &str, text: &str) -> Result<f64> {
    let value: f64 = part.trim().parse().map_err(|_| {
        SrtfixError::FramerateFormat(format!("{:?}: {:?} is not a number", text, part))
    })?;
    if !value.is_finite() {
        return Err(SrtfixError::FramerateFormat(format!(
            "{:?}: {:?} is not a finite number",
            text, part
        )));
    }
    Ok(value)
}

impl FromStr for Framerate {
    type Err = SrtfixError;

    fn from_str(s: &str) -> Result<Self> {
        Framerate::parse(s)
    }
}

impl fmt::Display for Framerate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.factor)
    }
}
