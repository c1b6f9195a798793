//! Per-run floating-point width of the binary payload.

use std::str::FromStr;

/// Returned when a precision token is not `"float"` or `"double"`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown precision: {token:?} (expected \"float\" or \"double\")")]
pub struct PrecisionError {
    /// The token that failed to parse.
    pub token: String,
}

/// Width of every floating-point value in the binary file.
///
/// Chosen once per conversion run and applied to every record read; the
/// format has no per-variable precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Precision {
    /// 32-bit IEEE-754 values.
    #[default]
    Float,
    /// 64-bit IEEE-754 values.
    Double,
}

impl Precision {
    /// Width of one value in bytes.
    pub fn width(self) -> usize {
        match self {
            Self::Float => 4,
            Self::Double => 8,
        }
    }
}

impl FromStr for Precision {
    type Err = PrecisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "float" => Ok(Self::Float),
            "double" => Ok(Self::Double),
            other => Err(PrecisionError {
                token: other.to_string(),
            }),
        }
    }
}
