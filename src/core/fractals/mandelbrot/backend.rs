use crate::core::data::precision::Precision;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown backend '{input}', expected 'float64' or 'big'")]
pub struct ParseBackendError {
    pub input: String,
}

/// Numeric backend a generation session evaluates pixels with.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Backend {
    #[default]
    /// Native doubles. Fast, loses detail once a pixel step nears `1e-16`.
    Float64,
    /// Arbitrary-precision reals at `precision` bits.
    Big { precision: Precision },
}

impl Backend {
    pub const FLOAT64_NAME: &'static str = "float64";
    pub const BIG_NAME: &'static str = "big";

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Float64 => Self::FLOAT64_NAME,
            Self::Big { .. } => Self::BIG_NAME,
        }
    }

    /// Precision the session evaluates at.
    #[must_use]
    pub fn precision(&self) -> Precision {
        match self {
            Self::Float64 => Precision::F64,
            Self::Big { precision } => *precision,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float64 => f.write_str(Self::FLOAT64_NAME),
            Self::Big { precision } => write!(f, "{}({} bits)", Self::BIG_NAME, precision.bits()),
        }
    }
}

/// Parses `"float64"` or `"big"`, ignoring case. `"big"` takes
/// [`Precision::DEFAULT`].
impl FromStr for Backend {
    type Err = ParseBackendError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();

        if trimmed.eq_ignore_ascii_case(Self::FLOAT64_NAME) {
            Ok(Self::Float64)
        } else if trimmed.eq_ignore_ascii_case(Self::BIG_NAME) {
            Ok(Self::Big {
                precision: Precision::DEFAULT,
            })
        } else {
            Err(ParseBackendError {
                input: input.to_string(),
            })
        }
    }
}
