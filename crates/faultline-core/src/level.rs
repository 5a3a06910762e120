use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Severity an error is logged at
///
/// Crosses the wire as its ordinal (`-1` for debug through `3` for fatal),
/// matching the level numbering of the services on the other end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    #[default]
    Error,
    Fatal,
}

impl LogLevel {
    /// Wire ordinal
    pub const fn ordinal(self) -> i8 {
        match self {
            Self::Debug => -1,
            Self::Info => 0,
            Self::Warn => 1,
            Self::Error => 2,
            Self::Fatal => 3,
        }
    }

    /// Level for a wire ordinal, if it names one
    pub const fn from_ordinal(ordinal: i8) -> Option<Self> {
        match ordinal {
            -1 => Some(Self::Debug),
            0 => Some(Self::Info),
            1 => Some(Self::Warn),
            2 => Some(Self::Error),
            3 => Some(Self::Fatal),
            _ => None,
        }
    }
}

impl From<LogLevel> for i8 {
    fn from(level: LogLevel) -> Self {
        level.ordinal()
    }
}

impl TryFrom<i8> for LogLevel {
    type Error = String;

    fn try_from(ordinal: i8) -> Result<Self, String> {
        Self::from_ordinal(ordinal).ok_or_else(|| format!("unknown log level ordinal: {ordinal}"))
    }
}
