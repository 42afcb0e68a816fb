//! Error types for Readium CSS preparation.

extern crate alloc;

use alloc::string::String;
use core::fmt;

/// Errors raised while naming, parsing, or injecting Readium CSS state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReadiumError {
    /// A name or keyword did not match any known value.
    Parse(String),
    /// Package metadata could not be read or exceeded a limit.
    Metadata(String),
    /// An XHTML document could not be rewritten.
    Inject(String),
    /// A stored user setting could not be applied.
    Settings(String),
}

impl ReadiumError {
    /// Short stable name of the error category.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Parse(_) => "parse",
            Self::Metadata(_) => "metadata",
            Self::Inject(_) => "inject",
            Self::Settings(_) => "settings",
        }
    }

    /// Human-readable detail message.
    pub fn message(&self) -> &str {
        match self {
            Self::Parse(msg) | Self::Metadata(msg) | Self::Inject(msg) | Self::Settings(msg) => {
                msg
            }
        }
    }
}

impl fmt::Display for ReadiumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error: {}", self.kind(), self.message())
    }
}

impl std::error::Error for ReadiumError {}
