//! Selector for what a lookup targets.
use std::fmt;

/// Whether a class resolves to its documentation page or its source file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LookupType {
    /// Generated API documentation, resolved against the doc base.
    #[default]
    Doc,
    /// Java source file, resolved against the source base.
    Source,
}

impl LookupType {
    /// File extension appended to the class path, including the dot.
    pub const fn extension(self) -> &'static str {
        return match self {
            Self::Doc => ".html",
            Self::Source => ".java",
        };
    }

    /// Configuration key holding the base for this lookup.
    pub const fn key(self) -> &'static str {
        return match self {
            Self::Doc => "doc",
            Self::Source => "src",
        };
    }
}

impl fmt::Display for LookupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self {
            Self::Doc => f.write_str("documentation"),
            Self::Source => f.write_str("source"),
        };
    }
}
