//! Crate-level error types for srcdoc diagnostics.
use std::path::PathBuf;

/// All errors in srcdoc carry enough context to produce a useful diagnostic
/// without a debugger. Each variant names the file, reference, or locator involved.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configuration file exists but is not a valid section file.
    #[error("config malformed: {}: {reason}", path.display())]
    ConfigMalformed {
        /// Path to the configuration file.
        path: PathBuf,
        /// Description of the syntax problem.
        reason: String,
    },

    /// The configuration file exists but could not be read.
    #[error("config unreadable: {}: {source}", path.display())]
    ConfigUnreadable {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file could not be written back to disk.
    #[error("config not saved: {}: {source}", path.display())]
    ConfigUnwritable {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A reference is missing its `src` or `doc` value, or the value is empty.
    #[error("reference `{}` has no `{key}` location", reference.as_deref().unwrap_or("?"))]
    InvalidLocator {
        /// The missing key (`src` or `doc`).
        key: &'static str,
        /// Name of the reference, when known.
        reference: Option<String>,
    },

    /// A resolved target is not a syntactically valid URL.
    #[error("malformed locator `{locator}`: {reason}")]
    MalformedLocator {
        /// The offending locator string.
        locator: String,
        /// Parser message.
        reason: String,
    },

    /// Default resolution found no sections at all.
    #[error("no references defined in {}", path.display())]
    NoReferencesAvailable {
        /// Path to the configuration file.
        path: PathBuf,
    },

    /// An HTTP existence probe failed before a status code was received.
    #[error("could not reach {url}: {reason}")]
    ProbeFailed {
        /// Description of the transport failure.
        reason: String,
        /// The probed URL.
        url: String,
    },

    /// Interactive input could not be read from the terminal.
    #[error("prompt: {0}")]
    Prompt(
        /// The wrapped terminal error.
        #[from]
        dialoguer::Error,
    ),

    /// No section with the requested name exists.
    #[error("unknown reference: `{name}`")]
    ReferenceNotFound {
        /// Names of the references that do exist, in file order.
        available: Vec<String>,
        /// The requested reference name.
        name: String,
    },

    /// The resolved source file or documentation page does not exist.
    #[error("{class} could not be found at {locator}")]
    TargetMissing {
        /// Class name that was looked up.
        class: String,
        /// The resolved locator that was checked.
        locator: String,
        /// Whether the locator was a remote URL rather than a local file.
        remote: bool,
    },

    /// The viewer ran but reported failure, or no desktop handler is known.
    #[error("viewer `{program}` failed: {reason}")]
    ViewerFailed {
        /// Program that was launched.
        program: String,
        /// Exit status or reason.
        reason: String,
    },

    /// The viewer program could not be started.
    #[error("viewer `{program}` could not be found or is not in the PATH")]
    ViewerNotFound {
        /// Program that was launched.
        program: String,
    },
}

impl Error {
    /// Process exit code for this error.
    pub const fn exit_code(&self) -> u8 {
        return match self {
            Self::ConfigMalformed { .. } => 22,
            Self::ConfigUnreadable { .. } => 21,
            Self::ConfigUnwritable { .. } => 23,
            Self::InvalidLocator { .. } | Self::MalformedLocator { .. } => 5,
            Self::NoReferencesAvailable { .. } => 4,
            Self::ProbeFailed { .. } => 3,
            Self::Prompt(_) => 1,
            Self::ReferenceNotFound { .. } => 6,
            Self::TargetMissing { remote: true, .. } => 11,
            Self::TargetMissing { remote: false, .. } => 12,
            Self::ViewerFailed { .. } => 31,
            Self::ViewerNotFound { .. } => 30,
        };
    }
}
