//! Makes sure a usable configuration exists before any lookup.
//!
//! A file with at least one valid section is used as-is. Otherwise the user
//! is asked for a source location, a documentation location, and a name, and
//! the resulting section is merged into the file and written back.

use std::path::{Path, PathBuf};

use crate::config_file::ConfigFile;
use crate::error::Error;
use crate::lookup::LookupType;
use crate::probe::{HTTP_OK, Probe};
use crate::prompt::{Prompter, prompt};
use crate::reference::{FILE_SCHEME, is_remote, normalize_base};
use crate::store::{DEFAULT_REFERENCE, ReferenceStore};
use crate::types::Section;

/// Documentation offered when the user has nothing better.
pub const DEFAULT_DOC: &str = "http://docs.oracle.com/javase/7/docs/api/";

/// Result of [`Bootstrapper::ensure`].
#[derive(Debug)]
pub struct Bootstrap {
    /// What happened to the configuration file.
    pub outcome: Outcome,
    /// References available for this run.
    pub store: ReferenceStore,
}

/// Drives the configuration state machine for one file.
pub struct Bootstrapper<'a, P: ?Sized, R: ?Sized> {
    /// Defaults offered at the location prompts.
    defaults: Defaults,
    /// Reachability check for URL locations.
    probe: &'a R,
    /// Source of interactive answers.
    prompter: &'a mut P,
}

/// Answers used when the user just presses enter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Defaults {
    /// Default documentation location.
    pub doc: Option<String>,
    /// Default source location.
    pub source: Option<String>,
}

/// How the configuration file was left.
#[derive(Debug)]
pub enum Outcome {
    /// A section was created or repaired and saved.
    Created {
        /// Name of the saved section.
        name: String,
    },
    /// The file already had a valid section; nothing was asked or written.
    Existing,
    /// A section was collected but the file could not be written.
    /// The section is still usable for this run.
    Unsaved {
        /// Why the write failed.
        error: Error,
        /// Name of the unsaved section.
        name: String,
    },
}

impl<'a, P, R> Bootstrapper<'a, P, R>
where
    P: Prompter + ?Sized,
    R: Probe + ?Sized,
{
    /// Create a bootstrapper that asks `prompter` and checks URLs with `probe`.
    pub const fn new(prompter: &'a mut P, probe: &'a R, defaults: Defaults) -> Self {
        return Self {
            defaults,
            probe,
            prompter,
        };
    }

    /// Ask for a location until one is accepted. With `optional`, an empty
    /// answer (and no default) means "not supplied" and yields `None`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Prompt` if input cannot be read.
    fn ask_location(&mut self, lookup: LookupType, optional: bool) -> Result<Option<String>, Error> {
        let default = match lookup {
            LookupType::Doc => self.defaults.doc.as_deref(),
            LookupType::Source => self.defaults.source.as_deref(),
        };
        let message = format!("Please choose the {lookup} location");
        let probe = self.probe;

        let answer = prompt(self.prompter, &message, default, |p, input| {
            if input.is_empty() {
                return Ok(optional);
            }
            return accept_location(p, probe, input);
        })?;

        if answer.is_empty() {
            return Ok(None);
        }
        return Ok(Some(qualify_location(&answer)));
    }

    /// Ask for both locations and a name, then fill in whatever the merged
    /// section still lacks. Returns only the keys supplied in this session.
    ///
    /// # Errors
    ///
    /// Returns `Error::Prompt` if input cannot be read.
    fn collect_section(&mut self, file: &ConfigFile) -> Result<Section, Error> {
        let source = self.ask_location(LookupType::Source, true)?;
        let doc = self.ask_location(LookupType::Doc, true)?;
        let name = prompt(self.prompter, "Reference name", Some(DEFAULT_REFERENCE), |_, a| {
            return Ok(!a.is_empty());
        })?;

        if file.has_section(&name) {
            tracing::debug!(reference = %name, "repairing existing section");
        }
        let mut merged = file.section(&name).cloned().unwrap_or_else(|| return Section::new(&name));
        let mut supplied = Section::new(&name);
        for (lookup, value) in [(LookupType::Source, source), (LookupType::Doc, doc)] {
            if let Some(v) = value {
                merged.set(lookup.key(), &v);
                supplied.set(lookup.key(), &v);
            }
        }

        for lookup in [LookupType::Source, LookupType::Doc] {
            if merged.has_value(lookup.key()) {
                continue;
            }
            tracing::debug!(reference = %name, key = lookup.key(), "still missing, asking again");
            if let Some(v) = self.ask_location(lookup, false)? {
                merged.set(lookup.key(), &v);
                supplied.set(lookup.key(), &v);
            }
        }

        return Ok(supplied);
    }

    /// Load the configuration at `path`, collecting and saving a section
    /// interactively if none is valid.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigUnreadable` or `Error::ConfigMalformed` if the file
    /// exists but can't be used (never repaired), or `Error::Prompt` if input
    /// cannot be read. A failed write is reported as [`Outcome::Unsaved`].
    pub fn ensure(&mut self, path: &Path) -> Result<Bootstrap, Error> {
        let mut file = ConfigFile::load(path)?;

        if file.sections().iter().any(Section::is_valid) {
            tracing::debug!(path = %path.display(), "configuration ready");
            return Ok(Bootstrap {
                outcome: Outcome::Existing,
                store: ReferenceStore::new(path, file.sections().to_vec()),
            });
        }

        if file.existed() {
            eprintln!("No complete reference in {}. Let's add one.", path.display());
        } else {
            eprintln!("No configuration at {}. Let's create one.", path.display());
        }

        let section = self.collect_section(&file)?;
        let name = section.name().to_string();
        file.put_section(&section);

        let outcome = match file.export(path) {
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "configuration not saved");
                Outcome::Unsaved { error, name }
            },
            Ok(()) => {
                tracing::info!(path = %path.display(), reference = %name, "configuration saved");
                Outcome::Created { name }
            },
        };

        return Ok(Bootstrap {
            outcome,
            store: ReferenceStore::new(path, file.sections().to_vec()),
        });
    }
}

impl Defaults {
    /// Source under `$JAVA_HOME/src` when the variable is set, and the
    /// public Java SE API documentation.
    pub fn from_env() -> Self {
        return Self {
            doc: Some(DEFAULT_DOC.to_string()),
            source: std::env::var_os("JAVA_HOME")
                .map(|home| return PathBuf::from(home).join("src").display().to_string()),
        };
    }
}

/// Accept a location outright if it checks out, otherwise let the user decide.
///
/// # Errors
///
/// Returns `Error::Prompt` if the confirmation cannot be read.
fn accept_location<P, R>(prompter: &mut P, probe: &R, input: &str) -> Result<bool, Error>
where
    P: Prompter + ?Sized,
    R: Probe + ?Sized,
{
    let problem = if is_remote(input) {
        url_problem(probe, input)
    } else {
        path_problem(input)
    };

    let Some(problem) = problem else {
        return Ok(true);
    };
    return prompter.confirm(&format!("{input} {problem}. Use it anyway?"));
}

/// Why a filesystem location is unusable, if it is.
fn path_problem(input: &str) -> Option<String> {
    let path = Path::new(input.strip_prefix(FILE_SCHEME).unwrap_or(input));
    if path.is_dir() {
        return None;
    }
    return Some("does not exist".to_string());
}

/// Make a location fit for storage: absolute, ending in `/`, and scheme-qualified.
fn qualify_location(input: &str) -> String {
    if is_remote(input) {
        return with_trailing_slash(input.to_string());
    }

    let raw = input.strip_prefix(FILE_SCHEME).unwrap_or(input);
    let absolute = std::path::absolute(raw).unwrap_or_else(|_err| return PathBuf::from(raw));
    return normalize_base(&with_trailing_slash(absolute.display().to_string()));
}

/// Why a URL location is unusable, if it is. Transport failures count as
/// unreachable, never as errors.
fn url_problem<R: Probe + ?Sized>(probe: &R, url: &str) -> Option<String> {
    return match probe.status(url) {
        Err(e) => Some(format!("doesn't seem to be reachable ({e})")),
        Ok(HTTP_OK) => None,
        Ok(code) => Some(format!("doesn't seem to be reachable (HTTP {code})")),
    };
}

/// Append `/` unless already present.
fn with_trailing_slash(mut location: String) -> String {
    if !location.ends_with('/') {
        location.push('/');
    }
    return location;
}
