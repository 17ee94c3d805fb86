//! Named reference lookup over the sections of one configuration file.

use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::reference::Reference;
use crate::types::{DOC_KEY, SRC_KEY, Section};

/// Reference consulted first when the caller names none.
pub const DEFAULT_REFERENCE: &str = "java";

/// Immutable view of the configured references for one run.
#[derive(Debug, Clone)]
pub struct ReferenceStore {
    /// Configuration file the sections came from, for diagnostics.
    path: PathBuf,
    /// Sections in file order, unique by name.
    sections: Vec<Section>,
}

impl ReferenceStore {
    /// Wrap parsed sections. No validation happens here.
    pub fn new(path: &Path, sections: Vec<Section>) -> Self {
        return Self {
            path: path.to_path_buf(),
            sections,
        };
    }

    /// Resolve the reference used when no name is given: `java` if such a
    /// section exists, otherwise the first section in file order.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoReferencesAvailable` if there are no sections, or the
    /// errors of [`Self::lookup`] for the chosen section.
    pub fn default_reference(&self) -> Result<(&str, Reference), Error> {
        let section = self
            .sections
            .iter()
            .find(|s| return s.name() == DEFAULT_REFERENCE)
            .or_else(|| return self.sections.first())
            .ok_or_else(|| {
                return Error::NoReferencesAvailable {
                    path: self.path.clone(),
                };
            })?;

        tracing::debug!(reference = section.name(), "using default reference");
        return Ok((section.name(), reference_from_section(section)?));
    }

    /// Build the reference stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns `Error::ReferenceNotFound` if no section has that name, or
    /// `Error::InvalidLocator` if its `src` or `doc` is missing or empty.
    pub fn lookup(&self, name: &str) -> Result<Reference, Error> {
        let Some(section) = self.sections.iter().find(|s| return s.name() == name) else {
            return Err(Error::ReferenceNotFound {
                available: self.names().map(str::to_string).collect(),
                name: name.to_string(),
            });
        };
        return reference_from_section(section);
    }

    /// Section names in file order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        return self.sections.iter().map(Section::name);
    }

    /// Look up `name` when given, otherwise apply the default policy.
    /// Returns the name of the reference that was used.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::lookup`] or [`Self::default_reference`].
    pub fn resolve<'a>(&'a self, name: Option<&'a str>) -> Result<(&'a str, Reference), Error> {
        return match name {
            Some(n) => Ok((n, self.lookup(n)?)),
            None => self.default_reference(),
        };
    }
}

/// Build a reference from a section, tagging errors with the section name.
///
/// # Errors
///
/// Returns `Error::InvalidLocator` if `src` or `doc` is missing or empty.
fn reference_from_section(section: &Section) -> Result<Reference, Error> {
    return Reference::new(section.get(SRC_KEY), section.get(DOC_KEY)).map_err(|e| {
        return match e {
            Error::InvalidLocator { key, .. } => Error::InvalidLocator {
                key,
                reference: Some(section.name().to_string()),
            },
            other => other,
        };
    });
}
