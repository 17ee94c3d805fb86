//! Reference bases, scheme normalization, and class-to-locator resolution.

use std::fmt;
use std::path::PathBuf;

use url::Url;

use crate::error::Error;
use crate::lookup::LookupType;
use crate::types::{DOC_KEY, SRC_KEY};

/// Prefix given to bases that name a filesystem location.
pub const FILE_SCHEME: &str = "file://";

/// Prefixes that mark a base as remote and leave it untouched.
const REMOTE_SCHEMES: [&str; 2] = ["http://", "https://"];

/// A fully-qualified target produced by [`Reference::get_for`].
/// The string is kept exactly as built; parsing only validates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    /// Scheme of the locator.
    scheme: Scheme,
    /// The locator text.
    value: String,
}

/// Locator schemes srcdoc produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Local filesystem.
    File,
    /// Plain HTTP.
    Http,
    /// HTTP over TLS.
    Https,
}

/// A pair of bases, one for sources and one for documentation.
/// Both are normalized on construction and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Base for documentation lookups.
    doc_base: String,
    /// Base for source lookups.
    source_base: String,
}

impl Locator {
    /// Validate a locator string and classify its scheme.
    ///
    /// # Errors
    ///
    /// Returns `Error::MalformedLocator` if the text is not a valid URL or
    /// uses a scheme other than `file`, `http`, or `https`.
    pub fn parse(value: String) -> Result<Self, Error> {
        let url = Url::parse(&value).map_err(|e| {
            return Error::MalformedLocator {
                locator: value.clone(),
                reason: e.to_string(),
            };
        })?;

        let scheme = match url.scheme() {
            "file" => Scheme::File,
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            other => {
                let reason = format!("unsupported scheme `{other}`");
                return Err(Error::MalformedLocator { locator: value, reason });
            },
        };

        return Ok(Self { scheme, value });
    }

    /// The locator text.
    pub fn as_str(&self) -> &str {
        return &self.value;
    }

    /// True for `http` and `https` locators.
    pub const fn is_remote(&self) -> bool {
        return matches!(self.scheme, Scheme::Http | Scheme::Https);
    }

    /// Scheme of this locator.
    pub const fn scheme(&self) -> Scheme {
        return self.scheme;
    }

    /// Local path for `file` locators. `None` for remote locators and for
    /// file URLs naming a non-local host.
    pub fn to_file_path(&self) -> Option<PathBuf> {
        if self.scheme != Scheme::File {
            return None;
        }
        return Url::parse(&self.value).ok()?.to_file_path().ok();
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.write_str(&self.value);
    }
}

impl Reference {
    /// Build a reference from raw config values.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidLocator` if either base is missing or empty.
    pub fn new(source_base: Option<&str>, doc_base: Option<&str>) -> Result<Self, Error> {
        let source_base = require_base(source_base, SRC_KEY)?;
        let doc_base = require_base(doc_base, DOC_KEY)?;

        return Ok(Self {
            doc_base: normalize_base(doc_base),
            source_base: normalize_base(source_base),
        });
    }

    /// Normalized base used for the given lookup type.
    pub fn base(&self, lookup: LookupType) -> &str {
        return match lookup {
            LookupType::Doc => &self.doc_base,
            LookupType::Source => &self.source_base,
        };
    }

    /// Normalized documentation base.
    pub fn doc_base(&self) -> &str {
        return &self.doc_base;
    }

    /// Resolve a fully-qualified class name to a locator.
    ///
    /// Dots become `/`, the lookup's extension is appended, and the result is
    /// concatenated onto the base as stored. Bases are expected to end in `/`.
    ///
    /// # Errors
    ///
    /// Returns `Error::MalformedLocator` if the result is not a valid URL.
    pub fn get_for(&self, class_name: &str, lookup: LookupType) -> Result<Locator, Error> {
        let relative = class_name.replace('.', "/");
        let target = format!("{}{relative}{}", self.base(lookup), lookup.extension());
        return Locator::parse(target);
    }

    /// Normalized source base.
    pub fn source_base(&self) -> &str {
        return &self.source_base;
    }
}

/// True when `raw` carries an `http://` or `https://` scheme.
pub fn is_remote(raw: &str) -> bool {
    return REMOTE_SCHEMES.iter().any(|scheme| return raw.starts_with(scheme));
}

/// Qualify a base with a scheme. Remote bases and bases already carrying
/// `file://` are returned unchanged; anything else is treated as a path.
pub fn normalize_base(raw: &str) -> String {
    if is_remote(raw) || raw.starts_with(FILE_SCHEME) {
        return raw.to_string();
    }
    return format!("{FILE_SCHEME}{raw}");
}

/// Reject missing or empty bases.
///
/// # Errors
///
/// Returns `Error::InvalidLocator` naming `key`.
fn require_base<'a>(value: Option<&'a str>, key: &'static str) -> Result<&'a str, Error> {
    return match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::InvalidLocator {
            key,
            reference: None,
        }),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn doc_lookup_concatenates_onto_doc_base() {
        let reference = Reference::new(Some("file:///src"), Some("http://docs.example.com/api/")).unwrap();
        let locator = reference.get_for("java.util.List", LookupType::Doc).unwrap();
        assert_eq!(locator.as_str(), "http://docs.example.com/api/java/util/List.html");
        assert_eq!(locator.scheme(), Scheme::Http);
    }

    #[test]
    fn source_lookup_concatenates_onto_source_base() {
        let reference = Reference::new(Some("file:///src/"), Some("http://docs.example.com/api/")).unwrap();
        let locator = reference.get_for("java.util.List", LookupType::Source).unwrap();
        assert_eq!(locator.as_str(), "file:///src/java/util/List.java");
        assert_eq!(locator.to_file_path(), Some(PathBuf::from("/src/java/util/List.java")));
    }

    #[test]
    fn scheme_less_bases_become_file_urls() {
        let reference = Reference::new(Some("/opt/jdk/src/"), Some("/opt/jdk/docs/api/")).unwrap();
        assert_eq!(reference.source_base(), "file:///opt/jdk/src/");
        assert_eq!(reference.doc_base(), "file:///opt/jdk/docs/api/");
    }

    #[test]
    fn doc_base_normalized_like_source_base() {
        let reference = Reference::new(Some("https://src.example.com/"), Some("/docs/")).unwrap();
        assert_eq!(reference.source_base(), "https://src.example.com/");
        assert_eq!(reference.doc_base(), "file:///docs/");
    }

    #[test]
    fn empty_doc_base_is_invalid() {
        let err = Reference::new(Some("/src/"), Some("")).unwrap_err();
        assert!(matches!(err, Error::InvalidLocator { key: "doc", .. }), "got {err:?}");
    }

    #[test]
    fn missing_source_base_is_invalid() {
        let err = Reference::new(None, Some("http://docs.example.com/")).unwrap_err();
        assert!(matches!(err, Error::InvalidLocator { key: "src", .. }), "got {err:?}");
    }

    #[test]
    fn bad_host_is_malformed() {
        let reference = Reference::new(Some("/src/"), Some("http://exa mple.com/")).unwrap();
        let err = reference.get_for("java.lang.Object", LookupType::Doc).unwrap_err();
        assert!(matches!(err, Error::MalformedLocator { .. }), "got {err:?}");
    }

    #[test]
    fn remote_locator_has_no_file_path() {
        let reference = Reference::new(Some("/src/"), Some("https://docs.example.com/")).unwrap();
        let locator = reference.get_for("java.lang.Object", LookupType::Doc).unwrap();
        assert!(locator.is_remote());
        assert_eq!(locator.to_file_path(), None);
    }

    proptest! {
        #[test]
        fn remote_bases_are_untouched(
            scheme in prop::sample::select(vec!["http://", "https://"]),
            rest in "[a-z0-9./_-]{1,40}",
        ) {
            let base = format!("{scheme}{rest}");
            let reference = Reference::new(Some(&base), Some(&base)).unwrap();
            prop_assert_eq!(reference.source_base(), base.as_str());
            prop_assert_eq!(reference.doc_base(), base.as_str());
        }

        #[test]
        fn path_bases_are_prefixed_once(path in "/[a-zA-Z0-9._-]{1,20}(/[a-zA-Z0-9._-]{1,20}){0,4}/?") {
            let first = Reference::new(Some(&path), Some(&path)).unwrap();
            prop_assert_eq!(first.source_base(), format!("file://{path}"));

            let again = Reference::new(Some(first.source_base()), Some(first.doc_base())).unwrap();
            prop_assert_eq!(again.source_base(), first.source_base());
            prop_assert_eq!(again.doc_base(), first.doc_base());
        }
    }
}
