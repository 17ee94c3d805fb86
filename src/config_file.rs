//! Section file persistence: every top-level TOML table is one reference.
//!
//! The document is kept as a format-preserving `toml_edit` tree so that
//! comments and ordering survive when the bootstrapper writes a section back.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use toml_edit::{DocumentMut, Item, Table};

use crate::error::Error;
use crate::types::Section;

/// Parsed configuration file.
#[derive(Debug)]
pub struct ConfigFile {
    /// The format-preserving document.
    document: DocumentMut,
    /// Whether the file was present on disk when loaded.
    existed: bool,
    /// Sections in file order, validated at parse time.
    sections: Vec<Section>,
}

impl ConfigFile {
    /// Empty file with no sections.
    pub fn empty() -> Self {
        return Self {
            document: DocumentMut::new(),
            existed: false,
            sections: Vec::new(),
        };
    }

    /// Whether the file existed when it was loaded.
    pub const fn existed(&self) -> bool {
        return self.existed;
    }

    /// Write the whole document to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigUnwritable` if the directory or file cannot be written.
    pub fn export(&self, path: &Path) -> Result<(), Error> {
        let unwritable = |source| {
            return Error::ConfigUnwritable {
                path: path.to_path_buf(),
                source,
            };
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(unwritable)?;
        }

        std::fs::write(path, self.document.to_string()).map_err(unwritable)?;
        return Ok(());
    }

    /// Whether a section named `name` exists.
    pub fn has_section(&self, name: &str) -> bool {
        return self.section(name).is_some();
    }

    /// Read and parse a configuration file.
    /// A missing file (or a parent that isn't a directory) yields an empty
    /// configuration, never an error.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigUnreadable` on read failure (other than not-found),
    /// or `Error::ConfigMalformed` if the content is not UTF-8 or not a valid
    /// section file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = match std::fs::read_to_string(path) {
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
                return Ok(Self::empty());
            },
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(Error::ConfigMalformed {
                    path: path.to_path_buf(),
                    reason: format!("not valid UTF-8 ({e})"),
                });
            },
            Err(source) => {
                return Err(Error::ConfigUnreadable {
                    path: path.to_path_buf(),
                    source,
                });
            },
            Ok(c) => c,
        };

        let mut file = Self::parse(path, &content)?;
        file.existed = true;
        return Ok(file);
    }

    /// Parse configuration text. `path` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigMalformed` on TOML syntax errors, top-level keys
    /// outside a table, nested tables, or non-string values.
    pub fn parse(path: &Path, content: &str) -> Result<Self, Error> {
        let document: DocumentMut = content.parse().map_err(|e: toml_edit::TomlError| {
            return Error::ConfigMalformed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            };
        })?;

        let mut sections = Vec::new();
        for (name, item) in document.iter() {
            sections.push(read_section(path, name, item)?);
        }

        return Ok(Self {
            document,
            existed: false,
            sections,
        });
    }

    /// Insert a section, or merge its keys into the existing one of the same name.
    /// Keys of an existing section that `section` doesn't mention are kept.
    pub fn put_section(&mut self, section: &Section) {
        let item = self
            .document
            .entry(section.name())
            .or_insert(Item::Table(Table::new()));
        if item.as_table_like().is_none() {
            *item = Item::Table(Table::new());
        }
        if let Some(table) = item.as_table_like_mut() {
            for (key, value) in section.entries() {
                table.insert(key, toml_edit::value(value));
            }
        }

        match self.sections.iter_mut().find(|s| return s.name() == section.name()) {
            None => self.sections.push(section.clone()),
            Some(existing) => {
                for (key, value) in section.entries() {
                    existing.set(key, value);
                }
            },
        }
        return;
    }

    /// Section named `name`, if any.
    pub fn section(&self, name: &str) -> Option<&Section> {
        return self.sections.iter().find(|s| return s.name() == name);
    }

    /// All sections in file order.
    pub fn sections(&self) -> &[Section] {
        return &self.sections;
    }
}

/// Convert one top-level item into a section.
///
/// # Errors
///
/// Returns `Error::ConfigMalformed` if the item is not a flat table of strings.
fn read_section(path: &Path, name: &str, item: &Item) -> Result<Section, Error> {
    let malformed = |reason: String| {
        return Error::ConfigMalformed {
            path: PathBuf::from(path),
            reason,
        };
    };

    let Some(table) = item.as_table_like() else {
        return Err(malformed(format!("`{name}` is not inside a [section]")));
    };

    let mut section = Section::new(name);
    for (key, value) in table.iter() {
        let Some(text) = value.as_str() else {
            return Err(malformed(format!("`{name}.{key}` must be a string")));
        };
        section.set(key, text);
    }
    return Ok(section);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<ConfigFile, Error> {
        return ConfigFile::parse(Path::new("srcdoc.toml"), content);
    }

    #[test]
    fn sections_keep_file_order() {
        let file = parse(
            "[zulu]\nsrc = \"/z/\"\ndoc = \"/zd/\"\n\n[alpha]\nsrc = \"/a/\"\n\n[mid]\ndoc = \"/m/\"\n",
        )
        .unwrap();
        let names: Vec<&str> = file.sections().iter().map(Section::name).collect();
        assert_eq!(names, vec!["zulu", "alpha", "mid"]);
        assert!(file.has_section("alpha"));
        assert!(!file.has_section("java"));
    }

    #[test]
    fn inline_tables_are_sections() {
        let file = parse("java = { src = \"/src/\", doc = \"https://docs.example.com/\" }\n").unwrap();
        let section = file.section("java").unwrap();
        assert!(section.is_valid());
    }

    #[test]
    fn syntax_error_is_malformed() {
        let err = parse("[java\nsrc = ").unwrap_err();
        assert!(matches!(err, Error::ConfigMalformed { .. }), "got {err:?}");
    }

    #[test]
    fn top_level_key_is_malformed() {
        let err = parse("src = \"/src/\"\n").unwrap_err();
        assert!(matches!(err, Error::ConfigMalformed { .. }), "got {err:?}");
    }

    #[test]
    fn non_string_value_is_malformed() {
        let err = parse("[java]\nsrc = 3\n").unwrap_err();
        assert!(matches!(err, Error::ConfigMalformed { .. }), "got {err:?}");
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = ConfigFile::load(&dir.path().join("absent.toml")).unwrap();
        assert!(!file.existed());
        assert!(file.sections().is_empty());
    }

    #[test]
    fn non_utf8_file_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("srcdoc.toml");
        std::fs::write(&path, b"[java]\nsrc = \"\xff\xfe\"\n").unwrap();

        let err = ConfigFile::load(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigMalformed { .. }), "got {err:?}");
        assert_eq!(err.exit_code(), 22);
    }

    #[test]
    fn directory_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigFile::load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigUnreadable { .. }), "got {err:?}");
    }

    #[test]
    fn put_section_merges_and_keeps_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("srcdoc.toml");
        std::fs::write(&path, "# my references\n[java]\nsrc = \"file:///jdk/src/\"\n\n[other]\nsrc = \"/o/\"\ndoc = \"/od/\"\n").unwrap();

        let mut file = ConfigFile::load(&path).unwrap();
        assert!(file.existed());
        let mut update = Section::new("java");
        update.set("doc", "https://docs.example.com/");
        file.put_section(&update);
        file.export(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# my references\n"), "comment lost: {written}");

        let reloaded = ConfigFile::load(&path).unwrap();
        let java = reloaded.section("java").unwrap();
        assert_eq!(java.get("src"), Some("file:///jdk/src/"));
        assert_eq!(java.get("doc"), Some("https://docs.example.com/"));
        let names: Vec<&str> = reloaded.sections().iter().map(Section::name).collect();
        assert_eq!(names, vec!["java", "other"]);
    }

    #[test]
    fn export_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("srcdoc.toml");
        let mut file = ConfigFile::empty();
        let mut section = Section::new("java");
        section.set("src", "file:///src/");
        section.set("doc", "https://docs.example.com/");
        file.put_section(&section);
        file.export(&path).unwrap();

        let reloaded = ConfigFile::load(&path).unwrap();
        assert_eq!(reloaded.sections(), &[section]);
    }
}
