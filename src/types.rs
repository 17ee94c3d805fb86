//! Core domain types shared by the config file, the store, and the bootstrapper.

/// Key holding the documentation base of a section.
pub const DOC_KEY: &str = "doc";

/// Key holding the source base of a section.
pub const SRC_KEY: &str = "src";

/// One named group of string settings from the configuration file.
/// Entries keep their file order; keys are unique within a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Key/value pairs in file order.
    entries: Vec<(String, String)>,
    /// Reference name (the table header).
    name: String,
}

impl Section {
    /// Create an empty section.
    pub fn new(name: &str) -> Self {
        return Self {
            entries: Vec::new(),
            name: name.to_string(),
        };
    }

    /// Iterate over key/value pairs in file order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        return self.entries.iter().map(|(k, v)| return (k.as_str(), v.as_str()));
    }

    /// Value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        return self
            .entries
            .iter()
            .find(|(k, _)| return k == key)
            .map(|(_, v)| return v.as_str());
    }

    /// True when `key` is present with a non-empty value.
    pub fn has_value(&self, key: &str) -> bool {
        return self.get(key).is_some_and(|v| return !v.is_empty());
    }

    /// A section is usable when both `src` and `doc` are set and non-empty.
    pub fn is_valid(&self) -> bool {
        return self.has_value(SRC_KEY) && self.has_value(DOC_KEY);
    }

    /// Reference name of this section.
    pub fn name(&self) -> &str {
        return &self.name;
    }

    /// Insert or replace a value, keeping the key's original position.
    pub fn set(&mut self, key: &str, value: &str) {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| return k == key) {
            slot.1 = value.to_string();
            return;
        }
        self.entries.push((key.to_string(), value.to_string()));
        return;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_requires_both_keys() {
        let mut section = Section::new("java");
        assert!(!section.is_valid());
        section.set(SRC_KEY, "file:///src/");
        assert!(!section.is_valid());
        section.set(DOC_KEY, "https://docs.example.com/");
        assert!(section.is_valid());
    }

    #[test]
    fn empty_value_is_not_valid() {
        let mut section = Section::new("java");
        section.set(SRC_KEY, "file:///src/");
        section.set(DOC_KEY, "");
        assert!(!section.is_valid());
    }

    #[test]
    fn set_replaces_in_place() {
        let mut section = Section::new("java");
        section.set(SRC_KEY, "a");
        section.set(DOC_KEY, "b");
        section.set(SRC_KEY, "c");
        let entries: Vec<_> = section.entries().collect();
        assert_eq!(entries, vec![("src", "c"), ("doc", "b")]);
    }
}
