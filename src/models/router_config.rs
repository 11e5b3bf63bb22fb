//! Section-keyed command container
//!
//! A [`RouterConfig`] maps a RouterOS command path such as
//! `/interface wireguard` to the command lines emitted under it. Section
//! order is insertion order and is part of the output contract, so the map
//! is a [`LinkedHashMap`] rather than a `HashMap`.

use linked_hash_map::LinkedHashMap;
use serde::{Deserialize, Serialize};

/// Section key used for free-text comment lines.
pub const COMMENT_SECTION: &str = "";

/// Ordered mapping of command section to its command lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouterConfig {
    sections: LinkedHashMap<String, Vec<String>>,
}

impl RouterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line under `section`, creating the section at the end of
    /// the map if it does not exist yet.
    pub fn push(&mut self, section: &str, line: impl Into<String>) {
        self.section_mut(section).push(line.into());
    }

    /// Append several lines under `section`.
    pub fn extend<I, S>(&mut self, section: &str, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.section_mut(section)
            .extend(lines.into_iter().map(Into::into));
    }

    /// Append a comment line under the `""` section. A leading `# ` is added
    /// unless the text already starts with `#`.
    pub fn comment(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if text.starts_with('#') {
            self.push(COMMENT_SECTION, text);
        } else {
            self.push(COMMENT_SECTION, format!("# {}", text));
        }
    }

    fn section_mut(&mut self, section: &str) -> &mut Vec<String> {
        self.sections
            .entry(section.to_string())
            .or_insert_with(Vec::new)
    }

    pub fn get(&self, section: &str) -> Option<&Vec<String>> {
        self.sections.get(section)
    }

    /// Lines of `section`, or an empty slice when absent.
    pub fn lines(&self, section: &str) -> &[String] {
        self.sections
            .get(section)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    /// Section names in emission order.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.sections
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total number of lines over all sections, comments included.
    pub fn line_count(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }

    /// Append every line of `other` after the lines already held for the
    /// same section. Sections new to `self` keep the order they have in
    /// `other`.
    pub fn merge(&mut self, other: &RouterConfig) {
        for (section, lines) in &other.sections {
            self.section_mut(section).extend(lines.iter().cloned());
        }
    }

    pub(crate) fn retain_sections<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str, &[String]) -> bool,
    {
        let sections = std::mem::take(&mut self.sections);
        for (section, lines) in sections {
            if keep(&section, &lines) {
                self.sections.insert(section, lines);
            }
        }
    }
}

impl FromIterator<(String, Vec<String>)> for RouterConfig {
    fn from_iter<T: IntoIterator<Item = (String, Vec<String>)>>(iter: T) -> Self {
        let mut config = RouterConfig::new();
        for (section, lines) in iter {
            config.extend(&section, lines);
        }
        config
    }
}

impl<'a> IntoIterator for &'a RouterConfig {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = linked_hash_map::Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_insertion_order() {
        let mut config = RouterConfig::new();
        config.push("/ip pool", "add name=a ranges=10.0.0.2-10.0.0.9");
        config.push("/ppp profile", "add name=p");
        config.push("/ip pool", "add name=b ranges=10.0.1.2-10.0.1.9");

        let sections: Vec<&str> = config.sections().collect();
        assert_eq!(sections, vec!["/ip pool", "/ppp profile"]);
        assert_eq!(config.lines("/ip pool").len(), 2);
        assert_eq!(config.line_count(), 3);
    }

    #[test]
    fn test_comment_prefix() {
        let mut config = RouterConfig::new();
        config.comment("hello");
        config.comment("# already");
        assert_eq!(config.lines(COMMENT_SECTION), ["# hello", "# already"]);
    }

    #[test]
    fn test_missing_section_is_empty() {
        let config = RouterConfig::new();
        assert!(config.lines("/ip route").is_empty());
        assert!(config.get("/ip route").is_none());
    }
}
