//! Raw tag arguments.

use std::collections::BTreeMap;

/// Attributes supplied on an `<itimeline>` tag, keyed case-insensitively.
///
/// Wiki engines lowercase attribute names, while timeline options are
/// lowerCamelCase. Names are folded to lowercase on insert and on lookup so
/// `showCurrentTime` finds `showcurrenttime`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagArguments {
    values: BTreeMap<String, String>,
}

impl TagArguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an argument. A repeated name replaces the earlier value.
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.values
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
    }

    /// Builder: set an argument.
    pub fn with(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Returns the raw value for `name`, ignoring case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(lowercased name, raw value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for TagArguments
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = Self::new();
        for (name, value) in iter {
            args.insert(name, value);
        }
        args
    }
}
