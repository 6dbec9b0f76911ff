//! Case-insensitive header map.
//!
//! Header names are stored lowercased, so `Content-Type` and `content-type`
//! address the same entry and a later insert replaces an earlier one
//! regardless of spelling. Values are kept verbatim.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Request or response headers keyed by lowercased name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct Headers {
    entries: BTreeMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`, replacing any existing value for that name.
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(name.as_ref().to_ascii_lowercase(), value.into())
    }

    /// Add `value` under `name`, joining with `", "` if the name is already
    /// present. Used for repeated response headers.
    pub fn append(&mut self, name: impl AsRef<str>, value: impl AsRef<str>) {
        let key = name.as_ref().to_ascii_lowercase();
        match self.entries.get_mut(&key) {
            Some(existing) => {
                existing.push_str(", ");
                existing.push_str(value.as_ref());
            }
            None => {
                self.entries.insert(key, value.as_ref().to_string());
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_ascii_lowercase())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.entries.remove(&name.to_ascii_lowercase())
    }

    /// Overlay every entry of `other` onto `self`; `other` wins on collision.
    pub fn merge(&mut self, other: &Headers) {
        for (name, value) in &other.entries {
            self.entries.insert(name.clone(), value.clone());
        }
    }

    pub fn content_type(&self) -> Option<&str> {
        self.get("content-type")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<BTreeMap<String, String>> for Headers {
    fn from(map: BTreeMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<Headers> for BTreeMap<String, String> {
    fn from(headers: Headers) -> Self {
        headers.entries
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

impl<K: AsRef<str>, V: Into<String>, const N: usize> From<[(K, V); N]> for Headers {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_case_insensitive() {
        let mut headers = Headers::new();
        headers.insert("X-Api-Key", "one");
        headers.insert("x-api-key", "two");
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("X-API-KEY"), Some("two"));
    }

    #[test]
    fn merge_overrides_on_collision() {
        let mut defaults = Headers::from([("Accept", "text/plain"), ("X-Trace", "abc")]);
        let per_call = Headers::from([("accept", "application/json")]);
        defaults.merge(&per_call);
        assert_eq!(defaults.get("accept"), Some("application/json"));
        assert_eq!(defaults.get("x-trace"), Some("abc"));
    }

    #[test]
    fn append_joins_repeated_values() {
        let mut headers = Headers::new();
        headers.append("Vary", "Accept");
        headers.append("vary", "Origin");
        assert_eq!(headers.get("vary"), Some("Accept, Origin"));
    }

    #[test]
    fn deserialization_lowercases_names() {
        let headers: Headers = serde_json::from_str(r#"{"Content-Type":"text/html"}"#).unwrap();
        assert_eq!(headers.content_type(), Some("text/html"));
        assert_eq!(headers.iter().next(), Some(("content-type", "text/html")));
    }
}
