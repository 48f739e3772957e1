//! Identifier sets
//!
//! Every preference collection is a set of string ids. Membership is what the
//! feed filters care about, but the settings screen lists selections in the
//! order they were picked, so insertion order is kept.

use serde::{Deserialize, Deserializer, Serialize};

/// Stable identifier of a sport (e.g. `"nba"`)
pub type SportId = String;
/// Stable identifier of a team (e.g. `"lakers"`)
pub type TeamId = String;
/// Stable identifier of an article
pub type ArticleId = String;

/// Insertion-ordered set of identifiers
///
/// Serialized as a plain JSON array. Equality is set equality: two sets with
/// the same members compare equal regardless of order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct IdSet(Vec<String>);

impl IdSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|x| x == id)
    }

    /// Insert an id at the end. Returns false if it was already present.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.contains(&id) {
            return false;
        }
        self.0.push(id);
        true
    }

    /// Remove an id. Returns false if it was not present.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.0.iter().position(|x| x == id) {
            Some(i) => {
                self.0.remove(i);
                true
            }
            None => false,
        }
    }

    /// Remove the id if present, otherwise append it.
    /// Returns true if the id is a member afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.remove(id) {
            false
        } else {
            self.0.push(id.to_string());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Members in insertion order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl PartialEq for IdSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|id| other.contains(id))
    }
}

impl Eq for IdSet {}

impl<S: Into<String>> FromIterator<S> for IdSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = IdSet::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

impl<S: Into<String>> Extend<S> for IdSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for id in iter {
            self.insert(id);
        }
    }
}

impl<'a> IntoIterator for &'a IdSet {
    type Item = &'a str;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, String>, fn(&'a String) -> &'a str>;

    fn into_iter(self) -> Self::IntoIter {
        let as_str: fn(&'a String) -> &'a str = String::as_str;
        self.0.iter().map(as_str)
    }
}

// Duplicates in stored arrays collapse to the first occurrence.
impl<'de> Deserialize<'de> for IdSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let ids = Vec::<String>::deserialize(deserializer)?;
        Ok(ids.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_preserves_order_and_dedupes() {
        let mut set = IdSet::new();
        assert!(set.insert("nfl"));
        assert!(set.insert("nba"));
        assert!(!set.insert("nfl"));
        assert_eq!(set.as_slice(), &["nfl".to_string(), "nba".to_string()]);
    }

    #[test]
    fn test_toggle() {
        let mut set: IdSet = ["a", "b"].into_iter().collect();
        assert!(!set.toggle("a"));
        assert!(!set.contains("a"));
        assert!(set.toggle("a"));
        assert!(set.contains("a"));
        // Re-added at the end, but still the same set
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(set, ["a", "b"].into_iter().collect::<IdSet>());
    }

    #[test]
    fn test_equality_ignores_order() {
        let a: IdSet = ["x", "y"].into_iter().collect();
        let b: IdSet = ["y", "x"].into_iter().collect();
        let c: IdSet = ["x"].into_iter().collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_json_array_with_duplicates() {
        let set: IdSet = serde_json::from_str(r#"["a","b","a"]"#).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["a","b"]"#);
    }

    #[test]
    fn test_rejects_non_array() {
        assert!(serde_json::from_str::<IdSet>(r#""nba""#).is_err());
    }
}
