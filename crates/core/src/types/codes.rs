//! Redemption code collections.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A code appeared more than once when building a [`CodeSet`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("duplicate redemption code: {0}")]
pub struct DuplicateCode(pub String);

/// An ordered set of distinct redemption codes.
///
/// Insertion order is kept so the first code can be designated as the one
/// used to create the discount, with the rest appended afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct CodeSet {
    codes: Vec<String>,
    seen: HashSet<String>,
}

impl CodeSet {
    /// Create an empty set with room for `capacity` codes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            codes: Vec::with_capacity(capacity),
            seen: HashSet::with_capacity(capacity),
        }
    }

    /// Insert a code, returning `false` if it was already present.
    pub fn insert(&mut self, code: String) -> bool {
        if self.seen.contains(&code) {
            return false;
        }
        self.seen.insert(code.clone());
        self.codes.push(code);
        true
    }

    /// Returns whether the set contains `code`.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.seen.contains(code)
    }

    /// Number of codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Returns true if there are no codes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Split into the designated first code and the remaining codes.
    ///
    /// Returns `None` for an empty set.
    #[must_use]
    pub fn split_first(&self) -> Option<(&str, &[String])> {
        self.codes
            .split_first()
            .map(|(first, rest)| (first.as_str(), rest))
    }

    /// Iterate over codes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    /// Codes as a slice, in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.codes
    }

    /// Consumes the set and returns the codes in insertion order.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.codes
    }
}

impl TryFrom<Vec<String>> for CodeSet {
    type Error = DuplicateCode;

    fn try_from(codes: Vec<String>) -> Result<Self, Self::Error> {
        let mut set = Self::with_capacity(codes.len());
        for code in codes {
            if set.contains(&code) {
                return Err(DuplicateCode(code));
            }
            set.insert(code);
        }
        Ok(set)
    }
}

impl From<CodeSet> for Vec<String> {
    fn from(set: CodeSet) -> Self {
        set.codes
    }
}

impl<'a> IntoIterator for &'a CodeSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.codes.iter()
    }
}
