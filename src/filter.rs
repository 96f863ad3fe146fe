//! Token filters applied to template lines during a filtered copy.
//!
//! A [`FilterSet`] is an ordered mapping from token to replacement text.
//! Several sets are grouped into a [`FilterSetCollection`]; when two sets
//! define the same token, the set added first wins.

use indexmap::IndexMap;
use log::debug;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::collections::HashMap;

use crate::error::{Error, Result};

/// Ordered token to replacement mapping.
///
/// Tokens are matched literally. A set created with [`FilterSet::with_delimiters`]
/// wraps every inserted name, so `insert("NAME", ..)` registers `@NAME@`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    begin: String,
    end: String,
    tokens: IndexMap<String, String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiters<B: Into<String>, E: Into<String>>(begin: B, end: E) -> Self {
        Self {
            begin: begin.into(),
            end: end.into(),
            tokens: IndexMap::new(),
        }
    }

    /// Adds a token. Replaces the value of a token that is already present.
    pub fn insert<K: AsRef<str>, V: Into<String>>(&mut self, name: K, value: V) {
        let token = format!("{}{}{}", self.begin, name.as_ref(), self.end);
        self.tokens.insert(token, value.into());
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.tokens.get(token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterates over `(token, replacement)` pairs, delimiters included.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tokens.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: AsRef<str>, V: Into<String>> Extend<(K, V)> for FilterSet {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for FilterSet {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut set = FilterSet::new();
        set.extend(iter);
        set
    }
}

/// Ordered group of filter sets applied together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSetCollection {
    sets: Vec<FilterSet>,
}

impl FilterSetCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, set: FilterSet) {
        self.sets.push(set);
    }

    pub fn sets(&self) -> &[FilterSet] {
        &self.sets
    }

    /// True when at least one set defines a token.
    pub fn has_filters(&self) -> bool {
        self.sets.iter().any(|set| !set.is_empty())
    }

    /// Compiles the collection into a reusable [`TokenReplacer`].
    pub fn replacer(&self) -> Result<TokenReplacer> {
        TokenReplacer::new(self)
    }

    /// Replaces every known token in `line`. Compiles the collection on each
    /// call; use [`FilterSetCollection::replacer`] for repeated lines.
    pub fn replace_tokens(&self, line: &str) -> Result<String> {
        Ok(self.replacer()?.replace(line).into_owned())
    }
}

impl From<FilterSet> for FilterSetCollection {
    fn from(set: FilterSet) -> Self {
        Self { sets: vec![set] }
    }
}

impl FromIterator<FilterSet> for FilterSetCollection {
    fn from_iter<T: IntoIterator<Item = FilterSet>>(iter: T) -> Self {
        Self {
            sets: iter.into_iter().collect(),
        }
    }
}

/// Compiled form of a [`FilterSetCollection`].
///
/// Scans a line once from left to right. At each position the longest token
/// wins, and replacement text is never scanned again.
#[derive(Debug)]
pub struct TokenReplacer {
    matcher: Option<Regex>,
    values: HashMap<String, String>,
}

impl TokenReplacer {
    fn new(collection: &FilterSetCollection) -> Result<Self> {
        let mut values: HashMap<String, String> = HashMap::new();
        for set in &collection.sets {
            for (token, value) in set.iter() {
                if token.is_empty() {
                    return Err(Error::FilterError("empty token is not allowed".to_string()));
                }
                values
                    .entry(token.to_string())
                    .or_insert_with(|| value.to_string());
            }
        }

        if values.is_empty() {
            return Ok(Self {
                matcher: None,
                values,
            });
        }

        let mut tokens: Vec<&str> = values.keys().map(String::as_str).collect();
        // Regex alternation is leftmost-first, so longer tokens go first.
        tokens.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let pattern = tokens
            .iter()
            .map(|token| regex::escape(token))
            .collect::<Vec<_>>()
            .join("|");
        debug!("Compiled {} filter token(s)", tokens.len());

        let matcher = Regex::new(&pattern).map_err(|e| Error::FilterError(e.to_string()))?;
        Ok(Self {
            matcher: Some(matcher),
            values,
        })
    }

    pub fn replace<'a>(&self, line: &'a str) -> Cow<'a, str> {
        match &self.matcher {
            Some(matcher) => matcher.replace_all(line, |caps: &Captures| {
                self.values
                    .get(&caps[0])
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            }),
            None => Cow::Borrowed(line),
        }
    }
}
