//! Token normalization.
//!
//! Every input shape is flattened into whitespace-free, non-empty tokens.

use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Something to tokenize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Free text, split on whitespace.
    Text(String),
    /// A number, tokenized as its decimal form.
    Integer(i64),
    /// A sequence of strings, each split on whitespace.
    List(Vec<String>),
    /// Keys and values both tokenized, key first, in key order.
    Map(BTreeMap<String, String>),
}

impl Source {
    fn push_tokens(&self, out: &mut Vec<String>) {
        match self {
            Self::Text(text) => push_split(text, out),
            Self::Integer(number) => out.push(number.to_string()),
            Self::List(items) => {
                for item in items {
                    push_split(item, out);
                }
            }
            Self::Map(entries) => {
                for (key, value) in entries {
                    push_split(key, out);
                    push_split(value, out);
                }
            }
        }
    }
}

fn push_split(text: &str, out: &mut Vec<String>) {
    out.extend(text.split_whitespace().map(str::to_string));
}

impl From<&str> for Source {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Source {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&String> for Source {
    fn from(text: &String) -> Self {
        Self::Text(text.clone())
    }
}

impl From<i64> for Source {
    fn from(number: i64) -> Self {
        Self::Integer(number)
    }
}

impl From<u16> for Source {
    fn from(number: u16) -> Self {
        Self::Integer(i64::from(number))
    }
}

impl From<Vec<String>> for Source {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<&[String]> for Source {
    fn from(items: &[String]) -> Self {
        Self::List(items.to_vec())
    }
}

impl From<Vec<&str>> for Source {
    fn from(items: Vec<&str>) -> Self {
        Self::List(items.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Source {
    fn from(items: &[&str]) -> Self {
        Self::List(items.iter().map(|s| (*s).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Source {
    fn from(items: [&str; N]) -> Self {
        Self::from(&items[..])
    }
}

impl From<BTreeMap<String, String>> for Source {
    fn from(entries: BTreeMap<String, String>) -> Self {
        Self::Map(entries)
    }
}

impl From<HashMap<String, String>> for Source {
    fn from(entries: HashMap<String, String>) -> Self {
        Self::Map(entries.into_iter().collect())
    }
}

/// Tokenize a single source.
///
/// With `unique` the tokens are deduplicated and come back sorted;
/// otherwise first-seen order is kept, duplicates included.
pub fn normalize(source: impl Into<Source>, unique: bool) -> Vec<String> {
    normalize_with(source, std::iter::empty::<Source>(), unique)
}

/// Tokenize a source followed by any number of extra sources.
///
/// Extras go through the same rules and are appended before deduplication.
pub fn normalize_with<I>(source: impl Into<Source>, extras: I, unique: bool) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<Source>,
{
    let mut tokens = Vec::new();
    source.into().push_tokens(&mut tokens);
    for extra in extras {
        extra.into().push_tokens(&mut tokens);
    }

    if unique {
        tokens
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    } else {
        tokens
    }
}
