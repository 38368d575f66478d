use core::fmt;
use std::cmp::Ordering;

use serde::{Serialize, Serializer};

/// Ordered index tokens of a name, `["sw", "north", "3"]` for
/// `harv[sw,north,3]`.
///
/// Positions may be negative and then count from the end, so `-1` is always
/// the last token whatever the length of the tuple.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct IndexTuple(Vec<String>);

impl IndexTuple {
    /// Tuple of `tokens`, in order.
    pub fn new(tokens: Vec<String>) -> Self {
        Self(tokens)
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the name had empty brackets, `base[]`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Offset into the tuple for `position`, `None` if out of range.
    pub fn resolve(&self, position: isize) -> Option<usize> {
        let offset = if position < 0 {
            self.len().checked_sub(position.unsigned_abs())?
        } else {
            position as usize
        };
        (offset < self.len()).then_some(offset)
    }

    /// Token at `position`, negative positions counting from the end.
    pub fn get(&self, position: isize) -> Option<&str> {
        self.resolve(position).map(|offset| self.0[offset].as_str())
    }

    /// Grouping key of the token at `position`.
    pub fn key(&self, position: isize) -> Option<IndexKey> {
        self.get(position).map(IndexKey::from)
    }

    /// Tokens in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Tokens as owned strings.
    pub fn tokens(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for IndexTuple {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Grouping key built from a single index token.
///
/// Tokens written as plain integers order numerically and before every
/// other token, the rest order lexicographically. `"07"` is kept as text so
/// that the key always prints as the token it came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndexKey {
    /// Token that is the canonical form of an integer
    Int(i64),
    /// Any other token
    Text(String),
}

impl From<&str> for IndexKey {
    fn from(token: &str) -> Self {
        match token.parse::<i64>() {
            Ok(value) if value.to_string() == token => IndexKey::Int(value),
            _ => IndexKey::Text(token.to_string()),
        }
    }
}

impl From<i64> for IndexKey {
    fn from(value: i64) -> Self {
        IndexKey::Int(value)
    }
}

impl Ord for IndexKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (IndexKey::Int(a), IndexKey::Int(b)) => a.cmp(b),
            (IndexKey::Int(_), IndexKey::Text(_)) => Ordering::Less,
            (IndexKey::Text(_), IndexKey::Int(_)) => Ordering::Greater,
            (IndexKey::Text(a), IndexKey::Text(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for IndexKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKey::Int(value) => write!(f, "{value}"),
            IndexKey::Text(token) => f.write_str(token),
        }
    }
}

impl Serialize for IndexKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests;
