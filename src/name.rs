use thiserror::Error;

use crate::{config::Brackets, index::IndexTuple};

/// Why a name could not be split into set name and indices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("`{name}` has no opening bracket '{open}'")]
    /// The name lacks the opening bracket
    MissingOpen {
        /// Name that failed to parse
        name: String,
        /// Expected opening bracket
        open: char,
    },
    #[error("`{name}` does not end with closing bracket '{close}'")]
    /// The name does not end with the closing bracket
    MissingClose {
        /// Name that failed to parse
        name: String,
        /// Expected closing bracket
        close: char,
    },
    #[error("`{name}` has unbalanced brackets")]
    /// Brackets inside the indices
    Unbalanced {
        /// Name that failed to parse
        name: String,
    },
}

/// A name split into its set name and index tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    /// Set name, everything before the opening bracket
    pub base: String,
    /// Tokens between the brackets
    pub index: IndexTuple,
}

impl ParsedName {
    /// Inverse of [`parse_name`].
    pub fn to_name(&self, brackets: Brackets) -> String {
        format!(
            "{}{}{}{}",
            self.base,
            brackets.open,
            self.index.tokens().join(","),
            brackets.close
        )
    }
}

/// Split `base[idx0,idx1,...]` into `base` and `[idx0, idx1, ...]`.
///
/// Tokens are kept verbatim, whitespace included. `base[]` has no indices.
pub fn parse_name(name: &str, brackets: Brackets) -> Result<ParsedName, ParseError> {
    let Some((base, rest)) = name.split_once(brackets.open) else {
        return Err(ParseError::MissingOpen {
            name: name.to_string(),
            open: brackets.open,
        });
    };
    let Some(inner) = rest.strip_suffix(brackets.close) else {
        return Err(ParseError::MissingClose {
            name: name.to_string(),
            close: brackets.close,
        });
    };
    if base.contains(brackets.close)
        || inner.contains(brackets.open)
        || inner.contains(brackets.close)
    {
        return Err(ParseError::Unbalanced {
            name: name.to_string(),
        });
    }
    let index = if inner.is_empty() {
        IndexTuple::default()
    } else {
        inner.split(',').collect()
    };
    Ok(ParsedName {
        base: base.to_string(),
        index,
    })
}

/// Set a name belongs to: everything before the opening bracket, or the
/// whole name for scalar entities.
pub fn set_name(name: &str, open: char) -> &str {
    name.split(open).next().unwrap_or(name)
}
