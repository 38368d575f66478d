use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Opening and closing character around the indices of a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brackets {
    /// Character before the first index
    pub open: char,
    /// Character after the last index
    pub close: char,
}

impl Brackets {
    /// Brackets `open` and `close`.
    pub const fn new(open: char, close: char) -> Self {
        Self { open, close }
    }
}

/// Which kind of model entity a name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A variable, indices in `[...]` by default
    Variable,
    /// A linear constraint, indices in `(...)` by default
    Constraint,
}

impl EntityKind {
    /// Lower case name used in messages and table headers.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Variable => "variable",
            EntityKind::Constraint => "constraint",
        }
    }
}

/// Bracket characters used to encode indices in variable and constraint
/// names, `x[1,2]` and `c(1,2)` by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delimiters {
    /// Brackets of variable names
    #[serde(default = "default_variable_brackets")]
    pub variable: Brackets,
    /// Brackets of constraint names
    #[serde(default = "default_constraint_brackets")]
    pub constraint: Brackets,
}

fn default_variable_brackets() -> Brackets {
    Brackets::new('[', ']')
}

fn default_constraint_brackets() -> Brackets {
    Brackets::new('(', ')')
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            variable: default_variable_brackets(),
            constraint: default_constraint_brackets(),
        }
    }
}

impl Delimiters {
    /// Brackets used for names of `kind`.
    pub fn brackets(&self, kind: EntityKind) -> Brackets {
        match kind {
            EntityKind::Variable => self.variable,
            EntityKind::Constraint => self.constraint,
        }
    }

    /// Read delimiters from a json file. Missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let config_str = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&config_str)?)
    }
}
