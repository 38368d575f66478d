use thiserror::Error;

use crate::name::ParseError;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while querying or modifying a model.
#[derive(Debug, Error)]
pub enum Error {
    /// A name could not be split into set name and index tuple
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// A requested index position does not exist on an entity
    #[error("index position {position} out of range for `{name}` with {len} indices")]
    IndexOutOfRange {
        /// Name of the entity
        name: String,
        /// Requested position
        position: isize,
        /// Number of indices of the entity
        len: usize,
    },
    /// The solver has no value for the attribute, e.g. before optimizing
    #[error("attribute {attr} not available for `{name}`")]
    MissingAttribute {
        /// Name of the entity
        name: String,
        /// Requested attribute
        attr: String,
    },
    /// The attribute name matches no known variable or constraint attribute
    #[error("{0} is not a known {1} attribute")]
    UnknownAttribute(String, &'static str),
    /// Constraint senses are `<`, `<=`, `>`, `>=`, `=` and `==`
    #[error("constraint sense `{0}` is not one of '<', '>', '='")]
    InvalidSense(String),
    /// An operation that needs entities got none
    #[error("no {0} selected")]
    EmptySelection(&'static str),
    /// Pairwise constraints need collections of equal length
    #[error("cannot pair {left} entities with {right} entities")]
    LengthMismatch {
        /// Length of the left collection
        left: usize,
        /// Length of the right collection
        right: usize,
    },
    /// Export file names must carry the extension of their format
    #[error("`{0}` is not a {1} file")]
    InvalidFileName(String, &'static str),
    /// Percentages must be finite numbers
    #[error("percent must be a finite number, got {0}")]
    InvalidPercent(f64),
    /// Invalid parameters of a random distribution
    #[error(transparent)]
    Distribution(#[from] rand_distr::NormalError),
    /// Error reported by Gurobi
    #[error(transparent)]
    Solver(#[from] grb::Error),
    /// Error while building or writing a dataframe
    #[error(transparent)]
    Polars(#[from] polars::prelude::PolarsError),
    /// Error while reading or writing a file
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Error while (de)serializing json
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
