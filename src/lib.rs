#![warn(missing_docs)]
//! Query, filter, aggregate and modify Gurobi models through the indices
//! encoded in variable and constraint names.
//!
//! Models built with index sets usually name their entities like
//! `harv[sw,north,3]` (variables) and `harv(sw,north,3)` (constraints). This
//! crate splits such names into a set name and an index tuple once, and lets
//! you select entities by index values, sum solution values by index and add
//! sum constraints between selections, without writing the string handling
//! and loops yourself.
//!
//! Requirements: Gurobi installation (9.0 or higher) and
//! [license](http://www.gurobi.com/downloads/licenses/license-center).
//! Don't forget to set the environment variable `GUROBI_HOME` to the installation path of Gurobi.
//!
//! Everything except [`model::read_model`], [`model::reoptimize`] and
//! [`forest`] works against the [`model::SolverModel`] trait, which is
//! implemented for [`grb::Model`].
//!
//! Example
//! ```rust,no_run
//! use grb_tools::{config::Delimiters, model, select::*, variables, attr::VarAttr, report::Sums};
//! # use anyhow::Result;
//!
//! fn example() -> Result<()> {
//!     let mut model = model::read_model("forest.lp")?;
//!     model::reoptimize(&mut model)?;
//!     let delimiters = Delimiters::default(); // x[...] and c(...)
//!
//!     // softwood harvest variables of the northern region
//!     let harv = variables::get_variables(
//!         &model,
//!         &delimiters,
//!         SetMatch::Exact("harv"),
//!         &FilterSpec::from([(0, "sw"), (1, "north")]),
//!     )?;
//!
//!     // harvested volume per period, periods are the last index
//!     let per_period = variables::sum_variables_by_index(&model, &harv, -1, VarAttr::X)?;
//!     println!("{}", Sums(&per_period));
//!     Ok(())
//! }
//! ```

/// Variable and constraint attributes and constraint senses.
pub mod attr;

/// Sums of attribute values grouped by index tokens.
pub mod aggregate;

/// Bracket characters that delimit indices in names.
pub mod config;

/// Queries on the constraints of a model and sum constraints built from
/// variable selections.
pub mod constraints;

/// Error type of the crate.
pub mod error;

/// The forest harvest planning LP used as a sample model.
pub mod forest;

/// Typed index tuples and the ordering of index tokens.
pub mod index;

/// The solver seam and its Gurobi implementation.
pub mod model;

/// Splitting names into set name and index tuple.
pub mod name;

/// Printing and exporting query results.
pub mod report;

/// Entities and their selection by set and index values.
pub mod select;

/// Queries on the variables of a model.
pub mod variables;

pub use error::{Error, Result};

#[cfg(test)]
mod test_utils;
