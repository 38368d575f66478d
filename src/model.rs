use core::fmt;
use std::hash::Hash;

use crate::{
    attr::{ConstrAttr, Sense, VarAttr},
    error::Result,
};

mod gurobi;
#[doc(inline)]
pub use gurobi::{read_model, reoptimize};

/// Right-hand side of a sum constraint.
#[derive(Debug, Clone, Copy)]
pub enum Rhs<'a, V> {
    /// A fixed number
    Constant(f64),
    /// The sum of these variables
    Sum(&'a [V]),
}

/// The operations the index layer needs from a solver model.
///
/// Handles are cheap copies identifying a variable or constraint inside the
/// model. Attribute getters return `Ok(None)` when the solver has no value
/// yet, e.g. `X` before optimizing.
pub trait SolverModel {
    /// Variable handle
    type Var: Copy + Eq + Hash + fmt::Debug;
    /// Constraint handle
    type Constr: Copy + Eq + Hash + fmt::Debug;

    /// All variables with their names, in model order.
    fn variables(&self) -> Result<Vec<(Self::Var, String)>>;

    /// All linear constraints with their names, in model order.
    fn constraints(&self) -> Result<Vec<(Self::Constr, String)>>;

    /// Value of `attr` for `var`, `None` if the solver has none.
    fn var_attr(&self, var: Self::Var, attr: VarAttr) -> Result<Option<f64>>;

    /// Set `attr` of `var`.
    fn set_var_attr(&mut self, var: Self::Var, attr: VarAttr, value: f64) -> Result<()>;

    /// Value of `attr` for `constr`, `None` if the solver has none.
    fn constr_attr(&self, constr: Self::Constr, attr: ConstrAttr) -> Result<Option<f64>>;

    /// Set `attr` of `constr`.
    fn set_constr_attr(
        &mut self,
        constr: Self::Constr,
        attr: ConstrAttr,
        value: f64,
    ) -> Result<()>;

    /// Add the row `sum(lhs) <sense> rhs` under `name`.
    fn add_sum_constr(
        &mut self,
        name: &str,
        lhs: &[Self::Var],
        sense: Sense,
        rhs: Rhs<'_, Self::Var>,
    ) -> Result<Self::Constr>;

    /// Remove `var` from the model.
    fn remove_var(&mut self, var: Self::Var) -> Result<()>;

    /// Remove `constr` from the model.
    fn remove_constr(&mut self, constr: Self::Constr) -> Result<()>;
}
