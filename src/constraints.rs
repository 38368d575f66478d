use itertools::Itertools;
use log::{debug, warn};

use crate::{
    attr::{ConstrAttr, Sense},
    config::Delimiters,
    error::{Error, Result},
    index::IndexTuple,
    model::{Rhs, SolverModel},
    name::ParsedName,
    report::{AttrValues, SetCounts},
    select::{filter_entities, Entity, FilterSpec, SetMatch},
};

/// Every linear constraint of the model, names decomposed with the
/// constraint brackets.
pub fn constraint_entities<M: SolverModel>(
    model: &M,
    delimiters: &Delimiters,
) -> Result<Vec<Entity<M::Constr>>> {
    Ok(model
        .constraints()?
        .into_iter()
        .map(|(constr, name)| Entity::new(constr, name, delimiters.constraint))
        .collect())
}

/// Number of constraints per constraint set.
pub fn list_constraints<M: SolverModel>(model: &M, delimiters: &Delimiters) -> Result<SetCounts> {
    let names = model.constraints()?.into_iter().map(|(_, name)| name);
    Ok(SetCounts::constraints(names, delimiters.constraint.open))
}

/// Constraints of the matching sets whose indices pass `filter`.
pub fn get_constraints<M: SolverModel>(
    model: &M,
    delimiters: &Delimiters,
    set: SetMatch<'_>,
    filter: &FilterSpec,
) -> Result<Vec<Entity<M::Constr>>> {
    let constraints = constraint_entities(model, delimiters)?
        .into_iter()
        .filter(|c| set.matches(c))
        .collect();
    let constraints = filter_entities(constraints, filter)?;
    if constraints.is_empty() {
        warn!("No constraints found for {set:?} and {filter:?}");
    }
    Ok(constraints)
}

/// Constraints of all the named sets, set by set.
pub fn get_constraints_multiple<M: SolverModel>(
    model: &M,
    delimiters: &Delimiters,
    names: &[&str],
    approx: bool,
) -> Result<Vec<Entity<M::Constr>>> {
    let all = constraint_entities(model, delimiters)?;
    Ok(names
        .iter()
        .flat_map(|name| {
            let set = SetMatch::by_name(name, approx);
            all.iter().filter(move |c| set.matches(*c)).cloned()
        })
        .collect())
}

/// Whether `name` is the name of a non-empty constraint set.
pub fn is_constraint_set<M: SolverModel>(
    model: &M,
    delimiters: &Delimiters,
    name: &str,
) -> Result<bool> {
    Ok(constraint_entities(model, delimiters)?
        .iter()
        .any(|c| c.set() == name))
}

/// Value of `attr` for one constraint, an error if the solver has none.
pub fn constraint_value<M: SolverModel>(
    model: &M,
    constr: &Entity<M::Constr>,
    attr: ConstrAttr,
) -> Result<f64> {
    model
        .constr_attr(constr.handle, attr)?
        .ok_or_else(|| Error::MissingAttribute {
            name: constr.name.clone(),
            attr: attr.to_string(),
        })
}

/// Value of `attr` by constraint name.
pub fn constraints_attr<M: SolverModel>(
    model: &M,
    constraints: &[Entity<M::Constr>],
    attr: ConstrAttr,
) -> Result<AttrValues> {
    let values = constraints
        .iter()
        .map(|c| Ok((c.name.clone(), constraint_value(model, c, attr)?)))
        .collect::<Result<_>>()?;
    Ok(AttrValues(values))
}

/// Set `attr` to `value` on every constraint.
pub fn set_constraints_attr<M: SolverModel>(
    model: &mut M,
    constraints: &[Entity<M::Constr>],
    attr: ConstrAttr,
    value: f64,
) -> Result<()> {
    for constr in constraints {
        model.set_constr_attr(constr.handle, attr, value)?;
    }
    debug!("Set {attr} = {value} on {} constraints", constraints.len());
    Ok(())
}

/// Scale the right-hand side of every constraint by `percent`, `0.5` halves
/// it.
pub fn set_constraints_rhs_as_percent<M: SolverModel>(
    model: &mut M,
    constraints: &[Entity<M::Constr>],
    percent: f64,
) -> Result<()> {
    if !percent.is_finite() {
        return Err(Error::InvalidPercent(percent));
    }
    for constr in constraints {
        let rhs = constraint_value(model, constr, ConstrAttr::RHS)?;
        model.set_constr_attr(constr.handle, ConstrAttr::RHS, percent * rhs)?;
    }
    Ok(())
}

/// Remove `constraints` from the model. Handles become invalid after the
/// model update.
pub fn remove_constraints<M: SolverModel>(
    model: &mut M,
    constraints: &[Entity<M::Constr>],
) -> Result<()> {
    for constr in constraints {
        model.remove_constr(constr.handle)?;
    }
    debug!("Removed {} constraints", constraints.len());
    Ok(())
}

fn handles<H: Copy>(entities: &[Entity<H>]) -> Vec<H> {
    entities.iter().map(|e| e.handle).collect_vec()
}

/// Add the row `sum(variables) <sense> constant`.
pub fn add_constraint_constant<M: SolverModel>(
    model: &mut M,
    variables: &[Entity<M::Var>],
    constant: f64,
    sense: Sense,
    name: &str,
) -> Result<M::Constr> {
    if variables.is_empty() {
        return Err(Error::EmptySelection("variables"));
    }
    debug!("Adding {name}: sum of {} variables {sense} {constant}", variables.len());
    model.add_sum_constr(name, &handles(variables), sense, Rhs::Constant(constant))
}

/// Add the single row `sum(left) <sense> sum(right)`.
pub fn add_constraint_variables<M: SolverModel>(
    model: &mut M,
    left: &[Entity<M::Var>],
    right: &[Entity<M::Var>],
    sense: Sense,
    name: &str,
) -> Result<M::Constr> {
    if left.is_empty() || right.is_empty() {
        return Err(Error::EmptySelection("variables"));
    }
    debug!(
        "Adding {name}: sum of {} variables {sense} sum of {} variables",
        left.len(),
        right.len()
    );
    model.add_sum_constr(name, &handles(left), sense, Rhs::Sum(&handles(right)))
}

/// Add one row `left[i] <sense> right[i]` per aligned pair, named after the
/// family and the indices of the left variable, e.g. `link(sw,north,0)`.
///
/// Rows added before a failing one stay in the model.
pub fn add_pairwise_constraints<M: SolverModel>(
    model: &mut M,
    delimiters: &Delimiters,
    left: &[Entity<M::Var>],
    right: &[Entity<M::Var>],
    sense: Sense,
    family: &str,
) -> Result<Vec<M::Constr>> {
    if left.len() != right.len() {
        return Err(Error::LengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }
    if left.is_empty() {
        return Err(Error::EmptySelection("variables"));
    }
    left.iter()
        .zip(right)
        .enumerate()
        .map(|(i, (l, r))| {
            let index = match l.index() {
                Ok(index) => index.clone(),
                Err(_) => IndexTuple::from_iter([i.to_string()]),
            };
            let name = ParsedName {
                base: family.to_string(),
                index,
            }
            .to_name(delimiters.constraint);
            model.add_sum_constr(&name, &[l.handle], sense, Rhs::Sum(&[r.handle]))
        })
        .collect()
}

#[cfg(test)]
mod tests;
