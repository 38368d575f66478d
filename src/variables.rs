use log::{debug, warn};

use crate::{
    aggregate::{self, IndexSums, TwoIndexSums},
    attr::VarAttr,
    config::Delimiters,
    error::{Error, Result},
    model::SolverModel,
    report::{AttrValues, SetCounts},
    select::{filter_entities, Entity, FilterSpec, SetMatch},
};

/// Every variable of the model, names decomposed with the variable brackets.
pub fn variable_entities<M: SolverModel>(
    model: &M,
    delimiters: &Delimiters,
) -> Result<Vec<Entity<M::Var>>> {
    Ok(model
        .variables()?
        .into_iter()
        .map(|(var, name)| Entity::new(var, name, delimiters.variable))
        .collect())
}

/// Number of variables per variable set.
pub fn list_variables<M: SolverModel>(model: &M, delimiters: &Delimiters) -> Result<SetCounts> {
    let names = model.variables()?.into_iter().map(|(_, name)| name);
    Ok(SetCounts::variables(names, delimiters.variable.open))
}

/// Variables of the matching sets whose indices pass `filter`.
pub fn get_variables<M: SolverModel>(
    model: &M,
    delimiters: &Delimiters,
    set: SetMatch<'_>,
    filter: &FilterSpec,
) -> Result<Vec<Entity<M::Var>>> {
    let variables = variable_entities(model, delimiters)?
        .into_iter()
        .filter(|v| set.matches(v))
        .collect();
    let variables = filter_entities(variables, filter)?;
    if variables.is_empty() {
        warn!("No variables found for {set:?} and {filter:?}");
    } else {
        debug!("Selected {} variables for {set:?}", variables.len());
    }
    Ok(variables)
}

/// Variables of all the named sets, set by set.
pub fn get_variables_multiple<M: SolverModel>(
    model: &M,
    delimiters: &Delimiters,
    names: &[&str],
    approx: bool,
) -> Result<Vec<Entity<M::Var>>> {
    let all = variable_entities(model, delimiters)?;
    Ok(names
        .iter()
        .flat_map(|name| {
            let set = SetMatch::by_name(name, approx);
            all.iter().filter(move |v| set.matches(*v)).cloned()
        })
        .collect())
}

/// Whether `name` is the name of a non-empty variable set.
pub fn is_variable_set<M: SolverModel>(model: &M, delimiters: &Delimiters, name: &str) -> Result<bool> {
    Ok(variable_entities(model, delimiters)?
        .iter()
        .any(|v| v.set() == name))
}

/// Value of `attr` for one variable, an error if the solver has none.
pub fn variable_value<M: SolverModel>(model: &M, var: &Entity<M::Var>, attr: VarAttr) -> Result<f64> {
    model
        .var_attr(var.handle, attr)?
        .ok_or_else(|| Error::MissingAttribute {
            name: var.name.clone(),
            attr: attr.to_string(),
        })
}

/// Value of `attr` by variable name.
pub fn variables_attr<M: SolverModel>(
    model: &M,
    variables: &[Entity<M::Var>],
    attr: VarAttr,
) -> Result<AttrValues> {
    let values = variables
        .iter()
        .map(|v| Ok((v.name.clone(), variable_value(model, v, attr)?)))
        .collect::<Result<_>>()?;
    Ok(AttrValues(values))
}

/// Set `attr` to `value` on every variable.
pub fn set_variables_attr<M: SolverModel>(
    model: &mut M,
    variables: &[Entity<M::Var>],
    attr: VarAttr,
    value: f64,
) -> Result<()> {
    for var in variables {
        model.set_var_attr(var.handle, attr, value)?;
    }
    debug!("Set {attr} = {value} on {} variables", variables.len());
    Ok(())
}

/// Give all `variables` the same lower and/or upper bound.
pub fn set_variables_bounds<M: SolverModel>(
    model: &mut M,
    variables: &[Entity<M::Var>],
    lb: Option<f64>,
    ub: Option<f64>,
) -> Result<()> {
    if let Some(lb) = lb {
        set_variables_attr(model, variables, VarAttr::LB, lb)?;
    }
    if let Some(ub) = ub {
        set_variables_attr(model, variables, VarAttr::UB, ub)?;
    }
    Ok(())
}

/// Set the objective coefficient of every variable of the model to zero.
pub fn zero_all_objective_coeffs<M: SolverModel>(model: &mut M) -> Result<()> {
    for (var, _) in model.variables()? {
        model.set_var_attr(var, VarAttr::Obj, 0.0)?;
    }
    Ok(())
}

/// Remove `variables` from the model. Gurobi applies the removal on the next
/// model update.
pub fn remove_variables<M: SolverModel>(model: &mut M, variables: &[Entity<M::Var>]) -> Result<()> {
    for var in variables {
        model.remove_var(var.handle)?;
    }
    debug!("Removed {} variables", variables.len());
    Ok(())
}

/// Sum of `attr` (usually `X`) per token at `position`.
pub fn sum_variables_by_index<M: SolverModel>(
    model: &M,
    variables: &[Entity<M::Var>],
    position: isize,
    attr: VarAttr,
) -> Result<IndexSums> {
    if variables.is_empty() {
        return Err(Error::EmptySelection("variables"));
    }
    aggregate::sum_by_index(variables, position, |v| variable_value(model, v, attr))
}

/// Sum of `attr` per token at `first` and, nested, per token at `second`.
pub fn sum_variables_by_two_indices<M: SolverModel>(
    model: &M,
    variables: &[Entity<M::Var>],
    first: isize,
    second: isize,
    attr: VarAttr,
) -> Result<TwoIndexSums> {
    if variables.is_empty() {
        return Err(Error::EmptySelection("variables"));
    }
    aggregate::sum_by_two_indices(variables, first, second, |v| {
        variable_value(model, v, attr)
    })
}
