use std::collections::HashMap;

use crate::{
    attr::{ConstrAttr, Sense, VarAttr},
    config::{Brackets, Delimiters},
    error::Result,
    model::{Rhs, SolverModel},
    select::Entity,
};

#[derive(Debug, Clone, PartialEq)]
pub struct MemoryVar {
    pub name: String,
    pub attrs: HashMap<VarAttr, f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MemoryRhs {
    Constant(f64),
    Sum(Vec<usize>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemoryConstr {
    pub name: String,
    pub lhs: Vec<usize>,
    pub sense: Sense,
    pub rhs: MemoryRhs,
    pub attrs: HashMap<ConstrAttr, f64>,
}

/// Solver model kept in vectors, removed entities leave a `None` behind so
/// handles stay stable.
#[derive(Debug, Default)]
pub struct MemoryModel {
    pub vars: Vec<Option<MemoryVar>>,
    pub constrs: Vec<Option<MemoryConstr>>,
}

impl MemoryModel {
    pub fn add_var(&mut self, name: &str, attrs: &[(VarAttr, f64)]) -> usize {
        self.vars.push(Some(MemoryVar {
            name: name.to_string(),
            attrs: attrs.iter().copied().collect(),
        }));
        self.vars.len() - 1
    }

    pub fn add_fixed_constr(&mut self, name: &str, rhs: f64) -> usize {
        self.constrs.push(Some(MemoryConstr {
            name: name.to_string(),
            lhs: vec![],
            sense: Sense::LessEqual,
            rhs: MemoryRhs::Constant(rhs),
            attrs: [(ConstrAttr::RHS, rhs)].into_iter().collect(),
        }));
        self.constrs.len() - 1
    }

    pub fn num_constrs(&self) -> usize {
        self.constrs.iter().flatten().count()
    }

    fn var(&self, var: usize) -> &MemoryVar {
        self.vars[var].as_ref().expect("variable was removed")
    }

    fn constr(&self, constr: usize) -> &MemoryConstr {
        self.constrs[constr].as_ref().expect("constraint was removed")
    }
}

impl SolverModel for MemoryModel {
    type Var = usize;
    type Constr = usize;

    fn variables(&self) -> Result<Vec<(usize, String)>> {
        Ok(self
            .vars
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.as_ref().map(|v| (i, v.name.clone())))
            .collect())
    }

    fn constraints(&self) -> Result<Vec<(usize, String)>> {
        Ok(self
            .constrs
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_ref().map(|c| (i, c.name.clone())))
            .collect())
    }

    fn var_attr(&self, var: usize, attr: VarAttr) -> Result<Option<f64>> {
        Ok(self.var(var).attrs.get(&attr).copied())
    }

    fn set_var_attr(&mut self, var: usize, attr: VarAttr, value: f64) -> Result<()> {
        self.vars[var]
            .as_mut()
            .expect("variable was removed")
            .attrs
            .insert(attr, value);
        Ok(())
    }

    fn constr_attr(&self, constr: usize, attr: ConstrAttr) -> Result<Option<f64>> {
        Ok(self.constr(constr).attrs.get(&attr).copied())
    }

    fn set_constr_attr(&mut self, constr: usize, attr: ConstrAttr, value: f64) -> Result<()> {
        self.constrs[constr]
            .as_mut()
            .expect("constraint was removed")
            .attrs
            .insert(attr, value);
        Ok(())
    }

    fn add_sum_constr(
        &mut self,
        name: &str,
        lhs: &[usize],
        sense: Sense,
        rhs: Rhs<'_, usize>,
    ) -> Result<usize> {
        let rhs = match rhs {
            Rhs::Constant(value) => MemoryRhs::Constant(value),
            Rhs::Sum(vars) => MemoryRhs::Sum(vars.to_vec()),
        };
        self.constrs.push(Some(MemoryConstr {
            name: name.to_string(),
            lhs: lhs.to_vec(),
            sense,
            rhs,
            attrs: HashMap::new(),
        }));
        Ok(self.constrs.len() - 1)
    }

    fn remove_var(&mut self, var: usize) -> Result<()> {
        self.vars[var] = None;
        Ok(())
    }

    fn remove_constr(&mut self, constr: usize) -> Result<()> {
        self.constrs[constr] = None;
        Ok(())
    }
}

/// `harv[species,region,period]` with solution values, a scalar `total`
/// without one and three `gub(stand)` rows.
pub fn harvest_model() -> MemoryModel {
    let mut model = MemoryModel::default();
    model.add_var("harv[sw,north,0]", &[(VarAttr::X, 10.0), (VarAttr::UB, 100.0)]);
    model.add_var("harv[hw,north,0]", &[(VarAttr::X, 5.0), (VarAttr::UB, 100.0)]);
    model.add_var("harv[sw,south,0]", &[(VarAttr::X, 7.0), (VarAttr::UB, 100.0)]);
    model.add_var("harv[sw,north,1]", &[(VarAttr::X, 2.0), (VarAttr::UB, 100.0)]);
    model.add_var("age[north,5]", &[(VarAttr::X, 4.0)]);
    model.add_var("total", &[]);
    model.add_fixed_constr("gub(0)", 1.0);
    model.add_fixed_constr("gub(1)", 1.0);
    model.add_fixed_constr("env(north,5)", 8.0);
    model
}

pub fn entities(names: &[&str]) -> Vec<Entity<usize>> {
    let brackets: Brackets = Delimiters::default().variable;
    names
        .iter()
        .enumerate()
        .map(|(i, name)| Entity::new(i, name.to_string(), brackets))
        .collect()
}
