use std::path::Path;

use grb::attr;
use grb::attribute::{ConstrDoubleAttr, VarDoubleAttr};
use grb::prelude::*;
use log::{debug, info};

use super::{Rhs, SolverModel};
use crate::{
    attr::{ConstrAttr, Sense, VarAttr},
    error::Result,
};

/// Gurobi error code for attribute values that are not available.
const DATA_NOT_AVAILABLE: i32 = 10005;

/// Read a model file (`.lp`, `.mps`, ...) with a default environment.
pub fn read_model(path: impl AsRef<Path>) -> Result<Model> {
    let path = path.as_ref().to_string_lossy();
    let env = Env::new("")?;
    let model = Model::read_from(&path, &env)?;
    info!("Read model from {path}");
    Ok(model)
}

/// Update, reset and optimize the model.
pub fn reoptimize(model: &mut Model) -> Result<()> {
    model.update()?;
    model.reset()?;
    model.optimize()?;
    debug!("Model status after reoptimizing: {:?}", model.status()?);
    Ok(())
}

fn available<T>(value: grb::Result<T>) -> Result<Option<T>> {
    match value {
        Ok(value) => Ok(Some(value)),
        Err(grb::Error::FromAPI(_, code)) if code == DATA_NOT_AVAILABLE => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn var_double_attr(attr: VarAttr) -> VarDoubleAttr {
    match attr {
        VarAttr::LB => VarDoubleAttr::LB,
        VarAttr::UB => VarDoubleAttr::UB,
        VarAttr::Obj => VarDoubleAttr::Obj,
        VarAttr::Start => VarDoubleAttr::Start,
        VarAttr::VarHintVal => VarDoubleAttr::VarHintVal,
        VarAttr::X => VarDoubleAttr::X,
        VarAttr::Xn => VarDoubleAttr::Xn,
        VarAttr::RC => VarDoubleAttr::RC,
        VarAttr::BarX => VarDoubleAttr::BarX,
        VarAttr::SAObjLow => VarDoubleAttr::SAObjLow,
        VarAttr::SAObjUp => VarDoubleAttr::SAObjUp,
        VarAttr::SALBLow => VarDoubleAttr::SALBLow,
        VarAttr::SALBUp => VarDoubleAttr::SALBUp,
        VarAttr::SAUBLow => VarDoubleAttr::SAUBLow,
        VarAttr::SAUBUp => VarDoubleAttr::SAUBUp,
        VarAttr::UnbdRay => VarDoubleAttr::UnbdRay,
    }
}

fn constr_double_attr(attr: ConstrAttr) -> ConstrDoubleAttr {
    match attr {
        ConstrAttr::RHS => ConstrDoubleAttr::RHS,
        ConstrAttr::Pi => ConstrDoubleAttr::Pi,
        ConstrAttr::Slack => ConstrDoubleAttr::Slack,
        ConstrAttr::DStart => ConstrDoubleAttr::DStart,
        ConstrAttr::SARHSLow => ConstrDoubleAttr::SARHSLow,
        ConstrAttr::SARHSUp => ConstrDoubleAttr::SARHSUp,
        ConstrAttr::FarkasDual => ConstrDoubleAttr::FarkasDual,
    }
}

impl SolverModel for Model {
    type Var = Var;
    type Constr = Constr;

    fn variables(&self) -> Result<Vec<(Var, String)>> {
        self.get_vars()?
            .iter()
            .map(|&var| Ok((var, self.get_obj_attr(attr::VarName, &var)?)))
            .collect()
    }

    fn constraints(&self) -> Result<Vec<(Constr, String)>> {
        self.get_constrs()?
            .iter()
            .map(|&constr| Ok((constr, self.get_obj_attr(attr::ConstrName, &constr)?)))
            .collect()
    }

    fn var_attr(&self, var: Var, attr: VarAttr) -> Result<Option<f64>> {
        available(self.get_obj_attr(var_double_attr(attr), &var))
    }

    fn set_var_attr(&mut self, var: Var, attr: VarAttr, value: f64) -> Result<()> {
        Ok(self.set_obj_attr(var_double_attr(attr), &var, value)?)
    }

    fn constr_attr(&self, constr: Constr, attr: ConstrAttr) -> Result<Option<f64>> {
        available(self.get_obj_attr(constr_double_attr(attr), &constr))
    }

    fn set_constr_attr(&mut self, constr: Constr, attr: ConstrAttr, value: f64) -> Result<()> {
        Ok(self.set_obj_attr(constr_double_attr(attr), &constr, value)?)
    }

    fn add_sum_constr(
        &mut self,
        name: &str,
        lhs: &[Var],
        sense: Sense,
        rhs: Rhs<'_, Var>,
    ) -> Result<Constr> {
        let lhs = lhs.iter().copied().grb_sum();
        let rhs = match rhs {
            Rhs::Constant(value) => Expr::from(value),
            Rhs::Sum(vars) => vars.iter().copied().grb_sum(),
        };
        let constr = match sense {
            Sense::LessEqual => c!(lhs <= rhs),
            Sense::GreaterEqual => c!(lhs >= rhs),
            Sense::Equal => c!(lhs == rhs),
        };
        Ok(self.add_constr(name, constr)?)
    }

    fn remove_var(&mut self, var: Var) -> Result<()> {
        Ok(self.remove(var)?)
    }

    fn remove_constr(&mut self, constr: Constr) -> Result<()> {
        Ok(self.remove(constr)?)
    }
}
