use super::*;
use crate::{test_utils::*, variables::get_variables};

fn harv(model: &MemoryModel, filter: FilterSpec) -> Vec<Entity<usize>> {
    get_variables(model, &Delimiters::default(), SetMatch::Exact("harv"), &filter).unwrap()
}

#[test]
fn test_list_and_get_constraints() {
    let model = harvest_model();
    let delimiters = Delimiters::default();
    let counts = list_constraints(&model, &delimiters).unwrap();
    assert_eq!(counts.counts["gub"], 2);
    assert_eq!(counts.counts["env"], 1);

    let gub = get_constraints(&model, &delimiters, SetMatch::Exact("gub"), &FilterSpec::new())
        .unwrap();
    assert_eq!(gub.len(), 2);
    let north = get_constraints(
        &model,
        &delimiters,
        SetMatch::Exact("env"),
        &FilterSpec::from([(0, "north")]),
    )
    .unwrap();
    assert_eq!(north[0].name, "env(north,5)");
    let multiple = get_constraints_multiple(&model, &delimiters, &["en", "gu"], true).unwrap();
    assert_eq!(multiple.len(), 3);
    assert_eq!(multiple[0].name, "env(north,5)");
    assert!(is_constraint_set(&model, &delimiters, "gub").unwrap());
    assert!(!is_constraint_set(&model, &delimiters, "harv").unwrap());
}

#[test]
fn test_rhs_as_percent() {
    let mut model = harvest_model();
    let delimiters = Delimiters::default();
    let env = get_constraints(&model, &delimiters, SetMatch::Exact("env"), &FilterSpec::new())
        .unwrap();
    set_constraints_rhs_as_percent(&mut model, &env, 0.5).unwrap();
    let values = constraints_attr(&model, &env, ConstrAttr::RHS).unwrap();
    assert_eq!(values.0["env(north,5)"], 4.0);
    assert!(matches!(
        set_constraints_rhs_as_percent(&mut model, &env, f64::NAN),
        Err(Error::InvalidPercent(_))
    ));
}

#[test]
fn test_set_and_remove_constraints() {
    let mut model = harvest_model();
    let delimiters = Delimiters::default();
    let gub = get_constraints(&model, &delimiters, SetMatch::Exact("gub"), &FilterSpec::new())
        .unwrap();
    set_constraints_attr(&mut model, &gub, ConstrAttr::RHS, 2.0).unwrap();
    assert!(constraints_attr(&model, &gub, ConstrAttr::RHS)
        .unwrap()
        .0
        .values()
        .all(|&rhs| rhs == 2.0));
    assert!(matches!(
        constraints_attr(&model, &gub, ConstrAttr::Pi),
        Err(Error::MissingAttribute { .. })
    ));
    remove_constraints(&mut model, &gub).unwrap();
    assert_eq!(model.num_constrs(), 1);
}

#[test]
fn test_equality_from_two_single_variables() {
    let mut model = harvest_model();
    let left = harv(&model, FilterSpec::from([(0, "sw"), (1, "north"), (2, "0")]));
    let right = harv(&model, FilterSpec::from([(0, "hw")]));
    let before = model.num_constrs();
    let constr = add_constraint_variables(&mut model, &left, &right, "=".parse().unwrap(), "link")
        .unwrap();
    assert_eq!(model.num_constrs(), before + 1);
    let added = model.constrs[constr].as_ref().unwrap();
    assert_eq!(added.name, "link");
    assert_eq!(added.sense, Sense::Equal);
    assert_eq!(added.lhs, vec![left[0].handle]);
    assert_eq!(added.rhs, MemoryRhs::Sum(vec![right[0].handle]));
}

#[test]
fn test_constant_constraint() {
    let mut model = harvest_model();
    let sw = harv(&model, FilterSpec::from([(0, "sw")]));
    let constr =
        add_constraint_constant(&mut model, &sw, 30.0, Sense::LessEqual, "cap").unwrap();
    let added = model.constrs[constr].as_ref().unwrap();
    assert_eq!(added.lhs.len(), 3);
    assert_eq!(added.rhs, MemoryRhs::Constant(30.0));
    assert!(matches!(
        add_constraint_constant(&mut model, &[], 30.0, Sense::LessEqual, "cap"),
        Err(Error::EmptySelection(_))
    ));
}

#[test]
fn test_invalid_sense_adds_nothing() {
    let mut model = harvest_model();
    let left = harv(&model, FilterSpec::from([(0, "sw")]));
    let right = harv(&model, FilterSpec::from([(0, "hw")]));
    let before = model.num_constrs();
    let result = "=>"
        .parse::<Sense>()
        .and_then(|sense| add_constraint_variables(&mut model, &left, &right, sense, "link"));
    assert!(matches!(result, Err(Error::InvalidSense(s)) if s == "=>"));
    assert_eq!(model.num_constrs(), before);
}

#[test]
fn test_pairwise_constraints() {
    let mut model = harvest_model();
    let delimiters = Delimiters::default();
    let north = harv(&model, FilterSpec::from([(1, "north"), (2, "0")]));
    let south = harv(&model, FilterSpec::from([(1, "south")]));
    assert!(matches!(
        add_pairwise_constraints(&mut model, &delimiters, &north, &south, Sense::GreaterEqual, "link"),
        Err(Error::LengthMismatch { left: 2, right: 1 })
    ));

    let left = &north[..1];
    let added =
        add_pairwise_constraints(&mut model, &delimiters, left, &south, Sense::GreaterEqual, "link")
            .unwrap();
    assert_eq!(added.len(), 1);
    let row = model.constrs[added[0]].as_ref().unwrap();
    assert_eq!(row.name, "link(sw,north,0)");
    assert_eq!(row.sense, Sense::GreaterEqual);
    assert_eq!(row.lhs, vec![left[0].handle]);
    assert_eq!(row.rhs, MemoryRhs::Sum(vec![south[0].handle]));
}

#[test]
fn test_pairwise_names_fall_back_to_position() {
    let mut model = harvest_model();
    let delimiters = Delimiters::default();
    let total = get_variables(&model, &delimiters, SetMatch::Exact("total"), &FilterSpec::new())
        .unwrap();
    let sw = harv(&model, FilterSpec::from([(1, "south")]));
    let added =
        add_pairwise_constraints(&mut model, &delimiters, &total, &sw, Sense::Equal, "tie").unwrap();
    assert_eq!(model.constrs[added[0]].as_ref().unwrap().name, "tie(0)");
}
