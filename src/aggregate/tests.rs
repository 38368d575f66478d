use std::collections::BTreeMap;

use ndarray::arr2;

use super::{group_by_index, sum_by_index, sum_by_two_indices, SumMatrix};
use crate::{
    error::{Error, Result},
    index::IndexKey,
    select::Entity,
    test_utils::*,
};

const HARV: [&str; 3] = ["harv[sw,north,0]", "harv[hw,north,0]", "harv[sw,south,0]"];
const VALUES: [f64; 3] = [10.0, 5.0, 7.0];

fn solution(entity: &Entity<usize>) -> Result<f64> {
    Ok(VALUES[entity.handle])
}

fn key(token: &str) -> IndexKey {
    IndexKey::from(token)
}

#[test]
fn test_sum_by_first_index() {
    let harv = entities(&HARV);
    let sums = sum_by_index(&harv, 0, solution).unwrap();
    assert_eq!(
        sums,
        BTreeMap::from([(key("hw"), 5.0), (key("sw"), 17.0)])
    );
}

#[test]
fn test_sums_conserve_total() {
    let harv = entities(&HARV);
    let total: f64 = VALUES.iter().sum();
    for position in [0, 1, 2, -1] {
        let sums = sum_by_index(&harv, position, solution).unwrap();
        assert_eq!(sums.values().sum::<f64>(), total);
    }
    let nested = sum_by_two_indices(&harv, 1, 0, solution).unwrap();
    assert_eq!(
        nested.values().flat_map(|inner| inner.values()).sum::<f64>(),
        total
    );
}

#[test]
fn test_numeric_keys_sort_numerically() {
    let periods = entities(&["harv[sw,north,10]", "harv[sw,north,9]", "harv[sw,north,2]"]);
    let sums = sum_by_index(&periods, -1, |_| Ok(1.0)).unwrap();
    assert_eq!(
        sums.keys().map(ToString::to_string).collect::<Vec<_>>(),
        vec!["2", "9", "10"]
    );
}

#[test]
fn test_sum_by_two_indices() {
    let harv = entities(&HARV);
    let sums = sum_by_two_indices(&harv, 1, 0, solution).unwrap();
    assert_eq!(sums[&key("north")][&key("sw")], 10.0);
    assert_eq!(sums[&key("north")][&key("hw")], 5.0);
    assert_eq!(sums[&key("south")][&key("sw")], 7.0);
    assert!(!sums[&key("south")].contains_key(&key("hw")));
}

#[test]
fn test_missing_value_aborts() {
    let harv = entities(&HARV);
    let result = sum_by_index(&harv, 0, |entity| {
        if entity.handle == 1 {
            Err(Error::MissingAttribute {
                name: entity.name.clone(),
                attr: "X".into(),
            })
        } else {
            Ok(1.0)
        }
    });
    assert!(matches!(result, Err(Error::MissingAttribute { .. })));
}

#[test]
fn test_out_of_range_position() {
    let harv = entities(&HARV);
    assert!(matches!(
        sum_by_index(&harv, 3, solution),
        Err(Error::IndexOutOfRange { position: 3, .. })
    ));
}

#[test]
fn test_group_by_index() {
    let harv = entities(&HARV);
    let groups = group_by_index(&harv, 0).unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(
        groups[&key("sw")].iter().map(|e| e.handle).collect::<Vec<_>>(),
        vec![0, 2]
    );
}

#[test]
fn test_sum_matrix_fills_gaps() {
    let harv = entities(&HARV);
    let sums = sum_by_two_indices(&harv, 1, 0, solution).unwrap();
    let matrix = SumMatrix::from(&sums);
    assert_eq!(matrix.rows, vec![key("north"), key("south")]);
    assert_eq!(matrix.columns, vec![key("hw"), key("sw")]);
    assert_eq!(matrix.values, arr2(&[[5.0, 10.0], [0.0, 7.0]]));
    assert_eq!(matrix.column_totals(), vec![5.0, 17.0]);
}
