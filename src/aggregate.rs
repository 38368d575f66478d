use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;
use ndarray::Array2;

use crate::{
    error::Result,
    index::IndexKey,
    select::Entity,
};

/// Sum per index token, ordered by key.
pub type IndexSums = BTreeMap<IndexKey, f64>;

/// Sums per first index token and, nested, per second index token.
pub type TwoIndexSums = BTreeMap<IndexKey, IndexSums>;

/// Entities grouped by their token at `position`, input order kept inside
/// each group.
pub fn group_by_index<'e, H: 'e>(
    entities: impl IntoIterator<Item = &'e Entity<H>>,
    position: isize,
) -> Result<BTreeMap<IndexKey, Vec<&'e Entity<H>>>> {
    let mut groups: BTreeMap<IndexKey, Vec<&'e Entity<H>>> = BTreeMap::new();
    for entity in entities {
        let key = IndexKey::from(entity.token(position)?);
        groups.entry(key).or_default().push(entity);
    }
    Ok(groups)
}

/// Sum `value` over the entities sharing a token at `position`.
///
/// Any error from `value`, such as a missing attribute, aborts the whole
/// aggregation.
pub fn sum_by_index<'e, H: 'e, F>(
    entities: impl IntoIterator<Item = &'e Entity<H>>,
    position: isize,
    mut value: F,
) -> Result<IndexSums>
where
    F: FnMut(&Entity<H>) -> Result<f64>,
{
    let mut sums = IndexSums::new();
    for entity in entities {
        let key = IndexKey::from(entity.token(position)?);
        *sums.entry(key).or_insert(0.0) += value(entity)?;
    }
    Ok(sums)
}

/// Like [`sum_by_index`], keyed by the tokens at `first` and then `second`.
pub fn sum_by_two_indices<'e, H: 'e, F>(
    entities: impl IntoIterator<Item = &'e Entity<H>>,
    first: isize,
    second: isize,
    mut value: F,
) -> Result<TwoIndexSums>
where
    F: FnMut(&Entity<H>) -> Result<f64>,
{
    let mut sums = TwoIndexSums::new();
    for entity in entities {
        let outer = IndexKey::from(entity.token(first)?);
        let inner = IndexKey::from(entity.token(second)?);
        *sums
            .entry(outer)
            .or_default()
            .entry(inner)
            .or_insert(0.0) += value(entity)?;
    }
    Ok(sums)
}

/// Dense view of a [`TwoIndexSums`], one row per first token and one column
/// per second token. Combinations that never occur are zero.
///
/// This is the layout stacked bar charts want: each column is one stack.
#[derive(Debug, Clone, PartialEq)]
pub struct SumMatrix {
    /// First index keys, in order
    pub rows: Vec<IndexKey>,
    /// Second index keys, in order
    pub columns: Vec<IndexKey>,
    /// Sum per row and column, zero where nothing was summed
    pub values: Array2<f64>,
}

impl From<&TwoIndexSums> for SumMatrix {
    fn from(sums: &TwoIndexSums) -> Self {
        let rows = sums.keys().cloned().collect_vec();
        let columns = sums
            .values()
            .flat_map(|inner| inner.keys())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .cloned()
            .collect_vec();
        let values = Array2::from_shape_fn((rows.len(), columns.len()), |(i, j)| {
            sums[&rows[i]].get(&columns[j]).copied().unwrap_or(0.0)
        });
        Self {
            rows,
            columns,
            values,
        }
    }
}

impl SumMatrix {
    /// Column totals, i.e. the sums by the second index alone.
    pub fn column_totals(&self) -> Vec<f64> {
        self.values.sum_axis(ndarray::Axis(0)).to_vec()
    }
}

#[cfg(test)]
mod tests;
