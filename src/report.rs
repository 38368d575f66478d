use core::fmt;
use std::{collections::BTreeMap, fs, path::Path};

use itertools::Itertools;
use polars::prelude::*;

use crate::{
    aggregate::{IndexSums, TwoIndexSums},
    config::EntityKind,
    error::{Error, Result},
    name::set_name,
};

/// Number of entities per set, ordered by set name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCounts {
    /// Whether the sets are variable or constraint sets
    pub kind: EntityKind,
    /// Number of entities per set name
    pub counts: BTreeMap<String, usize>,
}

impl SetCounts {
    fn new(kind: EntityKind, names: impl IntoIterator<Item = String>, open: char) -> Self {
        let counts = names
            .into_iter()
            .map(|name| set_name(&name, open).to_string())
            .counts()
            .into_iter()
            .collect();
        Self { kind, counts }
    }

    /// Count variable `names` per set.
    pub fn variables(names: impl IntoIterator<Item = String>, open: char) -> Self {
        Self::new(EntityKind::Variable, names, open)
    }

    /// Count constraint `names` per set.
    pub fn constraints(names: impl IntoIterator<Item = String>, open: char) -> Self {
        Self::new(EntityKind::Constraint, names, open)
    }
}

impl fmt::Display for SetCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind.as_str();
        let mut title = kind.to_string();
        title[..1].make_ascii_uppercase();
        writeln!(f, "{title} set, Number of {kind}s")?;
        for (set, count) in &self.counts {
            writeln!(f, "{set}, {count}")?;
        }
        Ok(())
    }
}

/// Attribute value by entity name, ordered by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttrValues(pub BTreeMap<String, f64>);

impl fmt::Display for AttrValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.0 {
            writeln!(f, "{name}, {value}")?;
        }
        Ok(())
    }
}

/// `key, sum` lines of a one-index aggregation.
pub struct Sums<'a>(pub &'a IndexSums);

impl fmt::Display for Sums<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, sum) in self.0 {
            writeln!(f, "{key}, {sum}")?;
        }
        Ok(())
    }
}

/// One block of `key, sum` lines per first index token.
pub struct NestedSums<'a>(pub &'a TwoIndexSums);

impl fmt::Display for NestedSums<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (outer, sums) in self.0 {
            writeln!(f, "\n{outer}")?;
            write!(f, "{}", Sums(sums))?;
        }
        Ok(())
    }
}

fn check_extension(path: &Path, extension: &'static str) -> Result<()> {
    match path.extension() {
        Some(ext) if ext == extension => Ok(()),
        _ => Err(Error::InvalidFileName(
            path.display().to_string(),
            extension,
        )),
    }
}

/// `Variable name,Value` (or `Constraint name,Value`) dataframe.
pub fn values_dataframe(kind: EntityKind, values: &AttrValues) -> Result<DataFrame> {
    let header = match kind {
        EntityKind::Variable => "Variable name",
        EntityKind::Constraint => "Constraint name",
    };
    let names = values.0.keys().cloned().collect_vec();
    let values = values.0.values().copied().collect_vec();
    Ok(DataFrame::new(vec![
        Series::new(header, names),
        Series::new("Value", values),
    ])?)
}

/// `Index,Value` dataframe of a one-index aggregation, in key order.
pub fn sums_dataframe(sums: &IndexSums) -> Result<DataFrame> {
    let keys = sums.keys().map(ToString::to_string).collect_vec();
    let values = sums.values().copied().collect_vec();
    Ok(df! {
        "Index" => keys,
        "Value" => values,
    }?)
}

fn write_csv(path: &Path, mut df: DataFrame) -> Result<()> {
    check_extension(path, "csv")?;
    let mut file = fs::File::create(path)?;
    CsvWriter::new(&mut file).finish(&mut df)?;
    Ok(())
}

/// Write entity names and attribute values to a csv file, overwriting it.
pub fn write_values_csv(
    path: impl AsRef<Path>,
    kind: EntityKind,
    values: &AttrValues,
) -> Result<()> {
    write_csv(path.as_ref(), values_dataframe(kind, values)?)
}

/// Write a one-index aggregation to a csv file, overwriting it.
pub fn write_sums_csv(path: impl AsRef<Path>, sums: &IndexSums) -> Result<()> {
    if sums.is_empty() {
        return Err(Error::EmptySelection("sums"));
    }
    write_csv(path.as_ref(), sums_dataframe(sums)?)
}

/// Write a one-index aggregation as `{"alias": [{"alias": {key: sum}}]}`,
/// the layout nvD3 charts read.
pub fn write_sums_json(path: impl AsRef<Path>, sums: &IndexSums, alias: &str) -> Result<()> {
    let path = path.as_ref();
    check_extension(path, "json")?;
    let data = BTreeMap::from([(alias, [BTreeMap::from([(alias, sums)])])]);
    serde_json::to_writer(fs::File::create(path)?, &data)?;
    Ok(())
}
