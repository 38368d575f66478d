use std::collections::BTreeMap;

use crate::{
    config::Brackets,
    error::{Error, Result},
    index::IndexTuple,
    name::{parse_name, set_name, ParseError},
};

/// A model entity with its name decomposed once.
#[derive(Debug, Clone)]
pub struct Entity<H> {
    /// Solver handle of the entity
    pub handle: H,
    /// Full name as stored in the model
    pub name: String,
    set: String,
    parsed: std::result::Result<IndexTuple, ParseError>,
}

impl<H> Entity<H> {
    /// Names without well-formed indices are kept; asking for their index
    /// tuple reports the parse error.
    pub fn new(handle: H, name: String, brackets: Brackets) -> Self {
        let set = set_name(&name, brackets.open).to_string();
        let parsed = parse_name(&name, brackets).map(|parsed| parsed.index);
        Self {
            handle,
            name,
            set,
            parsed,
        }
    }

    /// Set the entity belongs to, `harv` for `harv[sw,north,3]`.
    pub fn set(&self) -> &str {
        &self.set
    }

    /// Index tuple, an error for names without well-formed indices.
    pub fn index(&self) -> Result<&IndexTuple> {
        self.parsed.as_ref().map_err(|e| Error::Parse(e.clone()))
    }

    /// Token at `position`, failing if the name has no such index.
    pub fn token(&self, position: isize) -> Result<&str> {
        let index = self.index()?;
        index.get(position).ok_or_else(|| Error::IndexOutOfRange {
            name: self.name.clone(),
            position,
            len: index.len(),
        })
    }
}

/// Required index tokens by position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    values: BTreeMap<isize, String>,
    /// Select the entities that do not match instead
    pub exclude: bool,
}

impl FilterSpec {
    /// Filter that selects everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Also require `value` at `position`.
    pub fn with(mut self, position: isize, value: impl Into<String>) -> Self {
        self.values.insert(position, value.into());
        self
    }

    /// Select the entities that do not match instead.
    pub fn excluding(mut self) -> Self {
        self.exclude = true;
        self
    }

    /// Whether no position is filtered.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether every filtered position holds its required token.
    ///
    /// Every position is resolved before comparing, so a position outside
    /// the entity's tuple is an error even when another position mismatches.
    pub fn matches<H>(&self, entity: &Entity<H>) -> Result<bool> {
        let tokens = self
            .values
            .keys()
            .map(|&position| entity.token(position))
            .collect::<Result<Vec<_>>>()?;
        Ok(tokens.into_iter().zip(self.values.values()).all(|(token, value)| token == value))
    }
}

impl<S: Into<String>, const N: usize> From<[(isize, S); N]> for FilterSpec {
    fn from(values: [(isize, S); N]) -> Self {
        Self {
            values: values.into_iter().map(|(p, v)| (p, v.into())).collect(),
            exclude: false,
        }
    }
}

/// How entities are picked by set name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetMatch<'a> {
    /// Every set
    All,
    /// Set name equals the given text
    Exact(&'a str),
    /// Set name contains the given text
    Contains(&'a str),
}

impl<'a> SetMatch<'a> {
    /// `Exact` or `Contains` depending on `approx`, `All` for an empty name.
    pub fn by_name(name: &'a str, approx: bool) -> Self {
        match (name.is_empty(), approx) {
            (true, _) => SetMatch::All,
            (false, false) => SetMatch::Exact(name),
            (false, true) => SetMatch::Contains(name),
        }
    }

    /// Whether `entity` belongs to a matching set.
    pub fn matches<H>(&self, entity: &Entity<H>) -> bool {
        match self {
            SetMatch::All => true,
            SetMatch::Exact(name) => entity.set() == *name,
            SetMatch::Contains(name) => entity.set().contains(name),
        }
    }
}

/// Entities whose index tuple satisfies `filter`, in input order.
///
/// An empty filter selects everything; with `exclude` set, the entities not
/// matching are returned instead. Fails on the first entity that lacks a
/// filtered position.
pub fn select<'e, H, I>(entities: I, filter: &FilterSpec) -> Result<Vec<&'e Entity<H>>>
where
    I: IntoIterator<Item = &'e Entity<H>>,
    H: 'e,
{
    let mut selected = Vec::new();
    for entity in entities {
        let keep = filter.is_empty() || filter.matches(entity)?;
        if keep != (filter.exclude && !filter.is_empty()) {
            selected.push(entity);
        }
    }
    Ok(selected)
}

/// Owned variant of [`select`].
pub fn filter_entities<H>(entities: Vec<Entity<H>>, filter: &FilterSpec) -> Result<Vec<Entity<H>>> {
    if filter.is_empty() {
        return Ok(entities);
    }
    let mut selected = Vec::with_capacity(entities.len());
    for entity in entities {
        if filter.matches(&entity)? != filter.exclude {
            selected.push(entity);
        }
    }
    Ok(selected)
}
