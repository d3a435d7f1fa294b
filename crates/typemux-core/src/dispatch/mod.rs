//! Exact-match dispatch from fully-qualified type name to owning group.

mod dynamic;

pub use dynamic::{DispatchPlan, DynamicDispatcher, MapperFactory};

use crate::error::MapperError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error as ThisError;

///
/// DispatchTableError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum DispatchTableError {
    #[error("dispatch case for group {group} owns no types")]
    EmptyCase { group: usize },

    #[error("type '{type_name}' is routed to both group {first} and group {second}")]
    DuplicateType {
        type_name: String,
        first: usize,
        second: usize,
    },

    #[error("dispatch case references group {group} but only {groups} groups are registered")]
    UnknownGroup { group: usize, groups: usize },
}

///
/// DispatchCase
///
/// One arm of the table: every type name owned by `group`, in claim order.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct DispatchCase {
    pub group: usize,
    pub types: Vec<String>,
}

///
/// DispatchTable
///
/// Ordered cases plus a name index. Every type name maps to exactly one
/// group and no case is empty.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DispatchTable {
    cases: Vec<DispatchCase>,
    index: HashMap<String, usize>,
}

impl DispatchTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cases(
        cases: impl IntoIterator<Item = DispatchCase>,
    ) -> Result<Self, DispatchTableError> {
        let mut table = Self::new();
        for case in cases {
            table.push_case(case.group, case.types)?;
        }

        Ok(table)
    }

    /// Append a case. The table is left untouched when the case is rejected.
    pub fn push_case(&mut self, group: usize, types: Vec<String>) -> Result<(), DispatchTableError> {
        if types.is_empty() {
            return Err(DispatchTableError::EmptyCase { group });
        }

        for (i, type_name) in types.iter().enumerate() {
            let first = self
                .index
                .get(type_name)
                .copied()
                .or_else(|| types[..i].contains(type_name).then_some(group));

            if let Some(first) = first {
                return Err(DispatchTableError::DuplicateType {
                    type_name: type_name.clone(),
                    first,
                    second: group,
                });
            }
        }

        for type_name in &types {
            self.index.insert(type_name.clone(), group);
        }
        self.cases.push(DispatchCase { group, types });

        Ok(())
    }

    /// Resolve the owning group, failing for names outside the table.
    pub fn route(&self, type_name: &str) -> Result<usize, MapperError> {
        self.group_of(type_name)
            .ok_or_else(|| MapperError::unmatched(type_name))
    }

    #[must_use]
    pub fn group_of(&self, type_name: &str) -> Option<usize> {
        self.index.get(type_name).copied()
    }

    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.index.contains_key(type_name)
    }

    #[must_use]
    pub fn cases(&self) -> &[DispatchCase] {
        &self.cases
    }

    /// Every routed type name, in case order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cases
            .iter()
            .flat_map(|case| case.types.iter().map(String::as_str))
    }

    /// Groups that have a case, in case order.
    pub fn groups(&self) -> impl Iterator<Item = usize> + '_ {
        self.cases.iter().map(|case| case.group)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(group: usize, types: &[&str]) -> DispatchCase {
        DispatchCase {
            group,
            types: types.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn routes_each_key_to_its_case_group() {
        let table = DispatchTable::from_cases([case(0, &["a::X", "a::Y"]), case(1, &["b::Z"])])
            .expect("disjoint cases should build");

        assert_eq!(table.route("a::Y").expect("Y is routed"), 0);
        assert_eq!(table.route("b::Z").expect("Z is routed"), 1);
        assert_eq!(table.keys().collect::<Vec<_>>(), ["a::X", "a::Y", "b::Z"]);
        assert_eq!(table.groups().collect::<Vec<_>>(), [0, 1]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn unknown_name_is_unmatched() {
        let table = DispatchTable::from_cases([case(0, &["a::X"])]).expect("table should build");

        let err = table.route("Unknown").expect_err("unknown names must fail");
        assert!(err.is_unmatched());
    }

    #[test]
    fn empty_case_is_rejected() {
        let err = DispatchTable::from_cases([case(3, &[])]).expect_err("empty case must fail");

        assert_eq!(err, DispatchTableError::EmptyCase { group: 3 });
    }

    #[test]
    fn overlapping_cases_are_rejected_without_partial_insert() {
        let mut table =
            DispatchTable::from_cases([case(0, &["a::X"])]).expect("first case should build");

        let err = table
            .push_case(1, vec!["b::Z".to_string(), "a::X".to_string()])
            .expect_err("overlap must fail");

        assert_eq!(
            err,
            DispatchTableError::DuplicateType {
                type_name: "a::X".to_string(),
                first: 0,
                second: 1,
            }
        );
        assert!(!table.contains("b::Z"), "rejected case must not leak keys");
        assert_eq!(table.cases().len(), 1);
    }

    #[test]
    fn repeated_name_inside_one_case_is_rejected() {
        let err = DispatchTable::from_cases([case(2, &["a::X", "a::X"])])
            .expect_err("repeated key must fail");

        assert!(matches!(
            err,
            DispatchTableError::DuplicateType { first: 2, second: 2, .. }
        ));
    }
}
