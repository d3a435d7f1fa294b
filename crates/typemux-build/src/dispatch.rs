//! Decode and encode dispatch tables derived from the ownership map.

use crate::ownership::OwnershipMap;
use typemux_core::{DispatchTable, DispatchTableError};

///
/// DispatchTables
///
/// Both tables are built from the same ownership map and always carry the
/// same cases. Groups that own nothing get no case in either.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DispatchTables {
    pub decode: DispatchTable,
    pub encode: DispatchTable,
}

impl DispatchTables {
    pub fn build(ownership: &OwnershipMap) -> Result<Self, DispatchTableError> {
        let mut tables = Self::default();

        for group in 0..ownership.group_count() {
            let owned = ownership.owned_by(group);
            if owned.is_empty() {
                continue;
            }

            let types: Vec<String> = owned.iter().map(ToString::to_string).collect();
            tables.decode.push_case(group, types.clone())?;
            tables.encode.push_case(group, types)?;
        }

        Ok(tables)
    }

    /// Decode and encode route every name to the same group.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.decode.cases() == self.encode.cases()
    }
}
