//! First-seen-wins assignment of schema types to groups.

use std::collections::BTreeMap;
use typemux_schema::model::{Group, SchemaPath};

///
/// DroppedClaim
///
/// A claim that lost to an earlier group (or to an earlier claim of the
/// same group). Kept for reporting only; it never routes anywhere.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DroppedClaim {
    pub path: SchemaPath,
    pub group: usize,
    pub owner: usize,
}

///
/// OwnershipMap
///
/// Every claimed type has exactly one owner: the first group in input
/// order whose claim list contains it.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct OwnershipMap {
    owners: BTreeMap<SchemaPath, usize>,
    owned: Vec<Vec<SchemaPath>>,
    dropped: Vec<DroppedClaim>,
}

impl OwnershipMap {
    /// Scan groups in order, then each group's claims in order.
    #[must_use]
    pub fn resolve(groups: &[Group]) -> Self {
        let mut map = Self {
            owners: BTreeMap::new(),
            owned: vec![Vec::new(); groups.len()],
            dropped: Vec::new(),
        };

        for (index, group) in groups.iter().enumerate() {
            for path in &group.schemas {
                if let Some(&owner) = map.owners.get(path) {
                    map.dropped.push(DroppedClaim {
                        path: path.clone(),
                        group: index,
                        owner,
                    });
                } else {
                    map.owners.insert(path.clone(), index);
                    map.owned[index].push(path.clone());
                }
            }
        }

        map
    }

    #[must_use]
    pub fn owner_of(&self, path: &SchemaPath) -> Option<usize> {
        self.owners.get(path).copied()
    }

    /// Types owned by `group`, in claim order. Unknown groups own nothing.
    #[must_use]
    pub fn owned_by(&self, group: usize) -> &[SchemaPath] {
        self.owned.get(group).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn dropped(&self) -> &[DroppedClaim] {
        &self.dropped
    }

    #[must_use]
    pub const fn group_count(&self) -> usize {
        self.owned.len()
    }

    /// Number of distinct claimed types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// `(type, owner)` pairs in group order, then claim order.
    pub fn iter(&self) -> impl Iterator<Item = (&SchemaPath, usize)> {
        self.owned
            .iter()
            .enumerate()
            .flat_map(|(group, paths)| paths.iter().map(move |path| (path, group)))
    }
}
