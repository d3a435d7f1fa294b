//! Constructor-arity filter: decides which owned types a converter maps
//! field by field.

use crate::converter::{ConverterFile, MappedType};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;
use typemux_schema::{
    introspect::{Introspect, IntrospectionError},
    model::{Constructor, Group, SchemaPath},
};

///
/// ArityFilter
///
/// Introspects each type at most once per run. The memo lives and dies
/// with the filter.
///

pub struct ArityFilter<'a> {
    introspector: &'a dyn Introspect,
    memo: BTreeMap<SchemaPath, Constructor>,
}

impl<'a> ArityFilter<'a> {
    #[must_use]
    pub fn new(introspector: &'a dyn Introspect) -> Self {
        Self {
            introspector,
            memo: BTreeMap::new(),
        }
    }

    pub fn constructor(&mut self, path: &SchemaPath) -> Result<&Constructor, IntrospectionError> {
        if !self.memo.contains_key(path) {
            let constructor = self.introspector.constructor(path)?;
            debug!(path = %path, arity = constructor.arity(), "introspected schema type");
            self.memo.insert(path.clone(), constructor);
        }

        Ok(&self.memo[path])
    }

    /// True when the type's constructor takes at least one parameter.
    pub fn has_fields(&mut self, path: &SchemaPath) -> Result<bool, IntrospectionError> {
        self.constructor(path).map(Constructor::has_fields)
    }

    /// Partition a group's owned types into mapped and field-less lists,
    /// keeping first-occurrence order and dropping repeats.
    pub fn converter_file(
        &mut self,
        index: usize,
        group: &Group,
        owned: &[SchemaPath],
    ) -> Result<ConverterFile, IntrospectionError> {
        let mut seen = BTreeSet::new();
        let mut mapped = Vec::new();
        let mut fieldless = Vec::new();

        for path in owned {
            if !seen.insert(path) {
                continue;
            }

            let constructor = self.constructor(path)?;
            if constructor.has_fields() {
                mapped.push(MappedType {
                    path: path.clone(),
                    constructor: constructor.clone(),
                });
            } else {
                fieldless.push(path.clone());
            }
        }

        Ok(ConverterFile {
            group: index,
            name: group.name.clone(),
            mapper: group.mapper_name(),
            module: group.module_name(),
            mapped,
            fieldless,
        })
    }

    /// Number of distinct types introspected so far.
    #[must_use]
    pub fn introspected(&self) -> usize {
        self.memo.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use typemux_schema::model::TypeTable;

    struct Counting<'a> {
        table: &'a TypeTable,
        calls: Cell<usize>,
    }

    impl Introspect for Counting<'_> {
        fn constructor(&self, path: &SchemaPath) -> Result<Constructor, IntrospectionError> {
            self.calls.set(self.calls.get() + 1);
            self.table.constructor(path)
        }
    }

    fn table() -> TypeTable {
        TypeTable::new()
            .with("x::Pet", Constructor::Named(vec!["name".into()]))
            .with("x::Pair", Constructor::Tuple(2))
            .with("x::Marker", Constructor::Unit)
    }

    #[test]
    fn zero_arity_types_are_not_mapped() {
        let table = table();
        let mut filter = ArityFilter::new(&table);
        let group = Group::new("pets", ["x::Pet", "x::Marker", "x::Pair"]);

        let file = filter
            .converter_file(0, &group, &group.schemas)
            .expect("all types are known");

        let mapped: Vec<_> = file.mapped.iter().map(|m| m.path.as_str()).collect();
        assert_eq!(mapped, ["x::Pet", "x::Pair"]);
        assert_eq!(file.fieldless, [SchemaPath::new("x::Marker")]);
        assert_eq!(file.mapper, "PetsMapper");
        assert_eq!(file.module, "pets");
    }

    #[test]
    fn repeats_are_dropped_and_introspection_is_memoized() {
        let table = table();
        let counting = Counting {
            table: &table,
            calls: Cell::new(0),
        };
        let mut filter = ArityFilter::new(&counting);
        let owned = [
            SchemaPath::new("x::Pet"),
            SchemaPath::new("x::Pet"),
            SchemaPath::new("x::Marker"),
        ];

        let file = filter
            .converter_file(0, &Group::new("a", owned.clone()), &owned)
            .expect("known types");
        assert_eq!(file.mapped.len(), 1);

        assert!(filter.has_fields(&SchemaPath::new("x::Pet")).expect("memoized"));
        assert_eq!(counting.calls.get(), 2);
        assert_eq!(filter.introspected(), 2);
    }

    #[test]
    fn unknown_type_fails_the_filter() {
        let table = table();
        let mut filter = ArityFilter::new(&table);
        let owned = [SchemaPath::new("x::Ghost")];

        let err = filter
            .converter_file(0, &Group::new("a", owned.clone()), &owned)
            .expect_err("unknown type must fail");
        assert!(matches!(err, IntrospectionError::UnknownType(_)));
    }
}
