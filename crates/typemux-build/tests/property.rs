use proptest::prelude::*;
use std::collections::BTreeSet;
use typemux_build::{BuildConfig, Generator, Plan, generate};
use typemux_schema::model::{Constructor, Group, Model, SchemaPath, TypeTable};

const TYPES: usize = 8;

fn type_name(i: usize) -> String {
    format!("app::T{i}")
}

// every third type has no constructor parameters
fn types() -> TypeTable {
    (0..TYPES).fold(TypeTable::new(), |table, i| {
        let constructor = match i % 3 {
            0 => Constructor::Unit,
            1 => Constructor::Named(vec!["value".to_string()]),
            _ => Constructor::Tuple(2),
        };
        table.with(type_name(i), constructor)
    })
}

fn arb_model() -> impl Strategy<Value = Model> {
    prop::collection::vec(prop::collection::vec(0..TYPES, 0..6), 0..6).prop_map(|claims| {
        let groups = claims
            .into_iter()
            .enumerate()
            .map(|(i, claims)| Group::new(format!("g{i}"), claims.into_iter().map(type_name)))
            .collect();

        Model::new(groups).with_types(types())
    })
}

fn plan(model: &Model) -> Plan {
    let config = BuildConfig::default();
    Generator::new(model, &model.types, &config)
        .plan()
        .expect("generated models are valid")
}

proptest! {
    #[test]
    fn decode_and_encode_tables_agree(model in arb_model()) {
        let plan = plan(&model);

        prop_assert!(plan.tables.is_consistent());
        for (path, owner) in plan.ownership.iter() {
            prop_assert_eq!(plan.tables.decode.group_of(path.as_str()), Some(owner));
            prop_assert_eq!(plan.tables.encode.group_of(path.as_str()), Some(owner));
        }
    }

    #[test]
    fn first_claiming_group_owns_each_type(model in arb_model()) {
        let plan = plan(&model);

        for i in 0..TYPES {
            let path = SchemaPath::new(type_name(i));
            let first = model.groups.iter().position(|g| g.schemas.contains(&path));
            prop_assert_eq!(plan.ownership.owner_of(&path), first);
        }
    }

    #[test]
    fn groups_without_owned_types_have_no_case(model in arb_model()) {
        let plan = plan(&model);
        let routed: BTreeSet<usize> = plan.tables.decode.groups().collect();

        for group in 0..model.groups.len() {
            let owns = !plan.ownership.owned_by(group).is_empty();
            prop_assert_eq!(routed.contains(&group), owns);
        }
    }

    #[test]
    fn converter_lists_hold_owned_types_with_fields(model in arb_model()) {
        let plan = plan(&model);

        for file in &plan.files {
            let owned = plan.ownership.owned_by(file.group);
            let mut seen = BTreeSet::new();

            for mapped in &file.mapped {
                prop_assert!(owned.contains(&mapped.path));
                prop_assert!(mapped.constructor.has_fields());
                prop_assert!(seen.insert(mapped.path.clone()), "duplicate in file list");
            }
            for path in &file.fieldless {
                prop_assert!(owned.contains(path));
                prop_assert!(!model.types.get(path).is_some_and(Constructor::has_fields));
            }
            prop_assert_eq!(file.mapped.len() + file.fieldless.len(), owned.len());
        }
    }

    #[test]
    fn every_group_gets_a_converter_and_accessor(model in arb_model()) {
        let files = generate(&model, &model.types, &BuildConfig::default())
            .expect("generated models are valid");
        let dispatcher = &files.dispatcher().contents;

        prop_assert_eq!(files.converters().len(), model.groups.len());
        for group in &model.groups {
            let accessor = format!("pub fn mapper_{}", group.accessor_name());
            prop_assert!(dispatcher.contains(&accessor));
        }
    }
}
