//! Model validation: identifier and uniqueness checks that must hold
//! before any code is emitted. Type ownership conflicts are not checked
//! here; they are resolved by the generator.

use crate::{
    err,
    error::ErrorTree,
    model::{Constructor, Group, Model, TypeTable},
    naming,
};
use std::collections::{BTreeMap, BTreeSet};

/// Run full model validation, collecting every problem before failing.
pub fn validate_model(model: &Model) -> Result<(), ErrorTree> {
    let mut errs = ErrorTree::new();

    for (i, group) in model.groups.iter().enumerate() {
        errs.merge_for(group_route(i, group), validate_group(group));
    }
    validate_unique_names(&model.groups, &mut errs);
    validate_types(&model.types, &mut errs);

    errs.result()
}

fn group_route(index: usize, group: &Group) -> String {
    if group.name.is_empty() {
        format!("groups[{index}]")
    } else {
        group.name.clone()
    }
}

fn validate_group(group: &Group) -> ErrorTree {
    let mut errs = ErrorTree::new();

    if group.name.trim().is_empty() {
        err!(errs, "group name is empty");
        return errs;
    }

    if let Err(e) = naming::validate_ident(&group.accessor_name()) {
        err!(errs, "accessor: {e}");
    }
    if let Err(e) = naming::validate_ident(&group.module_name()) {
        err!(errs, "module name: {e}");
    }
    if let Err(e) = naming::validate_ident(&group.mapper_name()) {
        err!(errs, "converter name: {e}");
    }

    for schema in &group.schemas {
        if let Err(e) = naming::validate_path(schema.as_str()) {
            errs.add(e);
        }
    }

    errs
}

// Generated items are named after these; two groups sharing one would
// produce colliding fields, methods or modules.
fn validate_unique_names(groups: &[Group], errs: &mut ErrorTree) {
    let checks: [(&str, fn(&Group) -> String); 3] = [
        ("name", |g| g.name.clone()),
        ("accessor", Group::accessor_name),
        ("module name", Group::module_name),
    ];

    for (label, key) in checks {
        let mut seen = BTreeMap::<String, &str>::new();
        for group in groups.iter().filter(|g| !g.name.trim().is_empty()) {
            let value = key(group);
            if let Some(prev) = seen.insert(value.clone(), &group.name) {
                err!(
                    errs,
                    "duplicate group {label} '{value}' for '{prev}' and '{}'",
                    group.name
                );
            }
        }
    }
}

fn validate_types(types: &TypeTable, errs: &mut ErrorTree) {
    for (path, constructor) in types.iter() {
        let mut type_errs = ErrorTree::new();

        if let Err(e) = naming::validate_path(path.as_str()) {
            type_errs.add(e);
        }

        if let Constructor::Named(fields) = constructor {
            let mut seen = BTreeSet::new();
            for field in fields {
                if let Err(e) = naming::validate_field_name(field) {
                    type_errs.add(e);
                }
                if !seen.insert(field.as_str()) {
                    err!(type_errs, "duplicate field '{field}'");
                }
            }
        }

        errs.merge_for(path.to_string(), type_errs);
    }
}
