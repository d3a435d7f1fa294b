//! Identifier derivation for generated items, plus the identifier checks
//! validation runs before any of them reach code emission.

use convert_case::{Case, Casing};

#[must_use]
pub fn snake(name: &str) -> String {
    name.to_case(Case::Snake)
}

#[must_use]
pub fn pascal(name: &str) -> String {
    name.to_case(Case::Pascal)
}

/// Converter type generated for a group.
#[must_use]
pub fn mapper_type(group: &str) -> String {
    format!("{}Mapper", pascal(group))
}

/// Lazy accessor method generated for a group accessor name.
#[must_use]
pub fn accessor_method(accessor: &str) -> String {
    format!("mapper_{accessor}")
}

/// Ensure an identifier is non-empty and usable as a plain Rust identifier.
pub fn validate_ident(ident: &str) -> Result<(), String> {
    if ident.is_empty() {
        return Err("ident is empty".to_string());
    }

    syn::parse_str::<syn::Ident>(ident)
        .map(|_| ())
        .map_err(|_| format!("'{ident}' is not a valid identifier"))
}

/// Field names may be keywords, which are emitted as raw identifiers.
pub fn validate_field_name(name: &str) -> Result<(), String> {
    if syn::parse_str::<syn::Ident>(name).is_ok()
        || syn::parse_str::<syn::Ident>(&format!("r#{name}")).is_ok()
    {
        Ok(())
    } else {
        Err(format!("'{name}' is not a valid field name"))
    }
}

/// Ensure a schema path parses as a Rust path.
pub fn validate_path(path: &str) -> Result<(), String> {
    syn::parse_str::<syn::Path>(path)
        .map(|_| ())
        .map_err(|_| format!("'{path}' is not a valid type path"))
}
