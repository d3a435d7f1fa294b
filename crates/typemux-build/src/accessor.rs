//! Lazily initialised per-group converter accessors on the dispatcher.

use crate::{converter::ident, error::BuildError};
use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;
use typemux_schema::{model::Group, naming};

///
/// Accessor
///
/// One slot field plus its accessor method. Every group gets one, whether
/// or not it owns any type.
///

pub struct Accessor {
    pub group: String,
    pub field: Ident,
    pub method: Ident,
    pub mapper: syn::Path,
}

impl Accessor {
    pub fn new(namespace: &syn::Path, group: &Group) -> Result<Self, BuildError> {
        let accessor = group.accessor_name();
        let field = ident(&accessor, "accessor")?;
        let method = ident(&naming::accessor_method(&accessor), "accessor method")?;
        let module = ident(&group.module_name(), "module")?;
        let mapper = ident(&group.mapper_name(), "mapper type")?;

        Ok(Self {
            group: group.name.clone(),
            field,
            method,
            mapper: syn::parse_quote!(#namespace::mapper::#module::#mapper),
        })
    }

    #[must_use]
    pub fn field(&self) -> TokenStream {
        let Self { field, mapper, .. } = self;

        quote! {
            #field: ::typemux::core::ConverterSlot<#mapper>,
        }
    }

    #[must_use]
    pub fn init(&self) -> TokenStream {
        let field = &self.field;

        quote! {
            #field: ::typemux::core::ConverterSlot::new(),
        }
    }

    /// Accessor method: constructs the converter on first use, then hands
    /// out the same instance.
    #[must_use]
    pub fn method(&self) -> TokenStream {
        let Self {
            field,
            method,
            mapper,
            ..
        } = self;
        let doc = format!(" Converter for the `{}` group, built on first use.", self.group);

        quote! {
            #[doc = #doc]
            #[must_use]
            pub fn #method(&self) -> &#mapper {
                self.#field.get_or_init(#mapper::new)
            }
        }
    }
}

/// One accessor per group, in input order.
pub fn accessors(namespace: &str, groups: &[Group]) -> Result<Vec<Accessor>, BuildError> {
    let namespace: syn::Path =
        syn::parse_str(namespace).map_err(|_| BuildError::emit("namespace", namespace))?;

    groups
        .iter()
        .map(|group| Accessor::new(&namespace, group))
        .collect()
}
