//! Composite assembly: the dispatcher type with its slots, accessors,
//! single-item routing and batch wrappers.

use crate::{
    Plan,
    accessor::{self, Accessor},
    config::BuildConfig,
    converter::ident,
    error::BuildError,
    stream,
};
use proc_macro2::TokenStream;
use quote::quote;
use typemux_core::DispatchTable;

pub fn generate(plan: &Plan, config: &BuildConfig) -> Result<TokenStream, BuildError> {
    let dispatcher = ident(&config.dispatcher, "dispatcher type")?;
    let accessors = accessor::accessors(&config.namespace, &plan.groups)?;

    let fields = accessors.iter().map(Accessor::field);
    let inits = accessors.iter().map(Accessor::init);
    let methods = accessors.iter().map(Accessor::method);

    let decode_arms = arms(&plan.tables.decode, &accessors, |method| {
        quote!(::typemux::core::ObjectMapper::decode_one(self.#method(), type_name, record))
    });
    let encode_arms = arms(&plan.tables.encode, &accessors, |method| {
        quote!(::typemux::core::ObjectMapper::encode_one_as(self.#method(), object, type_name))
    });
    let batch = stream::generate(&dispatcher);

    Ok(quote! {
        /// Routes every schema type to the converter of the group that owns
        /// it. Converters are built on first use and kept for the lifetime
        /// of the dispatcher.
        #[derive(Debug)]
        pub struct #dispatcher {
            #( #fields )*
        }

        impl #dispatcher {
            #[must_use]
            pub const fn new() -> Self {
                Self {
                    #( #inits )*
                }
            }

            #( #methods )*
        }

        impl ::std::default::Default for #dispatcher {
            fn default() -> Self {
                Self::new()
            }
        }

        #[allow(unused_variables, clippy::match_single_binding)]
        impl ::typemux::core::ObjectMapper for #dispatcher {
            fn decode_one(
                &self,
                type_name: &str,
                record: ::typemux::core::Record,
            ) -> ::std::result::Result<
                ::std::boxed::Box<dyn ::typemux::core::Payload>,
                ::typemux::core::MapperError,
            > {
                match type_name {
                    #decode_arms
                    _ => ::std::result::Result::Err(
                        ::typemux::core::MapperError::unmatched(type_name),
                    ),
                }
            }

            fn encode_one_as(
                &self,
                object: &dyn ::typemux::core::Payload,
                type_name: &str,
            ) -> ::std::result::Result<::typemux::core::Record, ::typemux::core::MapperError> {
                match type_name {
                    #encode_arms
                    _ => ::std::result::Result::Err(
                        ::typemux::core::MapperError::unmatched(type_name),
                    ),
                }
            }
        }

        #batch
    })
}

// one arm per case: every owned name of the group routes to its accessor
fn arms(
    table: &DispatchTable,
    accessors: &[Accessor],
    call: impl Fn(&syn::Ident) -> TokenStream,
) -> TokenStream {
    let mut tokens = quote!();

    for case in table.cases() {
        let Some(accessor) = accessors.get(case.group) else {
            continue;
        };
        let keys = &case.types;
        let body = call(&accessor.method);

        tokens.extend(quote! {
            #( #keys )|* => #body,
        });
    }

    tokens
}
