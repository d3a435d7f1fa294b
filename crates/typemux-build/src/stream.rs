//! Streaming batch wrappers over the dispatcher's single-item operations.

use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

/// `BatchMapper` impl for the dispatcher. Both operations are lazy and
/// index-tagged; decode uses one type name for the whole batch, encode
/// routes every element by its own dynamic type name.
#[must_use]
pub fn generate(dispatcher: &Ident) -> TokenStream {
    quote! {
        impl ::typemux::core::BatchMapper for #dispatcher {
            fn decode_many<'a, I>(
                &'a self,
                type_name: &'a str,
                records: I,
            ) -> impl ::std::iter::Iterator<
                Item = ::std::result::Result<
                    (usize, ::std::boxed::Box<dyn ::typemux::core::Payload>),
                    ::typemux::core::MapperError,
                >,
            > + 'a
            where
                I: ::std::iter::IntoIterator<Item = ::typemux::core::Record> + 'a,
                I::IntoIter: 'a,
            {
                ::typemux::core::IndexedStream::new(
                    records,
                    move |record: ::typemux::core::Record| {
                        ::typemux::core::ObjectMapper::decode_one(self, type_name, record)
                    },
                )
            }

            fn encode_many<'a, I>(
                &'a self,
                objects: I,
            ) -> impl ::std::iter::Iterator<
                Item = ::std::result::Result<(usize, ::typemux::core::Record), ::typemux::core::MapperError>,
            > + 'a
            where
                I: ::std::iter::IntoIterator + 'a,
                I::IntoIter: 'a,
                I::Item: ::std::borrow::Borrow<dyn ::typemux::core::Payload>,
            {
                ::typemux::core::IndexedStream::new(objects, move |object: I::Item| {
                    ::typemux::core::ObjectMapper::encode_one(
                        self,
                        <I::Item as ::std::borrow::Borrow<dyn ::typemux::core::Payload>>::borrow(&object),
                    )
                })
            }
        }
    }
}
