//! Per-group converter files.

use crate::error::BuildError;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Ident, Index, Member};
use typemux_schema::model::{Constructor, SchemaPath};

///
/// MappedType
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MappedType {
    pub path: SchemaPath,
    pub constructor: Constructor,
}

///
/// ConverterFile
///
/// Everything needed to render one group's converter. `mapped` holds the
/// owned types with constructor parameters; `fieldless` the owned types
/// that are constructed without any.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConverterFile {
    pub group: usize,
    pub name: String,
    pub mapper: String,
    pub module: String,
    pub mapped: Vec<MappedType>,
    pub fieldless: Vec<SchemaPath>,
}

impl ConverterFile {
    /// Output path relative to the generation root.
    #[must_use]
    pub fn relative_path(&self) -> String {
        format!("{}/{}.rs", crate::file::MAPPER_DIR, self.module)
    }

    /// Mapped type names, the list the converter implements field mapping for.
    pub fn mapped_names(&self) -> impl Iterator<Item = &str> {
        self.mapped.iter().map(|m| m.path.as_str())
    }
}

///
/// ConverterEmitter
///
/// Renders the body of a converter file. The generator only fixes the
/// file's location and type name; how fields are mapped is up to the
/// emitter.
///

pub trait ConverterEmitter {
    fn emit(&self, file: &ConverterFile) -> Result<TokenStream, BuildError>;
}

///
/// FieldMapper
///
/// Default emitter: maps record keys to constructor parameters by name
/// (or by position for tuple structs) through serde.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct FieldMapper;

impl ConverterEmitter for FieldMapper {
    fn emit(&self, file: &ConverterFile) -> Result<TokenStream, BuildError> {
        let mapper = ident(&file.mapper, "mapper type")?;
        let doc = format!(" Converter for the `{}` group.", file.name);

        let mut decode_arms = quote!();
        let mut encode_arms = quote!();

        for mapped in &file.mapped {
            let key = mapped.path.as_str();
            let ty = type_path(&mapped.path)?;
            let params = mapped.constructor.params();
            let members = members(&mapped.constructor)?;

            let construct = match &mapped.constructor {
                Constructor::Named(_) => quote! {
                    #ty { #( #members: fields.take(#params)?, )* }
                },
                _ => quote! {
                    #ty( #( fields.take(#params)?, )* )
                },
            };

            decode_arms.extend(quote! {
                #key => {
                    let mut fields = ::typemux::core::Fields::new(type_name, record);
                    ::std::result::Result::Ok(::std::boxed::Box::new(#construct))
                }
            });
            encode_arms.extend(quote! {
                #key => {
                    let object = ::typemux::core::downcast_payload::<#ty>(object, type_name)?;
                    let mut record = ::typemux::core::RecordBuilder::new(type_name);
                    #( record.put(#params, &object.#members)?; )*
                    ::std::result::Result::Ok(record.finish())
                }
            });
        }

        for path in &file.fieldless {
            let key = path.as_str();
            let ty = type_path(path)?;

            decode_arms.extend(quote! {
                #key => ::std::result::Result::Ok(::std::boxed::Box::new(#ty {})),
            });
            encode_arms.extend(quote! {
                #key => ::typemux::core::downcast_payload::<#ty>(object, type_name)
                    .map(|_| ::typemux::core::Record::new()),
            });
        }

        Ok(quote! {
            #[doc = #doc]
            #[derive(Clone, Copy, Debug, Default)]
            pub struct #mapper;

            impl #mapper {
                #[must_use]
                pub const fn new() -> Self {
                    Self
                }
            }

            #[allow(unused_variables, unused_mut, clippy::match_single_binding)]
            impl ::typemux::core::ObjectMapper for #mapper {
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
        })
    }
}

/// Plain identifier for a name validation already accepted.
pub(crate) fn ident(name: &str, what: &'static str) -> Result<Ident, BuildError> {
    syn::parse_str::<Ident>(name).map_err(|_| BuildError::emit(what, name))
}

/// Field identifier; keywords become raw identifiers.
pub(crate) fn field_ident(name: &str) -> Result<Ident, BuildError> {
    if let Ok(ident) = syn::parse_str::<Ident>(name) {
        return Ok(ident);
    }

    syn::parse_str::<Ident>(&format!("r#{name}"))
        .map_err(|_| BuildError::emit("field name", name))
}

pub(crate) fn type_path(path: &SchemaPath) -> Result<syn::Path, BuildError> {
    syn::parse_str(path.as_str()).map_err(|_| BuildError::emit("type path", path.as_str()))
}

fn members(constructor: &Constructor) -> Result<Vec<Member>, BuildError> {
    match constructor {
        Constructor::Named(fields) => fields
            .iter()
            .map(|field| field_ident(field).map(Member::Named))
            .collect(),
        Constructor::Tuple(arity) => Ok((0..*arity).map(|i| Member::Unnamed(Index::from(i))).collect()),
        Constructor::Unit => Ok(Vec::new()),
    }
}
