use crate::{
    introspect::{Introspect, IntrospectionError},
    model::{Constructor, SchemaPath},
};
use std::{collections::BTreeMap, fs, path::Path};
use syn::{Fields, Item, ext::IdentExt};

#[derive(Clone, Debug)]
enum Entry {
    Struct(Constructor),
    Other(&'static str),
}

///
/// SourceIntrospector
///
/// Reads constructor shapes straight out of Rust source. Each source is
/// mounted under a module path; inline `mod` blocks extend that path.
/// Only non-generic structs have a constructor the generator can use.
///

#[derive(Clone, Debug, Default)]
pub struct SourceIntrospector {
    entries: BTreeMap<SchemaPath, Entry>,
}

impl SourceIntrospector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_source(
        &mut self,
        module: &str,
        source: &str,
    ) -> Result<&mut Self, IntrospectionError> {
        let file = syn::parse_file(source).map_err(|source| IntrospectionError::Parse {
            module: module.to_string(),
            source,
        })?;
        self.collect(module, &file.items);

        Ok(self)
    }

    pub fn add_file(
        &mut self,
        module: &str,
        path: impl AsRef<Path>,
    ) -> Result<&mut Self, IntrospectionError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| IntrospectionError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        self.add_source(module, &source)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn collect(&mut self, module: &str, items: &[Item]) {
        for item in items {
            match item {
                Item::Struct(item) => {
                    let entry = if item.generics.params.is_empty() {
                        Entry::Struct(constructor_of(&item.fields))
                    } else {
                        Entry::Other("generic struct")
                    };
                    self.insert(module, &item.ident, entry);
                }
                Item::Enum(item) => self.insert(module, &item.ident, Entry::Other("enum")),
                Item::Union(item) => self.insert(module, &item.ident, Entry::Other("union")),
                Item::Mod(item) => {
                    if let Some((_, items)) = &item.content {
                        self.collect(&join(module, &item.ident.unraw().to_string()), items);
                    }
                }
                _ => {}
            }
        }
    }

    fn insert(&mut self, module: &str, ident: &syn::Ident, entry: Entry) {
        let path = SchemaPath::new(join(module, &ident.unraw().to_string()));
        self.entries.insert(path, entry);
    }
}

impl Introspect for SourceIntrospector {
    fn constructor(&self, path: &SchemaPath) -> Result<Constructor, IntrospectionError> {
        match self.entries.get(path) {
            Some(Entry::Struct(constructor)) => Ok(constructor.clone()),
            Some(Entry::Other(kind)) => Err(IntrospectionError::unsupported(
                path,
                format!("{kind} has no single constructor"),
            )),
            None => Err(IntrospectionError::UnknownType(path.clone())),
        }
    }
}

fn constructor_of(fields: &Fields) -> Constructor {
    match fields {
        Fields::Named(named) => Constructor::Named(
            named
                .named
                .iter()
                .filter_map(|field| field.ident.as_ref())
                .map(|ident| ident.unraw().to_string())
                .collect(),
        ),
        Fields::Unnamed(unnamed) => Constructor::Tuple(unnamed.unnamed.len()),
        Fields::Unit => Constructor::Unit,
    }
}

fn join(module: &str, ident: &str) -> String {
    if module.is_empty() {
        ident.to_string()
    } else {
        format!("{module}::{ident}")
    }
}
