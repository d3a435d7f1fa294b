//! Rendered output and its on-disk layout.

use crate::error::BuildError;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use std::{
    fs,
    path::Path,
};
use tracing::debug;

pub const INDEX_FILE: &str = "internal.rs";
pub const DISPATCHER_FILE: &str = "internal/dispatcher.rs";
pub const MAPPER_DIR: &str = "internal/mapper";

const HEADER: &str = "// @generated by typemux. Do not edit.\n";

///
/// IncludeBase
///
/// How the index file locates the files it mounts.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum IncludeBase {
    /// Relative to `OUT_DIR`, for build scripts.
    #[default]
    OutDir,

    /// Relative to the index file itself.
    Relative,
}

///
/// GeneratedFile
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratedFile {
    pub path: String,
    pub module: Option<String>,
    pub contents: String,
}

impl GeneratedFile {
    #[must_use]
    pub fn new(path: impl Into<String>, module: Option<String>, tokens: &TokenStream) -> Self {
        Self {
            path: path.into(),
            module,
            contents: format!("{HEADER}{tokens}\n"),
        }
    }
}

///
/// GeneratedFileSet
///
/// One converter file per group (owning or not) plus the dispatcher.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratedFileSet {
    converters: Vec<GeneratedFile>,
    dispatcher: GeneratedFile,
}

impl GeneratedFileSet {
    #[must_use]
    pub const fn new(converters: Vec<GeneratedFile>, dispatcher: GeneratedFile) -> Self {
        Self {
            converters,
            dispatcher,
        }
    }

    #[must_use]
    pub fn converters(&self) -> &[GeneratedFile] {
        &self.converters
    }

    #[must_use]
    pub const fn dispatcher(&self) -> &GeneratedFile {
        &self.dispatcher
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.converters.iter().chain(std::iter::once(&self.dispatcher))
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&GeneratedFile> {
        self.iter().find(|file| file.path == path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.converters.len() + 1
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Module file that mounts every converter under `mapper` and pulls the
    /// dispatcher in at its root.
    #[must_use]
    pub fn index(&self, base: IncludeBase) -> String {
        let modules = self.converters.iter().filter_map(|file| {
            let module = format_ident!("{}", file.module.as_deref()?);
            let include = include(base, &file.path);

            Some(quote! {
                pub mod #module {
                    #include
                }
            })
        });
        let dispatcher = include(base, &self.dispatcher.path);

        let tokens = quote! {
            pub mod mapper {
                #( #modules )*
            }

            #dispatcher
        };

        format!("{HEADER}{tokens}\n")
    }

    /// Write every file plus the index under `dir`. Files are staged in a
    /// temporary directory inside `dir` and only moved into place once all
    /// of them were written, so a failed write leaves `dir` as it was.
    pub fn write_to(&self, dir: &Path, base: IncludeBase) -> Result<(), BuildError> {
        fs::create_dir_all(dir).map_err(|source| io_error(dir, source))?;
        let staging = tempfile::tempdir_in(dir).map_err(|source| io_error(dir, source))?;

        let index = self.index(base);
        let files: Vec<(&str, &str)> = self
            .iter()
            .map(|file| (file.path.as_str(), file.contents.as_str()))
            .chain(std::iter::once((INDEX_FILE, index.as_str())))
            .collect();

        for (path, contents) in &files {
            write(&staging.path().join(path), contents)?;
        }
        for (path, _) in &files {
            promote(&staging.path().join(path), &dir.join(path))?;
        }

        debug!(dir = %dir.display(), files = files.len(), "wrote generated files");

        Ok(())
    }
}

fn include(base: IncludeBase, path: &str) -> TokenStream {
    match base {
        IncludeBase::OutDir => {
            let path = format!("/{path}");
            quote!(include!(concat!(env!("OUT_DIR"), #path));)
        }
        IncludeBase::Relative => {
            // included paths resolve against the directory of the index file
            quote!(include!(#path);)
        }
    }
}

fn io_error(path: &Path, source: std::io::Error) -> BuildError {
    BuildError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn create_parent(path: &Path) -> Result<(), BuildError> {
    match path.parent() {
        Some(parent) => fs::create_dir_all(parent).map_err(|source| io_error(parent, source)),
        None => Ok(()),
    }
}

fn write(path: &Path, contents: &str) -> Result<(), BuildError> {
    create_parent(path)?;
    fs::write(path, contents).map_err(|source| io_error(path, source))
}

// staging lives inside the target dir, so this is a same-filesystem rename
fn promote(from: &Path, to: &Path) -> Result<(), BuildError> {
    create_parent(to)?;
    fs::rename(from, to).map_err(|source| io_error(to, source))
}
