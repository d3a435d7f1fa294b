//! Generation-time constructor introspection.
//!
//! The generator needs one fact per claimed schema type: whether its
//! constructor takes any parameters (and which). Types it cannot answer
//! for are fatal to the run.

mod source;

pub use source::SourceIntrospector;

use crate::model::{Constructor, SchemaPath, TypeTable};
use std::path::PathBuf;
use thiserror::Error as ThisError;

///
/// IntrospectionError
///

#[derive(Debug, ThisError)]
pub enum IntrospectionError {
    #[error("type '{0}' is unknown to the introspector")]
    UnknownType(SchemaPath),

    #[error("type '{path}' cannot be introspected: {reason}")]
    Unsupported { path: SchemaPath, reason: String },

    #[error("failed to parse source for module '{module}': {source}")]
    Parse { module: String, source: syn::Error },

    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl IntrospectionError {
    pub fn unsupported(path: &SchemaPath, reason: impl Into<String>) -> Self {
        Self::Unsupported {
            path: path.clone(),
            reason: reason.into(),
        }
    }
}

///
/// Introspect
///

pub trait Introspect {
    fn constructor(&self, path: &SchemaPath) -> Result<Constructor, IntrospectionError>;
}

impl<T: Introspect + ?Sized> Introspect for &T {
    fn constructor(&self, path: &SchemaPath) -> Result<Constructor, IntrospectionError> {
        (**self).constructor(path)
    }
}

impl Introspect for TypeTable {
    fn constructor(&self, path: &SchemaPath) -> Result<Constructor, IntrospectionError> {
        self.get(path)
            .cloned()
            .ok_or_else(|| IntrospectionError::UnknownType(path.clone()))
    }
}

///
/// Chain
///
/// Consults each introspector in turn. Only `UnknownType` falls through;
/// any other failure is final.
///

#[derive(Default)]
pub struct Chain<'a> {
    links: Vec<&'a dyn Introspect>,
}

impl<'a> Chain<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, introspector: &'a dyn Introspect) -> Self {
        self.links.push(introspector);
        self
    }
}

impl Introspect for Chain<'_> {
    fn constructor(&self, path: &SchemaPath) -> Result<Constructor, IntrospectionError> {
        for link in &self.links {
            match link.constructor(path) {
                Err(IntrospectionError::UnknownType(_)) => {}
                other => return other,
            }
        }

        Err(IntrospectionError::UnknownType(path.clone()))
    }
}
