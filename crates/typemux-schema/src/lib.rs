//! Input model for the typemux generator: operation groups, the schema
//! types they claim, and the generation-time introspection that tells the
//! generator which of those types carry constructor parameters.

pub mod error;
pub mod introspect;
pub mod model;
pub mod naming;
pub mod validate;

use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        err,
        error::ErrorTree,
        introspect::{Chain, Introspect, IntrospectionError, SourceIntrospector},
        model::{Constructor, Group, Model, SchemaPath, TypeTable},
    };
    pub use serde::{Deserialize, Serialize};
}

///
/// ModelError
///

#[derive(Debug, ThisError)]
pub enum ModelError {
    #[error("invalid model json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read model '{}': {source}", path.display())]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}
