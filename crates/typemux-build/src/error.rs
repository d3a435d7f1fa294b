use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error as ThisError;
use typemux_core::DispatchTableError;
use typemux_schema::{ModelError, error::ErrorTree, introspect::IntrospectionError};

///
/// BuildError
///
/// Any failure aborts the whole run; no file of a failed run is written.
///

#[derive(Debug, ThisError)]
pub enum BuildError {
    #[error("model validation failed:\n{0}")]
    Validation(ErrorTree),

    #[error(transparent)]
    Introspection(#[from] IntrospectionError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("dispatch table invariant violated: {0}")]
    Dispatch(#[from] DispatchTableError),

    #[error("invalid {what} '{value}' for code emission")]
    Emit { what: &'static str, value: String },

    #[error("failed to write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl BuildError {
    pub(crate) fn emit(what: &'static str, value: impl Into<String>) -> Self {
        Self::Emit {
            what,
            value: value.into(),
        }
    }
}
