use thiserror::Error as ThisError;

///
/// MapperError
///
/// Runtime failure raised by a dispatcher or by a group converter.
/// Dispatch never recovers from these internally; they always reach the
/// immediate caller.
///

#[derive(Debug, ThisError)]
pub enum MapperError {
    #[error("no converter registered for type '{type_name}'")]
    UnmatchedType { type_name: String },

    #[error("field '{field}' of '{type_name}' could not be converted: {source}")]
    Field {
        type_name: String,
        field: String,
        source: serde_json::Error,
    },

    #[error("expected an object of type '{expected}', found '{found}'")]
    TypeMismatch { expected: String, found: String },
}

impl MapperError {
    /// Construct an unmatched-type error for a name missing from the table.
    pub fn unmatched(type_name: impl Into<String>) -> Self {
        Self::UnmatchedType {
            type_name: type_name.into(),
        }
    }

    /// Construct a field conversion error.
    pub fn field(
        type_name: impl Into<String>,
        field: impl Into<String>,
        source: serde_json::Error,
    ) -> Self {
        Self::Field {
            type_name: type_name.into(),
            field: field.into(),
            source,
        }
    }

    /// Construct a type mismatch between the routed type and the object.
    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    #[must_use]
    pub const fn is_unmatched(&self) -> bool {
        matches!(self, Self::UnmatchedType { .. })
    }
}
