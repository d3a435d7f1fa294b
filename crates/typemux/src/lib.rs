//! typemux: generated composite dispatchers over per-group object mappers.
//!
//! This is the public meta-crate. Generated code refers to the runtime
//! through `::typemux::core`, so downstream crates depend on **typemux**.
//!
//! It re-exports:
//!   - `typemux-core`   (runtime contracts, records, lazy slots, streams)
//!   - `typemux-schema` (input model and introspection)
//!   - `typemux-build`  (the generator, for build scripts)

pub use typemux_build as build;
pub use typemux_core as core;
pub use typemux_schema as schema;

//
// Macros
//

pub use typemux_build::build;

//
// Prelude
//

pub mod prelude {
    pub use typemux_core::{
        BatchMapper, MapperError, ObjectMapper, Path, Payload, Record, downcast_payload,
    };
}
