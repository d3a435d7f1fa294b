//! Runtime support for typemux-generated dispatchers and their converters.
//!
//! ## Crate layout
//! - `dispatch`: exact-match dispatch tables and the runtime `DynamicDispatcher`.
//! - `error`: the runtime `MapperError` taxonomy.
//! - `mapper`: `ObjectMapper` / `BatchMapper`, the contract every generated
//!   converter and dispatcher implements.
//! - `payload`: object-safe payload identity (`Path`, `Payload`).
//! - `record`: the wire record plus field readers/writers used by generated arms.
//! - `slot`: per-instance lazy converter slots.
//! - `stream`: index-preserving lazy batch iterators.
//!
//! Generated code only refers to items re-exported from the crate root.

pub mod dispatch;
pub mod error;
pub mod mapper;
pub mod payload;
pub mod record;
pub mod slot;
pub mod stream;

pub use dispatch::{DispatchCase, DispatchPlan, DispatchTable, DispatchTableError, DynamicDispatcher};
pub use error::MapperError;
pub use mapper::{BatchMapper, ObjectMapper};
pub use payload::{Path, Payload, downcast_payload};
pub use record::{Fields, Record, RecordBuilder};
pub use slot::ConverterSlot;
pub use stream::IndexedStream;
