//! Schema fixtures plus the dispatcher generated for them by `build.rs`.

extern crate self as typemux_testing_fixtures;

pub mod schema;

pub mod internal {
    include!(concat!(env!("OUT_DIR"), "/internal.rs"));
}

pub use internal::Dispatcher;
