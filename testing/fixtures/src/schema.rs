//! Types claimed by `schema/model.json`. Fields are public so the
//! generated converters can construct and read them.

use serde::{Deserialize, Serialize};
use typemux::core::Path;

macro_rules! schema_path {
    ($($ty:ident),* $(,)?) => {
        $(
            impl Path for $ty {
                const PATH: &'static str =
                    concat!("typemux_testing_fixtures::schema::", stringify!($ty));
            }
        )*
    };
}

schema_path!(Pet, Owner, Tag, Person, Pair, Keyword, Marker);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pet {
    pub name: String,
    pub age: u8,
    pub nickname: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Owner {
    pub name: String,
    pub pets: Vec<String>,
}

/// No constructor parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub address: Address,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct Address {
    pub city: String,
    pub zip: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pair(pub String, pub i64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keyword {
    pub r#type: String,
    pub r#match: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Marker {}
