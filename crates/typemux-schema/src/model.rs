use crate::{ModelError, naming};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path};

///
/// SchemaPath
///
/// Fully-qualified schema type identifier. Normalised on construction
/// (surrounding whitespace and a leading `::` removed) so that identity
/// comparisons do not depend on how the path was spelled.
///

#[derive(Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SchemaPath(String);

impl SchemaPath {
    pub fn new(path: impl AsRef<str>) -> Self {
        let path = path.as_ref().trim();

        Self(path.strip_prefix("::").unwrap_or(path).to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Final path segment (the type's own name).
    #[must_use]
    pub fn ident(&self) -> &str {
        self.0.rsplit("::").next().unwrap_or(&self.0)
    }

    /// Everything before the final segment, if any.
    #[must_use]
    pub fn module(&self) -> Option<&str> {
        self.0.rsplit_once("::").map(|(module, _)| module)
    }
}

impl AsRef<str> for SchemaPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SchemaPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for SchemaPath {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

impl Serialize for SchemaPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SchemaPath {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

///
/// Constructor
///
/// Constructor signature of a schema type, as far as conversion cares.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Constructor {
    /// Braced struct; parameters in declaration order.
    Named(Vec<String>),

    /// Tuple struct with this many positional parameters.
    Tuple(usize),

    Unit,
}

impl Constructor {
    #[must_use]
    pub fn arity(&self) -> usize {
        match self {
            Self::Named(fields) => fields.len(),
            Self::Tuple(len) => *len,
            Self::Unit => 0,
        }
    }

    #[must_use]
    pub fn has_fields(&self) -> bool {
        self.arity() > 0
    }

    /// Record keys for each parameter; positional parameters use their index.
    #[must_use]
    pub fn params(&self) -> Vec<String> {
        match self {
            Self::Named(fields) => fields.clone(),
            Self::Tuple(len) => (0..*len).map(|i| i.to_string()).collect(),
            Self::Unit => Vec::new(),
        }
    }
}

///
/// TypeTable
///
/// Precomputed constructor metadata supplied alongside the groups.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TypeTable(BTreeMap<SchemaPath, Constructor>);

impl TypeTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<SchemaPath>, constructor: Constructor) {
        self.0.insert(path.into(), constructor);
    }

    #[must_use]
    pub fn with(mut self, path: impl Into<SchemaPath>, constructor: Constructor) -> Self {
        self.insert(path, constructor);
        self
    }

    #[must_use]
    pub fn get(&self, path: &SchemaPath) -> Option<&Constructor> {
        self.0.get(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SchemaPath, &Constructor)> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

///
/// Group
///
/// One unit of conversion responsibility: a named bundle of operations and
/// the schema types it claims, in claim order.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Group {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessor: Option<String>,

    #[serde(default)]
    pub schemas: Vec<SchemaPath>,
}

impl Group {
    pub fn new<P: Into<SchemaPath>>(
        name: impl Into<String>,
        schemas: impl IntoIterator<Item = P>,
    ) -> Self {
        Self {
            name: name.into(),
            accessor: None,
            schemas: schemas.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn with_accessor(mut self, accessor: impl Into<String>) -> Self {
        self.accessor = Some(accessor.into());
        self
    }

    /// Accessor identifier; derived from the name when not given.
    #[must_use]
    pub fn accessor_name(&self) -> String {
        self.accessor
            .clone()
            .unwrap_or_else(|| naming::snake(&self.name))
    }

    /// Type name of the group's generated converter.
    #[must_use]
    pub fn mapper_name(&self) -> String {
        naming::mapper_type(&self.name)
    }

    /// Module the group's converter file is mounted as.
    #[must_use]
    pub fn module_name(&self) -> String {
        naming::snake(&self.name)
    }
}

///
/// Model
///
/// Everything one generation run consumes: groups in input order plus the
/// optional precomputed type table.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Model {
    pub groups: Vec<Group>,

    #[serde(default, skip_serializing_if = "TypeTable::is_empty")]
    pub types: TypeTable,
}

impl Model {
    #[must_use]
    pub const fn new(groups: Vec<Group>) -> Self {
        Self {
            groups,
            types: TypeTable(BTreeMap::new()),
        }
    }

    #[must_use]
    pub fn with_types(mut self, types: TypeTable) -> Self {
        self.types = types;
        self
    }

    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_path_normalises_leading_colons() {
        let a = SchemaPath::new("::api::schema::Pet");
        let b = SchemaPath::new(" api::schema::Pet ");

        assert_eq!(a, b);
        assert_eq!(a.ident(), "Pet");
        assert_eq!(a.module(), Some("api::schema"));
        assert_eq!(SchemaPath::new("Pet").module(), None);
    }

    #[test]
    fn constructor_arity_and_params() {
        assert_eq!(Constructor::Unit.arity(), 0);
        assert!(!Constructor::Named(Vec::new()).has_fields());
        assert_eq!(Constructor::Tuple(2).params(), ["0", "1"]);
        assert_eq!(
            Constructor::Named(vec!["id".into(), "name".into()]).params(),
            ["id", "name"]
        );
    }

    #[test]
    fn group_names_are_derived_from_the_group_name() {
        let group = Group::new("Pets List", ["api::Pet"]);

        assert_eq!(group.accessor_name(), "pets_list");
        assert_eq!(group.module_name(), "pets_list");
        assert_eq!(group.mapper_name(), "PetsListMapper");
        assert_eq!(group.with_accessor("listing").accessor_name(), "listing");
    }

    #[test]
    fn model_loads_from_json() {
        let model = Model::from_json(
            r#"{
                "groups": [
                    { "name": "pets", "schemas": ["::api::Pet", "api::Tag"] },
                    { "name": "owners", "accessor": "people", "schemas": ["api::Owner"] }
                ],
                "types": {
                    "api::Pet": { "named": ["id", "name"] },
                    "api::Tag": "unit",
                    "api::Owner": { "tuple": 1 }
                }
            }"#,
        )
        .expect("model json should parse");

        assert_eq!(model.groups.len(), 2);
        assert_eq!(model.groups[0].schemas[0], SchemaPath::new("api::Pet"));
        assert_eq!(model.groups[1].accessor_name(), "people");
        assert_eq!(
            model.types.get(&"api::Tag".into()),
            Some(&Constructor::Unit)
        );
        assert_eq!(
            model.types.get(&"api::Owner".into()).map(Constructor::arity),
            Some(1)
        );
    }

    #[test]
    fn malformed_json_is_a_model_error() {
        let err = Model::from_json("{ \"groups\": 3 }").expect_err("groups must be a list");

        assert!(matches!(err, ModelError::Json(_)));
    }
}
